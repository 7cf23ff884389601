//! Client configuration for the hosted backend.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

/// Public endpoint/key pair required to reach the hosted backend.
///
/// These are safe-to-ship values; secret credentials never live here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(default)]
    pub supabase_url: Option<String>,
    #[serde(default)]
    pub supabase_anon_key: Option<String>,
}

impl ClientConfig {
    /// Validated (url, anon key) pair, or an error naming what is missing.
    pub fn resolve(&self) -> Result<(String, String)> {
        let url = normalize_text_option(self.supabase_url.clone())
            .ok_or_else(|| Error::InvalidInput("Supabase URL is not configured".to_string()))?;
        if !is_http_url(&url) {
            return Err(Error::InvalidInput(
                "Supabase URL must include http:// or https://".to_string(),
            ));
        }

        let anon_key = normalize_text_option(self.supabase_anon_key.clone())
            .ok_or_else(|| Error::InvalidInput("Supabase anon key is not configured".to_string()))?;

        Ok((url.trim_end_matches('/').to_string(), anon_key))
    }
}
