//! Locally persisted form draft

use serde::{Deserialize, Serialize};

use crate::util::unix_timestamp_ms;

/// Drafts older than 24 hours are silently discarded on restore.
pub const DRAFT_TTL_MS: i64 = 24 * 60 * 60 * 1000;

/// A snapshot of in-progress recipe form input.
///
/// Field values are kept in their typed string form; `cooking_time` is only
/// converted to minutes at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub cooking_time: String,
    #[serde(default)]
    pub category: String,
    /// Capture timestamp (Unix ms)
    pub saved_at: i64,
}

impl RecipeDraft {
    /// Capture a draft with the current timestamp.
    #[must_use]
    pub fn captured_now(
        title: impl Into<String>,
        description: impl Into<String>,
        ingredients: impl Into<String>,
        instructions: impl Into<String>,
        cooking_time: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ingredients: ingredients.into(),
            instructions: instructions.into(),
            cooking_time: cooking_time.into(),
            category: category.into(),
            saved_at: unix_timestamp_ms(),
        }
    }

    /// Whether this draft is still within its 24-hour restore window.
    #[must_use]
    pub fn is_fresh(&self, now_ms: i64) -> bool {
        now_ms.saturating_sub(self.saved_at) < DRAFT_TTL_MS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_within_24_hours() {
        let draft = RecipeDraft {
            saved_at: 1_000,
            ..Default::default()
        };
        assert!(draft.is_fresh(1_000 + DRAFT_TTL_MS - 1));
    }

    #[test]
    fn stale_at_24_hour_boundary() {
        let draft = RecipeDraft {
            saved_at: 1_000,
            ..Default::default()
        };
        assert!(!draft.is_fresh(1_000 + DRAFT_TTL_MS));
    }

    #[test]
    fn draft_json_roundtrip_preserves_fields() {
        let draft = RecipeDraft::captured_now("Борщ", "Опис", "Буряк", "Варити", "60", "Супи");
        let raw = serde_json::to_string(&draft).unwrap();
        let restored: RecipeDraft = serde_json::from_str(&raw).unwrap();
        assert_eq!(draft, restored);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let restored: RecipeDraft = serde_json::from_str(r#"{"saved_at": 42}"#).unwrap();
        assert_eq!(restored.title, "");
        assert_eq!(restored.category, "");
        assert_eq!(restored.saved_at, 42);
    }
}
