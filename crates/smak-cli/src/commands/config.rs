use std::env;

use smak_core::util::is_http_url;

use crate::cli::ConfigCommands;
use crate::config_profiles::{normalize_text_option, CliProfile, CliProfilesConfig};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            profile,
            supabase_url,
            supabase_anon_key,
            font_size,
            no_activate,
        } => run_config_init(
            profile.as_deref().or(global_profile),
            supabase_url,
            supabase_anon_key,
            font_size,
            no_activate,
        ),
        ConfigCommands::Show { profile } => {
            run_config_show(profile.as_deref().or(global_profile))
        }
    }
}

fn run_config_init(
    profile_name: Option<&str>,
    supabase_url: Option<String>,
    supabase_anon_key: Option<String>,
    font_size: Option<u32>,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load()?;
    let profile_name = config.resolve_profile_name(profile_name);
    let existing_profile = config.profile(&profile_name).cloned().unwrap_or_default();

    let merged_supabase_url = normalize_text_option(supabase_url)
        .or_else(|| normalize_text_option(env::var("SUPABASE_URL").ok()))
        .or_else(|| existing_profile.supabase_url());
    let merged_supabase_anon_key = normalize_text_option(supabase_anon_key)
        .or_else(|| normalize_text_option(env::var("SUPABASE_ANON_KEY").ok()))
        .or_else(|| existing_profile.supabase_anon_key());

    let profile = config.profile_mut_or_default(&profile_name);
    if let Some(value) = merged_supabase_url {
        profile.supabase_url = Some(value);
    }
    if let Some(value) = merged_supabase_anon_key {
        profile.supabase_anon_key = Some(value);
    }
    if let Some(value) = font_size {
        profile.font_size = Some(value);
    }

    validate_profile_urls(profile)?;

    if !no_activate {
        config.active_profile = Some(profile_name.clone());
    }

    let path = config.save()?;
    println!(
        "Profile '{}' initialized at {}",
        profile_name,
        path.display()
    );

    let profile = config.profile(&profile_name).ok_or_else(|| {
        CliError::Config("Failed to persist profile".to_string())
    })?;
    let mut missing_fields = Vec::new();
    if profile.supabase_url().is_none() {
        missing_fields.push("supabase_url");
    }
    if profile.supabase_anon_key().is_none() {
        missing_fields.push("supabase_anon_key");
    }
    if missing_fields.is_empty() {
        println!(
            "Profile '{profile_name}' is ready. Run `smak auth login --email <email> --password <password>`."
        );
    } else {
        println!(
            "Profile '{}' is missing: {}",
            profile_name,
            missing_fields.join(", ")
        );
    }

    Ok(())
}

fn run_config_show(profile_name: Option<&str>) -> Result<(), CliError> {
    let config = CliProfilesConfig::load()?;
    let profile_name = config.resolve_profile_name(profile_name);
    let Some(profile) = config.profile(&profile_name) else {
        println!("Profile '{profile_name}' is not configured.");
        return Ok(());
    };

    println!("Profile: {profile_name}");
    println!(
        "supabase_url: {}",
        profile.supabase_url().as_deref().unwrap_or("(unset)")
    );
    // Anon keys are publishable, but keep the full value out of terminals.
    println!(
        "supabase_anon_key: {}",
        profile
            .supabase_anon_key()
            .map_or_else(|| "(unset)".to_string(), |key| redact_key(&key))
    );
    println!(
        "font_size: {}",
        profile
            .font_size
            .map_or_else(|| "(unset)".to_string(), |points| points.to_string())
    );
    Ok(())
}

fn redact_key(key: &str) -> String {
    let prefix = key.chars().take(6).collect::<String>();
    format!("{prefix}...")
}

fn validate_profile_urls(profile: &CliProfile) -> Result<(), CliError> {
    if let Some(url) = profile.supabase_url() {
        if !is_http_url(&url) {
            return Err(CliError::Config(
                "supabase_url must include http:// or https://".to_string(),
            ));
        }
    }
    Ok(())
}
