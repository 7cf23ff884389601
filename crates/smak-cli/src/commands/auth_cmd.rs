use smak_core::auth::SignUpOutcome;
use smak_core::config::ClientConfig;

use crate::auth::{clear_stored_session, load_stored_session, SupabaseAuthService};
use crate::cli::AuthCommands;
use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;

pub async fn run_auth(command: AuthCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        AuthCommands::Signup {
            profile,
            email,
            password,
        } => {
            let (service, profile_name) =
                auth_service(profile.as_deref().or(global_profile))?;
            let outcome = service
                .sign_up(&email, &password)
                .await
                .map_err(|error| CliError::Auth(error.to_string()))?;
            match outcome {
                SignUpOutcome::SignedIn(session) => {
                    let email_label = session.user.email.as_deref().unwrap_or("(no email)");
                    println!("Signed up profile '{profile_name}' as {email_label}");
                }
                SignUpOutcome::ConfirmationRequired => {
                    println!("Check your email to confirm the account, then run `smak auth login`.");
                }
            }
            Ok(())
        }
        AuthCommands::Login {
            profile,
            email,
            password,
        } => {
            let (service, profile_name) =
                auth_service(profile.as_deref().or(global_profile))?;
            let session = service
                .sign_in(&email, &password)
                .await
                .map_err(|error| CliError::Auth(error.to_string()))?;
            let email_label = session.user.email.as_deref().unwrap_or("(no email)");
            println!("Signed in profile '{profile_name}' as {email_label}");
            Ok(())
        }
        AuthCommands::Status { profile } => {
            let config = CliProfilesConfig::load()?;
            let profile_name = config.resolve_profile_name(profile.as_deref().or(global_profile));
            if config.profile(&profile_name).is_none() {
                println!("Profile '{profile_name}' is not configured.");
                return Ok(());
            }

            let (service, _) = auth_service(Some(&profile_name))?;
            let session = service
                .restore_session()
                .await
                .map_err(|error| CliError::Auth(error.to_string()))?;

            if let Some(session) = session {
                let email_label = session.user.email.as_deref().unwrap_or("(no email)");
                println!(
                    "Profile '{}' is signed in as {} (expires_at={})",
                    profile_name, email_label, session.expires_at
                );
            } else {
                println!("Profile '{profile_name}' is not signed in.");
            }
            Ok(())
        }
        AuthCommands::Logout { profile } => {
            let config = CliProfilesConfig::load()?;
            let profile_name = config.resolve_profile_name(profile.as_deref().or(global_profile));

            let stored_session = load_stored_session(&profile_name)
                .map_err(|error| CliError::Auth(error.to_string()))?;

            if config.profile(&profile_name).is_some() {
                let (service, _) = auth_service(Some(&profile_name))?;
                if let Some(session) = stored_session {
                    service
                        .sign_out(&session.access_token)
                        .await
                        .map_err(|error| CliError::Auth(error.to_string()))?;
                } else {
                    clear_stored_session(&profile_name)
                        .map_err(|error| CliError::Auth(error.to_string()))?;
                }
            } else {
                clear_stored_session(&profile_name)
                    .map_err(|error| CliError::Auth(error.to_string()))?;
            }

            println!("Signed out profile '{profile_name}'");
            Ok(())
        }
    }
}

fn auth_service(profile: Option<&str>) -> Result<(SupabaseAuthService, String), CliError> {
    let config = CliProfilesConfig::load()?;
    let profile_name = config.resolve_profile_name(profile);
    let profile = config.profile(&profile_name).ok_or_else(|| {
        CliError::Config(format!(
            "Profile '{profile_name}' is not configured. Run `smak config init --profile {profile_name}` first."
        ))
    })?;

    let (url, anon_key) = ClientConfig {
        supabase_url: profile.supabase_url(),
        supabase_anon_key: profile.supabase_anon_key(),
    }
    .resolve()?;

    let service = SupabaseAuthService::new(&profile_name, url, anon_key)
        .map_err(|error| CliError::Auth(error.to_string()))?;
    Ok((service, profile_name))
}
