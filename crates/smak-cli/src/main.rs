//! Smak CLI - browse and share recipes from the command line.

mod auth;
mod cli;
mod commands;
mod config_profiles;
mod error;

use clap::{CommandFactory, Parser};

use crate::cli::{Cli, Commands};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("smak=info".parse().map_err(|_| {
                    CliError::Config("invalid default log directive".to_string())
                })?),
        )
        .init();

    let cli = Cli::parse();
    let profile = cli.profile.as_deref();

    match cli.command {
        Some(Commands::List {
            search,
            category,
            limit,
            json,
        }) => {
            commands::list::run_list(search.as_deref(), category.as_deref(), limit, json, profile)
                .await?;
        }
        Some(Commands::Show { id, comments, json }) => {
            commands::show::run_show(&id, comments, json, profile).await?;
        }
        Some(Commands::Add {
            input,
            discard_draft,
        }) => commands::add::run_add(input, discard_draft, profile).await?,
        Some(Commands::Edit { id, input }) => {
            commands::edit::run_edit(&id, input, profile).await?;
        }
        Some(Commands::Delete { id }) => commands::delete::run_delete(&id, profile).await?,
        Some(Commands::Comment { id, text }) => {
            commands::social::run_comment(&id, &text, profile).await?;
        }
        Some(Commands::Rate { id, stars }) => {
            commands::social::run_rate(&id, stars, profile).await?;
        }
        Some(Commands::Auth { command }) => commands::auth_cmd::run_auth(command, profile).await?,
        Some(Commands::Config { command }) => commands::config::run_config(command, profile)?,
        Some(Commands::Completions { shell, output }) => {
            commands::completions::run_completions(shell, output.as_deref())?;
        }
        None => {
            Cli::command().print_help().map_err(CliError::Io)?;
            println!();
        }
    }

    Ok(())
}
