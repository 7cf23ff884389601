use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "smak")]
#[command(about = "Browse and share recipes from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// CLI profile name for backend configuration
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List recipes, newest first
    List {
        /// Filter by a title substring (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
        /// Filter by exact category
        #[arg(short, long)]
        category: Option<String>,
        /// Number of recipes to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one recipe
    Show {
        /// Recipe ID
        id: String,
        /// Include comments and rating
        #[arg(long)]
        comments: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a new recipe
    #[command(alias = "new")]
    Add {
        #[command(flatten)]
        input: RecipeInput,
        /// Discard any restored draft before applying flags
        #[arg(long)]
        discard_draft: bool,
    },
    /// Edit an existing recipe
    Edit {
        /// Recipe ID
        id: String,
        #[command(flatten)]
        input: RecipeInput,
    },
    /// Delete an existing recipe
    Delete {
        /// Recipe ID
        id: String,
    },
    /// Comment on a recipe
    Comment {
        /// Recipe ID
        id: String,
        /// Comment text
        text: Vec<String>,
    },
    /// Rate a recipe from 1 to 5
    Rate {
        /// Recipe ID
        id: String,
        /// Stars (1-5)
        stars: i64,
    },
    /// Authenticate with the hosted backend
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// Recipe field flags shared by `add` and `edit`.
#[derive(Args)]
pub struct RecipeInput {
    /// Recipe title
    #[arg(long)]
    pub title: Option<String>,
    /// Short description
    #[arg(long)]
    pub description: Option<String>,
    /// Ingredients, one per line
    #[arg(long)]
    pub ingredients: Option<String>,
    /// Instructions, one step per line
    #[arg(long)]
    pub instructions: Option<String>,
    /// Cooking time in minutes
    #[arg(long, value_name = "MINUTES")]
    pub cooking_time: Option<String>,
    /// Recipe category
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Register a new account with email/password
    Signup {
        /// Optional profile override
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Account email
        #[arg(long, value_name = "EMAIL")]
        email: String,
        /// Account password
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Login with email/password and store the session in the keychain
    Login {
        /// Optional profile override
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Account email
        #[arg(long, value_name = "EMAIL")]
        email: String,
        /// Account password
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Show auth status for the profile
    Status {
        /// Optional profile override
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
    },
    /// Logout and clear the stored session
    Logout {
        /// Optional profile override
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update a profile
    Init {
        /// Profile name to initialize
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Supabase project URL
        #[arg(long, value_name = "URL")]
        supabase_url: Option<String>,
        /// Supabase anon/public key
        #[arg(long, value_name = "KEY")]
        supabase_anon_key: Option<String>,
        /// Display font size preference, in points
        #[arg(long, value_name = "POINTS")]
        font_size: Option<u32>,
        /// Keep the current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Show the resolved profile
    Show {
        /// Profile name to show
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
    },
}
