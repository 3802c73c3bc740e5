//! CLI structure and command definitions

use clap::{Parser, Subcommand};

pub mod db;

pub use db::*;

/// Manage hosted databases, their instances and locations
#[derive(Parser, Debug)]
#[command(name = "tursoctl")]
#[command(version, about = "Manage hosted databases, their instances and locations")]
#[command(long_about = "
Manage hosted databases, their instances and locations

EXAMPLES:
    # Store an API token
    tursoctl auth set-token <TOKEN>

    # List databases
    tursoctl db list

    # Print a connection URL with embedded credentials
    tursoctl db show mydb --url

    # Destroy every replica of a database in one location
    tursoctl db destroy mydb --location fra

    # Destroy a whole database without prompting
    tursoctl db destroy mydb --yes

The API endpoint can be overridden with TURSO_API_BASEURL.
")]
pub struct Cli {
    /// Path to alternate settings file
    #[arg(long, global = true, env = "TURSOCTL_SETTINGS_FILE")]
    pub settings_file: Option<String>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value = "auto")]
    pub output: OutputFormat,

    /// Enable verbose logging
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Tables for listings, plain text for everything else
    Auto,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Human-readable table format
    Table,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Database management
    #[command(subcommand)]
    Db(DbCommands),

    /// API token management
    #[command(subcommand)]
    Auth(AuthCommands),

    /// Show version information
    #[command(visible_alias = "ver")]
    Version,

    /// Generate shell completions
    #[command(visible_alias = "comp")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion generation
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bourne Again Shell
    Bash,
    /// Z Shell
    Zsh,
    /// Friendly Interactive Shell
    Fish,
    /// PowerShell
    #[value(name = "powershell", alias = "power-shell")]
    PowerShell,
    /// Elvish
    Elvish,
}

/// API token commands
#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Store an API token in the settings file
    #[command(name = "set-token")]
    SetToken {
        /// Platform API token
        token: String,
    },

    /// Print the token in use (TURSO_API_TOKEN wins over the stored one)
    #[command(name = "show-token")]
    ShowToken,

    /// Remove the stored API token
    Logout,
}
