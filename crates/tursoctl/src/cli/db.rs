//! Database command definitions

use clap::Subcommand;

/// Database management commands
#[derive(Subcommand, Debug)]
pub enum DbCommands {
    /// List databases
    #[command(visible_alias = "ls")]
    List,

    /// Show a database, its locations and instances
    #[command(after_help = "EXAMPLES:
    # Full view with instance table
    tursoctl db show mydb

    # Only the libsql:// URL, with stored credentials
    tursoctl db show mydb --url

    # Only the https:// URL
    tursoctl db show mydb --http-url
")]
    Show {
        /// Database name
        name: String,

        /// Print only the libsql:// connection URL
        #[arg(long, conflicts_with = "http_url")]
        url: bool,

        /// Print only the https:// URL
        #[arg(long)]
        http_url: bool,
    },

    /// List locations instances can run in
    #[command(visible_alias = "regions")]
    Locations,

    /// Destroy a database, one of its instances, or its replicas in a location
    #[command(visible_alias = "rm")]
    #[command(after_help = "EXAMPLES:
    # Destroy the whole database
    tursoctl db destroy mydb

    # Destroy one instance
    tursoctl db destroy mydb --instance my-replica

    # Destroy all replicas in a location (the primary is kept)
    tursoctl db destroy mydb --location fra
")]
    Destroy {
        /// Database name
        name: String,

        /// Destroy every replica of the database in this location
        #[arg(long, conflicts_with = "instance")]
        location: Option<String>,

        /// Destroy only this instance
        #[arg(long)]
        instance: Option<String>,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Manage credentials embedded into connection URLs
    #[command(subcommand)]
    Credentials(CredentialsCommands),
}

/// Stored database credential commands
#[derive(Subcommand, Debug)]
pub enum CredentialsCommands {
    /// Store credentials for a database
    Set {
        /// Database name
        name: String,

        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,
    },

    /// Remove stored credentials for a database
    #[command(visible_alias = "rm")]
    Remove {
        /// Database name
        name: String,
    },
}

/// What a `db destroy` invocation targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyTarget {
    Database,
    Instance(String),
    Location(String),
}

impl DestroyTarget {
    pub fn from_args(location: Option<&str>, instance: Option<&str>) -> Self {
        match (location, instance) {
            (Some(location), _) => DestroyTarget::Location(location.to_string()),
            (None, Some(instance)) => DestroyTarget::Instance(instance.to_string()),
            (None, None) => DestroyTarget::Database,
        }
    }
}
