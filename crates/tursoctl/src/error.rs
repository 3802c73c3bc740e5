//! Error types for tursoctl
//!
//! Wraps core workflow errors and adds the failures that only exist at the
//! command line. Every error can print itself as a cargo-style diagnostic with
//! remediation tips.

use colored::Colorize;
use thiserror::Error;
use tursoctl_core::{ApiError, CoreError, SettingsError};

/// Cargo-style diagnostic formatter for CLI errors.
///
/// Produces structured output like:
/// ```text
/// error: database mydb not found
///
///   tip: list known databases:
///       tursoctl db list
/// ```
pub struct CliDiagnostic {
    message: String,
    detail: Option<String>,
    tips: Vec<(String, Vec<String>)>,
}

impl CliDiagnostic {
    /// Start a new error diagnostic with the given message.
    pub fn error(message: &str) -> Self {
        Self {
            message: message.to_string(),
            detail: None,
            tips: Vec::new(),
        }
    }

    /// Add a detail line below the error message.
    pub fn detail(mut self, text: &str) -> Self {
        self.detail = Some(text.to_string());
        self
    }

    /// Add a tip with optional example commands.
    pub fn tip(mut self, description: &str, commands: &[&str]) -> Self {
        self.tips.push((
            description.to_string(),
            commands.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    /// Print the diagnostic to stderr with colored formatting.
    pub fn print(&self) {
        eprint!("{}{}", "error".red().bold(), ": ".bold());
        eprintln!("{}", self.message);

        if let Some(detail) = &self.detail {
            eprintln!("  {}", detail);
        }

        for (description, commands) in &self.tips {
            eprintln!();
            eprint!("  {}{}", "tip".yellow().bold(), ": ".bold());
            eprintln!("{}", description);
            for cmd in commands {
                eprintln!("      {}", cmd);
            }
        }
    }
}

/// Main error type for the tursoctl application
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("No API token configured")]
    MissingToken,

    #[error("could not get prompt confirmed by user")]
    ConfirmationFailed,

    #[error("Failed to read confirmation: {message}")]
    PromptIo { message: String },

    #[error("Output formatting error: {message}")]
    OutputError { message: String },
}

/// Result type for tursoctl operations
pub type Result<T> = std::result::Result<T, CliError>;

impl CliError {
    /// Remediation tips, each with the commands that carry them out
    pub fn suggestions(&self) -> Vec<(String, Vec<String>)> {
        match self {
            CliError::Core(CoreError::DatabaseNotFound { .. }) => vec![(
                "list known databases:".to_string(),
                vec!["tursoctl db list".to_string()],
            )],
            CliError::Core(CoreError::InstanceNotFound { database, .. }) => vec![(
                "list known instances:".to_string(),
                vec![format!("tursoctl db show {}", database)],
            )],
            CliError::Core(CoreError::NoInstancesInLocation { database, .. }) => vec![(
                "see where the database's instances run:".to_string(),
                vec![format!("tursoctl db show {}", database)],
            )],
            CliError::Core(CoreError::InvalidLocation { .. }) => vec![(
                "list valid locations:".to_string(),
                vec!["tursoctl db locations".to_string()],
            )],
            CliError::Core(CoreError::Api(ApiError::Unauthorized { .. })) | CliError::MissingToken => {
                vec![(
                    "store a valid API token or export TURSO_API_TOKEN:".to_string(),
                    vec!["tursoctl auth set-token <TOKEN>".to_string()],
                )]
            }
            CliError::Core(CoreError::Api(ApiError::Request(_))) => vec![(
                "check network connectivity and the API endpoint (TURSO_API_BASEURL)".to_string(),
                vec![],
            )],
            CliError::Core(CoreError::Settings(SettingsError::ParseError(_))) => vec![(
                "fix or remove the settings file, or point elsewhere with --settings-file"
                    .to_string(),
                vec![],
            )],
            _ => vec![],
        }
    }

    /// Print a cargo-style diagnostic to stderr using colored formatting.
    pub fn print_diagnostic(&self) {
        let mut diag = CliDiagnostic::error(&self.to_string());

        if let CliError::Core(CoreError::Api(ApiError::Request(err))) = self
            && let Some(url) = err.url()
        {
            diag = diag.detail(&format!("while requesting {}", url));
        }

        for (description, commands) in self.suggestions() {
            let commands: Vec<&str> = commands.iter().map(String::as_str).collect();
            diag = diag.tip(&description, &commands);
        }

        diag.print();
    }
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        CliError::Core(err.into())
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        CliError::Core(err.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::OutputError {
            message: format!("JSON error: {}", err),
        }
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(err: serde_yaml::Error) -> Self {
        CliError::OutputError {
            message: format!("YAML error: {}", err),
        }
    }
}
