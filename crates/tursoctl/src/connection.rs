//! Command context: settings location, output format, and API client creation
//!
//! Everything a command handler needs is carried here explicitly instead of in
//! process-wide flag state.

use crate::cli::OutputFormat;
use crate::error::{CliError, Result};
use std::path::PathBuf;
use tracing::{debug, info};
use tursoctl_core::api::{BASE_URL_ENV, base_url_from_env};
use tursoctl_core::{Settings, TursoClient};

/// Per-invocation context handed to every command handler
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub settings_path: PathBuf,
    pub output: OutputFormat,
}

impl CommandContext {
    /// Resolve the settings location, falling back to the platform default
    pub fn new(settings_file: Option<&str>, output: OutputFormat) -> Result<Self> {
        let settings_path = match settings_file {
            Some(path) => {
                debug!("Using settings file from command line: {}", path);
                PathBuf::from(path)
            }
            None => Settings::settings_path()?,
        };
        Ok(Self {
            settings_path,
            output,
        })
    }

    pub fn load_settings(&self) -> Result<Settings> {
        Ok(Settings::load_from_path(&self.settings_path)?)
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        Ok(settings.save_to_path(&self.settings_path)?)
    }

    /// Create an authenticated API client
    ///
    /// The base URL comes from `TURSO_API_BASEURL` when set; the token from
    /// `TURSO_API_TOKEN` or the settings file.
    pub fn create_client(&self, settings: &Settings) -> Result<TursoClient> {
        let base_url = base_url_from_env().map_err(|e| {
            CliError::Configuration(format!("{} (check {})", e, BASE_URL_ENV))
        })?;
        let token = settings.resolve_token().ok_or(CliError::MissingToken)?;
        info!("Using API endpoint {}", base_url);
        Ok(TursoClient::new(base_url, Some(token))?)
    }
}
