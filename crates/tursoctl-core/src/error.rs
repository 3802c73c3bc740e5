//! Unified error handling for tursoctl-core
//!
//! API not-found tags are lifted into first-class variants on conversion, so a
//! `?` on an API call already yields [`CoreError::DatabaseNotFound`] or
//! [`CoreError::InstanceNotFound`] where applicable.

use crate::api::ApiError;
use crate::settings::SettingsError;
use thiserror::Error;

/// Core error type for workflows
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("location '{location}' is not a valid one")]
    InvalidLocation { location: String },

    #[error("database {database} not found")]
    DatabaseNotFound { database: String },

    #[error("instance {instance} not found for database {database}")]
    InstanceNotFound { database: String, instance: String },

    #[error("could not find any instances of database {database} in location {location}")]
    NoInstancesInLocation { database: String, location: String },

    /// Transport failures and API errors without a more specific meaning
    #[error(transparent)]
    Api(ApiError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl From<ApiError> for CoreError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::DatabaseNotFound { database } => CoreError::DatabaseNotFound { database },
            ApiError::InstanceNotFound { database, instance } => {
                CoreError::InstanceNotFound { database, instance }
            }
            other => CoreError::Api(other),
        }
    }
}

impl CoreError {
    /// Returns true for errors the user fixes by correcting the command line
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidLocation { .. }
                | CoreError::DatabaseNotFound { .. }
                | CoreError::InstanceNotFound { .. }
                | CoreError::NoInstancesInLocation { .. }
        )
    }
}
