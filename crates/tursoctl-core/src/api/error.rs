//! Errors produced at the API client boundary
//!
//! Not-found responses are classified here, once, into tagged variants so callers
//! match on the variant instead of on message text.

use thiserror::Error;

/// Error type for platform API operations
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("database {database} not found")]
    DatabaseNotFound { database: String },

    #[error("instance {instance} of database {database} not found")]
    InstanceNotFound { database: String, instance: String },

    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("API error (HTTP {status}): {message}")]
    Status { status: u16, message: String },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid API base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },
}

impl ApiError {
    /// Returns true for any of the not-found variants or a bare 404
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ApiError::DatabaseNotFound { .. }
                | ApiError::InstanceNotFound { .. }
                | ApiError::Status { status: 404, .. }
        )
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

/// Classify a 404 returned by an instance deletion.
///
/// The API reports the two cases with fixed messages; anything else stays a
/// plain status error.
pub(crate) fn classify_instance_delete_not_found(
    database: &str,
    instance: &str,
    message: String,
) -> ApiError {
    if message == format!("could not find database {} to delete instance from", database) {
        ApiError::DatabaseNotFound {
            database: database.to_string(),
        }
    } else if message == format!("could not find instance {} of database {}", instance, database)
    {
        ApiError::InstanceNotFound {
            database: database.to_string(),
            instance: instance.to_string(),
        }
    } else {
        ApiError::Status {
            status: 404,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_database_missing() {
        let err = classify_instance_delete_not_found(
            "mydb",
            "r1",
            "could not find database mydb to delete instance from".to_string(),
        );
        assert!(matches!(err, ApiError::DatabaseNotFound { database } if database == "mydb"));
    }

    #[test]
    fn test_classify_instance_missing() {
        let err = classify_instance_delete_not_found(
            "mydb",
            "r1",
            "could not find instance r1 of database mydb".to_string(),
        );
        assert!(matches!(
            err,
            ApiError::InstanceNotFound { database, instance } if database == "mydb" && instance == "r1"
        ));
    }

    #[test]
    fn test_classify_other_message_stays_generic() {
        let err = classify_instance_delete_not_found(
            "mydb",
            "r1",
            "could not find instance r2 of database mydb".to_string(),
        );
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_helpers() {
        let err = ApiError::Unauthorized {
            message: "token expired".to_string(),
        };
        assert!(err.is_unauthorized());
        assert!(!err.is_not_found());

        let err = ApiError::Status {
            status: 500,
            message: "boom".to_string(),
        };
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "API error (HTTP 500): boom");
    }
}
