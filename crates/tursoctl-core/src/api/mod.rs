//! Platform API client
//!
//! [`PlatformApi`] is the seam the workflows are written against; [`TursoClient`]
//! implements it over HTTP with reqwest.

mod error;
mod models;

pub use error::ApiError;
pub use models::{Database, Instance, InstanceType, Location};

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use tracing::{debug, trace};
use url::Url;

/// Environment variable overriding the API base URL
pub const BASE_URL_ENV: &str = "TURSO_API_BASEURL";

/// Production API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.turso.io";

/// User agent string for tursoctl HTTP requests
const USER_AGENT: &str = concat!("tursoctl/", env!("CARGO_PKG_VERSION"));

/// Operations the CLI needs from the platform API
#[async_trait]
pub trait PlatformApi: Send + Sync {
    async fn list_locations(&self) -> Result<Vec<Location>, ApiError>;

    async fn list_databases(&self) -> Result<Vec<Database>, ApiError>;

    /// Fails with [`ApiError::DatabaseNotFound`] when no database has this name
    async fn get_database(&self, name: &str) -> Result<Database, ApiError>;

    async fn list_instances(&self, database: &str) -> Result<Vec<Instance>, ApiError>;

    /// Fails with [`ApiError::DatabaseNotFound`] or [`ApiError::InstanceNotFound`]
    /// when either side of the pair does not exist
    async fn delete_instance(&self, database: &str, instance: &str) -> Result<(), ApiError>;

    async fn delete_database(&self, name: &str) -> Result<(), ApiError>;
}

/// Resolve the API base URL, honoring `TURSO_API_BASEURL` when it is set and non-empty
pub fn base_url_from_env() -> Result<Url, ApiError> {
    let raw = std::env::var(BASE_URL_ENV)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    parse_base_url(&raw)
}

/// Parse a base URL, rejecting ones that cannot carry path segments
pub fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let url = Url::parse(raw).map_err(|e| ApiError::InvalidBaseUrl {
        url: raw.to_string(),
        message: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidBaseUrl {
            url: raw.to_string(),
            message: "URL cannot be used as a base".to_string(),
        });
    }
    Ok(url)
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct LocationsResponse {
    locations: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct DatabasesResponse {
    databases: Vec<Database>,
}

#[derive(Deserialize)]
struct DatabaseResponse {
    database: Database,
}

#[derive(Deserialize)]
struct InstancesResponse {
    instances: Vec<Instance>,
}

/// Failed response: status plus the server's error message
struct Failure {
    status: StatusCode,
    message: String,
}

impl Failure {
    fn into_error(self) -> ApiError {
        match self.status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized {
                message: self.message,
            },
            status => ApiError::Status {
                status: status.as_u16(),
                message: self.message,
            },
        }
    }
}

/// HTTP client for the platform API
#[derive(Clone)]
pub struct TursoClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl std::fmt::Debug for TursoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TursoClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

impl TursoClient {
    /// Create a client against `base_url`, authenticating with `token` when given
    pub fn new(base_url: Url, token: Option<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                message: "URL cannot be used as a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, method: Method, url: Url) -> Result<Result<reqwest::Response, Failure>, ApiError> {
        debug!("{} {}", method, url);
        let mut request = self.http.request(method, url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        trace!("Response status: {}", status);
        if status.is_success() {
            return Ok(Ok(response));
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                } else {
                    body.trim().to_string()
                }
            });
        debug!("Request failed with {}: {}", status, message);
        Ok(Err(Failure { status, message }))
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<Result<T, Failure>, ApiError> {
        let url = self.endpoint(segments)?;
        match self.send(Method::GET, url).await? {
            Ok(response) => Ok(Ok(response.json::<T>().await?)),
            Err(failure) => Ok(Err(failure)),
        }
    }
}

#[async_trait]
impl PlatformApi for TursoClient {
    async fn list_locations(&self) -> Result<Vec<Location>, ApiError> {
        let response: LocationsResponse = self
            .get_json(&["v1", "locations"])
            .await?
            .map_err(Failure::into_error)?;
        Ok(response
            .locations
            .into_iter()
            .map(|(code, description)| Location { code, description })
            .collect())
    }

    async fn list_databases(&self) -> Result<Vec<Database>, ApiError> {
        let response: DatabasesResponse = self
            .get_json(&["v1", "databases"])
            .await?
            .map_err(Failure::into_error)?;
        Ok(response.databases)
    }

    async fn get_database(&self, name: &str) -> Result<Database, ApiError> {
        match self.get_json::<DatabaseResponse>(&["v1", "databases", name]).await? {
            Ok(response) => Ok(response.database),
            Err(failure) if failure.status == StatusCode::NOT_FOUND => {
                Err(ApiError::DatabaseNotFound {
                    database: name.to_string(),
                })
            }
            Err(failure) => Err(failure.into_error()),
        }
    }

    async fn list_instances(&self, database: &str) -> Result<Vec<Instance>, ApiError> {
        match self
            .get_json::<InstancesResponse>(&["v1", "databases", database, "instances"])
            .await?
        {
            Ok(response) => Ok(response.instances),
            Err(failure) if failure.status == StatusCode::NOT_FOUND => {
                Err(ApiError::DatabaseNotFound {
                    database: database.to_string(),
                })
            }
            Err(failure) => Err(failure.into_error()),
        }
    }

    async fn delete_instance(&self, database: &str, instance: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["v1", "databases", database, "instances", instance])?;
        match self.send(Method::DELETE, url).await? {
            Ok(_) => Ok(()),
            Err(failure) if failure.status == StatusCode::NOT_FOUND => Err(
                error::classify_instance_delete_not_found(database, instance, failure.message),
            ),
            Err(failure) => Err(failure.into_error()),
        }
    }

    async fn delete_database(&self, name: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["v1", "databases", name])?;
        match self.send(Method::DELETE, url).await? {
            Ok(_) => Ok(()),
            Err(failure) if failure.status == StatusCode::NOT_FOUND => {
                Err(ApiError::DatabaseNotFound {
                    database: name.to_string(),
                })
            }
            Err(failure) => Err(failure.into_error()),
        }
    }
}
