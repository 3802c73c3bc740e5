//! # tursoctl-core
//!
//! Shared engine behind the `tursoctl` binary:
//!
//! - **API client** ([`api`]) - the [`PlatformApi`] trait and its reqwest-backed
//!   implementation [`TursoClient`], with structured errors tagged at the boundary
//! - **Settings** ([`settings`]) - the local settings file (API token, cached
//!   database names, per-database credentials)
//! - **Connection URLs** ([`connection_url`]) - `libsql://` and `https://` URL
//!   resolution with optional embedded credentials
//! - **Task group** ([`task_group`]) - concurrent fan-out that reports the first error
//! - **Workflows** ([`workflows`]) - multi-step operations such as destroying every
//!   replica of a database in one location
//!
//! Presentation (spinners, tables, prompts) lives in the CLI crate; everything here
//! returns data and errors.

pub mod api;
pub mod connection_url;
pub mod error;
pub mod settings;
pub mod task_group;
pub mod workflows;

pub use api::{
    ApiError, Database, Instance, InstanceType, Location, PlatformApi, TursoClient,
};
pub use error::{CoreError, Result};
pub use settings::{DatabaseSettings, Settings, SettingsError};
pub use task_group::TaskGroup;
