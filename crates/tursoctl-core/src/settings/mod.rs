//! Local settings for tursoctl
//!
//! A single TOML file holding the API token, the cached list of database names,
//! and per-database credentials used when building connection URLs.
//!
//! Database and instance records are never cached here; they are fetched fresh
//! on every command.

#![allow(clippy::module_inception)]

pub mod error;
pub mod settings;

pub use error::{Result, SettingsError};
pub use settings::{DatabaseSettings, Settings, SETTINGS_FILE_ENV, TOKEN_ENV};
