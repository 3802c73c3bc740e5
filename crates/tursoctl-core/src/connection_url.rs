//! Connection URL resolution
//!
//! Builds `libsql://` and `https://` URLs for a database or one of its instances,
//! optionally embedding the credentials stored in settings.

use crate::api::{Database, Instance};
use crate::settings::{DatabaseSettings, Settings};
use std::fmt;

/// URL scheme of a connection string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Libsql,
    Https,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Libsql => write!(f, "libsql"),
            Scheme::Https => write!(f, "https"),
        }
    }
}

/// Credentials for `db`, looked up by ID first and by name for older settings files
pub fn lookup_credentials<'a>(settings: &'a Settings, db: &Database) -> Option<&'a DatabaseSettings> {
    settings
        .database_settings(&db.id)
        .or_else(|| settings.database_settings(&db.name))
}

/// Build a connection URL.
///
/// The host is the instance's when one is given, the database's otherwise.
/// Credentials are embedded only when `with_credentials` is set and settings hold
/// some for this database.
pub fn resolve(
    settings: &Settings,
    db: &Database,
    instance: Option<&Instance>,
    scheme: Scheme,
    with_credentials: bool,
) -> String {
    let host = instance.map_or(db.hostname.as_str(), |inst| inst.hostname.as_str());

    let user = match lookup_credentials(settings, db) {
        Some(creds) if with_credentials => format!("{}:{}@", creds.username, creds.password),
        _ => String::new(),
    };

    format!("{}://{}{}", scheme, user, host)
}

pub fn database_url(settings: &Settings, db: &Database, with_credentials: bool) -> String {
    resolve(settings, db, None, Scheme::Libsql, with_credentials)
}

pub fn instance_url(settings: &Settings, db: &Database, instance: &Instance) -> String {
    resolve(settings, db, Some(instance), Scheme::Libsql, false)
}

pub fn database_http_url(settings: &Settings, db: &Database) -> String {
    resolve(settings, db, None, Scheme::Https, true)
}

pub fn instance_http_url(settings: &Settings, db: &Database, instance: &Instance) -> String {
    resolve(settings, db, Some(instance), Scheme::Https, true)
}
