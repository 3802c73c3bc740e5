//! Records returned by the platform API
//!
//! Field names follow the wire format on the way in and snake_case on the way out,
//! so `-o json` output stays consistent with the rest of the CLI.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A logical database with one primary and zero or more replicas
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Database {
    #[serde(rename(deserialize = "Name"), alias = "name")]
    pub name: String,
    #[serde(rename(serialize = "id", deserialize = "DbId"), alias = "dbId")]
    pub id: String,
    #[serde(rename(deserialize = "Hostname"), alias = "hostname")]
    pub hostname: String,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(
        rename(serialize = "primary_region", deserialize = "primaryRegion"),
        default
    )]
    pub primary_region: String,
}

/// A single deployed copy of a database in one location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Instance {
    #[serde(default)]
    pub uuid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub instance_type: InstanceType,
    pub region: String,
    #[serde(default)]
    pub hostname: String,
}

impl Instance {
    pub fn is_primary(&self) -> bool {
        self.instance_type == InstanceType::Primary
    }
}

/// Role of an instance within its database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InstanceType {
    Primary,
    Replica,
    /// A tag this client does not know about; never treated as primary
    Other(String),
}

impl From<String> for InstanceType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "primary" => InstanceType::Primary,
            "replica" => InstanceType::Replica,
            _ => InstanceType::Other(value),
        }
    }
}

impl From<InstanceType> for String {
    fn from(value: InstanceType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for InstanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstanceType::Primary => write!(f, "primary"),
            InstanceType::Replica => write!(f, "replica"),
            InstanceType::Other(tag) => write!(f, "{}", tag),
        }
    }
}

/// A location code where instances can run
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Location {
    pub code: String,
    pub description: String,
}
