//! Workflows - multi-step operations
//!
//! These compose [`PlatformApi`](crate::api::PlatformApi) calls with validation
//! and local settings maintenance. They return reports; printing is left to the
//! caller.

pub mod destroy;

pub use destroy::{
    DatabaseDestroyReport, RegionDestroyReport, delete_instance, destroy_database,
    destroy_instance, destroy_region, evict_database_cache, extract_primary,
    filter_instances_by_region, is_valid_location,
};
