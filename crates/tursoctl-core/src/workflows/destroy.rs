//! Destroy workflows
//!
//! Three granularities: every replica of a database in one location, a single
//! instance, or the whole database. Primaries are only ever removed together
//! with their database.

use crate::api::{Instance, PlatformApi};
use crate::error::{CoreError, Result};
use crate::settings::Settings;
use crate::task_group::TaskGroup;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Outcome of destroying the replicas in one location
#[derive(Debug, Clone)]
pub struct RegionDestroyReport {
    pub database: String,
    pub location: String,
    /// Number of replicas deleted
    pub destroyed: usize,
    /// Primary found in the location and left in place
    pub retained_primary: Option<Instance>,
}

/// Outcome of destroying a whole database
#[derive(Debug, Clone)]
pub struct DatabaseDestroyReport {
    pub database: String,
    /// Wall-clock time spent on the remote deletion
    pub elapsed: Duration,
    /// Whether the local settings were updated
    pub cache_evicted: bool,
}

/// Keep the instances located in `region`
pub fn filter_instances_by_region(instances: Vec<Instance>, region: &str) -> Vec<Instance> {
    instances
        .into_iter()
        .filter(|instance| instance.region == region)
        .collect()
}

/// Split instances into the primary (if any) and everything else.
///
/// Any further primary-tagged instance is excluded from both sides so it can
/// never be handed to a delete call.
pub fn extract_primary(instances: Vec<Instance>) -> (Option<Instance>, Vec<Instance>) {
    let mut primary = None;
    let mut others = Vec::with_capacity(instances.len());

    for instance in instances {
        if !instance.is_primary() {
            others.push(instance);
        } else if primary.is_none() {
            primary = Some(instance);
        } else {
            warn!(
                "Ignoring additional primary instance {} in region {}",
                instance.name, instance.region
            );
        }
    }

    (primary, others)
}

/// Check a location code against the API's location list
pub async fn is_valid_location<A: PlatformApi + ?Sized>(api: &A, location: &str) -> Result<bool> {
    let locations = api.list_locations().await?;
    Ok(locations.iter().any(|l| l.code == location))
}

/// Destroy every replica of `database` located in `location`.
///
/// A primary in the location is left alone and reported back. Replicas are
/// deleted concurrently; the first deletion error is returned once all
/// deletions have finished.
pub async fn destroy_region<A: PlatformApi + ?Sized>(
    api: &A,
    database: &str,
    location: &str,
) -> Result<RegionDestroyReport> {
    if !is_valid_location(api, location).await? {
        return Err(CoreError::InvalidLocation {
            location: location.to_string(),
        });
    }

    let db = api.get_database(database).await?;
    let instances = api.list_instances(&db.name).await?;
    debug!("Database {} has {} instance(s)", db.name, instances.len());

    let instances = filter_instances_by_region(instances, location);
    if instances.is_empty() {
        return Err(CoreError::NoInstancesInLocation {
            database: db.name,
            location: location.to_string(),
        });
    }

    let (primary, replicas) = extract_primary(instances);
    if let Some(primary) = &primary {
        info!("Keeping primary instance {} in {}", primary.name, location);
    }

    let mut group = TaskGroup::new();
    for replica in &replicas {
        let db_name = db.name.as_str();
        group.push(async move { delete_instance(api, db_name, &replica.name).await });
    }
    group.wait().await?;

    Ok(RegionDestroyReport {
        database: db.name,
        location: location.to_string(),
        destroyed: replicas.len(),
        retained_primary: primary,
    })
}

/// Destroy one named instance
pub async fn destroy_instance<A: PlatformApi + ?Sized>(
    api: &A,
    database: &str,
    instance: &str,
) -> Result<()> {
    delete_instance(api, database, instance).await
}

/// Delete one instance, lifting not-found responses into their core variants
pub async fn delete_instance<A: PlatformApi + ?Sized>(
    api: &A,
    database: &str,
    instance: &str,
) -> Result<()> {
    debug!("Deleting instance {} of database {}", instance, database);
    api.delete_instance(database, instance).await?;
    Ok(())
}

/// Destroy a database, then evict what the settings file knows about it.
///
/// Nothing local is touched when the remote deletion fails. Eviction itself is
/// best-effort: failures are logged and reported through `cache_evicted`.
pub async fn destroy_database<A: PlatformApi + ?Sized>(
    api: &A,
    name: &str,
    settings_path: &Path,
) -> Result<DatabaseDestroyReport> {
    let start = Instant::now();
    api.delete_database(name).await?;
    let elapsed = start.elapsed();
    info!("Deleted database {} in {:?}", name, elapsed);

    let cache_evicted = evict_database_cache(settings_path, name);

    Ok(DatabaseDestroyReport {
        database: name.to_string(),
        elapsed,
        cache_evicted,
    })
}

/// Invalidate the database-name cache and drop stored credentials for `name`
pub fn evict_database_cache(settings_path: &Path, name: &str) -> bool {
    let mut settings = match Settings::load_from_path(settings_path) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Could not read settings to evict database {}: {}", name, e);
            return false;
        }
    };

    settings.invalidate_db_names_cache();
    let removed = settings.delete_database(name);
    debug!("Removed {} credential entr(ies) for {}", removed, name);

    match settings.save_to_path(settings_path) {
        Ok(()) => true,
        Err(e) => {
            warn!("Could not save settings after destroying {}: {}", name, e);
            false
        }
    }
}
