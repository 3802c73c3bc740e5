//! Destroy workflows against a mock platform API

use serde_json::{Value, json};
use tempfile::TempDir;
use tursoctl_core::api::parse_base_url;
use tursoctl_core::settings::{DatabaseSettings, Settings};
use tursoctl_core::workflows::{destroy_database, destroy_instance, destroy_region};
use tursoctl_core::{ApiError, CoreError, TursoClient};
use wiremock::matchers::{bearer_token, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Fixtures
// ============================================================================

fn client(server: &MockServer) -> TursoClient {
    TursoClient::new(
        parse_base_url(&server.uri()).unwrap(),
        Some("test-token".to_string()),
    )
    .unwrap()
}

fn database_json(name: &str) -> Value {
    json!({
        "Name": name,
        "DbId": format!("{}-id", name),
        "Hostname": format!("{}-org.turso.io", name),
        "regions": ["fra", "lhr"],
        "primaryRegion": "fra"
    })
}

fn instance_json(name: &str, kind: &str, region: &str) -> Value {
    json!({
        "uuid": format!("uuid-{}", name),
        "name": name,
        "type": kind,
        "region": region,
        "hostname": format!("{}-mydb-org.turso.io", name)
    })
}

async fn mock_locations(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "locations": {
                "fra": "Frankfurt, Germany",
                "lhr": "London, United Kingdom",
                "ams": "Amsterdam, Netherlands"
            }
        })))
        .mount(server)
        .await;
}

async fn mock_database(server: &MockServer, name: &str, instances: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/databases/{}", name)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "database": database_json(name) })),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/databases/{}/instances", name)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "instances": instances })))
        .mount(server)
        .await;
}

async fn expect_instance_delete(server: &MockServer, db: &str, instance: &str, times: u64) {
    Mock::given(method("DELETE"))
        .and(path(format!("/v1/databases/{}/instances/{}", db, instance)))
        .and(bearer_token("test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(times)
        .mount(server)
        .await;
}

// ============================================================================
// Region destroy
// ============================================================================

#[tokio::test]
async fn region_destroy_deletes_only_replicas_in_location() {
    let server = MockServer::start().await;
    mock_locations(&server).await;
    mock_database(
        &server,
        "mydb",
        vec![
            instance_json("primary", "primary", "fra"),
            instance_json("r1", "replica", "fra"),
            instance_json("r2", "replica", "lhr"),
        ],
    )
    .await;
    expect_instance_delete(&server, "mydb", "r1", 1).await;
    expect_instance_delete(&server, "mydb", "primary", 0).await;
    expect_instance_delete(&server, "mydb", "r2", 0).await;

    let report = destroy_region(&client(&server), "mydb", "fra").await.unwrap();

    assert_eq!(report.destroyed, 1);
    assert_eq!(report.retained_primary.map(|p| p.name).as_deref(), Some("primary"));
}

#[tokio::test]
async fn region_destroy_counts_every_replica() {
    let server = MockServer::start().await;
    mock_locations(&server).await;
    mock_database(
        &server,
        "mydb",
        vec![
            instance_json("a", "replica", "lhr"),
            instance_json("b", "replica", "lhr"),
            instance_json("c", "replica", "lhr"),
        ],
    )
    .await;
    for name in ["a", "b", "c"] {
        expect_instance_delete(&server, "mydb", name, 1).await;
    }

    let report = destroy_region(&client(&server), "mydb", "lhr").await.unwrap();

    assert_eq!(report.destroyed, 3);
    assert!(report.retained_primary.is_none());
}

#[tokio::test]
async fn region_destroy_rejects_unknown_location_before_any_lookup() {
    let server = MockServer::start().await;
    mock_locations(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/databases/mydb"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = destroy_region(&client(&server), "mydb", "xyz").await.unwrap_err();

    assert!(matches!(err, CoreError::InvalidLocation { ref location } if location == "xyz"));
}

#[tokio::test]
async fn region_destroy_with_no_instances_in_location() {
    let server = MockServer::start().await;
    mock_locations(&server).await;
    mock_database(&server, "mydb", vec![instance_json("primary", "primary", "fra")]).await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = destroy_region(&client(&server), "mydb", "ams").await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "could not find any instances of database mydb in location ams"
    );
}

#[tokio::test]
async fn region_destroy_unknown_database() {
    let server = MockServer::start().await;
    mock_locations(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/databases/ghost"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "database not found" })),
        )
        .mount(&server)
        .await;

    let err = destroy_region(&client(&server), "ghost", "fra").await.unwrap_err();

    assert!(matches!(err, CoreError::DatabaseNotFound { ref database } if database == "ghost"));
}

#[tokio::test]
async fn region_destroy_propagates_deletion_failure() {
    let server = MockServer::start().await;
    mock_locations(&server).await;
    mock_database(
        &server,
        "mydb",
        vec![
            instance_json("r1", "replica", "lhr"),
            instance_json("r2", "replica", "lhr"),
        ],
    )
    .await;
    expect_instance_delete(&server, "mydb", "r1", 1).await;
    Mock::given(method("DELETE"))
        .and(path("/v1/databases/mydb/instances/r2"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "internal error" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = destroy_region(&client(&server), "mydb", "lhr").await.unwrap_err();

    assert!(matches!(
        err,
        CoreError::Api(ApiError::Status { status: 500, ref message }) if message == "internal error"
    ));
}

#[tokio::test]
async fn region_destroy_passes_through_list_failure() {
    let server = MockServer::start().await;
    mock_locations(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/databases/mydb"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "database": database_json("mydb") })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/databases/mydb/instances"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let err = destroy_region(&client(&server), "mydb", "fra").await.unwrap_err();

    assert!(matches!(
        err,
        CoreError::Api(ApiError::Status { status: 503, ref message }) if message == "upstream unavailable"
    ));
}

// ============================================================================
// Single instance destroy
// ============================================================================

#[tokio::test]
async fn instance_destroy_database_missing() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/databases/ghost/instances/r1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "could not find database ghost to delete instance from"
        })))
        .mount(&server)
        .await;

    let err = destroy_instance(&client(&server), "ghost", "r1").await.unwrap_err();

    assert!(matches!(err, CoreError::DatabaseNotFound { ref database } if database == "ghost"));
}

#[tokio::test]
async fn instance_destroy_instance_missing() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/databases/mydb/instances/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "could not find instance nope of database mydb"
        })))
        .mount(&server)
        .await;

    let err = destroy_instance(&client(&server), "mydb", "nope").await.unwrap_err();

    assert!(matches!(
        err,
        CoreError::InstanceNotFound { ref database, ref instance } if database == "mydb" && instance == "nope"
    ));
}

#[tokio::test]
async fn instance_destroy_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/databases/mydb/instances/r1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "token expired" })))
        .mount(&server)
        .await;

    let err = destroy_instance(&client(&server), "mydb", "r1").await.unwrap_err();

    assert!(matches!(err, CoreError::Api(ApiError::Unauthorized { .. })));
}

// ============================================================================
// Whole database destroy
// ============================================================================

fn seeded_settings(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("settings.toml");
    let mut settings = Settings::default();
    settings.set_db_names_cache(vec!["mydb".to_string(), "other".to_string()]);
    settings.set_database_settings(
        "mydb-id".to_string(),
        DatabaseSettings {
            username: "admin".to_string(),
            password: "pw".to_string(),
            database: Some("mydb".to_string()),
        },
    );
    settings.set_database_settings(
        "other-id".to_string(),
        DatabaseSettings {
            username: "admin".to_string(),
            password: "pw".to_string(),
            database: Some("other".to_string()),
        },
    );
    settings.save_to_path(&path).unwrap();
    path
}

#[tokio::test]
async fn database_destroy_evicts_local_state() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/databases/mydb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let settings_path = seeded_settings(&dir);

    let report = destroy_database(&client(&server), "mydb", &settings_path)
        .await
        .unwrap();

    assert!(report.cache_evicted);
    let settings = Settings::load_from_path(&settings_path).unwrap();
    assert!(settings.db_names_cache().is_none());
    assert!(settings.database_settings("mydb-id").is_none());
    assert!(settings.database_settings("other-id").is_some());
}

#[tokio::test]
async fn database_destroy_failure_leaves_local_state() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/databases/mydb"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "boom" })))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let settings_path = seeded_settings(&dir);
    let before = Settings::load_from_path(&settings_path).unwrap();

    let result = destroy_database(&client(&server), "mydb", &settings_path).await;

    assert!(result.is_err());
    assert_eq!(Settings::load_from_path(&settings_path).unwrap(), before);
}

#[tokio::test]
async fn database_destroy_tolerates_unreadable_settings() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/databases/mydb"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let settings_path = dir.path().join("settings.toml");
    std::fs::write(&settings_path, "[[[broken").unwrap();

    let report = destroy_database(&client(&server), "mydb", &settings_path)
        .await
        .unwrap();

    assert!(!report.cache_evicted);
    assert_eq!(report.database, "mydb");
}
