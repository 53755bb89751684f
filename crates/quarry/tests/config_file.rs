//! Tests for loading configuration from disk.

mod common;

use std::io::Write;

use common::*;
use quarry::{DatabaseConfig, DatabaseManager, Driver, Error};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_config_file_and_connects() {
    let file = write_config(
        r#"{
            "default": "mysql",
            "connections": {
                "mysql": {
                    "driver": "mysql",
                    "host": "127.0.0.1",
                    "port": 3306,
                    "database": "shop",
                    "username": "shop",
                    "password": "secret",
                    "charset": "utf8mb4",
                    "collation": "utf8mb4_unicode_ci"
                }
            }
        }"#,
    );

    let config = DatabaseConfig::from_file(file.path()).unwrap();
    let connection = config.default_connection().unwrap();
    assert_eq!(connection.driver().unwrap(), Driver::MySql);
    assert_eq!(connection.username.as_deref(), Some("shop"));

    let connector = RecordingConnector::default();
    let mut db = DatabaseManager::new(config);
    db.connect(&connector).unwrap();
    assert_eq!(
        connector.dsns(),
        vec!["mysql:host=127.0.0.1;port=3306;dbname=shop;charset=utf8mb4"]
    );
}

#[test]
fn legacy_maintenance_key_is_honoured() {
    let file = write_config(
        r#"{
            "default": "main",
            "connections": {
                "main": { "driver": "mysql", "database": "app", "maintanceMode": true }
            }
        }"#,
    );

    let mut db = DatabaseManager::new(DatabaseConfig::from_file(file.path()).unwrap());
    assert!(matches!(
        db.connect(&RecordingConnector::default()),
        Err(Error::MaintenanceMode(_))
    ));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database.json");
    assert!(matches!(DatabaseConfig::from_file(path), Err(Error::Io(_))));
}

#[test]
fn undefined_default_is_config_error() {
    let file = write_config(
        r#"{
            "default": "missing",
            "connections": {
                "main": { "driver": "mysql", "database": "app" }
            }
        }"#,
    );
    assert!(matches!(
        DatabaseConfig::from_file(file.path()),
        Err(Error::Config(_))
    ));
}
