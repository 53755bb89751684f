//! Tests for connection management and the raw statement helpers.

mod common;

use common::*;
use quarry::{ConnectionConfig, DatabaseConfig, DatabaseManager, Error};
use quarry_core::SqlValue;

fn manager_for(connection: ConnectionConfig) -> DatabaseManager {
    DatabaseManager::new(DatabaseConfig::single("main", connection))
}

#[test]
fn connect_builds_mysql_dsn() {
    let connector = RecordingConnector::default();
    let mut db = manager_for(
        ConnectionConfig::new("mysql", "app")
            .with_host("db")
            .with_port(3307)
            .with_credentials("app", "secret"),
    );

    db.connect(&connector).unwrap();

    assert!(db.is_connected());
    assert_eq!(db.connection_name(), Some("main"));
    assert_eq!(
        connector.dsns(),
        vec!["mysql:host=db;port=3307;dbname=app;charset=utf8mb4"]
    );
}

#[test]
fn connect_builds_sqlserver_dsn() {
    let connector = RecordingConnector::default();
    let mut db = manager_for(ConnectionConfig::new("sqlsrv", "reports").with_port(1433));

    db.connect(&connector).unwrap();

    assert_eq!(
        connector.dsns(),
        vec!["sqlsrv:Server=localhost,1433;Database=reports"]
    );
    assert_eq!(db.connection().unwrap().dialect().name(), "sqlsrv");
}

#[test]
fn unsupported_driver_fails_before_connector() {
    let connector = RecordingConnector::default();
    let mut db = manager_for(ConnectionConfig::new("pgsql", "app"));

    assert!(matches!(
        db.connect(&connector),
        Err(Error::UnsupportedDriver(name)) if name == "pgsql"
    ));
    assert!(connector.dsns().is_empty());
    assert!(!db.is_connected());
}

#[test]
fn unknown_connection_name() {
    let connector = RecordingConnector::default();
    let mut db = manager_for(ConnectionConfig::new("mysql", "app"));

    assert!(matches!(
        db.connect_named("replica", &connector),
        Err(Error::UnknownConnection(name)) if name == "replica"
    ));
    assert!(connector.dsns().is_empty());
}

#[test]
fn maintenance_mode_refuses_connection() {
    let connector = RecordingConnector::default();
    let mut db = manager_for(ConnectionConfig::new("mysql", "app").with_maintenance_mode(true));

    assert!(matches!(
        db.connect(&connector),
        Err(Error::MaintenanceMode(name)) if name == "main"
    ));
    assert!(connector.dsns().is_empty());
    assert!(!db.is_connected());
}

#[test]
fn helpers_require_a_connection() {
    let db = manager_for(ConnectionConfig::new("mysql", "app"));

    assert!(matches!(db.table("users"), Err(Error::ConnectionUnavailable)));
    assert!(matches!(db.schema(), Err(Error::ConnectionUnavailable)));
    assert!(matches!(
        db.query("SELECT 1", &[]),
        Err(Error::ConnectionUnavailable)
    ));
    assert!(matches!(
        db.execute("DELETE FROM users", &[]),
        Err(Error::ConnectionUnavailable)
    ));
}

#[test]
fn reconnect_is_a_no_op() {
    let connector = RecordingConnector::default();
    let mut db = manager_for(ConnectionConfig::new("mysql", "app"));

    db.connect(&connector).unwrap();
    db.connect(&connector).unwrap();

    assert_eq!(connector.dsns().len(), 1);
}

#[test]
fn disconnect_drops_the_handle() {
    let connector = RecordingConnector::default();
    let mut db = manager_for(ConnectionConfig::new("mysql", "app"));

    assert!(!db.disconnect());
    db.connect(&connector).unwrap();
    assert!(db.disconnect());
    assert!(!db.is_connected());
    assert!(matches!(db.table("users"), Err(Error::ConnectionUnavailable)));

    db.connect(&connector).unwrap();
    assert_eq!(connector.dsns().len(), 2);
}

#[test]
fn named_connections_are_selectable() {
    let config = DatabaseConfig::from_json_str(
        r#"{
            "default": "primary",
            "connections": {
                "primary": { "driver": "mysql", "database": "app" },
                "warehouse": { "driver": "sqlsrv", "host": "dw", "database": "facts" }
            }
        }"#,
    )
    .unwrap();
    let connector = RecordingConnector::default();
    let mut db = DatabaseManager::new(config);

    db.connect_named("warehouse", &connector).unwrap();

    assert_eq!(db.connection_name(), Some("warehouse"));
    assert_eq!(connector.dsns(), vec!["sqlsrv:Server=dw;Database=facts"]);
}

#[test]
fn table_and_schema_share_the_connection() {
    let connector = RecordingConnector::default();
    let mut db = manager_for(ConnectionConfig::new("mysql", "app"));
    db.connect(&connector).unwrap();
    let executor = connector.executor();

    db.schema()
        .unwrap()
        .create("users", |table| {
            table.id("id");
        })
        .unwrap();
    db.table("users").unwrap().where_eq("id", 1).delete().unwrap();

    let statements = executor.statements();
    assert_eq!(statements.len(), 2);
    assert!(statements[0].starts_with("CREATE TABLE users"));
    assert_eq!(statements[1], "DELETE FROM users WHERE id = ?");
}

#[test]
fn raw_query_and_execute_pass_bindings_through() {
    let connector = RecordingConnector::default();
    let mut db = manager_for(ConnectionConfig::new("mysql", "app"));
    db.connect(&connector).unwrap();
    let executor = connector.executor();
    executor.push_result(vec![row(&[("now", "2024-01-01")])]);

    let rows = db.query("SELECT NOW() AS now WHERE ? = ?", &[SqlValue::Int(1), SqlValue::Int(1)]).unwrap();
    assert_eq!(rows[0].get("now"), Some(&SqlValue::Text("2024-01-01".into())));

    assert!(db
        .execute("UPDATE counters SET n = n + ?", &[SqlValue::Int(1)])
        .unwrap());
    assert_eq!(
        executor.log(),
        vec![
            (
                String::from("SELECT NOW() AS now WHERE ? = ?"),
                vec![SqlValue::Int(1), SqlValue::Int(1)]
            ),
            (
                String::from("UPDATE counters SET n = n + ?"),
                vec![SqlValue::Int(1)]
            ),
        ]
    );
}

#[test]
fn connector_uses_configured_charset_for_dialect() {
    let connector = RecordingConnector::default();
    let mut db = manager_for(
        ConnectionConfig::new("mysql", "app")
            .with_charset("latin1")
            .with_collation("latin1_swedish_ci"),
    );
    db.connect(&connector).unwrap();

    let sql = db
        .schema()
        .unwrap()
        .create_sql("t", |table| {
            table.integer("n");
        })
        .unwrap();
    assert!(sql.ends_with(" ENGINE=InnoDB DEFAULT CHARSET=latin1 COLLATE=latin1_swedish_ci"));
    assert_eq!(
        connector.dsns(),
        vec!["mysql:host=localhost;dbname=app;charset=latin1"]
    );
}
