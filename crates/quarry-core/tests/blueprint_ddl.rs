//! Tests for CREATE / ALTER TABLE compilation across both dialects.

use quarry_core::dialect::{Dialect, MySqlDialect, SqlServerDialect};
use quarry_core::schema::{Blueprint, ForeignKeyAction};
use quarry_core::CompileError;

fn users_blueprint() -> Blueprint {
    let mut table = Blueprint::create("users");
    table.id("id");
    table.string("name", 50);
    table.string_default("email").unique();
    table.enumeration("role", &["admin", "member"]).default("member");
    table.decimal("balance", 10, 2).default(0);
    table.json("settings").nullable();
    table.timestamps();
    table.soft_deletes();
    table
}

#[test]
fn create_single_string_column() {
    let mut table = Blueprint::create("t");
    table.string("name", 50);

    assert_eq!(
        table.to_sql(&MySqlDialect::new()).unwrap(),
        "CREATE TABLE t (\n  name VARCHAR(50) NOT NULL\n) \
         ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci"
    );
}

#[test]
fn create_uses_configured_table_options() {
    let mut table = Blueprint::create("t");
    table.integer("n");

    let dialect = MySqlDialect::new()
        .with_engine("Aria")
        .with_charset("utf8")
        .with_collation("utf8_general_ci");
    assert!(table
        .to_sql(&dialect)
        .unwrap()
        .ends_with(") ENGINE=Aria DEFAULT CHARSET=utf8 COLLATE=utf8_general_ci"));
}

#[test]
fn create_users_mysql() {
    let sql = users_blueprint().to_sql(&MySqlDialect::new()).unwrap();
    let expected = [
        "CREATE TABLE users (",
        "  id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,",
        "  name VARCHAR(50) NOT NULL,",
        "  email VARCHAR(255) NOT NULL UNIQUE,",
        "  role ENUM('admin','member') NOT NULL DEFAULT 'member',",
        "  balance DECIMAL(10,2) NOT NULL DEFAULT 0,",
        "  settings JSON NULL,",
        "  created_at TIMESTAMP NULL,",
        "  updated_at TIMESTAMP NULL,",
        "  deleted_at TIMESTAMP NULL",
        ") ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci",
    ]
    .join("\n");
    assert_eq!(sql, expected);
}

#[test]
fn create_users_sqlserver() {
    let sql = users_blueprint().to_sql(&SqlServerDialect::new()).unwrap();
    let expected = [
        "CREATE TABLE users (",
        "  id BIGINT NOT NULL IDENTITY(1,1) PRIMARY KEY,",
        "  name NVARCHAR(50) NOT NULL,",
        "  email NVARCHAR(255) NOT NULL UNIQUE,",
        "  role NVARCHAR(255) CHECK (role IN ('admin','member')) NOT NULL DEFAULT 'member',",
        "  balance DECIMAL(10,2) NOT NULL DEFAULT 0,",
        "  settings NVARCHAR(MAX) NULL,",
        "  created_at DATETIME2 NULL,",
        "  updated_at DATETIME2 NULL,",
        "  deleted_at DATETIME2 NULL",
        ")",
    ]
    .join("\n");
    assert_eq!(sql, expected);
}

#[test]
fn alter_adds_columns_before_commands() {
    let mut table = Blueprint::alter("t");
    table.drop_column("x");
    table.boolean("flag").default(true);

    let sql = table.to_sql(&MySqlDialect::new()).unwrap();
    assert_eq!(
        sql,
        "ALTER TABLE t\n  ADD COLUMN flag TINYINT(1) NOT NULL DEFAULT 1,\n  DROP COLUMN x"
    );
    assert!(!sql.ends_with(','));
}

#[test]
fn alter_with_foreign_key() {
    let mut table = Blueprint::alter("posts");
    table
        .foreign_id("author_id")
        .references("id")
        .on("users")
        .on_delete(ForeignKeyAction::SetNull)
        .on_update(ForeignKeyAction::NoAction);
    table.drop_foreign("posts_user_id_foreign");

    assert_eq!(
        table.to_sql(&MySqlDialect::new()).unwrap(),
        "ALTER TABLE posts\n  ADD COLUMN author_id BIGINT UNSIGNED NOT NULL \
         FOREIGN KEY (author_id) REFERENCES users(id) ON DELETE SET NULL ON UPDATE NO ACTION,\n  \
         DROP FOREIGN KEY posts_user_id_foreign"
    );
}

#[test]
fn alter_sqlserver_rejects_positioning_and_drop_index() {
    let mut positioned = Blueprint::alter("t");
    positioned.integer("n").after("id");
    assert!(matches!(
        positioned.to_sql(&SqlServerDialect::new()),
        Err(CompileError::Unsupported { dialect: "sqlsrv", .. })
    ));

    let mut index = Blueprint::alter("t");
    index.drop_index("t_n_index");
    assert!(matches!(
        index.to_sql(&SqlServerDialect::new()),
        Err(CompileError::Unsupported { .. })
    ));
}

#[test]
fn compile_is_repeatable() {
    let table = users_blueprint();
    let dialect = MySqlDialect::new();
    assert_eq!(table.to_sql(&dialect), table.to_sql(&dialect));
}

#[test]
fn blueprints_compile_through_trait_objects() {
    let dialects: Vec<Box<dyn Dialect>> =
        vec![Box::new(MySqlDialect::new()), Box::new(SqlServerDialect::new())];
    let mut table = Blueprint::create("t");
    table.uuid("id").primary();

    let rendered: Vec<String> = dialects
        .iter()
        .map(|d| table.to_sql(d.as_ref()).unwrap())
        .collect();
    assert!(rendered[0].contains("id VARCHAR(36) NOT NULL PRIMARY KEY"));
    assert!(rendered[1].contains("id NVARCHAR(36) NOT NULL PRIMARY KEY"));
}
