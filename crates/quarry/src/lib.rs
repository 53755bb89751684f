//! # quarry
//!
//! Runs statements compiled by [`quarry_core`] through a pluggable executor.
//!
//! - [`QueryBuilder`] - fluent queries with terminal operations (`get`,
//!   `first`, `count`, `exists`, `to_json`, `insert`, `update`, `delete`)
//! - [`Schema`] - CREATE / ALTER / DROP / RENAME TABLE and existence checks
//! - [`DatabaseManager`] - configuration, driver selection, DSN construction
//!   and the live connection handle
//!
//! Drivers plug in by implementing [`Executor`], [`Statement`] and
//! [`Connector`]. Compile errors are reported before anything is sent to the
//! executor.
//!
//! # Example
//!
//! ```rust,ignore
//! use quarry::prelude::*;
//!
//! let config = DatabaseConfig::from_file("config/database.json")?;
//! let mut db = DatabaseManager::new(config);
//! db.connect(&my_driver)?;
//!
//! db.schema()?.create("users", |table| {
//!     table.id("id");
//!     table.string("email", 120).unique();
//!     table.timestamps();
//! })?;
//!
//! db.table("users")?.insert([[("email", "ada@example.com")]])?;
//!
//! let adults = db
//!     .table("users")?
//!     .where_clause("age", ">=", 18)
//!     .order_by("email", "asc")
//!     .to_json(JsonFormat::Pretty)?;
//! ```

pub mod config;
pub mod error;
pub mod executor;
pub mod manager;
pub mod query;
pub mod row;
pub mod schema;

pub use config::{ConnectionConfig, DatabaseConfig, Driver};
pub use error::{Error, Result};
pub use executor::{Connector, Executor, Statement};
pub use manager::DatabaseManager;
pub use query::{JsonFormat, QueryBuilder};
pub use row::Row;
pub use schema::Schema;

pub use quarry_core;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{ConnectionConfig, DatabaseConfig, Driver};
    pub use crate::error::{Error, Result};
    pub use crate::executor::{Connector, Executor, Statement};
    pub use crate::manager::DatabaseManager;
    pub use crate::query::{JsonFormat, QueryBuilder};
    pub use crate::row::Row;
    pub use crate::schema::Schema;
    pub use quarry_core::dialect::{Dialect, MySqlDialect, SqlServerDialect};
    pub use quarry_core::schema::{Blueprint, ColumnSpec, ForeignKeyAction};
    pub use quarry_core::{CompileError, SqlValue, ToSqlValue};
}
