//! # quarry-core
//!
//! SQL compilation engine: a fluent query builder that compiles chained calls
//! into parameterized SQL plus a positional binding list, and a schema DSL that
//! compiles table descriptions into CREATE TABLE / ALTER TABLE statements.
//!
//! Nothing in this crate performs I/O. Executing the compiled statements is
//! the job of the `quarry` crate.
//!
//! ## Queries
//!
//! ```rust
//! use quarry_core::{Query, SqlValue};
//!
//! let (sql, params) = Query::table("users")
//!     .where_eq("active", true)
//!     .where_in("role", ["admin", "editor"])
//!     .to_sql()
//!     .unwrap();
//!
//! assert_eq!(sql, "SELECT * FROM users WHERE active = ? AND role IN (?,?)");
//! assert_eq!(params.len(), 3);
//! ```
//!
//! ## SQL Injection Prevention
//!
//! Values are always bound, never spliced into the statement:
//!
//! ```rust
//! use quarry_core::{Query, SqlValue};
//!
//! let user_input = "'; DROP TABLE users; --";
//! let (sql, params) = Query::table("users")
//!     .select("id")
//!     .where_eq("name", user_input)
//!     .to_sql()
//!     .unwrap();
//!
//! assert_eq!(sql, "SELECT id FROM users WHERE name = ?");
//! assert_eq!(params, vec![SqlValue::Text(user_input.to_string())]);
//! ```
//!
//! ## Schema
//!
//! ```rust
//! use quarry_core::dialect::MySqlDialect;
//! use quarry_core::schema::{Blueprint, ForeignKeyAction};
//!
//! let mut table = Blueprint::alter("posts");
//! table
//!     .foreign_id("author_id")
//!     .references("id")
//!     .on("users")
//!     .on_delete(ForeignKeyAction::Cascade);
//! table.drop_column("legacy_author");
//!
//! let sql = table.to_sql(&MySqlDialect::new()).unwrap();
//! assert!(sql.ends_with(",\n  DROP COLUMN legacy_author"));
//! ```

pub mod dialect;
pub mod error;
pub mod query;
pub mod schema;
pub mod value;

pub use dialect::{Dialect, MySqlDialect, SqlServerDialect};
pub use error::CompileError;
pub use query::Query;
pub use schema::Blueprint;
pub use value::{SqlValue, ToSqlValue};
