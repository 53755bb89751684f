//! Schema definition DSL.
//!
//! A [`Blueprint`] collects [`ColumnSpec`]s and drop commands for one table and
//! compiles them into a CREATE TABLE or ALTER TABLE statement.
//!
//! ```rust
//! use quarry_core::dialect::MySqlDialect;
//! use quarry_core::schema::Blueprint;
//!
//! let mut table = Blueprint::create("users");
//! table.id("id");
//! table.string("email", 120).unique();
//!
//! let sql = table.to_sql(&MySqlDialect::new()).unwrap();
//! assert!(sql.starts_with("CREATE TABLE users (\n  id BIGINT UNSIGNED NOT NULL"));
//! ```

mod blueprint;
mod column;

pub use blueprint::Blueprint;
pub use column::{
    ColumnParameters, ColumnSpec, ColumnType, DefaultValue, ForeignKey, ForeignKeyAction,
};

/// A queued ALTER TABLE command other than adding a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableCommand {
    /// Drop a column by name.
    DropColumn(String),
    /// Drop a foreign key constraint by name.
    DropForeign(String),
    /// Drop an index by name.
    DropIndex(String),
}
