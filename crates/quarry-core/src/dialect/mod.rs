//! SQL Dialect support.
//!
//! Query and DDL compilation is shared; the pieces that differ between
//! database servers (type names, literal escaping, pagination, table
//! options, introspection) are behind the [`Dialect`] trait.

mod mysql;
mod sqlserver;

pub use mysql::{MySqlDialect, DEFAULT_CHARSET, DEFAULT_COLLATION, DEFAULT_ENGINE};
pub use sqlserver::SqlServerDialect;

use std::fmt;

use crate::error::CompileError;
use crate::schema::{ColumnSpec, DefaultValue, TableCommand};
use crate::value::SqlValue;

/// Trait for SQL dialect-specific behavior.
pub trait Dialect: fmt::Debug + Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Renders the LIMIT / OFFSET tail of a SELECT, including its leading
    /// space. `ordered` tells whether an ORDER BY clause was emitted.
    fn pagination(&self, limit: Option<u64>, offset: Option<u64>, _ordered: bool) -> String {
        let mut sql = String::new();
        if let Some(n) = limit {
            sql.push_str(&format!(" LIMIT {n}"));
        }
        if let Some(n) = offset {
            sql.push_str(&format!(" OFFSET {n}"));
        }
        sql
    }

    /// Quotes a string literal.
    fn quote_string(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    /// Renders a column default.
    fn render_default(&self, default: &DefaultValue) -> String {
        match default {
            DefaultValue::Null => String::from("NULL"),
            DefaultValue::Bool(b) => String::from(if *b { "1" } else { "0" }),
            DefaultValue::Int(n) => n.to_string(),
            DefaultValue::Float(f) => f.to_string(),
            DefaultValue::Text(s) => self.quote_string(s),
        }
    }

    /// Renders the type part of a column definition.
    ///
    /// # Errors
    ///
    /// Returns an error when the column parameters cannot be expressed.
    fn type_definition(&self, column: &ColumnSpec) -> Result<String, CompileError>;

    /// Keyword emitted for auto-incrementing columns.
    fn auto_increment_keyword(&self) -> &'static str;

    /// Keyword that introduces a column in ALTER TABLE.
    fn add_column_keyword(&self) -> &'static str {
        "ADD COLUMN"
    }

    /// Whether `AFTER <column>` can be used when adding columns.
    fn supports_column_positioning(&self) -> bool {
        true
    }

    /// Trailer appended after the column list of CREATE TABLE, including
    /// its leading space.
    fn table_options(&self) -> String {
        String::new()
    }

    /// Renders one queued ALTER TABLE command.
    ///
    /// # Errors
    ///
    /// Returns an error when the dialect has no in-place form for the
    /// command.
    fn table_command(&self, command: &TableCommand) -> Result<String, CompileError>;

    /// `DROP TABLE IF EXISTS` statement.
    fn drop_table_if_exists(&self, table: &str) -> String {
        format!("DROP TABLE IF EXISTS {table}")
    }

    /// Table rename statement.
    fn rename_table(&self, from: &str, to: &str) -> String;

    /// Query returning at least one row when `table` exists.
    fn has_table(&self, table: &str) -> (String, Vec<SqlValue>);

    /// Query returning at least one row when `table.column` exists.
    fn has_column(&self, table: &str, column: &str) -> (String, Vec<SqlValue>);
}
