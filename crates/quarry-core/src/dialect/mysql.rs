//! MySQL / MariaDB dialect.

use super::Dialect;
use crate::error::CompileError;
use crate::schema::{ColumnSpec, ColumnType, TableCommand};
use crate::value::SqlValue;

/// Storage engine used when none is configured.
pub const DEFAULT_ENGINE: &str = "InnoDB";
/// Character set used when none is configured.
pub const DEFAULT_CHARSET: &str = "utf8mb4";
/// Collation used when none is configured.
pub const DEFAULT_COLLATION: &str = "utf8mb4_unicode_ci";

/// MySQL dialect.
///
/// The table options appended to `CREATE TABLE` are configurable and default
/// to `ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MySqlDialect {
    engine: String,
    charset: String,
    collation: String,
}

impl Default for MySqlDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl MySqlDialect {
    /// Creates a MySQL dialect with the default table options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            engine: String::from(DEFAULT_ENGINE),
            charset: String::from(DEFAULT_CHARSET),
            collation: String::from(DEFAULT_COLLATION),
        }
    }

    /// Sets the storage engine.
    #[must_use]
    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    /// Sets the default character set.
    #[must_use]
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }

    /// Sets the default collation.
    #[must_use]
    pub fn with_collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = collation.into();
        self
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    /// MySQL only accepts OFFSET after a LIMIT, so a bare offset gets the
    /// largest row count the server allows.
    fn pagination(&self, limit: Option<u64>, offset: Option<u64>, _ordered: bool) -> String {
        match (limit, offset) {
            (Some(n), Some(m)) => format!(" LIMIT {n} OFFSET {m}"),
            (Some(n), None) => format!(" LIMIT {n}"),
            (None, Some(m)) => format!(" LIMIT {} OFFSET {m}", u64::MAX),
            (None, None) => String::new(),
        }
    }

    fn quote_string(&self, value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 2);
        escaped.push('\'');
        for ch in value.chars() {
            match ch {
                '\\' | '\'' | '"' => {
                    escaped.push('\\');
                    escaped.push(ch);
                }
                '\0' => escaped.push_str("\\0"),
                _ => escaped.push(ch),
            }
        }
        escaped.push('\'');
        escaped
    }

    fn type_definition(&self, column: &ColumnSpec) -> Result<String, CompileError> {
        let params = column.parameters();
        let mut sql = column.column_type().as_str().to_uppercase();

        if let Some(length) = params.length {
            sql.push_str(&format!("({length})"));
        }

        if let (Some(total), Some(places)) = (params.total, params.places) {
            sql.push_str(&format!("({total},{places})"));
        }

        if column.column_type() == ColumnType::Enum {
            if params.allowed.is_empty() {
                return Err(CompileError::EmptyEnum(column.name().to_string()));
            }
            let allowed: Vec<String> = params
                .allowed
                .iter()
                .map(|v| self.quote_string(v))
                .collect();
            sql.push_str(&format!("({})", allowed.join(",")));
        }

        if params.unsigned {
            sql.push_str(" UNSIGNED");
        }

        Ok(sql)
    }

    fn auto_increment_keyword(&self) -> &'static str {
        "AUTO_INCREMENT"
    }

    fn table_options(&self) -> String {
        format!(
            " ENGINE={} DEFAULT CHARSET={} COLLATE={}",
            self.engine, self.charset, self.collation
        )
    }

    fn table_command(&self, command: &TableCommand) -> Result<String, CompileError> {
        Ok(match command {
            TableCommand::DropColumn(name) => format!("DROP COLUMN {name}"),
            TableCommand::DropForeign(name) => format!("DROP FOREIGN KEY {name}"),
            TableCommand::DropIndex(name) => format!("DROP INDEX {name}"),
        })
    }

    fn rename_table(&self, from: &str, to: &str) -> String {
        format!("RENAME TABLE {from} TO {to}")
    }

    fn has_table(&self, table: &str) -> (String, Vec<SqlValue>) {
        (
            String::from("SHOW TABLES LIKE ?"),
            vec![SqlValue::Text(table.to_string())],
        )
    }

    fn has_column(&self, table: &str, column: &str) -> (String, Vec<SqlValue>) {
        (
            format!("SHOW COLUMNS FROM {table} LIKE ?"),
            vec![SqlValue::Text(column.to_string())],
        )
    }
}
