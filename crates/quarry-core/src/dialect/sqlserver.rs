//! SQL Server dialect.
//!
//! T-SQL has no `UNSIGNED`, no `ENUM`, no `LIMIT` and no column positioning,
//! so those constructs are mapped or rejected here.

use super::Dialect;
use crate::error::CompileError;
use crate::schema::{ColumnSpec, ColumnType, TableCommand};
use crate::value::SqlValue;

/// SQL Server dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlServerDialect;

impl SqlServerDialect {
    /// Creates a new SQL Server dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqlServerDialect {
    fn name(&self) -> &'static str {
        "sqlsrv"
    }

    fn pagination(&self, limit: Option<u64>, offset: Option<u64>, ordered: bool) -> String {
        if limit.is_none() && offset.is_none() {
            return String::new();
        }

        // OFFSET/FETCH is only valid after an ORDER BY.
        let mut sql = String::new();
        if !ordered {
            sql.push_str(" ORDER BY (SELECT NULL)");
        }
        sql.push_str(&format!(" OFFSET {} ROWS", offset.unwrap_or(0)));
        if let Some(n) = limit {
            sql.push_str(&format!(" FETCH NEXT {n} ROWS ONLY"));
        }
        sql
    }

    fn type_definition(&self, column: &ColumnSpec) -> Result<String, CompileError> {
        let params = column.parameters();
        let sql = match column.column_type() {
            ColumnType::BigInt => String::from("BIGINT"),
            ColumnType::Int => String::from("INT"),
            ColumnType::TinyInt => String::from("TINYINT"),
            ColumnType::Varchar => format!("NVARCHAR({})", params.length.unwrap_or(255)),
            ColumnType::Text | ColumnType::Json => String::from("NVARCHAR(MAX)"),
            ColumnType::Date => String::from("DATE"),
            ColumnType::DateTime | ColumnType::Timestamp => String::from("DATETIME2"),
            ColumnType::Decimal => match (params.total, params.places) {
                (Some(total), Some(places)) => format!("DECIMAL({total},{places})"),
                _ => String::from("DECIMAL"),
            },
            ColumnType::Float => String::from("REAL"),
            ColumnType::Double => String::from("FLOAT"),
            ColumnType::Enum => {
                if params.allowed.is_empty() {
                    return Err(CompileError::EmptyEnum(column.name().to_string()));
                }
                let allowed: Vec<String> = params
                    .allowed
                    .iter()
                    .map(|v| self.quote_string(v))
                    .collect();
                format!(
                    "NVARCHAR(255) CHECK ({} IN ({}))",
                    column.name(),
                    allowed.join(",")
                )
            }
        };
        Ok(sql)
    }

    fn auto_increment_keyword(&self) -> &'static str {
        "IDENTITY(1,1)"
    }

    fn add_column_keyword(&self) -> &'static str {
        "ADD"
    }

    fn supports_column_positioning(&self) -> bool {
        false
    }

    fn table_command(&self, command: &TableCommand) -> Result<String, CompileError> {
        match command {
            TableCommand::DropColumn(name) => Ok(format!("DROP COLUMN {name}")),
            TableCommand::DropForeign(name) => Ok(format!("DROP CONSTRAINT {name}")),
            TableCommand::DropIndex(_) => Err(CompileError::Unsupported {
                dialect: self.name(),
                feature: "DROP INDEX inside ALTER TABLE",
            }),
        }
    }

    fn rename_table(&self, from: &str, to: &str) -> String {
        format!(
            "EXEC sp_rename {}, {}",
            self.quote_string(from),
            self.quote_string(to)
        )
    }

    fn has_table(&self, table: &str) -> (String, Vec<SqlValue>) {
        (
            String::from("SELECT TABLE_NAME FROM INFORMATION_SCHEMA.TABLES WHERE TABLE_NAME = ?"),
            vec![SqlValue::Text(table.to_string())],
        )
    }

    fn has_column(&self, table: &str, column: &str) -> (String, Vec<SqlValue>) {
        (
            String::from(
                "SELECT COLUMN_NAME FROM INFORMATION_SCHEMA.COLUMNS \
                 WHERE TABLE_NAME = ? AND COLUMN_NAME = ?",
            ),
            vec![
                SqlValue::Text(table.to_string()),
                SqlValue::Text(column.to_string()),
            ],
        )
    }
}
