//! Table blueprints.

use super::column::{ColumnParameters, ColumnSpec, ColumnType};
use super::TableCommand;
use crate::dialect::Dialect;
use crate::error::CompileError;

/// Column definitions and drop commands for one table.
///
/// Whether the blueprint compiles to CREATE TABLE or ALTER TABLE is fixed
/// when it is constructed. Columns are emitted in the order they were added.
#[derive(Debug, Clone, PartialEq)]
pub struct Blueprint {
    table: String,
    is_alter: bool,
    columns: Vec<ColumnSpec>,
    commands: Vec<TableCommand>,
}

impl Blueprint {
    /// Creates a blueprint that compiles to `CREATE TABLE`.
    #[must_use]
    pub fn create(table: impl Into<String>) -> Self {
        Self::new(table.into(), false)
    }

    /// Creates a blueprint that compiles to `ALTER TABLE`.
    #[must_use]
    pub fn alter(table: impl Into<String>) -> Self {
        Self::new(table.into(), true)
    }

    fn new(table: String, is_alter: bool) -> Self {
        Self {
            table,
            is_alter,
            columns: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Table name.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Whether this blueprint alters an existing table.
    #[must_use]
    pub const fn is_alter(&self) -> bool {
        self.is_alter
    }

    /// Columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Queued drop commands in declaration order.
    #[must_use]
    pub fn commands(&self) -> &[TableCommand] {
        &self.commands
    }

    fn add(&mut self, column_type: ColumnType, name: &str, parameters: ColumnParameters) -> &mut ColumnSpec {
        self.columns.push(ColumnSpec::new(column_type, name, parameters));
        let last = self.columns.len() - 1;
        &mut self.columns[last]
    }

    fn add_plain(&mut self, column_type: ColumnType, name: &str) -> &mut ColumnSpec {
        self.add(column_type, name, ColumnParameters::default())
    }

    fn add_sized(&mut self, column_type: ColumnType, name: &str, length: u32) -> &mut ColumnSpec {
        self.add(
            column_type,
            name,
            ColumnParameters {
                length: Some(length),
                ..ColumnParameters::default()
            },
        )
    }

    /// Auto-incrementing unsigned big integer primary key.
    pub fn id(&mut self, name: &str) -> &mut ColumnSpec {
        self.big_integer(name).unsigned().auto_increment().primary()
    }

    /// `VARCHAR(36)` column for UUIDs.
    pub fn uuid(&mut self, name: &str) -> &mut ColumnSpec {
        self.add_sized(ColumnType::Varchar, name, 36)
    }

    /// `VARCHAR(length)` column.
    pub fn string(&mut self, name: &str, length: u32) -> &mut ColumnSpec {
        self.add_sized(ColumnType::Varchar, name, length)
    }

    /// `VARCHAR(255)` column.
    pub fn string_default(&mut self, name: &str) -> &mut ColumnSpec {
        self.string(name, 255)
    }

    /// `TEXT` column.
    pub fn text(&mut self, name: &str) -> &mut ColumnSpec {
        self.add_plain(ColumnType::Text, name)
    }

    /// `INT` column.
    pub fn integer(&mut self, name: &str) -> &mut ColumnSpec {
        self.add_plain(ColumnType::Int, name)
    }

    /// `BIGINT` column.
    pub fn big_integer(&mut self, name: &str) -> &mut ColumnSpec {
        self.add_plain(ColumnType::BigInt, name)
    }

    /// `TINYINT(1)` column.
    pub fn boolean(&mut self, name: &str) -> &mut ColumnSpec {
        self.add_sized(ColumnType::TinyInt, name, 1)
    }

    /// `DATE` column.
    pub fn date(&mut self, name: &str) -> &mut ColumnSpec {
        self.add_plain(ColumnType::Date, name)
    }

    /// `DATETIME` column.
    pub fn date_time(&mut self, name: &str) -> &mut ColumnSpec {
        self.add_plain(ColumnType::DateTime, name)
    }

    /// `TIMESTAMP` column.
    pub fn timestamp(&mut self, name: &str) -> &mut ColumnSpec {
        self.add_plain(ColumnType::Timestamp, name)
    }

    /// Nullable `created_at` and `updated_at` timestamps.
    pub fn timestamps(&mut self) {
        self.timestamp("created_at").nullable();
        self.timestamp("updated_at").nullable();
    }

    /// Nullable `deleted_at` timestamp.
    pub fn soft_deletes(&mut self) {
        self.timestamp("deleted_at").nullable();
    }

    /// `DECIMAL(total,places)` column.
    pub fn decimal(&mut self, name: &str, total: u8, places: u8) -> &mut ColumnSpec {
        self.add(
            ColumnType::Decimal,
            name,
            ColumnParameters {
                total: Some(total),
                places: Some(places),
                ..ColumnParameters::default()
            },
        )
    }

    /// `FLOAT` column.
    pub fn float(&mut self, name: &str) -> &mut ColumnSpec {
        self.add_plain(ColumnType::Float, name)
    }

    /// `DOUBLE` column.
    pub fn double(&mut self, name: &str) -> &mut ColumnSpec {
        self.add_plain(ColumnType::Double, name)
    }

    /// `ENUM` column restricted to `allowed`.
    pub fn enumeration<S: AsRef<str>>(&mut self, name: &str, allowed: &[S]) -> &mut ColumnSpec {
        self.add(
            ColumnType::Enum,
            name,
            ColumnParameters {
                allowed: allowed.iter().map(|v| v.as_ref().to_string()).collect(),
                ..ColumnParameters::default()
            },
        )
    }

    /// `JSON` column.
    pub fn json(&mut self, name: &str) -> &mut ColumnSpec {
        self.add_plain(ColumnType::Json, name)
    }

    /// Unsigned big integer meant to hold a foreign key.
    pub fn foreign_id(&mut self, name: &str) -> &mut ColumnSpec {
        self.big_integer(name).unsigned()
    }

    /// Queues `DROP COLUMN`.
    pub fn drop_column(&mut self, name: impl Into<String>) {
        self.commands.push(TableCommand::DropColumn(name.into()));
    }

    /// Queues `DROP FOREIGN KEY`.
    pub fn drop_foreign(&mut self, name: impl Into<String>) {
        self.commands.push(TableCommand::DropForeign(name.into()));
    }

    /// Queues `DROP INDEX`.
    pub fn drop_index(&mut self, name: impl Into<String>) {
        self.commands.push(TableCommand::DropIndex(name.into()));
    }

    /// Compiles the blueprint into a single DDL statement.
    ///
    /// # Errors
    ///
    /// Returns an error when there is nothing to emit, when drop commands
    /// were queued on a CREATE blueprint, or when a column fails to compile.
    pub fn to_sql(&self, dialect: &dyn Dialect) -> Result<String, CompileError> {
        if self.is_alter {
            self.compile_alter(dialect)
        } else {
            self.compile_create(dialect)
        }
    }

    fn compile_create(&self, dialect: &dyn Dialect) -> Result<String, CompileError> {
        if !self.commands.is_empty() {
            return Err(CompileError::CommandsOutsideAlter(self.table.clone()));
        }
        if self.columns.is_empty() {
            return Err(CompileError::EmptyBlueprint(self.table.clone()));
        }

        let definitions = self
            .columns
            .iter()
            .map(|column| column.to_sql(dialect).map(|def| format!("  {def}")))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(format!(
            "CREATE TABLE {} (\n{}\n){}",
            self.table,
            definitions.join(",\n"),
            dialect.table_options()
        ))
    }

    fn compile_alter(&self, dialect: &dyn Dialect) -> Result<String, CompileError> {
        if self.columns.is_empty() && self.commands.is_empty() {
            return Err(CompileError::EmptyBlueprint(self.table.clone()));
        }

        let mut parts = Vec::with_capacity(self.columns.len() + self.commands.len());
        for column in &self.columns {
            parts.push(format!(
                "  {} {}",
                dialect.add_column_keyword(),
                column.to_sql(dialect)?
            ));
        }
        for command in &self.commands {
            parts.push(format!("  {}", dialect.table_command(command)?));
        }

        Ok(format!("ALTER TABLE {}\n{}", self.table, parts.join(",\n")))
    }
}
