//! Schema façade: builds blueprints, compiles them and submits the DDL.

use std::fmt;
use std::sync::Arc;

use tracing::info;

use quarry_core::schema::Blueprint;

use crate::error::Result;
use crate::executor::{self, Executor};

/// Runs DDL through an executor.
///
/// Every blueprint is compiled with the executor's dialect before anything is
/// sent, so a blueprint that fails to compile never reaches the database.
#[derive(Clone)]
pub struct Schema {
    executor: Arc<dyn Executor>,
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("dialect", &self.executor.dialect().name())
            .finish()
    }
}

impl Schema {
    /// Creates a façade over `executor`.
    #[must_use]
    pub fn new(executor: Arc<dyn Executor>) -> Self {
        Self { executor }
    }

    /// Compiles a CREATE TABLE blueprint without running it.
    ///
    /// # Errors
    ///
    /// Returns a compile error for an invalid blueprint.
    pub fn create_sql(&self, table: &str, build: impl FnOnce(&mut Blueprint)) -> Result<String> {
        let mut blueprint = Blueprint::create(table);
        build(&mut blueprint);
        Ok(blueprint.to_sql(self.executor.dialect())?)
    }

    /// Compiles an ALTER TABLE blueprint without running it.
    ///
    /// # Errors
    ///
    /// Returns a compile error for an invalid blueprint.
    pub fn table_sql(&self, table: &str, build: impl FnOnce(&mut Blueprint)) -> Result<String> {
        let mut blueprint = Blueprint::alter(table);
        build(&mut blueprint);
        Ok(blueprint.to_sql(self.executor.dialect())?)
    }

    /// Creates `table` from the columns added by `build`.
    ///
    /// # Errors
    ///
    /// Returns a compile error before any I/O, or the executor's error.
    pub fn create(&self, table: &str, build: impl FnOnce(&mut Blueprint)) -> Result<bool> {
        let sql = self.create_sql(table, build)?;
        info!(table = %table, "Creating table");
        self.run(&sql)
    }

    /// Alters `table` with the columns and drop commands added by `build`.
    ///
    /// # Errors
    ///
    /// Returns a compile error before any I/O, or the executor's error.
    pub fn table(&self, table: &str, build: impl FnOnce(&mut Blueprint)) -> Result<bool> {
        let sql = self.table_sql(table, build)?;
        info!(table = %table, "Altering table");
        self.run(&sql)
    }

    /// Drops `table` if it exists.
    ///
    /// # Errors
    ///
    /// Returns the executor's error.
    pub fn drop(&self, table: &str) -> Result<bool> {
        info!(table = %table, "Dropping table");
        self.run(&self.executor.dialect().drop_table_if_exists(table))
    }

    /// Same as [`Schema::drop`].
    ///
    /// # Errors
    ///
    /// Returns the executor's error.
    pub fn drop_if_exists(&self, table: &str) -> Result<bool> {
        self.drop(table)
    }

    /// Renames `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns the executor's error.
    pub fn rename(&self, from: &str, to: &str) -> Result<bool> {
        info!(from = %from, to = %to, "Renaming table");
        self.run(&self.executor.dialect().rename_table(from, to))
    }

    /// Returns `true` when `table` exists.
    ///
    /// # Errors
    ///
    /// Returns the executor's error.
    pub fn has_table(&self, table: &str) -> Result<bool> {
        let (sql, params) = self.executor.dialect().has_table(table);
        Ok(!executor::fetch(self.executor.as_ref(), &sql, &params)?.is_empty())
    }

    /// Returns `true` when `table` has a column named `column`.
    ///
    /// # Errors
    ///
    /// Returns the executor's error.
    pub fn has_column(&self, table: &str, column: &str) -> Result<bool> {
        let (sql, params) = self.executor.dialect().has_column(table, column);
        Ok(!executor::fetch(self.executor.as_ref(), &sql, &params)?.is_empty())
    }

    fn run(&self, sql: &str) -> Result<bool> {
        executor::execute(self.executor.as_ref(), sql, &[])
    }
}
