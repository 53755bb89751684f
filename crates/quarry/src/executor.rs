//! Executor collaborator interface.
//!
//! The library never talks to a database directly. A driver integration
//! implements [`Executor`] (prepare statements, report its dialect) and
//! [`Connector`] (open an executor from a connection configuration); query
//! builders, the schema façade and the manager go through these traits only.

use std::sync::Arc;

use tracing::debug;

use quarry_core::{Dialect, SqlValue};

use crate::config::ConnectionConfig;
use crate::error::{Error, Result};
use crate::row::Row;

/// A live database handle.
pub trait Executor: Send + Sync {
    /// Dialect statements for this handle are compiled with.
    fn dialect(&self) -> &dyn Dialect;

    /// Prepares `sql` for execution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionUnavailable`] when the handle is closed, or
    /// an execution error reported by the driver.
    fn prepare(&self, sql: &str) -> Result<Box<dyn Statement + '_>>;
}

/// A prepared statement.
pub trait Statement {
    /// Executes with `bindings` substituted positionally for `?`.
    ///
    /// # Errors
    ///
    /// Returns an execution error reported by the driver.
    fn execute(&mut self, bindings: &[SqlValue]) -> Result<bool>;

    /// Fetches every row produced by the last execution.
    ///
    /// # Errors
    ///
    /// Returns an execution error reported by the driver.
    fn fetch_all(&mut self) -> Result<Vec<Row>>;
}

/// Opens executors from configuration.
pub trait Connector {
    /// Opens an executor for `config`, using the DSN built for its driver.
    ///
    /// # Errors
    ///
    /// Returns an execution error when the database cannot be reached.
    fn connect(&self, config: &ConnectionConfig, dsn: &str) -> Result<Arc<dyn Executor>>;
}

/// Prepares and executes a statement, returning the driver's success flag.
pub(crate) fn execute(executor: &dyn Executor, sql: &str, bindings: &[SqlValue]) -> Result<bool> {
    debug!(sql = %sql, bindings = bindings.len(), "Executing SQL");
    let mut statement = executor.prepare(sql)?;
    statement.execute(bindings)
}

/// Prepares and executes a query, returning all rows.
pub(crate) fn fetch(executor: &dyn Executor, sql: &str, bindings: &[SqlValue]) -> Result<Vec<Row>> {
    debug!(sql = %sql, bindings = bindings.len(), "Fetching rows");
    let mut statement = executor.prepare(sql)?;
    if !statement.execute(bindings)? {
        return Err(Error::UnexpectedResult(format!(
            "executor reported failure without an error for: {sql}"
        )));
    }
    let rows = statement.fetch_all()?;
    debug!(rows = rows.len(), "Fetched rows");
    Ok(rows)
}
