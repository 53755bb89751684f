//! Connection manager.
//!
//! Holds the configuration and at most one live executor. Every statement
//! helper fails with [`Error::ConnectionUnavailable`] until
//! [`DatabaseManager::connect`] succeeds.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use quarry_core::SqlValue;

use crate::config::{DatabaseConfig, Driver};
use crate::error::{Error, Result};
use crate::executor::{self, Connector, Executor};
use crate::query::QueryBuilder;
use crate::row::Row;
use crate::schema::Schema;

/// Owns the configuration and the live connection handle.
pub struct DatabaseManager {
    config: DatabaseConfig,
    connection: Option<(String, Arc<dyn Executor>)>,
}

impl fmt::Debug for DatabaseManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseManager")
            .field("default", &self.config.default)
            .field("connected", &self.connection_name())
            .finish()
    }
}

impl DatabaseManager {
    /// Creates a disconnected manager.
    #[must_use]
    pub const fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            connection: None,
        }
    }

    /// The configuration.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Connects to the default connection.
    ///
    /// # Errors
    ///
    /// Same as [`DatabaseManager::connect_named`].
    pub fn connect(&mut self, connector: &dyn Connector) -> Result<()> {
        let name = self.config.default.clone();
        self.connect_named(&name, connector)
    }

    /// Connects to the connection called `name`.
    ///
    /// Does nothing when a connection is already open. The driver and the
    /// maintenance flag are checked before `connector` is called.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownConnection`], [`Error::UnsupportedDriver`],
    /// [`Error::MaintenanceMode`], or the connector's error.
    pub fn connect_named(&mut self, name: &str, connector: &dyn Connector) -> Result<()> {
        if let Some((current, _)) = &self.connection {
            debug!(connection = %current, "Already connected, skipping");
            return Ok(());
        }

        let config = self.config.connection(name)?;
        let driver: Driver = config.driver()?;

        if config.maintenance_mode {
            warn!(connection = %name, "Connection refused: maintenance mode is on");
            return Err(Error::MaintenanceMode(name.to_string()));
        }

        let dsn = driver.dsn(config);
        info!(connection = %name, driver = %driver, "Connecting to database");
        let executor = connector.connect(config, &dsn)?;
        self.connection = Some((name.to_string(), executor));
        Ok(())
    }

    /// Drops the live connection. Returns `true` when one was open.
    pub fn disconnect(&mut self) -> bool {
        match self.connection.take() {
            Some((name, _)) => {
                info!(connection = %name, "Disconnected from database");
                true
            }
            None => false,
        }
    }

    /// Returns `true` while a connection is open.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Name of the open connection.
    #[must_use]
    pub fn connection_name(&self) -> Option<&str> {
        self.connection.as_ref().map(|(name, _)| name.as_str())
    }

    /// The live executor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionUnavailable`] before `connect`.
    pub fn connection(&self) -> Result<Arc<dyn Executor>> {
        self.connection
            .as_ref()
            .map(|(_, executor)| Arc::clone(executor))
            .ok_or(Error::ConnectionUnavailable)
    }

    /// Starts a query against `table`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionUnavailable`] before `connect`.
    pub fn table(&self, table: &str) -> Result<QueryBuilder> {
        Ok(QueryBuilder::new(self.connection()?, table))
    }

    /// Schema façade over the live executor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionUnavailable`] before `connect`.
    pub fn schema(&self) -> Result<Schema> {
        Ok(Schema::new(self.connection()?))
    }

    /// Runs a raw query and returns its rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionUnavailable`] before `connect`, or the
    /// executor's error.
    pub fn query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>> {
        let executor = self.connection()?;
        executor::fetch(executor.as_ref(), sql, params)
    }

    /// Runs a raw statement and returns the driver's success flag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionUnavailable`] before `connect`, or the
    /// executor's error.
    pub fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<bool> {
        let executor = self.connection()?;
        executor::execute(executor.as_ref(), sql, params)
    }
}
