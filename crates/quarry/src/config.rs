//! Connection configuration, driver selection and DSN construction.
//!
//! Configuration is plain JSON:
//!
//! ```json
//! {
//!   "default": "mysql",
//!   "connections": {
//!     "mysql": {
//!       "driver": "mysql",
//!       "host": "localhost",
//!       "port": 3306,
//!       "database": "app",
//!       "username": "app",
//!       "password": "secret",
//!       "charset": "utf8mb4",
//!       "collation": "utf8mb4_unicode_ci",
//!       "maintenance_mode": false
//!     }
//!   }
//! }
//! ```
//!
//! Entries naming a driver outside the supported set load fine and only fail
//! when a connection to them is requested.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use quarry_core::dialect::{DEFAULT_CHARSET, DEFAULT_COLLATION};
use quarry_core::{Dialect, MySqlDialect, SqlServerDialect};

use crate::error::{Error, Result};

/// Supported database drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Driver {
    /// MySQL / MariaDB (`mysql`).
    MySql,
    /// Microsoft SQL Server (`sqlsrv`).
    SqlServer,
}

impl Driver {
    /// Driver name as written in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::SqlServer => "sqlsrv",
        }
    }

    /// Builds the DSN for `config`.
    ///
    /// MySQL: `mysql:host=H;port=P;dbname=D;charset=C`. SQL Server:
    /// `sqlsrv:Server=H,P;Database=D`. The port is omitted when unset.
    #[must_use]
    pub fn dsn(self, config: &ConnectionConfig) -> String {
        match self {
            Self::MySql => {
                let mut dsn = format!("mysql:host={}", config.host);
                if let Some(port) = config.port {
                    dsn.push_str(&format!(";port={port}"));
                }
                dsn.push_str(&format!(
                    ";dbname={};charset={}",
                    config.database,
                    config.charset.as_deref().unwrap_or(DEFAULT_CHARSET)
                ));
                dsn
            }
            Self::SqlServer => {
                let server = match config.port {
                    Some(port) => format!("{},{port}", config.host),
                    None => config.host.clone(),
                };
                format!("sqlsrv:Server={server};Database={}", config.database)
            }
        }
    }

    /// Builds the dialect statements for `config` are compiled with.
    #[must_use]
    pub fn dialect(self, config: &ConnectionConfig) -> Box<dyn Dialect> {
        match self {
            Self::MySql => Box::new(
                MySqlDialect::new()
                    .with_charset(config.charset.as_deref().unwrap_or(DEFAULT_CHARSET))
                    .with_collation(config.collation.as_deref().unwrap_or(DEFAULT_COLLATION)),
            ),
            Self::SqlServer => Box::new(SqlServerDialect::new()),
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Driver {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mysql" => Ok(Self::MySql),
            "sqlsrv" => Ok(Self::SqlServer),
            other => Err(Error::UnsupportedDriver(other.to_string())),
        }
    }
}

fn default_host() -> String {
    String::from("localhost")
}

/// Settings for one named connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Driver name; see [`Driver`].
    pub driver: String,
    /// Server host.
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port.
    #[serde(default)]
    pub port: Option<u16>,
    /// Database name.
    #[serde(default)]
    pub database: String,
    /// User name.
    #[serde(default)]
    pub username: Option<String>,
    /// Password.
    #[serde(default)]
    pub password: Option<String>,
    /// Character set (MySQL).
    #[serde(default)]
    pub charset: Option<String>,
    /// Collation (MySQL).
    #[serde(default)]
    pub collation: Option<String>,
    /// Refuse connections while set.
    #[serde(default, alias = "maintenanceMode", alias = "maintanceMode")]
    pub maintenance_mode: bool,
}

impl ConnectionConfig {
    /// Creates a configuration for `driver` on `localhost`.
    #[must_use]
    pub fn new(driver: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            driver: driver.into(),
            host: default_host(),
            port: None,
            database: database.into(),
            username: None,
            password: None,
            charset: None,
            collation: None,
            maintenance_mode: false,
        }
    }

    /// Sets the host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets user name and password.
    #[must_use]
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Sets the character set.
    #[must_use]
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// Sets the collation.
    #[must_use]
    pub fn with_collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }

    /// Turns maintenance mode on or off.
    #[must_use]
    pub const fn with_maintenance_mode(mut self, enabled: bool) -> Self {
        self.maintenance_mode = enabled;
        self
    }

    /// Parses the driver name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDriver`] for drivers other than `mysql`
    /// and `sqlsrv`.
    pub fn driver(&self) -> Result<Driver> {
        self.driver.parse()
    }

    /// Builds the DSN for this connection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDriver`] for an unsupported driver.
    pub fn dsn(&self) -> Result<String> {
        Ok(self.driver()?.dsn(self))
    }
}

/// All configured connections plus the name of the default one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Name of the connection used by [`DatabaseManager::connect`](crate::DatabaseManager::connect).
    pub default: String,
    /// Connections by name.
    #[serde(default)]
    pub connections: BTreeMap<String, ConnectionConfig>,
}

impl DatabaseConfig {
    /// Creates a configuration with a single connection that is also the
    /// default.
    #[must_use]
    pub fn single(name: impl Into<String>, connection: ConnectionConfig) -> Self {
        let name = name.into();
        let mut connections = BTreeMap::new();
        connections.insert(name.clone(), connection);
        Self {
            default: name,
            connections,
        }
    }

    /// Parses a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] for malformed input and [`Error::Config`] when
    /// the default connection is not among the configured ones.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read, otherwise as
    /// [`DatabaseConfig::from_json_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks that the default connection exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when it does not.
    pub fn validate(&self) -> Result<()> {
        if self.connections.contains_key(&self.default) {
            Ok(())
        } else {
            Err(Error::Config(format!(
                "default connection '{}' is not defined",
                self.default
            )))
        }
    }

    /// Looks up a connection by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownConnection`] when it is not configured.
    pub fn connection(&self, name: &str) -> Result<&ConnectionConfig> {
        self.connections
            .get(name)
            .ok_or_else(|| Error::UnknownConnection(name.to_string()))
    }

    /// The default connection.
    ///
    /// # Errors
    ///
    /// Same as [`DatabaseConfig::connection`].
    pub fn default_connection(&self) -> Result<&ConnectionConfig> {
        self.connection(&self.default)
    }
}
