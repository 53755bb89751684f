#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use quarry::config::{ConnectionConfig, Driver};
use quarry::error::{Error, Result};
use quarry::executor::{Connector, Executor, Statement};
use quarry::row::Row;
use quarry_core::dialect::{Dialect, MySqlDialect, SqlServerDialect};
use quarry_core::{SqlValue, ToSqlValue};

/// Executor that records every statement and replays canned result sets.
#[derive(Debug)]
pub struct RecordingExecutor {
    dialect: Box<dyn Dialect>,
    log: Mutex<Vec<(String, Vec<SqlValue>)>>,
    results: Mutex<VecDeque<Vec<Row>>>,
    success: Mutex<bool>,
    failure: Mutex<Option<String>>,
}

impl RecordingExecutor {
    pub fn new(dialect: Box<dyn Dialect>) -> Arc<Self> {
        Arc::new(Self {
            dialect,
            log: Mutex::new(Vec::new()),
            results: Mutex::new(VecDeque::new()),
            success: Mutex::new(true),
            failure: Mutex::new(None),
        })
    }

    pub fn mysql() -> Arc<Self> {
        Self::new(Box::new(MySqlDialect::new()))
    }

    pub fn sqlserver() -> Arc<Self> {
        Self::new(Box::new(SqlServerDialect::new()))
    }

    /// Queues the rows returned by the next fetch.
    pub fn push_result(&self, rows: Vec<Row>) {
        self.results.lock().unwrap().push_back(rows);
    }

    /// Makes every execute report `false` without an error.
    pub fn report_failure(&self) {
        *self.success.lock().unwrap() = false;
    }

    /// Makes every prepare fail with an execution error.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    /// Every `(sql, bindings)` pair executed so far.
    pub fn log(&self) -> Vec<(String, Vec<SqlValue>)> {
        self.log.lock().unwrap().clone()
    }

    /// SQL of every statement executed so far.
    pub fn statements(&self) -> Vec<String> {
        self.log().into_iter().map(|(sql, _)| sql).collect()
    }

    /// The last statement executed.
    pub fn last(&self) -> (String, Vec<SqlValue>) {
        self.log()
            .pop()
            .unwrap_or_else(|| panic!("no statement was executed"))
    }
}

impl Executor for RecordingExecutor {
    fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    fn prepare(&self, sql: &str) -> Result<Box<dyn Statement + '_>> {
        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(Error::execution(message));
        }
        Ok(Box::new(RecordingStatement {
            executor: self,
            sql: sql.to_string(),
        }))
    }
}

pub struct RecordingStatement<'a> {
    executor: &'a RecordingExecutor,
    sql: String,
}

impl Statement for RecordingStatement<'_> {
    fn execute(&mut self, bindings: &[SqlValue]) -> Result<bool> {
        self.executor
            .log
            .lock()
            .unwrap()
            .push((self.sql.clone(), bindings.to_vec()));
        Ok(*self.executor.success.lock().unwrap())
    }

    fn fetch_all(&mut self) -> Result<Vec<Row>> {
        Ok(self
            .executor
            .results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }
}

/// Connector that records the DSNs it was asked to open.
#[derive(Debug, Default)]
pub struct RecordingConnector {
    pub dsns: Mutex<Vec<String>>,
    pub executors: Mutex<Vec<Arc<RecordingExecutor>>>,
}

impl RecordingConnector {
    pub fn dsns(&self) -> Vec<String> {
        self.dsns.lock().unwrap().clone()
    }

    /// The executor handed out by the most recent connect.
    pub fn executor(&self) -> Arc<RecordingExecutor> {
        self.executors
            .lock()
            .unwrap()
            .last()
            .cloned()
            .unwrap_or_else(|| panic!("connector was never called"))
    }
}

impl Connector for RecordingConnector {
    fn connect(&self, config: &ConnectionConfig, dsn: &str) -> Result<Arc<dyn Executor>> {
        let driver: Driver = config.driver()?;
        let executor = RecordingExecutor::new(driver.dialect(config));
        self.dsns.lock().unwrap().push(dsn.to_string());
        self.executors.lock().unwrap().push(Arc::clone(&executor));
        Ok(executor)
    }
}

/// Builds a row from `(column, value)` pairs.
pub fn row<V: ToSqlValue + Clone>(entries: &[(&str, V)]) -> Row {
    entries
        .iter()
        .map(|(column, value)| (*column, value.clone()))
        .collect()
}
