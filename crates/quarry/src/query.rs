//! Executor-bound query builder.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use quarry_core::query::Projection;
use quarry_core::{Query, SqlValue, ToSqlValue};

use crate::error::{Error, Result};
use crate::executor::{self, Executor};
use crate::row::Row;

/// JSON rendering style for [`QueryBuilder::to_json`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Single line.
    #[default]
    Compact,
    /// Indented.
    Pretty,
}

impl JsonFormat {
    fn render<T: Serialize + ?Sized>(self, value: &T) -> Result<String> {
        Ok(match self {
            Self::Compact => serde_json::to_string(value)?,
            Self::Pretty => serde_json::to_string_pretty(value)?,
        })
    }
}

/// A [`Query`] bound to an executor.
///
/// Fluent methods consume and return the builder; terminal methods borrow it
/// and compile a fresh statement on every call, so a builder can be run more
/// than once.
#[derive(Clone)]
pub struct QueryBuilder {
    executor: Arc<dyn Executor>,
    query: Query,
}

impl fmt::Debug for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("dialect", &self.executor.dialect().name())
            .field("query", &self.query)
            .finish()
    }
}

impl QueryBuilder {
    /// Starts a query against `table` on `executor`.
    #[must_use]
    pub fn new(executor: Arc<dyn Executor>, table: impl Into<String>) -> Self {
        Self {
            executor,
            query: Query::table(table),
        }
    }

    /// The accumulated query state.
    #[must_use]
    pub const fn query(&self) -> &Query {
        &self.query
    }

    fn map(mut self, f: impl FnOnce(Query) -> Query) -> Self {
        self.query = f(self.query);
        self
    }

    /// Sets the projection.
    #[must_use]
    pub fn select(self, columns: impl Into<Projection>) -> Self {
        self.map(|q| q.select(columns))
    }

    /// Adds `AND column <operator> ?`.
    #[must_use]
    pub fn where_clause(self, column: &str, operator: &str, value: impl ToSqlValue) -> Self {
        self.map(|q| q.where_clause(column, operator, value))
    }

    /// Adds `AND column = ?`.
    #[must_use]
    pub fn where_eq(self, column: &str, value: impl ToSqlValue) -> Self {
        self.map(|q| q.where_eq(column, value))
    }

    /// Adds `OR column <operator> ?`.
    #[must_use]
    pub fn or_where(self, column: &str, operator: &str, value: impl ToSqlValue) -> Self {
        self.map(|q| q.or_where(column, operator, value))
    }

    /// Adds `OR column = ?`.
    #[must_use]
    pub fn or_where_eq(self, column: &str, value: impl ToSqlValue) -> Self {
        self.map(|q| q.or_where_eq(column, value))
    }

    /// Adds `AND column IN (...)`. An empty set never matches.
    #[must_use]
    pub fn where_in<I>(self, column: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToSqlValue,
    {
        self.map(|q| q.where_in(column, values))
    }

    /// Adds `OR column IN (...)`.
    #[must_use]
    pub fn or_where_in<I>(self, column: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToSqlValue,
    {
        self.map(|q| q.or_where_in(column, values))
    }

    /// Adds `AND column NOT IN (...)`.
    #[must_use]
    pub fn where_not_in<I>(self, column: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToSqlValue,
    {
        self.map(|q| q.where_not_in(column, values))
    }

    /// Adds `AND column IS NULL`.
    #[must_use]
    pub fn where_null(self, column: &str) -> Self {
        self.map(|q| q.where_null(column))
    }

    /// Adds `AND column IS NOT NULL`.
    #[must_use]
    pub fn where_not_null(self, column: &str) -> Self {
        self.map(|q| q.where_not_null(column))
    }

    /// Adds an INNER JOIN.
    #[must_use]
    pub fn join(self, table: &str, first: &str, operator: &str, second: &str) -> Self {
        self.map(|q| q.join(table, first, operator, second))
    }

    /// Adds a LEFT JOIN.
    #[must_use]
    pub fn left_join(self, table: &str, first: &str, operator: &str, second: &str) -> Self {
        self.map(|q| q.left_join(table, first, operator, second))
    }

    /// Adds a RIGHT JOIN.
    #[must_use]
    pub fn right_join(self, table: &str, first: &str, operator: &str, second: &str) -> Self {
        self.map(|q| q.right_join(table, first, operator, second))
    }

    /// Adds an ORDER BY entry.
    #[must_use]
    pub fn order_by(self, column: &str, direction: &str) -> Self {
        self.map(|q| q.order_by(column, direction))
    }

    /// Adds a descending ORDER BY entry.
    #[must_use]
    pub fn order_by_desc(self, column: &str) -> Self {
        self.map(|q| q.order_by_desc(column))
    }

    /// Sets LIMIT.
    #[must_use]
    pub fn limit(self, n: u64) -> Self {
        self.map(|q| q.limit(n))
    }

    /// Sets OFFSET.
    #[must_use]
    pub fn offset(self, n: u64) -> Self {
        self.map(|q| q.offset(n))
    }

    /// Appends GROUP BY columns.
    #[must_use]
    pub fn group_by<S: AsRef<str>>(self, columns: &[S]) -> Self {
        self.map(|q| q.group_by(columns))
    }

    /// Adds `AND column <operator> ?` to HAVING.
    #[must_use]
    pub fn having(self, column: &str, operator: &str, value: impl ToSqlValue) -> Self {
        self.map(|q| q.having(column, operator, value))
    }

    /// Adds `AND column = ?` to HAVING.
    #[must_use]
    pub fn having_eq(self, column: &str, value: impl ToSqlValue) -> Self {
        self.map(|q| q.having_eq(column, value))
    }

    /// Adds `OR column <operator> ?` to HAVING.
    #[must_use]
    pub fn or_having(self, column: &str, operator: &str, value: impl ToSqlValue) -> Self {
        self.map(|q| q.or_having(column, operator, value))
    }

    /// Compiles the SELECT for the executor's dialect without running it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Compile`] for invalid builder state.
    pub fn to_sql(&self) -> Result<(String, Vec<SqlValue>)> {
        Ok(self.query.to_sql_with(self.executor.dialect())?)
    }

    /// Runs the SELECT and returns every row.
    ///
    /// # Errors
    ///
    /// Returns a compile error before any I/O, or the executor's error.
    pub fn get(&self) -> Result<Vec<Row>> {
        let (sql, params) = self.to_sql()?;
        executor::fetch(self.executor.as_ref(), &sql, &params)
    }

    /// Runs the SELECT with `LIMIT 1` and returns the first row, if any.
    ///
    /// The builder itself is left without a limit.
    ///
    /// # Errors
    ///
    /// Same as [`QueryBuilder::get`].
    pub fn first(&self) -> Result<Option<Row>> {
        let (sql, params) = self
            .query
            .clone()
            .limit(1)
            .to_sql_with(self.executor.dialect())?;
        let rows = executor::fetch(self.executor.as_ref(), &sql, &params)?;
        Ok(rows.into_iter().next())
    }

    /// Counts the rows the SELECT would return.
    ///
    /// # Errors
    ///
    /// Same as [`QueryBuilder::get`], plus [`Error::UnexpectedResult`] when
    /// the executor does not return a single non-negative integer.
    pub fn count(&self) -> Result<u64> {
        let (sql, params) = self.query.to_count_sql_with(self.executor.dialect())?;
        let rows = executor::fetch(self.executor.as_ref(), &sql, &params)?;

        let row = rows
            .first()
            .ok_or_else(|| Error::UnexpectedResult(String::from("COUNT(*) returned no row")))?;
        let value = row
            .get("aggregate")
            .or_else(|| row.values().next())
            .ok_or_else(|| Error::UnexpectedResult(String::from("COUNT(*) returned no column")))?;

        let count = value
            .as_i64()
            .and_then(|n| u64::try_from(n).ok())
            .ok_or_else(|| Error::UnexpectedResult(format!("COUNT(*) returned {value:?}")))?;
        debug!(table = %self.query.table_name(), count, "Counted rows");
        Ok(count)
    }

    /// Returns `true` when at least one row matches.
    ///
    /// # Errors
    ///
    /// Same as [`QueryBuilder::count`].
    pub fn exists(&self) -> Result<bool> {
        Ok(self.count()? > 0)
    }

    /// Runs the SELECT and serializes the rows as a JSON array.
    ///
    /// # Errors
    ///
    /// Same as [`QueryBuilder::get`], plus serialization errors.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        format.render(&self.get()?)
    }

    /// Serializes the first row as a JSON object, or `{}` when there is none.
    ///
    /// # Errors
    ///
    /// Same as [`QueryBuilder::first`], plus serialization errors.
    pub fn first_to_json(&self, format: JsonFormat) -> Result<String> {
        match self.first()? {
            Some(row) => format.render(&row),
            None => Ok(String::from("{}")),
        }
    }

    /// Inserts `rows` with a single multi-row INSERT.
    ///
    /// # Errors
    ///
    /// Returns a compile error (empty or mismatched rows) before any I/O, or
    /// the executor's error.
    pub fn insert<I, R, K, V>(&self, rows: I) -> Result<bool>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToSqlValue,
    {
        let (sql, params) = self.query.compile_insert(rows)?;
        executor::execute(self.executor.as_ref(), &sql, &params)
    }

    /// Updates the matching rows.
    ///
    /// # Errors
    ///
    /// Returns a compile error before any I/O, or the executor's error.
    pub fn update<I, K, V>(&self, values: I) -> Result<bool>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToSqlValue,
    {
        let (sql, params) = self.query.compile_update(values)?;
        executor::execute(self.executor.as_ref(), &sql, &params)
    }

    /// Deletes the matching rows.
    ///
    /// # Errors
    ///
    /// Returns a compile error before any I/O, or the executor's error.
    pub fn delete(&self) -> Result<bool> {
        let (sql, params) = self.query.compile_delete()?;
        executor::execute(self.executor.as_ref(), &sql, &params)
    }
}
