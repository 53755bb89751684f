//! Fluent query builder.
//!
//! [`Query`] accumulates the state of one statement against one table and
//! compiles it into SQL text plus a positional binding list. Compilation takes
//! `&self`, so the same query can be compiled any number of times.
//!
//! # Example
//!
//! ```rust
//! use quarry_core::query::Query;
//! use quarry_core::SqlValue;
//!
//! let (sql, params) = Query::table("users")
//!     .select("*")
//!     .where_clause("age", ">", 18)
//!     .order_by("name", "desc")
//!     .limit(10)
//!     .to_sql()
//!     .unwrap();
//!
//! assert_eq!(sql, "SELECT * FROM users WHERE age > ? ORDER BY name DESC LIMIT 10");
//! assert_eq!(params, vec![SqlValue::Int(18)]);
//! ```

mod delete;
mod insert;
mod predicate;
mod select;
mod update;

pub use predicate::{Connector, Predicate, PredicateKind, PredicateList};

use predicate::normalize_operator;

use crate::error::CompileError;
use crate::value::ToSqlValue;

/// Selected-columns expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection(String);

impl Projection {
    /// The expression as emitted after `SELECT`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self(String::from("*"))
    }
}

impl From<&str> for Projection {
    fn from(value: &str) -> Self {
        Self(String::from(value))
    }
}

impl From<String> for Projection {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<S: AsRef<str>> From<&[S]> for Projection {
    fn from(columns: &[S]) -> Self {
        Self(
            columns
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

impl<S: AsRef<str>, const N: usize> From<[S; N]> for Projection {
    fn from(columns: [S; N]) -> Self {
        Self::from(columns.as_slice())
    }
}

impl<S: AsRef<str>> From<Vec<S>> for Projection {
    fn from(columns: Vec<S>) -> Self {
        Self::from(columns.as_slice())
    }
}

/// Join flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// `INNER JOIN`
    Inner,
    /// `LEFT JOIN`
    Left,
    /// `RIGHT JOIN`
    Right,
}

impl JoinKind {
    /// SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
        }
    }
}

/// One join clause: `<kind> <table> ON <first> <operator> <second>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    /// Join flavour.
    pub kind: JoinKind,
    /// Joined table.
    pub table: String,
    /// Left-hand column.
    pub first: String,
    /// Comparison operator.
    pub operator: String,
    /// Right-hand column.
    pub second: String,
}

/// One ORDER BY entry. The direction is validated at compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Sort column.
    pub column: String,
    /// `asc` or `desc`, any case.
    pub direction: String,
}

/// Accumulated state of one query.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    table: String,
    columns: Projection,
    joins: Vec<Join>,
    wheres: PredicateList,
    groups: Vec<String>,
    havings: PredicateList,
    orders: Vec<Order>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Query {
    /// Starts a query against `table`, selecting `*`.
    #[must_use]
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Projection::default(),
            joins: vec![],
            wheres: PredicateList::new(),
            groups: vec![],
            havings: PredicateList::new(),
            orders: vec![],
            limit: None,
            offset: None,
        }
    }

    /// Target table.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// WHERE predicates.
    #[must_use]
    pub const fn wheres(&self) -> &PredicateList {
        &self.wheres
    }

    /// HAVING predicates.
    #[must_use]
    pub const fn havings(&self) -> &PredicateList {
        &self.havings
    }

    /// Sets the projection. Replaces any earlier projection.
    #[must_use]
    pub fn select(mut self, columns: impl Into<Projection>) -> Self {
        self.columns = columns.into();
        self
    }

    /// Adds `AND column <operator> ?`.
    #[must_use]
    pub fn where_clause(mut self, column: &str, operator: &str, value: impl ToSqlValue) -> Self {
        self.wheres
            .push_basic(Connector::And, column, operator, value.to_sql_value());
        self
    }

    /// Adds `AND column = ?`.
    #[must_use]
    pub fn where_eq(self, column: &str, value: impl ToSqlValue) -> Self {
        self.where_clause(column, "=", value)
    }

    /// Adds `OR column <operator> ?`.
    #[must_use]
    pub fn or_where(mut self, column: &str, operator: &str, value: impl ToSqlValue) -> Self {
        self.wheres
            .push_basic(Connector::Or, column, operator, value.to_sql_value());
        self
    }

    /// Adds `OR column = ?`.
    #[must_use]
    pub fn or_where_eq(self, column: &str, value: impl ToSqlValue) -> Self {
        self.or_where(column, "=", value)
    }

    /// Adds `AND column IN (...)`. An empty set never matches.
    #[must_use]
    pub fn where_in<I>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToSqlValue,
    {
        let values = values.into_iter().map(ToSqlValue::to_sql_value).collect();
        self.wheres.push_in(Connector::And, column, values, false);
        self
    }

    /// Adds `OR column IN (...)`.
    #[must_use]
    pub fn or_where_in<I>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToSqlValue,
    {
        let values = values.into_iter().map(ToSqlValue::to_sql_value).collect();
        self.wheres.push_in(Connector::Or, column, values, false);
        self
    }

    /// Adds `AND column NOT IN (...)`. An empty set always matches.
    #[must_use]
    pub fn where_not_in<I>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToSqlValue,
    {
        let values = values.into_iter().map(ToSqlValue::to_sql_value).collect();
        self.wheres.push_in(Connector::And, column, values, true);
        self
    }

    /// Adds `AND column IS NULL`.
    #[must_use]
    pub fn where_null(mut self, column: &str) -> Self {
        self.wheres.push_null(Connector::And, column, false);
        self
    }

    /// Adds `AND column IS NOT NULL`.
    #[must_use]
    pub fn where_not_null(mut self, column: &str) -> Self {
        self.wheres.push_null(Connector::And, column, true);
        self
    }

    fn push_join(
        mut self,
        kind: JoinKind,
        table: &str,
        first: &str,
        operator: &str,
        second: &str,
    ) -> Self {
        self.joins.push(Join {
            kind,
            table: String::from(table),
            first: String::from(first),
            operator: String::from(operator),
            second: String::from(second),
        });
        self
    }

    /// Adds an INNER JOIN.
    #[must_use]
    pub fn join(self, table: &str, first: &str, operator: &str, second: &str) -> Self {
        self.push_join(JoinKind::Inner, table, first, operator, second)
    }

    /// Adds a LEFT JOIN.
    #[must_use]
    pub fn left_join(self, table: &str, first: &str, operator: &str, second: &str) -> Self {
        self.push_join(JoinKind::Left, table, first, operator, second)
    }

    /// Adds a RIGHT JOIN.
    #[must_use]
    pub fn right_join(self, table: &str, first: &str, operator: &str, second: &str) -> Self {
        self.push_join(JoinKind::Right, table, first, operator, second)
    }

    /// Adds an ORDER BY entry. `direction` is `asc` or `desc`, any case.
    #[must_use]
    pub fn order_by(mut self, column: &str, direction: &str) -> Self {
        self.orders.push(Order {
            column: String::from(column),
            direction: String::from(direction),
        });
        self
    }

    /// Adds a descending ORDER BY entry.
    #[must_use]
    pub fn order_by_desc(self, column: &str) -> Self {
        self.order_by(column, "desc")
    }

    /// Sets LIMIT.
    #[must_use]
    pub const fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Sets OFFSET.
    #[must_use]
    pub const fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Appends GROUP BY columns.
    #[must_use]
    pub fn group_by<S: AsRef<str>>(mut self, columns: &[S]) -> Self {
        self.groups
            .extend(columns.iter().map(|c| c.as_ref().to_string()));
        self
    }

    /// Adds `AND column <operator> ?` to HAVING.
    #[must_use]
    pub fn having(mut self, column: &str, operator: &str, value: impl ToSqlValue) -> Self {
        self.havings
            .push_basic(Connector::And, column, operator, value.to_sql_value());
        self
    }

    /// Adds `AND column = ?` to HAVING.
    #[must_use]
    pub fn having_eq(self, column: &str, value: impl ToSqlValue) -> Self {
        self.having(column, "=", value)
    }

    /// Adds `OR column <operator> ?` to HAVING.
    #[must_use]
    pub fn or_having(mut self, column: &str, operator: &str, value: impl ToSqlValue) -> Self {
        self.havings
            .push_basic(Connector::Or, column, operator, value.to_sql_value());
        self
    }
}

fn check_column(column: &str) -> Result<(), CompileError> {
    if column.trim().is_empty() {
        Err(CompileError::EmptyColumn)
    } else {
        Ok(())
    }
}
