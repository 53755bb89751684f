//! WHERE / HAVING predicate lists.
//!
//! Compilation walks the predicates in insertion order and returns the clause
//! body together with its bindings. The first predicate's connector is never
//! emitted. Nothing is cached between calls, so compiling the same list twice
//! yields the same text and the same bindings.

use crate::error::CompileError;
use crate::value::SqlValue;

/// Comparison operators accepted by basic predicates.
const OPERATORS: &[&str] = &["=", "!=", "<>", "<", "<=", ">", ">=", "LIKE", "NOT LIKE"];

/// Boolean connector joining a predicate to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    /// `AND`
    And,
    /// `OR`
    Or,
}

impl Connector {
    /// SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// Shape of a predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateKind {
    /// `column <operator> ?`
    Basic {
        /// Comparison operator as given by the caller.
        operator: String,
        /// Bound value.
        value: SqlValue,
    },
    /// `column [NOT] IN (?,?)`
    In {
        /// Bound values, in order.
        values: Vec<SqlValue>,
        /// `NOT IN` when set.
        negated: bool,
    },
    /// `column IS [NOT] NULL`
    Null {
        /// `IS NOT NULL` when set.
        negated: bool,
    },
}

/// One WHERE or HAVING condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Column or expression on the left-hand side.
    pub column: String,
    /// Condition shape.
    pub kind: PredicateKind,
    /// Connector to the previous predicate.
    pub connector: Connector,
}

impl Predicate {
    fn compile(&self, sql: &mut String, params: &mut Vec<SqlValue>) -> Result<(), CompileError> {
        if self.column.trim().is_empty() {
            return Err(CompileError::EmptyColumn);
        }

        match &self.kind {
            PredicateKind::Basic { operator, value } => {
                let operator = normalize_operator(operator)?;
                sql.push_str(&format!("{} {operator} ?", self.column));
                params.push(value.clone());
            }
            PredicateKind::In { values, negated } => {
                if values.is_empty() {
                    // No row matches `IN ()` and every row matches `NOT IN ()`.
                    sql.push_str(if *negated { "1 = 1" } else { "0 = 1" });
                } else {
                    let placeholders = vec!["?"; values.len()].join(",");
                    let keyword = if *negated { "NOT IN" } else { "IN" };
                    sql.push_str(&format!("{} {keyword} ({placeholders})", self.column));
                    params.extend(values.iter().cloned());
                }
            }
            PredicateKind::Null { negated } => {
                let keyword = if *negated { "IS NOT NULL" } else { "IS NULL" };
                sql.push_str(&format!("{} {keyword}", self.column));
            }
        }

        Ok(())
    }
}

/// Validates an operator and returns its canonical upper-case form.
pub(crate) fn normalize_operator(operator: &str) -> Result<String, CompileError> {
    let canonical = operator
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase();

    if OPERATORS.contains(&canonical.as_str()) {
        Ok(canonical)
    } else {
        Err(CompileError::InvalidOperator(operator.to_string()))
    }
}

/// Ordered list of predicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredicateList {
    predicates: Vec<Predicate>,
}

impl PredicateList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    /// Appends a predicate.
    pub fn push(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    /// Appends a basic comparison.
    pub fn push_basic(
        &mut self,
        connector: Connector,
        column: impl Into<String>,
        operator: impl Into<String>,
        value: SqlValue,
    ) {
        self.push(Predicate {
            column: column.into(),
            kind: PredicateKind::Basic {
                operator: operator.into(),
                value,
            },
            connector,
        });
    }

    /// Appends a set-membership test.
    pub fn push_in(
        &mut self,
        connector: Connector,
        column: impl Into<String>,
        values: Vec<SqlValue>,
        negated: bool,
    ) {
        self.push(Predicate {
            column: column.into(),
            kind: PredicateKind::In { values, negated },
            connector,
        });
    }

    /// Appends a NULL test.
    pub fn push_null(&mut self, connector: Connector, column: impl Into<String>, negated: bool) {
        self.push(Predicate {
            column: column.into(),
            kind: PredicateKind::Null { negated },
            connector,
        });
    }

    /// Returns `true` when the list holds no predicates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Number of predicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Iterates over the predicates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Predicate> {
        self.predicates.iter()
    }

    /// Compiles the clause body (without the `WHERE` / `HAVING` keyword).
    ///
    /// Returns an empty string and no bindings for an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown operator or an empty column.
    pub fn compile(&self) -> Result<(String, Vec<SqlValue>), CompileError> {
        let mut sql = String::new();
        let mut params = vec![];

        for (i, predicate) in self.predicates.iter().enumerate() {
            if i > 0 {
                sql.push(' ');
                sql.push_str(predicate.connector.as_sql());
                sql.push(' ');
            }
            predicate.compile(&mut sql, &mut params)?;
        }

        Ok((sql, params))
    }

    /// Compiles the clause with its leading keyword and space, e.g.
    /// `" WHERE a = ?"`, or an empty string when the list is empty.
    ///
    /// # Errors
    ///
    /// Same as [`PredicateList::compile`].
    pub fn compile_clause(&self, keyword: &str) -> Result<(String, Vec<SqlValue>), CompileError> {
        if self.is_empty() {
            return Ok((String::new(), vec![]));
        }
        let (body, params) = self.compile()?;
        Ok((format!(" {keyword} {body}"), params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_connector_is_stripped() {
        let mut list = PredicateList::new();
        list.push_basic(Connector::Or, "a", "=", SqlValue::Int(1));

        let (sql, params) = list.compile().unwrap();
        assert_eq!(sql, "a = ?");
        assert_eq!(params, vec![SqlValue::Int(1)]);
    }

    #[test]
    fn test_connectors_between_predicates() {
        let mut list = PredicateList::new();
        list.push_basic(Connector::And, "a", "=", SqlValue::Int(1));
        list.push_basic(Connector::Or, "b", ">", SqlValue::Int(2));
        list.push_in(
            Connector::And,
            "c",
            vec![SqlValue::Int(3), SqlValue::Int(4)],
            false,
        );

        let (sql, params) = list.compile().unwrap();
        assert_eq!(sql, "a = ? OR b > ? AND c IN (?,?)");
        assert_eq!(
            params,
            vec![
                SqlValue::Int(1),
                SqlValue::Int(2),
                SqlValue::Int(3),
                SqlValue::Int(4)
            ]
        );
    }

    #[test]
    fn test_column_starting_with_connector_letters_is_kept() {
        // Trimming the leading connector must not eat into the column name.
        let mut list = PredicateList::new();
        list.push_basic(Connector::And, "amount", "=", SqlValue::Int(5));
        list.push_basic(Connector::And, "orders", "=", SqlValue::Int(6));

        let (sql, _) = list.compile().unwrap();
        assert_eq!(sql, "amount = ? AND orders = ?");
    }

    #[test]
    fn test_empty_in_sets() {
        let mut list = PredicateList::new();
        list.push_in(Connector::And, "id", vec![], false);
        list.push_in(Connector::Or, "id", vec![], true);

        let (sql, params) = list.compile().unwrap();
        assert_eq!(sql, "0 = 1 OR 1 = 1");
        assert!(params.is_empty());
    }

    #[test]
    fn test_null_predicates() {
        let mut list = PredicateList::new();
        list.push_null(Connector::And, "deleted_at", false);
        list.push_null(Connector::And, "email", true);

        let (sql, params) = list.compile().unwrap();
        assert_eq!(sql, "deleted_at IS NULL AND email IS NOT NULL");
        assert!(params.is_empty());
    }

    #[test]
    fn test_operator_normalization() {
        assert_eq!(normalize_operator("like").unwrap(), "LIKE");
        assert_eq!(normalize_operator("not   like").unwrap(), "NOT LIKE");
        assert_eq!(normalize_operator(">=").unwrap(), ">=");
        assert_eq!(
            normalize_operator("; DROP"),
            Err(CompileError::InvalidOperator("; DROP".into()))
        );
    }

    #[test]
    fn test_empty_column_rejected() {
        let mut list = PredicateList::new();
        list.push_basic(Connector::And, " ", "=", SqlValue::Int(1));
        assert_eq!(list.compile(), Err(CompileError::EmptyColumn));
    }

    #[test]
    fn test_compile_clause() {
        let mut list = PredicateList::new();
        assert_eq!(list.compile_clause("WHERE").unwrap(), (String::new(), vec![]));

        list.push_basic(Connector::And, "a", "!=", SqlValue::Null);
        assert_eq!(
            list.compile_clause("HAVING").unwrap(),
            (" HAVING a != ?".to_string(), vec![SqlValue::Null])
        );
    }

    #[test]
    fn test_compile_is_idempotent() {
        let mut list = PredicateList::new();
        list.push_basic(Connector::And, "a", "=", SqlValue::Int(1));
        list.push_in(Connector::Or, "b", vec![SqlValue::Int(2)], true);
        assert_eq!(list.compile(), list.compile());
    }
}
