#![allow(dead_code)]

use quarry_core::{Query, SqlValue};

/// Number of `?` placeholders in `sql`.
pub fn placeholders(sql: &str) -> usize {
    sql.matches('?').count()
}

/// Compiles `query` with the default dialect, panicking on error.
pub fn compile(query: &Query) -> (String, Vec<SqlValue>) {
    query
        .to_sql()
        .unwrap_or_else(|e| panic!("Failed to compile {query:?}\nError: {e}"))
}

/// Asserts that the placeholder count matches the binding count and that
/// compiling twice gives the same result.
pub fn assert_well_formed(query: &Query) -> (String, Vec<SqlValue>) {
    let (sql, params) = compile(query);
    assert_eq!(
        placeholders(&sql),
        params.len(),
        "placeholder/binding mismatch in {sql}"
    );
    assert_eq!(compile(query), (sql.clone(), params.clone()));
    (sql, params)
}

pub fn ints(values: &[i64]) -> Vec<SqlValue> {
    values.iter().copied().map(SqlValue::Int).collect()
}
