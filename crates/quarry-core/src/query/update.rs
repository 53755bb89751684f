//! UPDATE compilation.

use super::{check_column, Query};
use crate::error::CompileError;
use crate::value::{SqlValue, ToSqlValue};

impl Query {
    /// Compiles `UPDATE <table> SET a = ?, b = ? [WHERE ...]`.
    ///
    /// Bindings are the SET values in order, followed by the WHERE bindings.
    /// The WHERE clause is compiled fresh on every call.
    ///
    /// # Errors
    ///
    /// Returns an error when `values` is empty or the WHERE clause fails to
    /// compile.
    pub fn compile_update<I, K, V>(&self, values: I) -> Result<(String, Vec<SqlValue>), CompileError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToSqlValue,
    {
        let mut sets = vec![];
        let mut params = vec![];

        for (column, value) in values {
            let column = column.into();
            check_column(&column)?;
            sets.push(format!("{column} = ?"));
            params.push(value.to_sql_value());
        }

        if sets.is_empty() {
            return Err(CompileError::EmptyUpdate);
        }

        let (where_sql, where_params) = self.wheres.compile_clause("WHERE")?;
        params.extend(where_params);

        Ok((
            format!("UPDATE {} SET {}{where_sql}", self.table, sets.join(", ")),
            params,
        ))
    }
}
