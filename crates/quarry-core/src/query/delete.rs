//! DELETE compilation.

use super::Query;
use crate::error::CompileError;
use crate::value::SqlValue;

impl Query {
    /// Compiles `DELETE FROM <table> [WHERE ...]`.
    ///
    /// Without predicates this deletes every row.
    ///
    /// # Errors
    ///
    /// Returns an error when the WHERE clause fails to compile.
    pub fn compile_delete(&self) -> Result<(String, Vec<SqlValue>), CompileError> {
        let (where_sql, params) = self.wheres.compile_clause("WHERE")?;
        Ok((format!("DELETE FROM {}{where_sql}", self.table), params))
    }
}
