//! INSERT compilation.

use super::{check_column, Query};
use crate::error::CompileError;
use crate::value::{SqlValue, ToSqlValue};

impl Query {
    /// Compiles a multi-row INSERT with one placeholder group per row.
    ///
    /// Each row is an ordered sequence of `(column, value)` pairs. The column
    /// list is taken from the first row; every other row must name the same
    /// columns in the same order.
    ///
    /// # Errors
    ///
    /// Returns an error when there are no rows, a row has no columns, or a
    /// row's columns differ from the first row's.
    pub fn compile_insert<I, R, K, V>(&self, rows: I) -> Result<(String, Vec<SqlValue>), CompileError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToSqlValue,
    {
        let mut columns: Vec<String> = vec![];
        let mut groups = vec![];
        let mut params = vec![];

        for (index, row) in rows.into_iter().enumerate() {
            let (names, values): (Vec<String>, Vec<SqlValue>) = row
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_sql_value()))
                .unzip();

            if names.is_empty() {
                return Err(CompileError::EmptyInsertRow(index));
            }

            if index == 0 {
                for name in &names {
                    check_column(name)?;
                }
                columns = names;
            } else if names != columns {
                return Err(CompileError::MismatchedInsertRow { row: index });
            }

            groups.push(format!("({})", vec!["?"; values.len()].join(", ")));
            params.extend(values);
        }

        if groups.is_empty() {
            return Err(CompileError::EmptyInsert);
        }

        let sql = format!(
            "INSERT INTO {} ({}) VALUES {}",
            self.table,
            columns.join(", "),
            groups.join(", ")
        );

        Ok((sql, params))
    }
}
