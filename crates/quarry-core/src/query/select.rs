//! SELECT and COUNT compilation.

use super::{check_column, normalize_operator, Query};
use crate::dialect::{Dialect, MySqlDialect};
use crate::error::CompileError;
use crate::value::SqlValue;

fn normalize_direction(direction: &str) -> Result<&'static str, CompileError> {
    match direction.trim().to_ascii_lowercase().as_str() {
        "asc" => Ok("ASC"),
        "desc" => Ok("DESC"),
        _ => Err(CompileError::InvalidDirection(direction.to_string())),
    }
}

impl Query {
    /// Compiles the SELECT with the default (MySQL) dialect.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid operator, sort direction or empty
    /// column name.
    pub fn to_sql(&self) -> Result<(String, Vec<SqlValue>), CompileError> {
        self.to_sql_with(&MySqlDialect::new())
    }

    /// Compiles the SELECT for `dialect`.
    ///
    /// Clause order: SELECT, FROM, JOIN, WHERE, GROUP BY, HAVING, ORDER BY,
    /// LIMIT, OFFSET. WHERE bindings precede HAVING bindings.
    ///
    /// # Errors
    ///
    /// Same as [`Query::to_sql`].
    pub fn to_sql_with(&self, dialect: &dyn Dialect) -> Result<(String, Vec<SqlValue>), CompileError> {
        self.compile_select(dialect, self.columns.as_str(), true)
    }

    /// Compiles a `COUNT(*) AS aggregate` query over the same rows the
    /// SELECT would return.
    ///
    /// ORDER BY is dropped. When GROUP BY, LIMIT or OFFSET is present the
    /// SELECT is wrapped in a derived table so each returned row counts once.
    ///
    /// # Errors
    ///
    /// Same as [`Query::to_sql`].
    pub fn to_count_sql_with(
        &self,
        dialect: &dyn Dialect,
    ) -> Result<(String, Vec<SqlValue>), CompileError> {
        let paginated = self.limit.is_some() || self.offset.is_some();

        if self.groups.is_empty() && !paginated {
            return self.compile_select(dialect, "COUNT(*) AS aggregate", false);
        }

        // Grouped rows keep the projection for HAVING aliases. Otherwise a
        // constant avoids duplicate column names from joined tables.
        let projection = if self.groups.is_empty() {
            "1"
        } else {
            self.columns.as_str()
        };
        // Ordering inside a derived table only matters when it is paginated.
        let (inner, params) = self.compile_select(dialect, projection, paginated)?;
        Ok((
            format!("SELECT COUNT(*) AS aggregate FROM ({inner}) AS aggregate_table"),
            params,
        ))
    }

    fn compile_select(
        &self,
        dialect: &dyn Dialect,
        projection: &str,
        with_tail: bool,
    ) -> Result<(String, Vec<SqlValue>), CompileError> {
        let mut sql = format!("SELECT {projection} FROM {}", self.table);
        let mut params = vec![];

        for join in &self.joins {
            check_column(&join.first)?;
            check_column(&join.second)?;
            let operator = normalize_operator(&join.operator)?;
            sql.push_str(&format!(
                " {} {} ON {} {operator} {}",
                join.kind.as_sql(),
                join.table,
                join.first,
                join.second
            ));
        }

        let (where_sql, where_params) = self.wheres.compile_clause("WHERE")?;
        sql.push_str(&where_sql);
        params.extend(where_params);

        if !self.groups.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.groups.join(", "));
        }

        let (having_sql, having_params) = self.havings.compile_clause("HAVING")?;
        sql.push_str(&having_sql);
        params.extend(having_params);

        if !with_tail {
            return Ok((sql, params));
        }

        let ordered = !self.orders.is_empty();
        if ordered {
            let orders = self
                .orders
                .iter()
                .map(|order| {
                    check_column(&order.column)?;
                    Ok(format!(
                        "{} {}",
                        order.column,
                        normalize_direction(&order.direction)?
                    ))
                })
                .collect::<Result<Vec<_>, CompileError>>()?;
            sql.push_str(" ORDER BY ");
            sql.push_str(&orders.join(", "));
        }

        sql.push_str(&dialect.pagination(self.limit, self.offset, ordered));

        Ok((sql, params))
    }
}
