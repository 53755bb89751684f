//! Compilation errors.

use thiserror::Error;

/// Builder state that cannot be turned into a statement.
///
/// These are raised before any statement reaches an executor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// `insert` was called with no rows.
    #[error("cannot compile an INSERT without rows")]
    EmptyInsert,

    /// An insert row carries no columns.
    #[error("insert row {0} has no columns")]
    EmptyInsertRow(usize),

    /// An insert row does not list the same columns, in the same order, as
    /// the first row.
    #[error("insert row {row} does not match the columns of the first row")]
    MismatchedInsertRow {
        /// Zero-based index of the offending row.
        row: usize,
    },

    /// `update` was called with no assignments.
    #[error("cannot compile an UPDATE without assignments")]
    EmptyUpdate,

    /// A predicate, join, ordering or assignment names no column.
    #[error("empty column name")]
    EmptyColumn,

    /// A comparison operator outside the supported set.
    #[error("unsupported comparison operator '{0}'")]
    InvalidOperator(String),

    /// A sort direction other than `asc` / `desc`.
    #[error("unsupported sort direction '{0}'")]
    InvalidDirection(String),

    /// A blueprint with nothing to emit.
    #[error("blueprint for table '{0}' has nothing to compile")]
    EmptyBlueprint(String),

    /// Drop commands were queued on a CREATE blueprint.
    #[error("drop commands on table '{0}' require an ALTER blueprint")]
    CommandsOutsideAlter(String),

    /// An enum column without allowed values.
    #[error("enum column '{0}' has no allowed values")]
    EmptyEnum(String),

    /// Only one side of a foreign key (`references` / `on`) was given.
    #[error("foreign key on column '{0}' needs both a referenced table and column")]
    IncompleteForeignKey(String),

    /// The dialect cannot express the requested construct.
    #[error("{dialect} does not support {feature}")]
    Unsupported {
        /// Dialect name.
        dialect: &'static str,
        /// Construct that was requested.
        feature: &'static str,
    },
}
