//! Column definitions.
//!
//! A [`ColumnSpec`] is created by a [`Blueprint`](super::Blueprint) factory
//! method and refined through its fluent setters. Its DDL fragment depends on
//! nothing but its own fields and the dialect it is rendered for.

use crate::dialect::Dialect;
use crate::error::CompileError;

/// Underlying column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// 64-bit integer.
    BigInt,
    /// Variable-length string.
    Varchar,
    /// Unbounded text.
    Text,
    /// 32-bit integer.
    Int,
    /// 8-bit integer (booleans are `TINYINT(1)`).
    TinyInt,
    /// Calendar date.
    Date,
    /// Date and time.
    DateTime,
    /// Timestamp.
    Timestamp,
    /// Fixed-point number.
    Decimal,
    /// Single precision float.
    Float,
    /// Double precision float.
    Double,
    /// Enumerated string.
    Enum,
    /// JSON document.
    Json,
}

impl ColumnType {
    /// Lower-case type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BigInt => "bigint",
            Self::Varchar => "varchar",
            Self::Text => "text",
            Self::Int => "int",
            Self::TinyInt => "tinyint",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Timestamp => "timestamp",
            Self::Decimal => "decimal",
            Self::Float => "float",
            Self::Double => "double",
            Self::Enum => "enum",
            Self::Json => "json",
        }
    }
}

/// Size, precision and value-list parameters of a column type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnParameters {
    /// Display or storage length.
    pub length: Option<u32>,
    /// Total digits of a decimal.
    pub total: Option<u8>,
    /// Digits after the decimal point.
    pub places: Option<u8>,
    /// Allowed values of an enum.
    pub allowed: Vec<String>,
    /// Unsigned integer.
    pub unsigned: bool,
}

/// Foreign key referential action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignKeyAction {
    /// No action.
    NoAction,
    /// Restrict deletion/update.
    Restrict,
    /// Cascade the operation.
    Cascade,
    /// Set to NULL.
    SetNull,
    /// Set to default value.
    SetDefault,
}

impl ForeignKeyAction {
    /// Returns the SQL representation of the action.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// The single foreign-key relation a column may carry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForeignKey {
    /// Referenced column.
    pub column: Option<String>,
    /// Referenced table.
    pub table: Option<String>,
    /// Action on delete.
    pub on_delete: Option<ForeignKeyAction>,
    /// Action on update.
    pub on_update: Option<ForeignKeyAction>,
}

/// Default value for a column.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// NULL default.
    Null,
    /// Boolean default, rendered as `1` / `0`.
    Bool(bool),
    /// Integer default.
    Int(i64),
    /// Float default.
    Float(f64),
    /// String default, quoted by the dialect.
    Text(String),
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for DefaultValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for DefaultValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        Self::Text(String::from(value))
    }
}

impl From<String> for DefaultValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for DefaultValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// One column of a blueprint.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    column_type: ColumnType,
    name: String,
    parameters: ColumnParameters,
    nullable: bool,
    unique: bool,
    primary: bool,
    auto_increment: bool,
    default: Option<DefaultValue>,
    after: Option<String>,
    foreign_key: Option<ForeignKey>,
}

impl ColumnSpec {
    /// Creates a NOT NULL column without constraints.
    #[must_use]
    pub fn new(column_type: ColumnType, name: impl Into<String>, parameters: ColumnParameters) -> Self {
        Self {
            column_type,
            name: name.into(),
            parameters,
            nullable: false,
            unique: false,
            primary: false,
            auto_increment: false,
            default: None,
            after: None,
            foreign_key: None,
        }
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column type.
    #[must_use]
    pub const fn column_type(&self) -> ColumnType {
        self.column_type
    }

    /// Type parameters.
    #[must_use]
    pub const fn parameters(&self) -> &ColumnParameters {
        &self.parameters
    }

    /// Whether the column accepts NULL.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Whether the column is part of the primary key.
    #[must_use]
    pub const fn is_primary(&self) -> bool {
        self.primary
    }

    /// Whether the column auto-increments.
    #[must_use]
    pub const fn is_auto_increment(&self) -> bool {
        self.auto_increment
    }

    /// Configured default.
    #[must_use]
    pub const fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    /// Foreign-key relation, if one was attached.
    #[must_use]
    pub const fn foreign_key(&self) -> Option<&ForeignKey> {
        self.foreign_key.as_ref()
    }

    /// Marks the column as nullable.
    pub fn nullable(&mut self) -> &mut Self {
        self.nullable = true;
        self
    }

    /// Marks the column as UNIQUE.
    pub fn unique(&mut self) -> &mut Self {
        self.unique = true;
        self
    }

    /// Marks the column as PRIMARY KEY.
    pub fn primary(&mut self) -> &mut Self {
        self.primary = true;
        self
    }

    /// Marks the column as auto-incrementing.
    pub fn auto_increment(&mut self) -> &mut Self {
        self.auto_increment = true;
        self
    }

    /// Marks an integer column as unsigned.
    pub fn unsigned(&mut self) -> &mut Self {
        self.parameters.unsigned = true;
        self
    }

    /// Sets the default value.
    pub fn default(&mut self, value: impl Into<DefaultValue>) -> &mut Self {
        self.default = Some(value.into());
        self
    }

    /// Places the added column after `column` (ALTER TABLE only).
    pub fn after(&mut self, column: impl Into<String>) -> &mut Self {
        self.after = Some(column.into());
        self
    }

    /// Sets the referenced column of the foreign key.
    pub fn references(&mut self, column: impl Into<String>) -> &mut Self {
        self.relation().column = Some(column.into());
        self
    }

    /// Sets the referenced table of the foreign key.
    pub fn on(&mut self, table: impl Into<String>) -> &mut Self {
        self.relation().table = Some(table.into());
        self
    }

    /// Sets the ON DELETE action of the foreign key.
    pub fn on_delete(&mut self, action: ForeignKeyAction) -> &mut Self {
        self.relation().on_delete = Some(action);
        self
    }

    /// Sets the ON UPDATE action of the foreign key.
    pub fn on_update(&mut self, action: ForeignKeyAction) -> &mut Self {
        self.relation().on_update = Some(action);
        self
    }

    fn relation(&mut self) -> &mut ForeignKey {
        self.foreign_key.get_or_insert_with(ForeignKey::default)
    }

    /// Compiles the column into a definition fragment.
    ///
    /// Parts are emitted in a fixed order: name, type, nullability, default,
    /// auto-increment, UNIQUE, PRIMARY KEY, AFTER, foreign key.
    ///
    /// # Errors
    ///
    /// Returns an error for an incomplete foreign key, an enum without
    /// values, or a construct the dialect cannot express.
    pub fn to_sql(&self, dialect: &dyn Dialect) -> Result<String, CompileError> {
        if self.name.is_empty() {
            return Err(CompileError::EmptyColumn);
        }

        let mut parts = vec![self.name.clone(), dialect.type_definition(self)?];

        parts.push(String::from(if self.nullable { "NULL" } else { "NOT NULL" }));

        if let Some(ref default) = self.default {
            parts.push(format!("DEFAULT {}", dialect.render_default(default)));
        }

        if self.auto_increment {
            parts.push(String::from(dialect.auto_increment_keyword()));
        }

        if self.unique {
            parts.push(String::from("UNIQUE"));
        }

        if self.primary {
            parts.push(String::from("PRIMARY KEY"));
        }

        if let Some(ref after) = self.after {
            if !dialect.supports_column_positioning() {
                return Err(CompileError::Unsupported {
                    dialect: dialect.name(),
                    feature: "AFTER column positioning",
                });
            }
            parts.push(format!("AFTER {after}"));
        }

        if let Some(ref fk) = self.foreign_key {
            parts.push(self.foreign_key_clause(fk)?);
        }

        Ok(parts.join(" "))
    }

    fn foreign_key_clause(&self, fk: &ForeignKey) -> Result<String, CompileError> {
        let (Some(table), Some(column)) = (&fk.table, &fk.column) else {
            return Err(CompileError::IncompleteForeignKey(self.name.clone()));
        };

        let mut sql = format!("FOREIGN KEY ({}) REFERENCES {table}({column})", self.name);
        if let Some(action) = fk.on_delete {
            sql.push_str(" ON DELETE ");
            sql.push_str(action.as_sql());
        }
        if let Some(action) = fk.on_update {
            sql.push_str(" ON UPDATE ");
            sql.push_str(action.as_sql());
        }
        Ok(sql)
    }
}
