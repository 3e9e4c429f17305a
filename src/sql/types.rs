//! Expression-level data types.
//!
//! Every column expression reports one of these types. The type drives how
//! constant values are rendered (quoted text, date templates, boolean
//! phrases, plain numbers) and how composite nodes derive their own type:
//!
//! - arithmetic always yields [`DataType::Decimal`]
//! - concatenation always yields [`DataType::Varchar`]
//! - functions default to the type of their operand
//!
//! This is intentionally coarse: precision, scale and length belong to the
//! physical column metadata, not to the expression compiler.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Data type of a column expression.
///
/// # Examples
///
/// ```ignore
/// use colexpr::sql::types::DataType;
///
/// assert_eq!(DataType::parse("number"), Some(DataType::Decimal));
/// assert!(DataType::Varchar.is_text());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// Type not known; values are emitted verbatim.
    #[default]
    Unknown,

    /// Integer number.
    Integer,

    /// Auto-increment key. Values are emitted verbatim.
    AutoInc,

    /// Variable-length text.
    #[serde(alias = "text")]
    Varchar,

    /// Fixed-length text.
    Char,

    /// Large text object.
    Clob,

    /// Date without time.
    Date,

    /// Time of day without date.
    Time,

    /// Date with time (second precision).
    DateTime,

    /// Date with time (fractional seconds).
    Timestamp,

    /// Floating point number.
    Float,

    /// Fixed-point decimal number.
    Decimal,

    /// Boolean.
    Bool,

    /// Binary large object. Cannot be rendered as a literal.
    Blob,

    /// Globally unique identifier (rendered like text).
    UniqueId,
}

impl DataType {
    /// Parse a data type name.
    ///
    /// Matching is case-insensitive and accepts a few common SQL spellings
    /// (`text`, `int`, `number`, `boolean`, `uuid`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "unknown" => Some(DataType::Unknown),
            "integer" | "int" | "bigint" | "smallint" => Some(DataType::Integer),
            "autoinc" | "auto_inc" | "identity" | "serial" => Some(DataType::AutoInc),
            "varchar" | "text" | "string" | "nvarchar" => Some(DataType::Varchar),
            "char" | "character" | "nchar" => Some(DataType::Char),
            "clob" | "ntext" => Some(DataType::Clob),
            "date" => Some(DataType::Date),
            "time" => Some(DataType::Time),
            "datetime" | "date_time" => Some(DataType::DateTime),
            "timestamp" => Some(DataType::Timestamp),
            "float" | "double" | "real" => Some(DataType::Float),
            "decimal" | "numeric" | "number" => Some(DataType::Decimal),
            "bool" | "boolean" | "bit" => Some(DataType::Bool),
            "blob" | "binary" | "bytea" => Some(DataType::Blob),
            "uniqueid" | "unique_id" | "uuid" | "guid" => Some(DataType::UniqueId),
            _ => None,
        }
    }

    /// Returns true for the text family (varchar, char, clob).
    pub fn is_text(&self) -> bool {
        matches!(self, DataType::Varchar | DataType::Char | DataType::Clob)
    }

    /// Returns true for integer, auto-increment, decimal and float.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            DataType::Integer | DataType::AutoInc | DataType::Decimal | DataType::Float
        )
    }

    /// Returns true for date, time, datetime and timestamp.
    pub fn is_date(&self) -> bool {
        matches!(
            self,
            DataType::Date | DataType::Time | DataType::DateTime | DataType::Timestamp
        )
    }

    pub fn is_boolean(&self) -> bool {
        *self == DataType::Bool
    }

    /// Upper-case name used in `{n:TYPE}` template placeholders.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Unknown => "UNKNOWN",
            DataType::Integer => "INTEGER",
            DataType::AutoInc => "AUTOINC",
            DataType::Varchar => "VARCHAR",
            DataType::Char => "CHAR",
            DataType::Clob => "CLOB",
            DataType::Date => "DATE",
            DataType::Time => "TIME",
            DataType::DateTime => "DATETIME",
            DataType::Timestamp => "TIMESTAMP",
            DataType::Float => "FLOAT",
            DataType::Decimal => "DECIMAL",
            DataType::Bool => "BOOL",
            DataType::Blob => "BLOB",
            DataType::UniqueId => "UNIQUEID",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
