//! Shared helper functions for SQL dialect implementations.
//!
//! This module provides reusable building blocks that dialects can compose
//! to implement the `SqlDialect` trait with minimal duplication.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::sql::types::DataType;

// =============================================================================
// Identifier Quoting
// =============================================================================

/// Quote identifier with double quotes (ANSI style).
/// Used by: Generic, Oracle, Postgres
pub fn quote_double(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote identifier with backticks.
/// Used by: MySQL, SQLite
pub fn quote_backtick(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

/// Quote identifier with square brackets.
/// Used by: SQL Server
pub fn quote_bracket(ident: &str) -> String {
    format!("[{}]", ident.replace(']', "]]"))
}

/// Quote identifier with arbitrary open/close quote phrases.
///
/// Used for dialects whose quote phrases were overridden in configuration.
pub fn quote_with(open: &str, close: &str, ident: &str) -> String {
    if close.is_empty() {
        return format!("{}{}", open, ident);
    }
    format!("{}{}{}", open, ident.replace(close, &close.repeat(2)), close)
}

/// Words that must be quoted when used as column names.
static RESERVED_NAMES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "user",
        "group",
        "table",
        "column",
        "view",
        "index",
        "constraint",
        "select",
        "update",
        "insert",
        "alter",
        "delete",
        "order",
    ]
    .into_iter()
    .collect()
});

const ILLEGAL_NAME_CHARS: &[char] = &[
    '@', '?', '>', '=', '<', ';', ':', '/', '.', '-', ',', '+', '*', ')', '(', '\'', '&', '%', '!',
    ' ',
];

/// Whether a column name has to be quoted.
///
/// True for reserved words (case-insensitive) and for names containing
/// characters that are not legal in a bare identifier.
pub fn detect_quote_name(name: &str) -> bool {
    RESERVED_NAMES.contains(name.to_lowercase().as_str())
        || name.contains(ILLEGAL_NAME_CHARS)
}

// =============================================================================
// String Quoting
// =============================================================================

/// Quote string with single quotes (standard SQL).
/// Used by: All dialects
pub fn quote_string_single(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Quote string with N prefix for Unicode (SQL Server).
pub fn quote_string_unicode(s: &str) -> String {
    format!("N'{}'", s.replace('\'', "''"))
}

// =============================================================================
// Conversion
// =============================================================================

/// ANSI `CAST` target type name.
pub fn cast_type_ansi(dt: DataType) -> Option<&'static str> {
    match dt {
        DataType::Unknown => None,
        DataType::Integer | DataType::AutoInc => Some("INTEGER"),
        DataType::Varchar | DataType::UniqueId => Some("VARCHAR"),
        DataType::Char => Some("CHAR"),
        DataType::Clob => Some("CLOB"),
        DataType::Date => Some("DATE"),
        DataType::Time => Some("TIME"),
        DataType::DateTime | DataType::Timestamp => Some("TIMESTAMP"),
        DataType::Float => Some("DOUBLE PRECISION"),
        DataType::Decimal => Some("DECIMAL"),
        DataType::Bool => Some("BOOLEAN"),
        DataType::Blob => Some("BLOB"),
    }
}

/// `CAST(? AS type)`, or the bare placeholder when there is no target type.
pub fn cast_template(target: Option<&str>) -> String {
    match target {
        Some(t) => format!("CAST(? AS {})", t),
        None => "?".to_string(),
    }
}

/// `name(?)` or `name(?, 'format')`.
pub fn function_with_format(name: &str, format: Option<&str>) -> String {
    match format {
        Some(f) => format!("{}(?, {})", name, quote_string_single(f)),
        None => format!("{}(?)", name),
    }
}
