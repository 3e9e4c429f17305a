//! SQL dialect definitions and phrase tables.
//!
//! This module provides a trait-based abstraction for SQL dialect differences.
//! Expression nodes never hardcode vendor syntax; they look up a [`Phrase`]
//! template on the active dialect and substitute their operands into it:
//!
//! - Identifier quoting: `"` (Generic/Oracle/PG), `` ` `` (MySQL/SQLite), `[]` (SQL Server)
//! - Concatenation: `a || b` vs `a + b` vs `concat(a, b)`
//! - Conditional mapping: `case x when .. end` vs Oracle `decode(x, ..)`
//! - Date literals: `DATE '..'` vs `TO_DATE('..', ..)` vs `convert(date, '..', 111)`
//! - Boolean literals: `1`/`0` vs `TRUE`/`FALSE`
//!
//! # Usage
//!
//! ```ignore
//! use colexpr::sql::dialect::{Dialect, SqlDialect};
//! use colexpr::sql::phrase::Phrase;
//!
//! let dialect = Dialect::Oracle;
//! assert_eq!(dialect.sql_phrase(Phrase::FuncCoalesce), "nvl(?, {0})");
//! ```
//!
//! Custom phrase sets are built with [`PhraseTable`], usually from the
//! `[dialect]` section of the settings file.

mod generic;
pub mod helpers;
mod hsql;
mod mysql;
mod oracle;
mod phrase_table;
mod postgres;
mod sqlite;
mod sqlserver;

pub use generic::Generic;
pub use hsql::HSql;
pub use mysql::MySql;
pub use oracle::Oracle;
pub use phrase_table::PhraseTable;
pub use postgres::Postgres;
pub use sqlite::Sqlite;
pub use sqlserver::SqlServer;

use std::str::FromStr;

use super::error::ExprError;
use super::phrase::{validate_template, Phrase};
use super::types::DataType;
use super::value::{render_value, Value};

/// SQL dialect trait - supplies phrase templates and literal rendering.
///
/// Implementations are read-only and shared across threads. The default
/// implementations follow ANSI SQL.
pub trait SqlDialect: std::fmt::Debug + Send + Sync {
    /// Dialect name for display/logging.
    fn name(&self) -> &'static str;

    // =========================================================================
    // Phrases
    // =========================================================================

    /// Template for a phrase key.
    ///
    /// An empty template is a legal "not supported" phrase.
    fn sql_phrase(&self, phrase: Phrase) -> &str {
        phrase.default_template()
    }

    /// Template converting an expression of type `src` into `dest`.
    ///
    /// The result contains one `?` placeholder. A bare `"?"` means no
    /// conversion is needed or possible.
    fn convert_phrase(&self, dest: DataType, src: DataType, format: Option<&str>) -> String {
        let _ = (src, format);
        helpers::cast_template(helpers::cast_type_ansi(dest))
    }

    // =========================================================================
    // Identifier and Literal Quoting
    // =========================================================================

    /// Quote an identifier with this dialect's quote phrases.
    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_with(
            self.sql_phrase(Phrase::QuotesOpen),
            self.sql_phrase(Phrase::QuotesClose),
            ident,
        )
    }

    /// Whether a column name must be quoted (reserved word or illegal char).
    fn detect_quote_name(&self, name: &str) -> bool {
        helpers::detect_quote_name(name)
    }

    /// Quote a string literal.
    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_single(s)
    }

    // =========================================================================
    // Values
    // =========================================================================

    /// Render a constant as a literal of the given data type.
    fn value_string(&self, value: &Value, data_type: DataType) -> String {
        render_value(self, value, data_type)
    }
}

/// Built-in SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    #[default]
    Generic,
    Oracle,
    SqlServer,
    MySql,
    Postgres,
    Sqlite,
    HSql,
}

impl Dialect {
    /// Every built-in dialect.
    pub const ALL: [Dialect; 7] = [
        Dialect::Generic,
        Dialect::Oracle,
        Dialect::SqlServer,
        Dialect::MySql,
        Dialect::Postgres,
        Dialect::Sqlite,
        Dialect::HSql,
    ];

    /// Get the dialect implementation.
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::Generic => &Generic,
            Dialect::Oracle => &Oracle,
            Dialect::SqlServer => &SqlServer,
            Dialect::MySql => &MySql,
            Dialect::Postgres => &Postgres,
            Dialect::Sqlite => &Sqlite,
            Dialect::HSql => &HSql,
        }
    }
}

// Implement SqlDialect for Dialect enum by delegating to concrete types
impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn sql_phrase(&self, phrase: Phrase) -> &str {
        self.dialect().sql_phrase(phrase)
    }

    fn convert_phrase(&self, dest: DataType, src: DataType, format: Option<&str>) -> String {
        self.dialect().convert_phrase(dest, src, format)
    }

    fn quote_identifier(&self, ident: &str) -> String {
        self.dialect().quote_identifier(ident)
    }

    fn detect_quote_name(&self, name: &str) -> bool {
        self.dialect().detect_quote_name(name)
    }

    fn quote_string(&self, s: &str) -> String {
        self.dialect().quote_string(s)
    }

    fn value_string(&self, value: &Value, data_type: DataType) -> String {
        self.dialect().value_string(value, data_type)
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dialect().name())
    }
}

impl FromStr for Dialect {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "generic" | "ansi" => Ok(Dialect::Generic),
            "oracle" => Ok(Dialect::Oracle),
            "sqlserver" | "mssql" | "tsql" => Ok(Dialect::SqlServer),
            "mysql" => Ok(Dialect::MySql),
            "postgres" | "postgresql" | "pg" => Ok(Dialect::Postgres),
            "sqlite" => Ok(Dialect::Sqlite),
            "hsql" | "hsqldb" => Ok(Dialect::HSql),
            _ => Err(ExprError::UnknownDialect(s.to_string())),
        }
    }
}

/// Check every phrase of a dialect.
///
/// Fails on the first function phrase that has no `?` placeholder.
pub fn validate_dialect(dialect: &dyn SqlDialect) -> Result<(), ExprError> {
    for phrase in Phrase::ALL {
        validate_template(phrase, dialect.sql_phrase(phrase))?;
    }
    Ok(())
}
