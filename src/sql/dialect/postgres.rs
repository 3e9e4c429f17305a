//! PostgreSQL dialect.
//!
//! PostgreSQL features:
//! - ANSI identifier quoting (`"`)
//! - Native boolean type (TRUE/FALSE)
//! - `strpos` for substring search; no from-position variant
//! - `to_char` formatting

use super::helpers;
use super::SqlDialect;
use crate::sql::phrase::Phrase;
use crate::sql::types::DataType;

/// PostgreSQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Postgres;

impl SqlDialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn sql_phrase(&self, phrase: Phrase) -> &str {
        match phrase {
            Phrase::ConcatExpr => "? || {0}",
            Phrase::BooleanTrue => "TRUE",
            Phrase::BooleanFalse => "FALSE",
            Phrase::CurrentDateTime => "NOW()",
            Phrase::CurrentTimestamp => "NOW()",

            Phrase::FuncStrIndex => "strpos(?, {0})",
            Phrase::FuncStrIndexFrom => "",
            Phrase::FuncFormat => "to_char(?, {0:VARCHAR})",
            other => other.default_template(),
        }
    }

    fn convert_phrase(&self, dest: DataType, src: DataType, format: Option<&str>) -> String {
        let target = match dest {
            DataType::Bool => Some("BOOL"),
            DataType::Integer | DataType::AutoInc => Some("INTEGER"),
            DataType::Decimal => Some("DECIMAL"),
            DataType::Float => Some("DOUBLE PRECISION"),
            DataType::Date => Some("DATE"),
            DataType::Time => Some("TIME"),
            DataType::DateTime | DataType::Timestamp => Some("TIMESTAMP"),
            DataType::Char => Some("CHAR"),
            DataType::Varchar | DataType::Clob | DataType::UniqueId => {
                if format.is_some() && (src.is_date() || src.is_numeric()) {
                    return helpers::function_with_format("to_char", format);
                }
                Some("TEXT")
            }
            DataType::Blob => Some("BYTEA"),
            DataType::Unknown => None,
        };
        helpers::cast_template(target)
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }
}
