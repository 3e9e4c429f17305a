//! SQLite dialect.
//!
//! SQLite has no date types; dates are text handled through the
//! `date()`/`datetime()` functions and `strftime`.

use super::helpers;
use super::SqlDialect;
use crate::sql::phrase::Phrase;
use crate::sql::types::DataType;

/// SQLite dialect.
#[derive(Debug, Clone, Copy)]
pub struct Sqlite;

impl SqlDialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn sql_phrase(&self, phrase: Phrase) -> &str {
        match phrase {
            Phrase::QuotesOpen => "`",
            Phrase::QuotesClose => "`",

            Phrase::CurrentDate => "date('now')",
            Phrase::DateTemplate => "date('{0}')",
            Phrase::CurrentTime => "time('now')",
            Phrase::TimeTemplate => "time('{0}')",
            Phrase::CurrentDateTime => "datetime('now')",
            Phrase::DateTimeTemplate => "datetime('{0}')",
            Phrase::CurrentTimestamp => "strftime('%Y-%m-%d %H:%M:%f', 'now')",
            Phrase::TimestampTemplate => "'{0}'",

            Phrase::FuncConcat => " || ",
            Phrase::FuncSubstring => "substr(?, {0})",
            Phrase::FuncSubstringEx => "substr(?, {0}, {1})",
            Phrase::FuncReverse => "",
            Phrase::FuncStrIndex => "instr(?, {0})",
            Phrase::FuncStrIndexFrom => "",
            Phrase::FuncModulo => "(? % {0})",
            Phrase::FuncFormat => "printf({0:VARCHAR}, ?)",
            Phrase::FuncDay => "cast(strftime('%d', ?) as integer)",
            Phrase::FuncMonth => "cast(strftime('%m', ?) as integer)",
            Phrase::FuncYear => "cast(strftime('%Y', ?) as integer)",
            other => other.default_template(),
        }
    }

    fn convert_phrase(&self, dest: DataType, src: DataType, format: Option<&str>) -> String {
        let target = match dest {
            DataType::Bool | DataType::Integer | DataType::AutoInc => Some("INTEGER"),
            DataType::Float => Some("REAL"),
            DataType::Decimal => Some("NUMERIC"),
            DataType::Date => return "date(?)".to_string(),
            DataType::Time => return "time(?)".to_string(),
            DataType::DateTime | DataType::Timestamp => return "datetime(?)".to_string(),
            DataType::Varchar | DataType::Char | DataType::Clob | DataType::UniqueId => {
                if let Some(f) = format.filter(|_| src.is_date()) {
                    return format!("strftime({}, ?)", helpers::quote_string_single(f));
                }
                Some("TEXT")
            }
            DataType::Blob => Some("BLOB"),
            DataType::Unknown => None,
        };
        helpers::cast_template(target)
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_backtick(ident)
    }
}
