//! SQL Server (T-SQL) dialect.
//!
//! T-SQL differs from ANSI in:
//! - Square bracket identifier quoting (`[name]`)
//! - N'...' prefix for Unicode strings
//! - String concatenation with `+`
//! - `convert(type, value, style)` for typed literals and conversions
//! - `len`, `charindex`, `day`/`month`/`year` functions

use super::helpers;
use super::SqlDialect;
use crate::sql::phrase::Phrase;
use crate::sql::types::DataType;

/// SQL Server dialect.
#[derive(Debug, Clone, Copy)]
pub struct SqlServer;

impl SqlDialect for SqlServer {
    fn name(&self) -> &'static str {
        "sqlserver"
    }

    fn sql_phrase(&self, phrase: Phrase) -> &str {
        match phrase {
            Phrase::QuotesOpen => "[",
            Phrase::QuotesClose => "]",
            Phrase::ConcatExpr => " + ",

            Phrase::CurrentDate => "convert(date, getdate())",
            Phrase::DatePattern => "%Y/%m/%d",
            Phrase::DateTemplate => "convert(date, '{0}', 111)",
            Phrase::CurrentTime => "convert(time, getdate())",
            Phrase::TimeTemplate => "convert(time, '{0}', 108)",
            Phrase::CurrentDateTime => "getdate()",
            Phrase::DateTimeTemplate => "convert(datetime, '{0}', 120)",
            Phrase::CurrentTimestamp => "sysdatetime()",
            Phrase::TimestampTemplate => "convert(datetime2, '{0}', 121)",

            Phrase::FuncSubstring => "substring(?, {0}, 4000)",
            Phrase::FuncStrIndex => "charindex({0}, ?)",
            Phrase::FuncLength => "len(?)",
            Phrase::FuncTrunc => "round(?, {0}, 1)",
            Phrase::FuncModulo => "((?) % {0})",
            Phrase::FuncDay => "day(?)",
            Phrase::FuncMonth => "month(?)",
            Phrase::FuncYear => "year(?)",
            other => other.default_template(),
        }
    }

    fn convert_phrase(&self, dest: DataType, src: DataType, format: Option<&str>) -> String {
        // format is a numeric style code here
        let styled = |ty: &str| match format {
            Some(style) => format!("convert({}, ?, {})", ty, style),
            None => format!("convert({}, ?)", ty),
        };
        match dest {
            DataType::Bool => "convert(bit, ?)".to_string(),
            DataType::Integer | DataType::AutoInc => "convert(int, ?)".to_string(),
            DataType::Decimal => "convert(decimal, ?)".to_string(),
            DataType::Float => "convert(float, ?)".to_string(),
            DataType::Date => styled("date"),
            DataType::Time => styled("time"),
            DataType::DateTime => styled("datetime"),
            DataType::Timestamp => styled("datetime2"),
            DataType::Varchar | DataType::Char | DataType::UniqueId => match (src, format) {
                (_, Some(_)) => styled("nvarchar"),
                (DataType::Date, None) => "convert(nvarchar, ?, 111)".to_string(),
                (DataType::DateTime | DataType::Timestamp, None) => {
                    "convert(nvarchar, ?, 120)".to_string()
                }
                _ => "convert(nvarchar, ?)".to_string(),
            },
            DataType::Clob => "convert(nvarchar(max), ?)".to_string(),
            DataType::Blob | DataType::Unknown => {
                log::warn!("sqlserver: no conversion from {} to {}", src, dest);
                "?".to_string()
            }
        }
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_bracket(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        if !s.is_ascii() {
            helpers::quote_string_unicode(s)
        } else {
            helpers::quote_string_single(s)
        }
    }
}
