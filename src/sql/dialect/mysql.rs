//! MySQL dialect.
//!
//! MySQL differs from ANSI in:
//! - Backtick identifier quoting
//! - `||` is logical OR by default, so concatenation uses `concat()`
//! - `STR_TO_DATE` literals with MySQL format specifiers
//! - `CAST(? AS SIGNED)` for integer conversion

use super::helpers;
use super::SqlDialect;
use crate::sql::phrase::Phrase;
use crate::sql::types::DataType;

/// MySQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct MySql;

impl SqlDialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn sql_phrase(&self, phrase: Phrase) -> &str {
        match phrase {
            Phrase::QuotesOpen => "`",
            Phrase::QuotesClose => "`",
            Phrase::ConcatExpr => "concat(?, {0})",

            Phrase::CurrentDate => "CURRENT_DATE()",
            Phrase::DateTemplate => "STR_TO_DATE('{0}', '%Y-%m-%d')",
            Phrase::CurrentTime => "CURRENT_TIME()",
            Phrase::TimeTemplate => "'{0}'",
            Phrase::CurrentDateTime => "NOW()",
            Phrase::DateTimeTemplate => "STR_TO_DATE('{0}', '%Y-%m-%d %H:%i:%s')",
            Phrase::CurrentTimestamp => "NOW(6)",
            Phrase::TimestampPattern => "%Y-%m-%d %H:%M:%S%.6f",
            Phrase::TimestampTemplate => "STR_TO_DATE('{0}', '%Y-%m-%d %H:%i:%s.%f')",

            Phrase::FuncStrIndex => "instr(?, {0})",
            Phrase::FuncStrIndexFrom => "locate({0}, ?, {1:INTEGER})",
            Phrase::FuncUpper => "ucase(?)",
            Phrase::FuncLower => "lcase(?)",
            Phrase::FuncTrunc => "truncate(?, {0})",
            Phrase::FuncDay => "day(?)",
            Phrase::FuncMonth => "month(?)",
            Phrase::FuncYear => "year(?)",
            other => other.default_template(),
        }
    }

    fn convert_phrase(&self, dest: DataType, src: DataType, format: Option<&str>) -> String {
        let target = match dest {
            DataType::Bool | DataType::Integer | DataType::AutoInc => Some("SIGNED"),
            DataType::Decimal | DataType::Float => Some("DECIMAL"),
            DataType::Date => Some("DATE"),
            DataType::Time => Some("TIME"),
            DataType::DateTime | DataType::Timestamp => Some("DATETIME"),
            DataType::Varchar | DataType::Char | DataType::Clob | DataType::UniqueId => {
                if src.is_date() && format.is_some() {
                    return helpers::function_with_format("DATE_FORMAT", format);
                }
                Some("CHAR")
            }
            DataType::Blob | DataType::Unknown => None,
        };
        helpers::cast_template(target)
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_backtick(ident)
    }
}
