//! Oracle SQL dialect.
//!
//! Oracle differs from ANSI in:
//! - `decode(x, k1, v1, .., else)` instead of `case x when .. end`
//! - `TO_DATE`/`TO_TIMESTAMP` literals and `sysdate`
//! - `nvl`, `substr`, `instr`, `ceil` function names
//! - `to_char`/`to_number`/`to_date` conversions with format masks

use super::helpers;
use super::SqlDialect;
use crate::sql::phrase::Phrase;
use crate::sql::types::DataType;

/// Oracle SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Oracle;

impl SqlDialect for Oracle {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn sql_phrase(&self, phrase: Phrase) -> &str {
        match phrase {
            Phrase::CurrentDate => "trunc(sysdate)",
            Phrase::DateTemplate => "TO_DATE('{0}', 'YYYY-MM-DD')",
            Phrase::CurrentTime => "sysdate",
            Phrase::TimeTemplate => "TO_DATE('{0}', 'HH24:MI:SS')",
            Phrase::CurrentDateTime => "sysdate",
            Phrase::DateTimeTemplate => "TO_DATE('{0}', 'YYYY-MM-DD HH24:MI:SS')",
            Phrase::CurrentTimestamp => "systimestamp",
            Phrase::TimestampTemplate => "TO_TIMESTAMP('{0}', 'YYYY-MM-DD HH24:MI:SS.FF')",

            Phrase::FuncCoalesce => "nvl(?, {0})",
            Phrase::FuncConcat => " || ",
            Phrase::FuncSubstring => "substr(?, {0})",
            Phrase::FuncSubstringEx => "substr(?, {0}, {1})",
            Phrase::FuncStrIndex => "instr(?, {0})",
            Phrase::FuncStrIndexFrom => "instr(?, {0}, {1:INTEGER})",
            Phrase::FuncCeiling => "ceil(?)",
            Phrase::FuncFormat => "TO_CHAR(?, {0:VARCHAR})",

            Phrase::FuncDecode => "decode(?{0})",
            Phrase::FuncDecodeSep => ", ",
            Phrase::FuncDecodePart => "{0}, {1}",
            Phrase::FuncDecodeElse => "{0}",
            other => other.default_template(),
        }
    }

    fn convert_phrase(&self, dest: DataType, src: DataType, format: Option<&str>) -> String {
        match dest {
            DataType::Varchar | DataType::Char | DataType::UniqueId => {
                helpers::function_with_format("to_char", format)
            }
            DataType::Clob => "to_clob(?)".to_string(),
            DataType::Integer | DataType::AutoInc | DataType::Decimal | DataType::Float => {
                if src.is_numeric() && format.is_none() {
                    "?".to_string()
                } else {
                    helpers::function_with_format("to_number", format)
                }
            }
            DataType::Date | DataType::DateTime => helpers::function_with_format("to_date", format),
            DataType::Timestamp => helpers::function_with_format("to_timestamp", format),
            DataType::Time | DataType::Bool | DataType::Blob | DataType::Unknown => {
                log::warn!("oracle: no conversion from {} to {}", src, dest);
                "?".to_string()
            }
        }
    }
}
