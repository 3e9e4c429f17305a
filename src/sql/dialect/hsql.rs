//! HSQLDB dialect.

use super::SqlDialect;
use crate::sql::phrase::Phrase;

/// HSQLDB dialect.
#[derive(Debug, Clone, Copy)]
pub struct HSql;

impl SqlDialect for HSql {
    fn name(&self) -> &'static str {
        "hsql"
    }

    fn sql_phrase(&self, phrase: Phrase) -> &str {
        match phrase {
            Phrase::ConcatExpr => "concat(?, {0})",
            Phrase::BooleanTrue => "true",
            Phrase::BooleanFalse => "false",
            Phrase::CurrentDate => "CURRENT_DATE",
            Phrase::DateTemplate => "'{0}'",
            Phrase::TimeTemplate => "'{0}'",
            Phrase::DateTimeTemplate => "'{0}'",
            Phrase::TimestampTemplate => "'{0}'",

            Phrase::FuncSubstring => "substr(?, {0})",
            Phrase::FuncSubstringEx => "substr(?, {0}, {1})",
            Phrase::FuncStrIndex => "locate({0}, ?)",
            Phrase::FuncStrIndexFrom => "locate({0}, ?, {1:INTEGER})",
            Phrase::FuncUpper => "ucase(?)",
            Phrase::FuncLower => "lcase(?)",
            Phrase::FuncTrunc => "truncate(?, {0})",
            other => other.default_template(),
        }
    }
}
