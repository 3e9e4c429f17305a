//! SQL phrase keys and their generic templates.
//!
//! A phrase is a named, dialect-specific SQL fragment. Dialects override the
//! phrases that differ from the generic (ANSI) default; the compiler never
//! hardcodes vendor syntax.
//!
//! Template conventions:
//!
//! - `?` marks where the column expression goes (function phrases only)
//! - `{0}`, `{1}` are positional parameters
//! - `{0:VARCHAR}` renders the parameter as the named [`DataType`]
//!
//! [`DataType`]: super::types::DataType

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ExprError;

/// Phrase key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phrase {
    // === Syntax ===
    Null,
    RenameColumn,
    QuotesOpen,
    QuotesClose,
    ConcatExpr,

    // === Literals ===
    BooleanTrue,
    BooleanFalse,
    CurrentDate,
    DatePattern,
    DateTemplate,
    CurrentTime,
    TimePattern,
    TimeTemplate,
    CurrentDateTime,
    DateTimePattern,
    DateTimeTemplate,
    CurrentTimestamp,
    TimestampPattern,
    TimestampTemplate,

    // === Text functions ===
    FuncCoalesce,
    FuncConcat,
    FuncSubstring,
    FuncSubstringEx,
    FuncReplace,
    FuncReverse,
    FuncStrIndex,
    FuncStrIndexFrom,
    FuncLength,
    FuncUpper,
    FuncLower,
    FuncTrim,
    FuncLtrim,
    FuncRtrim,
    FuncEscape,

    // === Numeric functions ===
    FuncAbs,
    FuncRound,
    FuncTrunc,
    FuncFloor,
    FuncCeiling,
    FuncModulo,
    FuncFormat,

    // === Date functions ===
    FuncDay,
    FuncMonth,
    FuncYear,

    // === Aggregates ===
    FuncSum,
    FuncMax,
    FuncMin,
    FuncAvg,
    FuncCount,
    FuncCountDistinct,

    // === Decode / CASE ===
    FuncDecode,
    FuncDecodeSep,
    FuncDecodePart,
    FuncDecodeElse,
}

impl Phrase {
    /// Every phrase key, in declaration order.
    pub const ALL: [Phrase; 54] = [
        Phrase::Null,
        Phrase::RenameColumn,
        Phrase::QuotesOpen,
        Phrase::QuotesClose,
        Phrase::ConcatExpr,
        Phrase::BooleanTrue,
        Phrase::BooleanFalse,
        Phrase::CurrentDate,
        Phrase::DatePattern,
        Phrase::DateTemplate,
        Phrase::CurrentTime,
        Phrase::TimePattern,
        Phrase::TimeTemplate,
        Phrase::CurrentDateTime,
        Phrase::DateTimePattern,
        Phrase::DateTimeTemplate,
        Phrase::CurrentTimestamp,
        Phrase::TimestampPattern,
        Phrase::TimestampTemplate,
        Phrase::FuncCoalesce,
        Phrase::FuncConcat,
        Phrase::FuncSubstring,
        Phrase::FuncSubstringEx,
        Phrase::FuncReplace,
        Phrase::FuncReverse,
        Phrase::FuncStrIndex,
        Phrase::FuncStrIndexFrom,
        Phrase::FuncLength,
        Phrase::FuncUpper,
        Phrase::FuncLower,
        Phrase::FuncTrim,
        Phrase::FuncLtrim,
        Phrase::FuncRtrim,
        Phrase::FuncEscape,
        Phrase::FuncAbs,
        Phrase::FuncRound,
        Phrase::FuncTrunc,
        Phrase::FuncFloor,
        Phrase::FuncCeiling,
        Phrase::FuncModulo,
        Phrase::FuncFormat,
        Phrase::FuncDay,
        Phrase::FuncMonth,
        Phrase::FuncYear,
        Phrase::FuncSum,
        Phrase::FuncMax,
        Phrase::FuncMin,
        Phrase::FuncAvg,
        Phrase::FuncCount,
        Phrase::FuncCountDistinct,
        Phrase::FuncDecode,
        Phrase::FuncDecodeSep,
        Phrase::FuncDecodePart,
        Phrase::FuncDecodeElse,
    ];

    /// Generic (ANSI) template for this phrase.
    pub fn default_template(&self) -> &'static str {
        match self {
            Phrase::Null => "null",
            Phrase::RenameColumn => " AS ",
            Phrase::QuotesOpen => "\"",
            Phrase::QuotesClose => "\"",
            Phrase::ConcatExpr => " || ",

            Phrase::BooleanTrue => "1",
            Phrase::BooleanFalse => "0",
            Phrase::CurrentDate => "CURRENT_DATE",
            Phrase::DatePattern => "%Y-%m-%d",
            Phrase::DateTemplate => "DATE '{0}'",
            Phrase::CurrentTime => "CURRENT_TIME",
            Phrase::TimePattern => "%H:%M:%S",
            Phrase::TimeTemplate => "TIME '{0}'",
            Phrase::CurrentDateTime => "CURRENT_TIMESTAMP",
            Phrase::DateTimePattern => "%Y-%m-%d %H:%M:%S",
            Phrase::DateTimeTemplate => "TIMESTAMP '{0}'",
            Phrase::CurrentTimestamp => "CURRENT_TIMESTAMP",
            Phrase::TimestampPattern => "%Y-%m-%d %H:%M:%S%.3f",
            Phrase::TimestampTemplate => "TIMESTAMP '{0}'",

            Phrase::FuncCoalesce => "coalesce(?, {0})",
            Phrase::FuncConcat => "concat(?)",
            Phrase::FuncSubstring => "substring(?, {0})",
            Phrase::FuncSubstringEx => "substring(?, {0}, {1})",
            Phrase::FuncReplace => "replace(?, {0}, {1})",
            Phrase::FuncReverse => "reverse(?)",
            Phrase::FuncStrIndex => "position({0} in ?)",
            // ANSI has no start position for position(); the T-SQL form is
            // the fallback for dialects without their own
            Phrase::FuncStrIndexFrom => "charindex({0}, ?, {1:INTEGER})",
            Phrase::FuncLength => "length(?)",
            Phrase::FuncUpper => "upper(?)",
            Phrase::FuncLower => "lower(?)",
            Phrase::FuncTrim => "trim(?)",
            Phrase::FuncLtrim => "ltrim(?)",
            Phrase::FuncRtrim => "rtrim(?)",
            Phrase::FuncEscape => "? escape {0:VARCHAR}",

            Phrase::FuncAbs => "abs(?)",
            Phrase::FuncRound => "round(?, {0})",
            Phrase::FuncTrunc => "trunc(?, {0})",
            Phrase::FuncFloor => "floor(?)",
            Phrase::FuncCeiling => "ceiling(?)",
            Phrase::FuncModulo => "mod(?, {0})",
            Phrase::FuncFormat => "format(?, {0:VARCHAR})",

            Phrase::FuncDay => "extract(day from ?)",
            Phrase::FuncMonth => "extract(month from ?)",
            Phrase::FuncYear => "extract(year from ?)",

            Phrase::FuncSum => "sum(?)",
            Phrase::FuncMax => "max(?)",
            Phrase::FuncMin => "min(?)",
            Phrase::FuncAvg => "avg(?)",
            Phrase::FuncCount => "count(?)",
            Phrase::FuncCountDistinct => "count(distinct ?)",

            Phrase::FuncDecode => "case ?{0} end",
            Phrase::FuncDecodeSep => " ",
            Phrase::FuncDecodePart => "when {0} then {1}",
            Phrase::FuncDecodeElse => "else {0}",
        }
    }

    /// True for phrases whose function collapses rows.
    pub fn is_aggregate(&self) -> bool {
        matches!(
            self,
            Phrase::FuncSum
                | Phrase::FuncMax
                | Phrase::FuncMin
                | Phrase::FuncAvg
                | Phrase::FuncCount
                | Phrase::FuncCountDistinct
        )
    }

    /// True for function phrases, which wrap a column expression at `?`.
    ///
    /// The decode separator, part and else phrases are function-family
    /// helpers but are substituted by position, not wrapped. `func_concat`
    /// may also be a bare infix operator such as `" || "`.
    pub fn requires_placeholder(&self) -> bool {
        let is_func = (*self as usize) >= (Phrase::FuncCoalesce as usize);
        is_func
            && !matches!(
                self,
                Phrase::FuncConcat
                    | Phrase::FuncDecodeSep
                    | Phrase::FuncDecodePart
                    | Phrase::FuncDecodeElse
            )
    }

    /// Configuration key (`concat_expr`, `func_upper`, ...).
    pub fn key(&self) -> String {
        // serde_json never fails on a unit variant
        serde_json::to_value(self)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default()
    }

    /// Parse a configuration key.
    pub fn from_key(key: &str) -> Option<Phrase> {
        serde_json::from_value(serde_json::Value::String(key.trim().to_string())).ok()
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Check a template for a phrase.
///
/// Function phrases must contain a `?` placeholder. An empty template is a
/// legal "not supported" phrase and passes; renderers fall back to the
/// generic default for it.
pub fn validate_template(phrase: Phrase, template: &str) -> Result<(), ExprError> {
    if phrase.requires_placeholder() && !template.is_empty() && !template.contains('?') {
        return Err(ExprError::InvalidPhrase {
            phrase,
            template: template.to_string(),
        });
    }
    Ok(())
}
