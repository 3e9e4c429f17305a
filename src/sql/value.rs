//! Constant values and their rendering as SQL literals.
//!
//! [`render_value`] turns a [`Value`] into a literal of a target
//! [`DataType`] for a given dialect:
//!
//! - null and empty text render as the `null` phrase
//! - text types are single-quoted with embedded quotes doubled
//! - dates go through the dialect's date patterns and templates
//! - booleans use the dialect's boolean phrases
//! - numbers are validated and emitted bare
//!
//! Rendering never fails. Values that cannot be rendered for a type are
//! rejected earlier by [`Value::check_for`].

use std::fmt::{self, Write as _};
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

use super::dialect::SqlDialect;
use super::error::ExprError;
use super::phrase::Phrase;
use super::types::DataType;

static INTEGER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+$").unwrap());

static DECIMAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").unwrap());

const DATE_FORMATS: &[&str] = &["%Y-%m-%d"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// A constant operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Decimal number kept as text to preserve precision.
    Decimal(String),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    /// The database's current date/time.
    SysDate,
    /// Pre-rendered SQL, emitted verbatim.
    ///
    /// Never build this from user input.
    Raw(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for null and for empty text, which both render as `null`.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// The data type a value renders as when the target type is unknown.
    pub fn natural_type(&self) -> DataType {
        match self {
            Value::Null | Value::Raw(_) => DataType::Unknown,
            Value::Bool(_) => DataType::Bool,
            Value::Int(_) => DataType::Integer,
            Value::Float(_) => DataType::Float,
            Value::Decimal(_) => DataType::Decimal,
            Value::Text(_) => DataType::Varchar,
            Value::Date(_) => DataType::Date,
            Value::Time(_) => DataType::Time,
            Value::DateTime(_) | Value::SysDate => DataType::DateTime,
        }
    }

    /// Validated decimal constant.
    pub fn decimal(text: &str) -> Result<Self, ExprError> {
        let text = text.trim();
        if !DECIMAL_PATTERN.is_match(text) {
            return Err(ExprError::invalid_argument("value", text, "not a decimal number"));
        }
        Ok(Value::Decimal(text.to_string()))
    }

    /// Check that this value can be rendered as a literal of `data_type`.
    ///
    /// This is the boundary where raw values enter an expression tree.
    pub fn check_for(&self, data_type: DataType) -> Result<(), ExprError> {
        if self.is_empty() || matches!(self, Value::Raw(_)) {
            return Ok(());
        }
        match (data_type, self) {
            (DataType::Blob, _) => Err(ExprError::UnsupportedType(DataType::Blob)),
            (_, Value::Float(f)) if !f.is_finite() => Err(ExprError::invalid_argument(
                "value",
                f,
                "not a finite number",
            )),
            (_, Value::Decimal(s)) if !DECIMAL_PATTERN.is_match(s) => Err(
                ExprError::invalid_argument("value", s, "not a decimal number"),
            ),
            (dt, Value::Text(s)) if dt.is_numeric() => {
                if number_string(s, dt).is_some() {
                    Ok(())
                } else {
                    Err(ExprError::invalid_argument(
                        "value",
                        s,
                        format!("not a valid {} number", dt),
                    ))
                }
            }
            (dt, Value::Text(s)) if dt.is_date() => {
                if parse_temporal(s).is_some() {
                    Ok(())
                } else {
                    Err(ExprError::invalid_argument(
                        "value",
                        s,
                        format!("not a valid {} value", dt),
                    ))
                }
            }
            (dt, Value::Time(_)) if matches!(dt, DataType::Date | DataType::DateTime | DataType::Timestamp) => {
                Err(ExprError::invalid_argument(
                    "value",
                    self,
                    format!("a time of day is not a {} value", dt),
                ))
            }
            (dt, Value::Date(_)) if dt == DataType::Time => Err(ExprError::invalid_argument(
                "value",
                self,
                "a date is not a TIME value",
            )),
            _ => Ok(()),
        }
    }
}

/// Plain string form, used when no dialect is available.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => f.write_str(&format_float(*x)),
            Value::Decimal(s) | Value::Text(s) | Value::Raw(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Time(t) => write!(f, "{}", t.format("%H:%M:%S")),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Value::SysDate => f.write_str("sysdate"),
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Render a value as a literal of `data_type` using the dialect's phrases.
pub fn render_value<D: SqlDialect + ?Sized>(dialect: &D, value: &Value, data_type: DataType) -> String {
    if value.is_empty() {
        return dialect.sql_phrase(Phrase::Null).to_string();
    }
    if let Value::Raw(sql) = value {
        return sql.clone();
    }
    if let Value::SysDate = value {
        let phrase = match data_type {
            DataType::Date => Phrase::CurrentDate,
            DataType::Time => Phrase::CurrentTime,
            DataType::Timestamp => Phrase::CurrentTimestamp,
            _ => Phrase::CurrentDateTime,
        };
        return dialect.sql_phrase(phrase).to_string();
    }

    let data_type = match data_type {
        DataType::Unknown => value.natural_type(),
        dt => dt,
    };

    match data_type {
        DataType::Date | DataType::Time | DataType::DateTime | DataType::Timestamp => {
            render_temporal(dialect, value, data_type).unwrap_or_else(|| {
                log::warn!("cannot render {:?} as {}, quoting as text", value, data_type);
                dialect.quote_string(&value.to_string())
            })
        }
        DataType::Varchar | DataType::Char | DataType::Clob | DataType::UniqueId => {
            dialect.quote_string(&value.to_string())
        }
        DataType::Bool => {
            let phrase = if is_true(value) {
                Phrase::BooleanTrue
            } else {
                Phrase::BooleanFalse
            };
            dialect.sql_phrase(phrase).to_string()
        }
        DataType::Integer | DataType::AutoInc | DataType::Decimal | DataType::Float => {
            render_number(dialect, value, data_type)
        }
        DataType::Blob => {
            log::warn!("BLOB values cannot be rendered as literals");
            dialect.sql_phrase(Phrase::Null).to_string()
        }
        DataType::Unknown => value.to_string(),
    }
}

fn render_number<D: SqlDialect + ?Sized>(dialect: &D, value: &Value, data_type: DataType) -> String {
    match value {
        Value::Int(n) => n.to_string(),
        Value::Float(x) if x.is_finite() => format_float(*x),
        Value::Bool(b) => String::from(if *b { "1" } else { "0" }),
        Value::Decimal(s) | Value::Text(s) => match number_string(s, data_type) {
            Some(n) => n,
            None => {
                log::warn!("{:?} is not a valid {} number, quoting as text", s, data_type);
                dialect.quote_string(s)
            }
        },
        other => {
            log::warn!("cannot render {:?} as {}, emitting null", other, data_type);
            dialect.sql_phrase(Phrase::Null).to_string()
        }
    }
}

fn render_temporal<D: SqlDialect + ?Sized>(
    dialect: &D,
    value: &Value,
    data_type: DataType,
) -> Option<String> {
    let parsed;
    let value = match value {
        Value::Text(s) => {
            parsed = parse_temporal(s)?;
            &parsed
        }
        other => other,
    };

    let midnight = NaiveTime::MIN;
    match (data_type, value) {
        (DataType::Time, Value::Time(t)) => Some(apply_template(
            dialect,
            Phrase::TimeTemplate,
            Phrase::TimePattern,
            &NaiveDate::MIN.and_time(*t),
        )),
        (DataType::Time, Value::DateTime(dt)) => Some(apply_template(
            dialect,
            Phrase::TimeTemplate,
            Phrase::TimePattern,
            dt,
        )),
        // date-only values keep the date template, whatever the column type
        (_, Value::Date(d)) => Some(apply_template(
            dialect,
            Phrase::DateTemplate,
            Phrase::DatePattern,
            &d.and_time(midnight),
        )),
        (DataType::Date, Value::DateTime(dt)) => Some(apply_template(
            dialect,
            Phrase::DateTemplate,
            Phrase::DatePattern,
            dt,
        )),
        (DataType::DateTime, Value::DateTime(dt)) => Some(apply_template(
            dialect,
            Phrase::DateTimeTemplate,
            Phrase::DateTimePattern,
            dt,
        )),
        (DataType::Timestamp, Value::DateTime(dt)) => Some(apply_template(
            dialect,
            Phrase::TimestampTemplate,
            Phrase::TimestampPattern,
            dt,
        )),
        _ => None,
    }
}

fn apply_template<D: SqlDialect + ?Sized>(
    dialect: &D,
    template: Phrase,
    pattern: Phrase,
    value: &NaiveDateTime,
) -> String {
    let text = format_pattern(value, dialect.sql_phrase(pattern)).unwrap_or_else(|| {
        log::warn!(
            "invalid date pattern for {}: {:?}",
            pattern,
            dialect.sql_phrase(pattern)
        );
        format_pattern(value, pattern.default_template()).unwrap_or_default()
    });
    let template = match dialect.sql_phrase(template) {
        "" => template.default_template(),
        t => t,
    };
    template.replace("{0}", &text)
}

/// Format with a strftime pattern; `None` if the pattern is invalid.
fn format_pattern(value: &NaiveDateTime, pattern: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", value.format(pattern)).ok()?;
    Some(out)
}

fn parse_temporal(s: &str) -> Option<Value> {
    let s = s.trim();
    if let Some(d) = DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
    {
        return Some(Value::Date(d));
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
    {
        return Some(Value::DateTime(dt));
    }
    TIME_FORMATS
        .iter()
        .find_map(|f| NaiveTime::parse_from_str(s, f).ok())
        .map(Value::Time)
}

fn is_true(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Int(n) => *n != 0,
        Value::Float(x) => *x != 0.0,
        Value::Decimal(s) | Value::Text(s) => {
            matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "y" | "yes")
        }
        _ => false,
    }
}

/// Normalize a numeric string, or `None` if it is not a number of the type.
fn number_string(s: &str, data_type: DataType) -> Option<String> {
    let s = s.trim();
    let valid = match data_type {
        DataType::Integer | DataType::AutoInc => INTEGER_PATTERN.is_match(s),
        _ => DECIMAL_PATTERN.is_match(s),
    };
    valid.then(|| s.strip_prefix('+').unwrap_or(s).to_string())
}

fn format_float(x: f64) -> String {
    let mut buf = ryu::Buffer::new();
    buf.format(x).to_string()
}
