//! Right-hand operands: a constant, an expression, or a list of either.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::builder::SqlBuilder;
use super::context::Context;
use super::describe::ExprInfo;
use super::error::ExprError;
use super::expr::{Column, ColumnExpr};
use super::types::DataType;
use super::value::Value;

/// Operand of a composite node.
#[derive(Debug, Clone)]
pub enum Operand {
    Expr(ColumnExpr),
    Value(Value),
    /// Rendered item by item, joined with the caller's separator.
    List(Vec<Operand>),
}

impl Operand {
    /// Render into `sql`.
    ///
    /// Constants are rendered as literals of `data_type`; expressions render
    /// themselves with `ctx`. `separator` joins list items.
    pub fn render(&self, sql: &mut SqlBuilder<'_>, data_type: DataType, ctx: Context, separator: &str) {
        match self {
            Operand::Expr(expr) => expr.render(sql, ctx),
            Operand::Value(value) => {
                let literal = sql.value_string(value, data_type);
                sql.append(&literal);
            }
            Operand::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        sql.append(separator);
                    }
                    item.render(sql, data_type, ctx, separator);
                }
            }
        }
    }

    /// Render into a fresh string using the dialect of `sql`.
    pub fn render_to_string(
        &self,
        sql: &SqlBuilder<'_>,
        data_type: DataType,
        ctx: Context,
        separator: &str,
    ) -> String {
        let mut out = sql.fork();
        self.render(&mut out, data_type, ctx, separator);
        out.into_sql()
    }

    pub fn as_expr(&self) -> Option<&ColumnExpr> {
        match self {
            Operand::Expr(expr) => Some(expr),
            _ => None,
        }
    }

    pub fn is_aggregate(&self) -> bool {
        match self {
            Operand::Expr(expr) => expr.is_aggregate(),
            Operand::Value(_) => false,
            Operand::List(items) => items.iter().any(Operand::is_aggregate),
        }
    }

    pub fn add_referenced_columns(&self, columns: &mut HashSet<Column>) {
        match self {
            Operand::Expr(expr) => expr.add_referenced_columns(columns),
            Operand::Value(_) => {}
            Operand::List(items) => {
                for item in items {
                    item.add_referenced_columns(columns);
                }
            }
        }
    }

    /// Validate constants against the type they will be rendered as.
    pub fn check_for(&self, data_type: DataType) -> Result<(), ExprError> {
        match self {
            Operand::Expr(_) => Ok(()),
            Operand::Value(value) => value.check_for(data_type),
            Operand::List(items) => items.iter().try_for_each(|item| item.check_for(data_type)),
        }
    }

    /// Same expression instance or equal constant.
    pub fn same_as(&self, other: &Operand) -> bool {
        match (self, other) {
            (Operand::Expr(a), Operand::Expr(b)) => a.ptr_eq(b),
            (Operand::Value(a), Operand::Value(b)) => a == b,
            (Operand::List(a), Operand::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_as(y))
            }
            _ => false,
        }
    }

    pub fn describe(&self) -> ExprInfo {
        match self {
            Operand::Expr(expr) => expr.describe(),
            Operand::Value(value) => {
                ExprInfo::new("value", value.natural_type()).value(value.to_string())
            }
            Operand::List(items) => ExprInfo::new("list", DataType::Unknown)
                .children(items.iter().map(Operand::describe)),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<ColumnExpr> for Operand {
    fn from(expr: ColumnExpr) -> Self {
        Operand::Expr(expr)
    }
}

impl From<&ColumnExpr> for Operand {
    fn from(expr: &ColumnExpr) -> Self {
        Operand::Expr(expr.clone())
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Value(value)
    }
}

impl From<i64> for Operand {
    fn from(n: i64) -> Self {
        Operand::Value(Value::Int(n))
    }
}

impl From<i32> for Operand {
    fn from(n: i32) -> Self {
        Operand::Value(Value::Int(n.into()))
    }
}

impl From<f64> for Operand {
    fn from(x: f64) -> Self {
        Operand::Value(Value::Float(x))
    }
}

impl From<bool> for Operand {
    fn from(b: bool) -> Self {
        Operand::Value(Value::Bool(b))
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::Value(Value::Text(s.to_string()))
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::Value(Value::Text(s))
    }
}

impl From<NaiveDate> for Operand {
    fn from(d: NaiveDate) -> Self {
        Operand::Value(Value::Date(d))
    }
}

impl From<NaiveTime> for Operand {
    fn from(t: NaiveTime) -> Self {
        Operand::Value(Value::Time(t))
    }
}

impl From<NaiveDateTime> for Operand {
    fn from(dt: NaiveDateTime) -> Self {
        Operand::Value(Value::DateTime(dt))
    }
}

impl From<Vec<Operand>> for Operand {
    fn from(items: Vec<Operand>) -> Self {
        Operand::List(items)
    }
}
