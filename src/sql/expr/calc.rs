//! Arithmetic node.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Column, ColumnExpr, ExprNode};
use crate::sql::builder::SqlBuilder;
use crate::sql::context::Context;
use crate::sql::describe::ExprInfo;
use crate::sql::error::ExprError;
use crate::sql::operand::Operand;
use crate::sql::types::DataType;

/// Arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalcOp {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
}

impl CalcOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CalcOp::Plus => "+",
            CalcOp::Minus => "-",
            CalcOp::Multiply => "*",
            CalcOp::Divide => "/",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "+" => Some(CalcOp::Plus),
            "-" => Some(CalcOp::Minus),
            "*" => Some(CalcOp::Multiply),
            "/" => Some(CalcOp::Divide),
            _ => None,
        }
    }
}

impl fmt::Display for CalcOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// `expr <op> value`.
///
/// The result is always DECIMAL. No parentheses are added; wrap operands with
/// [`ColumnExpr::parenthesis`] to control precedence.
#[derive(Debug)]
pub struct CalcExpr {
    expr: ColumnExpr,
    op: CalcOp,
    value: Operand,
}

impl CalcExpr {
    pub fn new(expr: ColumnExpr, op: CalcOp, value: impl Into<Operand>) -> Result<Self, ExprError> {
        let value = value.into();
        value.check_for(expr.data_type())?;
        Ok(Self { expr, op, value })
    }

    pub fn expr(&self) -> &ColumnExpr {
        &self.expr
    }

    pub fn op(&self) -> CalcOp {
        self.op
    }

    pub fn value(&self) -> &Operand {
        &self.value
    }
}

impl ExprNode for CalcExpr {
    fn data_type(&self) -> DataType {
        DataType::Decimal
    }

    fn name(&self) -> Option<String> {
        self.expr.name()
    }

    fn is_aggregate(&self) -> bool {
        self.expr.is_aggregate() || self.value.is_aggregate()
    }

    fn add_referenced_columns(&self, columns: &mut HashSet<Column>) {
        self.expr.add_referenced_columns(columns);
        self.value.add_referenced_columns(columns);
    }

    fn render(&self, sql: &mut SqlBuilder<'_>, ctx: Context) {
        let child = ctx.without(Context::ALIAS);
        self.expr.render(sql, child);
        sql.append(self.op.symbol());
        self.value
            .render(sql, self.expr.data_type(), child, self.op.symbol());
    }

    fn describe(&self) -> ExprInfo {
        ExprInfo::new("calc", DataType::Decimal)
            .name(self.name())
            .function(Some(self.op.symbol().to_string()))
            .aggregate(self.is_aggregate())
            .child(self.expr.describe())
            .child(self.value.describe())
    }
}
