//! Two-operand function node.

use std::collections::HashSet;

use super::func::function_label;
use super::{Column, ColumnExpr, ExprNode};
use crate::sql::builder::SqlBuilder;
use crate::sql::context::Context;
use crate::sql::describe::ExprInfo;
use crate::sql::types::DataType;

/// `prefix expr1 [middle expr2] postfix`.
///
/// The type is always that of `expr1`.
///
/// This node never reports itself aggregate, even when an operand is. Code
/// that needs aggregate detection through it must inspect the operands.
#[derive(Debug)]
pub struct FuncExExpr {
    prefix: String,
    expr1: ColumnExpr,
    middle: Option<String>,
    expr2: Option<ColumnExpr>,
    postfix: String,
    update_column: Option<Column>,
}

impl FuncExExpr {
    /// One-operand form with an explicit update column.
    pub fn unary(
        prefix: impl Into<String>,
        expr: ColumnExpr,
        postfix: impl Into<String>,
        update_column: Option<Column>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            expr1: expr,
            middle: None,
            expr2: None,
            postfix: postfix.into(),
            update_column,
        }
    }

    /// Two-operand form, e.g. `nullif(` A `, ` B `)`.
    pub fn binary(
        prefix: impl Into<String>,
        expr1: ColumnExpr,
        middle: impl Into<String>,
        expr2: ColumnExpr,
        postfix: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            expr1,
            middle: Some(middle.into()),
            expr2: Some(expr2),
            postfix: postfix.into(),
            update_column: None,
        }
    }

    pub fn with_update_column(mut self, column: Column) -> Self {
        self.update_column = Some(column);
        self
    }

    pub fn expr1(&self) -> &ColumnExpr {
        &self.expr1
    }

    pub fn expr2(&self) -> Option<&ColumnExpr> {
        self.expr2.as_ref()
    }
}

impl ExprNode for FuncExExpr {
    fn data_type(&self) -> DataType {
        self.expr1.data_type()
    }

    fn name(&self) -> Option<String> {
        let second = self.expr2.as_ref().and_then(ColumnExpr::name);
        match (self.expr1.name(), second) {
            (Some(a), Some(b)) => Some(format!("{}_{}", a, b)),
            (a, None) => a,
            (None, b) => b,
        }
    }

    fn update_column(&self) -> Option<Column> {
        self.update_column.clone()
    }

    fn is_aggregate(&self) -> bool {
        false
    }

    fn add_referenced_columns(&self, columns: &mut HashSet<Column>) {
        self.expr1.add_referenced_columns(columns);
        if let Some(expr2) = &self.expr2 {
            expr2.add_referenced_columns(columns);
        }
    }

    fn render(&self, sql: &mut SqlBuilder<'_>, ctx: Context) {
        let child = ctx.without(Context::ALIAS);
        sql.append(&self.prefix);
        self.expr1.render(sql, child);
        if let Some(expr2) = &self.expr2 {
            if let Some(middle) = &self.middle {
                sql.append(middle);
            }
            expr2.render(sql, child);
        }
        sql.append(&self.postfix);
    }

    fn describe(&self) -> ExprInfo {
        ExprInfo::new("func_ex", self.data_type())
            .name(self.name())
            .function(function_label(&self.prefix, &self.postfix))
            .child(self.expr1.describe())
            .children(self.expr2.iter().map(ColumnExpr::describe))
    }
}
