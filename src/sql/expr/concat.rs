//! Concatenation node.

use std::collections::HashSet;

use super::{Column, ColumnExpr, ExprNode};
use crate::sql::builder::SqlBuilder;
use crate::sql::context::Context;
use crate::sql::describe::ExprInfo;
use crate::sql::operand::Operand;
use crate::sql::phrase::Phrase;
use crate::sql::types::DataType;

/// `left` concatenated with `value`. The result is always text.
///
/// The dialect's concat phrase comes in two forms:
///
/// - with a `?`: function form such as `concat(?, {0})`; `?` takes the left
///   operand and `{0}` the right
/// - without: an infix operator such as ` || `, emitted between the operands
#[derive(Debug)]
pub struct ConcatExpr {
    left: ColumnExpr,
    value: Operand,
}

impl ConcatExpr {
    pub fn new(left: ColumnExpr, value: impl Into<Operand>) -> Self {
        Self {
            left,
            value: value.into(),
        }
    }

    pub fn left(&self) -> &ColumnExpr {
        &self.left
    }

    pub fn value(&self) -> &Operand {
        &self.value
    }
}

impl ExprNode for ConcatExpr {
    fn data_type(&self) -> DataType {
        DataType::Varchar
    }

    /// `LEFT_RIGHT` when the right side is an expression.
    fn name(&self) -> Option<String> {
        let right = self.value.as_expr().and_then(ColumnExpr::name);
        match (self.left.name(), right) {
            (Some(l), Some(r)) => Some(format!("{}_{}", l, r)),
            (l, None) => l,
            (None, r) => r,
        }
    }

    fn is_aggregate(&self) -> bool {
        self.left.is_aggregate() || self.value.is_aggregate()
    }

    fn add_referenced_columns(&self, columns: &mut HashSet<Column>) {
        self.left.add_referenced_columns(columns);
        self.value.add_referenced_columns(columns);
    }

    fn render(&self, sql: &mut SqlBuilder<'_>, ctx: Context) {
        let child = ctx.without(Context::ALIAS);
        let template = sql.phrase(Phrase::ConcatExpr);
        match template.split_once('?') {
            Some((prefix, rest)) => {
                sql.append(prefix);
                self.left.render(sql, child);
                match rest.split_once("{0}") {
                    Some((before, after)) => {
                        sql.append(before);
                        self.value.render(sql, DataType::Varchar, child, ", ");
                        sql.append(after);
                    }
                    None => {
                        log::warn!("concat phrase {:?} has no {{0}} placeholder", template);
                        sql.append(rest);
                        self.value.render(sql, DataType::Varchar, child, ", ");
                    }
                }
            }
            None => {
                self.left.render(sql, child);
                sql.append(template);
                self.value.render(sql, DataType::Varchar, child, template);
            }
        }
    }

    fn describe(&self) -> ExprInfo {
        ExprInfo::new("concat", DataType::Varchar)
            .name(self.name())
            .aggregate(self.is_aggregate())
            .child(self.left.describe())
            .child(self.value.describe())
    }
}
