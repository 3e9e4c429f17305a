//! Multi-operand concatenation node.

use std::collections::HashSet;

use super::{Column, ColumnExpr, ExprKind, ExprNode};
use crate::sql::builder::SqlBuilder;
use crate::sql::context::Context;
use crate::sql::describe::ExprInfo;
use crate::sql::phrase::Phrase;
use crate::sql::types::DataType;
use crate::sql::value::Value;

/// `first` concatenated with every expression of `others`, optionally
/// joined by a separator literal.
///
/// Driven by the dialect's `func_concat` phrase. With a `?` the operands are
/// listed inside the function (`concat(A, ' ', B)`); without one the phrase
/// is an infix operator placed between them (`A || ' ' || B`).
#[derive(Debug)]
pub struct ConcatFuncExpr {
    first: ColumnExpr,
    separator: Option<String>,
    others: Vec<ColumnExpr>,
}

impl ConcatFuncExpr {
    pub fn new(first: ColumnExpr, separator: Option<String>, others: Vec<ColumnExpr>) -> Self {
        Self {
            first,
            separator,
            others,
        }
    }

    pub fn first(&self) -> &ColumnExpr {
        &self.first
    }

    pub fn separator(&self) -> Option<&str> {
        self.separator.as_deref()
    }

    pub fn others(&self) -> &[ColumnExpr] {
        &self.others
    }

    fn operands(&self) -> impl Iterator<Item = &ColumnExpr> {
        std::iter::once(&self.first).chain(self.others.iter())
    }

    fn render_separator(&self, sql: &mut SqlBuilder<'_>, between: &str) {
        if let Some(sep) = &self.separator {
            let literal = sql.value_string(&Value::Text(sep.clone()), DataType::Varchar);
            sql.append(&literal);
            sql.append(between);
        }
    }
}

impl ExprNode for ConcatFuncExpr {
    fn data_type(&self) -> DataType {
        DataType::Varchar
    }

    /// First name joined with the names of the non-constant others.
    fn name(&self) -> Option<String> {
        let names: Vec<String> = std::iter::once(self.first.name())
            .chain(
                self.others
                    .iter()
                    .filter(|e| !matches!(e.kind(), ExprKind::Value(_)))
                    .map(ColumnExpr::name),
            )
            .flatten()
            .collect();
        if names.is_empty() {
            None
        } else {
            Some(names.join("_"))
        }
    }

    fn is_aggregate(&self) -> bool {
        self.operands().any(ColumnExpr::is_aggregate)
    }

    fn add_referenced_columns(&self, columns: &mut HashSet<Column>) {
        for expr in self.operands() {
            expr.add_referenced_columns(columns);
        }
    }

    fn render(&self, sql: &mut SqlBuilder<'_>, ctx: Context) {
        let child = ctx.without(Context::ALIAS);
        let template = sql.phrase(Phrase::FuncConcat);
        match template.split_once('?') {
            Some((prefix, suffix)) => {
                sql.append(prefix);
                self.first.render(sql, child);
                for other in &self.others {
                    sql.append(", ");
                    self.render_separator(sql, ", ");
                    other.render(sql, child);
                }
                sql.append(suffix);
            }
            None => {
                self.first.render(sql, child);
                for other in &self.others {
                    sql.append(template);
                    self.render_separator(sql, template);
                    other.render(sql, child);
                }
            }
        }
    }

    fn describe(&self) -> ExprInfo {
        ExprInfo::new("concat_func", DataType::Varchar)
            .name(self.name())
            .function(Some("concat".to_string()))
            .aggregate(self.is_aggregate())
            .children(self.operands().map(ColumnExpr::describe))
    }
}
