//! Aliased select-list item.

use std::collections::HashSet;

use super::{Column, ColumnExpr, ExprNode};
use crate::sql::builder::SqlBuilder;
use crate::sql::context::Context;
use crate::sql::describe::ExprInfo;
use crate::sql::phrase::Phrase;
use crate::sql::types::DataType;

/// `expr AS "alias"` when rendered with [`Context::ALIAS`], plain `expr`
/// otherwise.
#[derive(Debug)]
pub struct AliasExpr {
    expr: ColumnExpr,
    alias: String,
}

impl AliasExpr {
    pub fn new(expr: ColumnExpr, alias: impl Into<String>) -> Self {
        Self {
            expr,
            alias: alias.into(),
        }
    }

    pub fn expr(&self) -> &ColumnExpr {
        &self.expr
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }
}

impl ExprNode for AliasExpr {
    fn data_type(&self) -> DataType {
        self.expr.data_type()
    }

    fn name(&self) -> Option<String> {
        Some(self.alias.clone())
    }

    fn update_column(&self) -> Option<Column> {
        self.expr.update_column()
    }

    fn is_aggregate(&self) -> bool {
        self.expr.is_aggregate()
    }

    fn add_referenced_columns(&self, columns: &mut HashSet<Column>) {
        self.expr.add_referenced_columns(columns);
    }

    fn render(&self, sql: &mut SqlBuilder<'_>, ctx: Context) {
        if !ctx.contains(Context::ALIAS) {
            self.expr.render(sql, ctx);
            return;
        }
        self.expr.render(sql, ctx.without(Context::ALIAS));
        let rename = sql.phrase(Phrase::RenameColumn);
        let alias = sql.quote_identifier(&self.alias);
        sql.append(rename).append(&alias);
    }

    fn describe(&self) -> ExprInfo {
        ExprInfo::new("alias", self.data_type())
            .name(self.name())
            .aggregate(self.is_aggregate())
            .child(self.expr.describe())
    }
}
