//! Literal node.

use std::collections::HashSet;

use super::{Column, ColumnExpr, ExprNode};
use crate::sql::builder::SqlBuilder;
use crate::sql::context::Context;
use crate::sql::describe::ExprInfo;
use crate::sql::error::ExprError;
use crate::sql::types::DataType;
use crate::sql::value::Value;

/// A constant, either with an explicit type or standing in for a column.
///
/// When built for a column, type and name come from that column. The column
/// is metadata only: a literal references no physical columns.
#[derive(Debug)]
pub struct ValueExpr {
    value: Value,
    data_type: DataType,
    column: Option<ColumnExpr>,
}

impl ValueExpr {
    /// Constant of an explicit type.
    pub fn new(value: Value, data_type: DataType) -> Result<Self, ExprError> {
        value.check_for(data_type)?;
        Ok(Self {
            value,
            data_type,
            column: None,
        })
    }

    /// Untyped SQL text emitted verbatim, such as the `*` of `count(*)`.
    pub(super) fn raw(text: &str) -> Self {
        Self {
            value: Value::Raw(text.to_string()),
            data_type: DataType::Unknown,
            column: None,
        }
    }

    /// Constant taking type and name from `column`.
    pub fn for_column(column: ColumnExpr, value: Value) -> Result<Self, ExprError> {
        let data_type = column.data_type();
        value.check_for(data_type)?;
        Ok(Self {
            value,
            data_type,
            column: Some(column),
        })
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn column(&self) -> Option<&ColumnExpr> {
        self.column.as_ref()
    }
}

impl ExprNode for ValueExpr {
    fn data_type(&self) -> DataType {
        match &self.column {
            Some(c) => c.data_type(),
            None => self.data_type,
        }
    }

    fn name(&self) -> Option<String> {
        self.column.as_ref().and_then(ColumnExpr::name)
    }

    fn update_column(&self) -> Option<Column> {
        self.column.as_ref().and_then(ColumnExpr::update_column)
    }

    fn add_referenced_columns(&self, _columns: &mut HashSet<Column>) {}

    fn render(&self, sql: &mut SqlBuilder<'_>, _ctx: Context) {
        let literal = sql.value_string(&self.value, self.data_type());
        sql.append(&literal);
    }

    fn describe(&self) -> ExprInfo {
        ExprInfo::new("value", self.data_type())
            .name(self.name())
            .value(self.value.to_string())
    }
}
