//! Physical column leaf.

use std::collections::HashSet;

use super::ExprNode;
use crate::sql::builder::SqlBuilder;
use crate::sql::context::Context;
use crate::sql::describe::ExprInfo;
use crate::sql::types::DataType;

/// A physical column of a table or view.
///
/// Columns compare by rowset alias, name and type; referenced-column sets
/// deduplicate on that identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    table: Option<String>,
    name: String,
    data_type: DataType,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            table: None,
            name: name.into(),
            data_type,
        }
    }

    /// Column qualified with the alias of its rowset.
    pub fn qualified(table: impl Into<String>, name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            table: Some(table.into()),
            name: name.into(),
            data_type,
        }
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// `table.name`, or just the name.
    pub fn full_name(&self) -> String {
        match &self.table {
            Some(t) => format!("{}.{}", t, self.name),
            None => self.name.clone(),
        }
    }
}

impl ExprNode for Column {
    fn data_type(&self) -> DataType {
        self.data_type
    }

    fn name(&self) -> Option<String> {
        Some(self.name.clone())
    }

    fn update_column(&self) -> Option<Column> {
        Some(self.clone())
    }

    fn add_referenced_columns(&self, columns: &mut HashSet<Column>) {
        columns.insert(self.clone());
    }

    fn render(&self, sql: &mut SqlBuilder<'_>, ctx: Context) {
        if let (true, Some(table)) = (ctx.contains(Context::FULLNAME), &self.table) {
            let table = sql.quote_name(table);
            sql.append(&table).append(".");
        }
        let name = sql.quote_name(&self.name);
        sql.append(&name);
    }

    fn describe(&self) -> ExprInfo {
        ExprInfo::new("column", self.data_type).name(Some(self.full_name()))
    }
}
