//! Structured description of an expression tree.
//!
//! Used by diagnostics and the `describe` command; not needed to render SQL.

use std::collections::BTreeMap;

use serde::Serialize;

use super::types::DataType;

/// Description of one node and its children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExprInfo {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Display label of a function node. Heuristic, never used for SQL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    pub data_type: DataType,
    #[serde(skip_serializing_if = "is_false")]
    pub aggregate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ExprInfo>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl ExprInfo {
    pub fn new(kind: &'static str, data_type: DataType) -> Self {
        Self {
            kind,
            name: None,
            function: None,
            data_type,
            aggregate: false,
            value: None,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn function(mut self, function: Option<String>) -> Self {
        self.function = function;
        self
    }

    pub fn aggregate(mut self, aggregate: bool) -> Self {
        self.aggregate = aggregate;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn child(mut self, child: ExprInfo) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ExprInfo>) -> Self {
        self.children.extend(children);
        self
    }

    /// Depth-first iterator over this node and all descendants.
    pub fn walk(&self) -> Vec<&ExprInfo> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.walk());
        }
        out
    }
}
