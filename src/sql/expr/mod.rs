//! Column expressions - the typed expression tree that renders to SQL.
//!
//! A [`ColumnExpr`] is a cheap, immutable handle to one node of the tree.
//! Application code composes handles bottom-up (columns and constants at the
//! leaves, arithmetic/concatenation/functions/decode above them) and renders
//! the root once into a [`SqlBuilder`] for the active dialect.
//!
//! ```ignore
//! use colexpr::sql::{col, Dialect, DataType};
//!
//! let price = col("PRICE", DataType::Decimal);
//! let qty = col("QTY", DataType::Integer);
//! let total = price.multiply_with(&qty)?.parenthesis().sum().alias("TOTAL");
//! assert_eq!(total.to_sql(&Dialect::Generic), "sum((PRICE*QTY))");
//! ```
//!
//! Nodes never change after construction, so one subtree may be shared by
//! several parents and rendered from several threads at once.

mod alias;
mod builders;
mod calc;
mod column;
mod concat;
mod concat_func;
mod decode;
mod func;
mod func_ex;
mod value;

pub use alias::AliasExpr;
pub use calc::{CalcExpr, CalcOp};
pub use column::Column;
pub use concat::ConcatExpr;
pub use concat_func::ConcatFuncExpr;
pub use decode::DecodeExpr;
pub use func::{FuncExpr, FuncTemplate};
pub use func_ex::FuncExExpr;
pub use value::ValueExpr;

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

use super::builder::SqlBuilder;
use super::context::Context;
use super::describe::ExprInfo;
use super::dialect::SqlDialect;
use super::error::ExprError;
use super::phrase::Phrase;
use super::types::DataType;
use super::value::Value;

// =============================================================================
// Node contract
// =============================================================================

/// Capabilities shared by every node.
pub trait ExprNode: fmt::Debug + Send + Sync {
    /// SQL type of the result.
    fn data_type(&self) -> DataType;

    /// Derived display/alias name.
    fn name(&self) -> Option<String>;

    /// The physical column this expression is backed by, if any.
    fn update_column(&self) -> Option<Column> {
        None
    }

    /// True if evaluating this node collapses rows.
    fn is_aggregate(&self) -> bool {
        false
    }

    /// Add every physical column this node depends on.
    fn add_referenced_columns(&self, columns: &mut HashSet<Column>);

    /// Emit SQL. Composites pass `ctx.without(Context::ALIAS)` to children.
    fn render(&self, sql: &mut SqlBuilder<'_>, ctx: Context);

    fn describe(&self) -> ExprInfo;
}

/// The closed set of node variants.
#[derive(Debug)]
pub enum ExprKind {
    Column(Column),
    Value(ValueExpr),
    Calc(CalcExpr),
    Concat(ConcatExpr),
    ConcatFunc(ConcatFuncExpr),
    Func(FuncExpr),
    FuncEx(FuncExExpr),
    Decode(DecodeExpr),
    Alias(AliasExpr),
}

impl ExprKind {
    pub fn node(&self) -> &dyn ExprNode {
        match self {
            ExprKind::Column(n) => n,
            ExprKind::Value(n) => n,
            ExprKind::Calc(n) => n,
            ExprKind::Concat(n) => n,
            ExprKind::ConcatFunc(n) => n,
            ExprKind::Func(n) => n,
            ExprKind::FuncEx(n) => n,
            ExprKind::Decode(n) => n,
            ExprKind::Alias(n) => n,
        }
    }
}

// =============================================================================
// Handle
// =============================================================================

/// Shared handle to an immutable expression node.
///
/// Cloning copies a pointer. Attributes are side metadata (titles, hints for
/// UI layers) and never affect the rendered SQL.
#[derive(Clone)]
pub struct ColumnExpr {
    kind: Arc<ExprKind>,
    attributes: Option<Arc<BTreeMap<String, String>>>,
}

impl ColumnExpr {
    pub fn new(kind: ExprKind) -> Self {
        Self {
            kind: Arc::new(kind),
            attributes: None,
        }
    }

    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    /// True if both handles point at the same node.
    pub fn ptr_eq(&self, other: &ColumnExpr) -> bool {
        Arc::ptr_eq(&self.kind, &other.kind)
    }

    pub fn data_type(&self) -> DataType {
        self.kind.node().data_type()
    }

    pub fn name(&self) -> Option<String> {
        self.kind.node().name()
    }

    pub fn update_column(&self) -> Option<Column> {
        self.kind.node().update_column()
    }

    pub fn is_aggregate(&self) -> bool {
        self.kind.node().is_aggregate()
    }

    pub fn add_referenced_columns(&self, columns: &mut HashSet<Column>) {
        self.kind.node().add_referenced_columns(columns)
    }

    /// Set of physical columns this expression depends on.
    pub fn referenced_columns(&self) -> HashSet<Column> {
        let mut columns = HashSet::new();
        self.add_referenced_columns(&mut columns);
        columns
    }

    pub fn render(&self, sql: &mut SqlBuilder<'_>, ctx: Context) {
        self.kind.node().render(sql, ctx)
    }

    /// Render with [`Context::DEFAULT`].
    pub fn to_sql(&self, dialect: &dyn SqlDialect) -> String {
        self.to_sql_with(dialect, Context::DEFAULT)
    }

    pub fn to_sql_with(&self, dialect: &dyn SqlDialect, ctx: Context) -> String {
        let mut sql = SqlBuilder::new(dialect);
        self.render(&mut sql, ctx);
        sql.into_sql()
    }

    pub fn describe(&self) -> ExprInfo {
        let mut info = self.kind.node().describe();
        if let Some(attributes) = &self.attributes {
            info.attributes = attributes.as_ref().clone();
        }
        info
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// Same node with one more attribute.
    pub fn with_attribute(&self, key: impl Into<String>, value: impl Into<String>) -> ColumnExpr {
        let mut attributes = self
            .attributes
            .as_deref()
            .cloned()
            .unwrap_or_default();
        attributes.insert(key.into(), value.into());
        ColumnExpr {
            kind: Arc::clone(&self.kind),
            attributes: Some(Arc::new(attributes)),
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .as_ref()
            .and_then(|a| a.get(key))
            .map(String::as_str)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .flat_map(|a| a.iter())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Debug for ColumnExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.kind, f)
    }
}

macro_rules! impl_from_node {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for ColumnExpr {
                fn from(node: $ty) -> Self {
                    ColumnExpr::new(ExprKind::$variant(node))
                }
            }
        )*
    };
}

impl_from_node!(
    Column(Column),
    Value(ValueExpr),
    Calc(CalcExpr),
    Concat(ConcatExpr),
    ConcatFunc(ConcatFuncExpr),
    Func(FuncExpr),
    FuncEx(FuncExExpr),
    Decode(DecodeExpr),
    Alias(AliasExpr),
);

// =============================================================================
// Leaf constructors
// =============================================================================

/// Unqualified column.
pub fn col(name: &str, data_type: DataType) -> ColumnExpr {
    Column::new(name, data_type).into()
}

/// Column qualified with its rowset alias.
pub fn table_col(table: &str, name: &str, data_type: DataType) -> ColumnExpr {
    Column::qualified(table, name, data_type).into()
}

/// `count(*)` over the rows of the query.
pub fn count_all() -> ColumnExpr {
    FuncExpr::from_phrase(
        ValueExpr::raw("*").into(),
        Phrase::FuncCount,
        vec![],
        DataType::Unknown,
        None,
        Some(DataType::Integer),
    )
    .into()
}

/// Constant of an explicit type.
pub fn val(value: Value, data_type: DataType) -> Result<ColumnExpr, ExprError> {
    Ok(ValueExpr::new(value, data_type)?.into())
}
