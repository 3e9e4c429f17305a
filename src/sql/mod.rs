//! SQL expression generation.
//!
//! - [`expr`] - the column expression tree and its fluent builders
//! - [`dialect`] - per-database phrase tables, conversions and quoting
//! - [`phrase`] - the phrase keys and their ANSI defaults
//! - [`value`] - literal rendering
//! - [`builder`] - the output buffer expressions render into
//! - [`context`] - render flags
//! - [`describe`] - structured metadata export

pub mod builder;
pub mod context;
pub mod describe;
pub mod dialect;
pub mod error;
pub mod expr;
pub mod operand;
pub mod phrase;
pub mod types;
pub mod value;

#[cfg(test)]
pub mod test_utils;

pub use builder::SqlBuilder;
pub use context::Context;
pub use describe::ExprInfo;
pub use dialect::{validate_dialect, Dialect, PhraseTable, SqlDialect};
pub use error::ExprError;
pub use expr::{
    col, count_all, table_col, val, AliasExpr, CalcExpr, CalcOp, Column, ColumnExpr, ConcatExpr,
    ConcatFuncExpr, DecodeExpr, ExprKind, ExprNode, FuncExExpr, FuncExpr, FuncTemplate, ValueExpr,
};
pub use operand::Operand;
pub use phrase::Phrase;
pub use types::DataType;
pub use value::{render_value, Value};
