//! # colexpr
//!
//! Typed column expressions that compile to multi-dialect SQL.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        Application code / JSON document (document)       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [builders]
//! ┌─────────────────────────────────────────────────────────┐
//! │   ColumnExpr tree (column, value, calc, concat, func,    │
//! │   func_ex, decode, alias)                                │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [render + context flags]
//! ┌─────────────────────────────────────────────────────────┐
//! │   SqlBuilder ◀── SqlDialect phrases / value literals     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//!                   SQL fragment text
//! ```
//!
//! Trees are immutable and cheap to clone. Rendering never fails: template
//! and value defects are rejected when nodes and dialects are built.

pub mod config;
pub mod document;
pub mod sql;

// Re-export SQL submodules at crate level
pub use sql::dialect;
pub use sql::expr;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::sql::{
        // Constructors
        col,
        count_all,
        table_col,
        val,
        // Types
        Column,
        ColumnExpr,
        Context,
        DataType,
        Dialect,
        ExprError,
        Operand,
        Phrase,
        PhraseTable,
        SqlBuilder,
        SqlDialect,
        Value,
    };
}

// Also export at crate root for convenience
pub use sql::{col, table_col, ColumnExpr, Context, DataType, Dialect, SqlDialect};
