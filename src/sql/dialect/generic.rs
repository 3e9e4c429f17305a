//! Generic ANSI SQL dialect.
//!
//! Uses the default template of every phrase. Useful for tests, for
//! documentation, and as the base of custom phrase tables for databases
//! without a built-in dialect.

use super::SqlDialect;

/// Generic ANSI SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Generic;

impl SqlDialect for Generic {
    fn name(&self) -> &'static str {
        "generic"
    }
}
