//! Rendering context flags.
//!
//! A [`Context`] is threaded by value through every `render` call. Nodes
//! never store it; a parent hands each child a masked copy. The one rule every
//! composite follows: children are never top-level select items, so they get
//! `ctx.without(Context::ALIAS)`.

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

/// Bit-flag set controlling how an expression is rendered.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Context(u32);

impl Context {
    /// No flags.
    pub const NONE: Context = Context(0);
    /// Unqualified column name.
    pub const NAME: Context = Context(1);
    /// Column name qualified with its rowset alias.
    pub const FULLNAME: Context = Context(2);
    /// Value only.
    pub const VALUE: Context = Context(4);
    /// Emit `AS alias` for aliased expressions.
    pub const ALIAS: Context = Context(8);
    /// Do not add grouping parentheses.
    pub const NOPARENTHESES: Context = Context(16);

    /// Fully qualified names and values, no aliases.
    pub const DEFAULT: Context = Context(1 | 2 | 4);
    /// Every flag except exclusions such as [`Context::NOPARENTHESES`].
    pub const ALL: Context = Context(1 | 2 | 4 | 8);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn from_bits(bits: u32) -> Self {
        Context(bits)
    }

    /// True if every flag in `other` is set.
    pub const fn contains(self, other: Context) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn with(self, other: Context) -> Self {
        Context(self.0 | other.0)
    }

    pub const fn without(self, other: Context) -> Self {
        Context(self.0 & !other.0)
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::DEFAULT
    }
}

impl BitOr for Context {
    type Output = Context;

    fn bitor(self, rhs: Context) -> Context {
        self.with(rhs)
    }
}

impl BitAnd for Context {
    type Output = Context;

    fn bitand(self, rhs: Context) -> Context {
        Context(self.0 & rhs.0)
    }
}

impl Not for Context {
    type Output = Context;

    fn not(self) -> Context {
        Context(!self.0)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(Context, &str); 5] = [
            (Context::NAME, "NAME"),
            (Context::FULLNAME, "FULLNAME"),
            (Context::VALUE, "VALUE"),
            (Context::ALIAS, "ALIAS"),
            (Context::NOPARENTHESES, "NOPARENTHESES"),
        ];
        let set: Vec<&str> = NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "Context({})", set.join(" | "))
    }
}
