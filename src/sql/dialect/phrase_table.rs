//! Dialect built from a base dialect plus phrase overrides.

use std::collections::BTreeMap;

use super::{Dialect, SqlDialect};
use crate::sql::error::ExprError;
use crate::sql::phrase::{validate_template, Phrase};
use crate::sql::types::DataType;

/// A built-in dialect with some phrases replaced.
///
/// Every override is validated when it is added, so a table that was built
/// successfully renders without template defects.
///
/// # Example
///
/// ```ignore
/// let table = PhraseTable::new(Dialect::Generic)
///     .with_phrase(Phrase::FuncUpper, "ucase(?)")?;
/// assert_eq!(table.sql_phrase(Phrase::FuncUpper), "ucase(?)");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PhraseTable {
    base: Dialect,
    overrides: BTreeMap<Phrase, String>,
}

impl PhraseTable {
    pub fn new(base: Dialect) -> Self {
        Self {
            base,
            overrides: BTreeMap::new(),
        }
    }

    /// Build from `(phrase, template)` pairs, failing on the first bad one.
    pub fn from_overrides<I, S>(base: Dialect, overrides: I) -> Result<Self, ExprError>
    where
        I: IntoIterator<Item = (Phrase, S)>,
        S: Into<String>,
    {
        overrides
            .into_iter()
            .try_fold(Self::new(base), |table, (phrase, template)| {
                table.with_phrase(phrase, template)
            })
    }

    /// Replace one phrase.
    pub fn with_phrase(
        mut self,
        phrase: Phrase,
        template: impl Into<String>,
    ) -> Result<Self, ExprError> {
        let template = template.into();
        validate_template(phrase, &template)?;
        self.overrides.insert(phrase, template);
        Ok(self)
    }

    pub fn base(&self) -> Dialect {
        self.base
    }

    /// Overridden phrases in key order.
    pub fn overrides(&self) -> impl Iterator<Item = (Phrase, &str)> {
        self.overrides.iter().map(|(p, t)| (*p, t.as_str()))
    }
}

impl From<Dialect> for PhraseTable {
    fn from(base: Dialect) -> Self {
        Self::new(base)
    }
}

impl SqlDialect for PhraseTable {
    fn name(&self) -> &'static str {
        self.base.name()
    }

    fn sql_phrase(&self, phrase: Phrase) -> &str {
        match self.overrides.get(&phrase) {
            Some(template) => template,
            None => self.base.sql_phrase(phrase),
        }
    }

    fn convert_phrase(&self, dest: DataType, src: DataType, format: Option<&str>) -> String {
        self.base.convert_phrase(dest, src, format)
    }

    fn detect_quote_name(&self, name: &str) -> bool {
        self.base.detect_quote_name(name)
    }

    fn quote_string(&self, s: &str) -> String {
        self.base.quote_string(s)
    }

    // quote_identifier and value_string use the defaults so that overridden
    // quote, boolean and date phrases take effect
}
