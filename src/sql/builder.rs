//! SQL output buffer.

use std::fmt;

use super::dialect::SqlDialect;
use super::phrase::Phrase;
use super::types::DataType;
use super::value::Value;

/// Buffer that expression nodes render into.
///
/// Carries the active dialect explicitly. Without one, default phrases are
/// used and values render in their plain string form.
#[derive(Clone)]
pub struct SqlBuilder<'a> {
    sql: String,
    dialect: Option<&'a dyn SqlDialect>,
}

impl<'a> SqlBuilder<'a> {
    pub fn new(dialect: &'a dyn SqlDialect) -> Self {
        Self {
            sql: String::new(),
            dialect: Some(dialect),
        }
    }

    /// Builder with no dialect.
    pub fn plain() -> Self {
        Self {
            sql: String::new(),
            dialect: None,
        }
    }

    pub fn dialect(&self) -> Option<&'a dyn SqlDialect> {
        self.dialect
    }

    /// Empty buffer with the same dialect, for intermediate fragments.
    pub fn fork(&self) -> SqlBuilder<'a> {
        Self {
            sql: String::new(),
            dialect: self.dialect,
        }
    }

    /// Template for a phrase.
    ///
    /// A dialect that leaves a phrase empty falls back to the generic
    /// template, so a missing phrase degrades instead of failing. A function
    /// template without its `?` placeholder is treated the same way.
    pub fn phrase(&self, phrase: Phrase) -> &'a str {
        let Some(dialect) = self.dialect else {
            return phrase.default_template();
        };
        match dialect.sql_phrase(phrase) {
            "" if !phrase.default_template().is_empty() => {
                log::warn!(
                    "{}: phrase {} not supported, using {:?}",
                    dialect.name(),
                    phrase,
                    phrase.default_template()
                );
                phrase.default_template()
            }
            template if phrase.requires_placeholder() && !template.contains('?') => {
                log::warn!(
                    "{}: phrase {} template {:?} has no placeholder, using {:?}",
                    dialect.name(),
                    phrase,
                    template,
                    phrase.default_template()
                );
                phrase.default_template()
            }
            template => template,
        }
    }

    /// Literal for a constant of the given type.
    pub fn value_string(&self, value: &Value, data_type: DataType) -> String {
        match self.dialect {
            Some(dialect) => dialect.value_string(value, data_type),
            None => {
                log::warn!("no dialect to render {:?}, using plain string", value);
                value.to_string()
            }
        }
    }

    /// Column name, quoted if the dialect requires it.
    pub fn quote_name(&self, name: &str) -> String {
        let Some(dialect) = self.dialect else {
            return name.to_string();
        };
        if dialect.detect_quote_name(name) {
            dialect.quote_identifier(name)
        } else {
            name.to_string()
        }
    }

    /// Identifier, always quoted.
    pub fn quote_identifier(&self, ident: &str) -> String {
        match self.dialect {
            Some(dialect) => dialect.quote_identifier(ident),
            None => super::dialect::helpers::quote_double(ident),
        }
    }

    pub fn append(&mut self, s: &str) -> &mut Self {
        self.sql.push_str(s);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.sql
    }

    pub fn len(&self) -> usize {
        self.sql.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    pub fn into_sql(self) -> String {
        self.sql
    }
}

impl fmt::Debug for SqlBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqlBuilder")
            .field("sql", &self.sql)
            .field("dialect", &self.dialect.map(|d| d.name()))
            .finish()
    }
}

impl fmt::Write for SqlBuilder<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.sql.push_str(s);
        Ok(())
    }
}
