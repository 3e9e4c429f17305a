//! Single-operand function node and the template machinery shared with
//! decode.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{Column, ColumnExpr, ExprNode};
use crate::sql::builder::SqlBuilder;
use crate::sql::context::Context;
use crate::sql::describe::ExprInfo;
use crate::sql::dialect::{Generic, SqlDialect};
use crate::sql::error::ExprError;
use crate::sql::operand::Operand;
use crate::sql::phrase::Phrase;
use crate::sql::types::DataType;

/// `{0}`, `{1:VARCHAR}`, ...
static PARAM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\d+)(?::([A-Za-z_]+))?\}").unwrap());

/// Where a function's template comes from.
#[derive(Debug)]
pub enum FuncTemplate {
    /// Caller-supplied template, split at `?` on construction.
    Fixed { prefix: String, postfix: String },
    /// Dialect phrase, looked up when rendering.
    Phrase {
        phrase: Phrase,
        params: Vec<Operand>,
        /// Type for rendering params that carry no `{n:TYPE}` hint.
        param_type: DataType,
    },
    /// Dialect conversion template.
    Convert {
        dest: DataType,
        format: Option<String>,
    },
}

/// `prefix <expr> postfix`, e.g. `upper(?)`.
#[derive(Debug)]
pub struct FuncExpr {
    expr: ColumnExpr,
    template: FuncTemplate,
    update_column: Option<Column>,
    aggregate: bool,
    data_type: Option<DataType>,
}

impl FuncExpr {
    /// Function from a fixed template containing one `?`.
    ///
    /// `data_type` defaults to the operand's type.
    pub fn new(
        expr: ColumnExpr,
        template: &str,
        update_column: Option<Column>,
        aggregate: bool,
        data_type: Option<DataType>,
    ) -> Result<Self, ExprError> {
        let (prefix, postfix) =
            template
                .split_once('?')
                .ok_or_else(|| ExprError::MissingPlaceholder {
                    template: template.to_string(),
                })?;
        Ok(Self {
            expr,
            template: FuncTemplate::Fixed {
                prefix: prefix.to_string(),
                postfix: postfix.to_string(),
            },
            update_column,
            aggregate,
            data_type,
        })
    }

    /// `prefix <expr> postfix` with the split already made.
    pub(super) fn wrap(
        expr: ColumnExpr,
        prefix: &str,
        postfix: &str,
        update_column: Option<Column>,
    ) -> Self {
        Self {
            expr,
            template: FuncTemplate::Fixed {
                prefix: prefix.to_string(),
                postfix: postfix.to_string(),
            },
            update_column,
            aggregate: false,
            data_type: None,
        }
    }

    /// Function from a dialect phrase with `{n}` parameters.
    ///
    /// Aggregate phrases mark the node aggregate.
    pub fn phrase(
        expr: ColumnExpr,
        phrase: Phrase,
        params: Vec<Operand>,
        param_type: DataType,
        update_column: Option<Column>,
        data_type: Option<DataType>,
    ) -> Result<Self, ExprError> {
        if !phrase.requires_placeholder() {
            return Err(ExprError::invalid_argument(
                "phrase",
                phrase,
                "not a function phrase",
            ));
        }
        for param in &params {
            param.check_for(param_type)?;
        }
        Ok(Self::from_phrase(
            expr,
            phrase,
            params,
            param_type,
            update_column,
            data_type,
        ))
    }

    /// [`FuncExpr::phrase`] for callers whose phrase and params are known
    /// valid.
    pub(super) fn from_phrase(
        expr: ColumnExpr,
        phrase: Phrase,
        params: Vec<Operand>,
        param_type: DataType,
        update_column: Option<Column>,
        data_type: Option<DataType>,
    ) -> Self {
        Self {
            expr,
            template: FuncTemplate::Phrase {
                phrase,
                params,
                param_type,
            },
            update_column,
            aggregate: phrase.is_aggregate(),
            data_type,
        }
    }

    /// Conversion to `dest` with an optional dialect-specific format.
    pub fn convert(expr: ColumnExpr, dest: DataType, format: Option<String>) -> Self {
        Self {
            expr,
            template: FuncTemplate::Convert { dest, format },
            update_column: None,
            aggregate: false,
            data_type: Some(dest),
        }
    }

    pub fn expr(&self) -> &ColumnExpr {
        &self.expr
    }

    pub fn template(&self) -> &FuncTemplate {
        &self.template
    }

    /// Display label derived from the template. Never used for SQL.
    pub fn function_name(&self) -> Option<String> {
        match &self.template {
            FuncTemplate::Fixed { prefix, postfix } => function_label(prefix, postfix),
            FuncTemplate::Phrase { phrase, .. } => phrase
                .default_template()
                .split_once('?')
                .and_then(|(prefix, postfix)| function_label(prefix, postfix)),
            FuncTemplate::Convert { .. } => Some("convert".to_string()),
        }
    }

    fn params(&self) -> &[Operand] {
        match &self.template {
            FuncTemplate::Phrase { params, .. } => params,
            _ => &[],
        }
    }
}

impl ExprNode for FuncExpr {
    fn data_type(&self) -> DataType {
        self.data_type.unwrap_or_else(|| self.expr.data_type())
    }

    fn name(&self) -> Option<String> {
        self.expr.name()
    }

    fn update_column(&self) -> Option<Column> {
        self.update_column.clone()
    }

    fn is_aggregate(&self) -> bool {
        self.aggregate || self.expr.is_aggregate() || self.params().iter().any(Operand::is_aggregate)
    }

    fn add_referenced_columns(&self, columns: &mut HashSet<Column>) {
        self.expr.add_referenced_columns(columns);
        for param in self.params() {
            param.add_referenced_columns(columns);
        }
    }

    fn render(&self, sql: &mut SqlBuilder<'_>, ctx: Context) {
        let child = ctx.without(Context::ALIAS);
        match &self.template {
            FuncTemplate::Fixed { prefix, postfix } => {
                sql.append(prefix);
                self.expr.render(sql, child);
                sql.append(postfix);
            }
            FuncTemplate::Phrase {
                phrase,
                params,
                param_type,
            } => {
                let template = sql.phrase(*phrase);
                render_template(sql, template, &self.expr, child, |sql, index, hint| {
                    match params.get(index) {
                        Some(param) => param.render_to_string(
                            sql,
                            hint.unwrap_or(*param_type),
                            child,
                            ", ",
                        ),
                        None => {
                            log::warn!("{} has no parameter {{{}}}", phrase, index);
                            sql.phrase(Phrase::Null).to_string()
                        }
                    }
                });
            }
            FuncTemplate::Convert { dest, format } => {
                let src = self.expr.data_type();
                let template = match sql.dialect() {
                    Some(dialect) => dialect.convert_phrase(*dest, src, format.as_deref()),
                    None => Generic.convert_phrase(*dest, src, format.as_deref()),
                };
                render_template(sql, &template, &self.expr, child, |sql, _, _| {
                    sql.phrase(Phrase::Null).to_string()
                });
            }
        }
    }

    fn describe(&self) -> ExprInfo {
        ExprInfo::new("func", self.data_type())
            .name(self.name())
            .function(self.function_name())
            .aggregate(self.is_aggregate())
            .child(self.expr.describe())
            .children(self.params().iter().map(Operand::describe))
    }
}

// =============================================================================
// Template helpers
// =============================================================================

/// Render `template` around `expr`.
///
/// The template is split at its first `?` before parameters are substituted,
/// so a rendered parameter containing `?` cannot move the split point.
pub(crate) fn render_template<F>(
    sql: &mut SqlBuilder<'_>,
    template: &str,
    expr: &ColumnExpr,
    ctx: Context,
    mut param: F,
) where
    F: FnMut(&SqlBuilder<'_>, usize, Option<DataType>) -> String,
{
    let (prefix, postfix) = template.split_once('?').unwrap_or_else(|| {
        log::warn!("template {:?} has no '?' placeholder", template);
        (template, "")
    });
    let prefix = substitute(prefix, |index, hint| param(sql, index, hint));
    let postfix = substitute(postfix, |index, hint| param(sql, index, hint));
    sql.append(&prefix);
    expr.render(sql, ctx);
    sql.append(&postfix);
}

/// Replace each `{n}` / `{n:TYPE}` placeholder with `arg(n, TYPE)`.
pub(crate) fn substitute<F>(template: &str, mut arg: F) -> String
where
    F: FnMut(usize, Option<DataType>) -> String,
{
    PARAM_PATTERN
        .replace_all(template, |caps: &Captures| {
            let index = caps[1].parse::<usize>().unwrap_or(usize::MAX);
            let hint = caps.get(2).and_then(|m| DataType::parse(m.as_str()));
            arg(index, hint)
        })
        .into_owned()
}

/// Leading word of the prefix, or of the postfix if the prefix has none.
pub(crate) fn function_label(prefix: &str, postfix: &str) -> Option<String> {
    fn leading_word(s: &str) -> &str {
        let s = s.trim();
        let end = s
            .find(|c: char| !(c.is_alphabetic() || c == '_'))
            .unwrap_or(s.len());
        &s[..end]
    }
    let word = match leading_word(prefix) {
        "" => leading_word(postfix),
        word => word,
    };
    (!word.is_empty()).then(|| word.to_string())
}
