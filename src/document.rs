//! JSON expression documents.
//!
//! A document describes one expression tree in JSON and is the boundary
//! where untyped input becomes [`ColumnExpr`] nodes:
//!
//! ```json
//! {
//!   "kind": "alias",
//!   "alias": "TOTAL",
//!   "expr": {
//!     "kind": "phrase",
//!     "phrase": "func_sum",
//!     "expr": {
//!       "kind": "calc",
//!       "op": "*",
//!       "expr": { "kind": "column", "name": "PRICE", "data_type": "decimal" },
//!       "value": { "kind": "column", "name": "QTY", "data_type": "integer" }
//!     }
//!   }
//! }
//! ```
//!
//! Operands (`value`, `params`, decode `when`/`then`/`else`) are either a
//! nested expression object, a JSON scalar, or an array of operands.

use serde::{Deserialize, Serialize};

use crate::sql::{
    count_all, CalcExpr, CalcOp, Column, ColumnExpr, ConcatExpr, ConcatFuncExpr, DataType,
    DecodeExpr, ExprError, FuncExExpr, FuncExpr, Operand, Phrase, Value, ValueExpr,
};

/// Error type for expression documents.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Invalid expression document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid expression: {0}")]
    Expr(#[from] ExprError),

    #[error("Unsupported constant: {0}")]
    InvalidValue(String),
}

/// One expression node.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExprDoc {
    Column {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        table: Option<String>,
        #[serde(default)]
        data_type: DataType,
    },
    Value {
        value: serde_json::Value,
        #[serde(default)]
        data_type: DataType,
    },
    /// The database's current date or time.
    Sysdate {
        #[serde(default = "default_sysdate_type")]
        data_type: DataType,
    },
    Calc {
        expr: Box<ExprDoc>,
        op: CalcOp,
        value: OperandDoc,
    },
    Concat {
        expr: Box<ExprDoc>,
        value: OperandDoc,
    },
    /// `concat(expr, others..)`, optionally joined by `separator`.
    ConcatFunc {
        expr: Box<ExprDoc>,
        others: Vec<ExprDoc>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        separator: Option<String>,
    },
    /// `count(*)`.
    CountAll,
    /// Caller-supplied template with one `?`.
    Func {
        expr: Box<ExprDoc>,
        template: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data_type: Option<DataType>,
        #[serde(default)]
        aggregate: bool,
    },
    /// Dialect phrase such as `func_upper` or `func_substring_ex`.
    ///
    /// Without `param_type`, constant parameters render by their own type.
    Phrase {
        expr: Box<ExprDoc>,
        phrase: Phrase,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        params: Vec<OperandDoc>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        param_type: Option<DataType>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data_type: Option<DataType>,
    },
    FuncEx {
        prefix: String,
        expr: Box<ExprDoc>,
        #[serde(default)]
        middle: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        other: Option<Box<ExprDoc>>,
        #[serde(default)]
        postfix: String,
    },
    Decode {
        expr: Box<ExprDoc>,
        #[serde(default)]
        cases: Vec<DecodeCase>,
        #[serde(default, rename = "else", skip_serializing_if = "Option::is_none")]
        otherwise: Option<OperandDoc>,
        data_type: DataType,
    },
    Convert {
        expr: Box<ExprDoc>,
        data_type: DataType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },
    Parenthesis {
        expr: Box<ExprDoc>,
    },
    Alias {
        expr: Box<ExprDoc>,
        alias: String,
    },
}

/// One decode branch.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DecodeCase {
    pub when: OperandDoc,
    pub then: OperandDoc,
}

/// Right-hand operand.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OperandDoc {
    Expr(Box<ExprDoc>),
    List(Vec<OperandDoc>),
    Value(serde_json::Value),
}

fn default_sysdate_type() -> DataType {
    DataType::DateTime
}

impl ExprDoc {
    /// Parse a document.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the expression tree.
    pub fn build(&self) -> Result<ColumnExpr, DocumentError> {
        let expr: ColumnExpr = match self {
            ExprDoc::Column {
                name,
                table,
                data_type,
            } => match table {
                Some(table) => Column::qualified(table, name, *data_type).into(),
                None => Column::new(name, *data_type).into(),
            },
            ExprDoc::Value { value, data_type } => {
                ValueExpr::new(json_value(value, *data_type)?, *data_type)?.into()
            }
            ExprDoc::Sysdate { data_type } => ValueExpr::new(Value::SysDate, *data_type)?.into(),
            ExprDoc::Calc { expr, op, value } => {
                CalcExpr::new(expr.build()?, *op, value.build()?)?.into()
            }
            ExprDoc::Concat { expr, value } => ConcatExpr::new(expr.build()?, value.build()?).into(),
            ExprDoc::ConcatFunc {
                expr,
                others,
                separator,
            } => {
                let others = others
                    .iter()
                    .map(ExprDoc::build)
                    .collect::<Result<Vec<_>, _>>()?;
                ConcatFuncExpr::new(expr.build()?, separator.clone(), others).into()
            }
            ExprDoc::CountAll => count_all(),
            ExprDoc::Func {
                expr,
                template,
                data_type,
                aggregate,
            } => FuncExpr::new(expr.build()?, template, None, *aggregate, *data_type)?.into(),
            ExprDoc::Phrase {
                expr,
                phrase,
                params,
                param_type,
                data_type,
            } => {
                let expr = expr.build()?;
                let param_type = param_type.unwrap_or(DataType::Unknown);
                let params = params
                    .iter()
                    .map(OperandDoc::build)
                    .collect::<Result<Vec<_>, _>>()?;
                FuncExpr::phrase(expr, *phrase, params, param_type, None, *data_type)?.into()
            }
            ExprDoc::FuncEx {
                prefix,
                expr,
                middle,
                other,
                postfix,
            } => {
                let expr = expr.build()?;
                match other {
                    Some(other) => FuncExExpr::binary(
                        prefix.as_str(),
                        expr,
                        middle.as_str(),
                        other.build()?,
                        postfix.as_str(),
                    )
                    .into(),
                    None => FuncExExpr::unary(prefix.as_str(), expr, postfix.as_str(), None).into(),
                }
            }
            ExprDoc::Decode {
                expr,
                cases,
                otherwise,
                data_type,
            } => {
                let pairs = cases
                    .iter()
                    .map(|case| -> Result<(Operand, Operand), DocumentError> {
                        Ok((case.when.build()?, case.then.build()?))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                let otherwise = otherwise.as_ref().map(OperandDoc::build).transpose()?;
                DecodeExpr::new(expr.build()?, pairs, otherwise, *data_type)?.into()
            }
            ExprDoc::Convert {
                expr,
                data_type,
                format,
            } => expr.build()?.convert_to(*data_type, format.as_deref()),
            ExprDoc::Parenthesis { expr } => expr.build()?.parenthesis(),
            ExprDoc::Alias { expr, alias } => expr.build()?.alias(alias),
        };
        Ok(expr)
    }
}

impl OperandDoc {
    pub fn build(&self) -> Result<Operand, DocumentError> {
        match self {
            OperandDoc::Expr(doc) => Ok(Operand::Expr(doc.build()?)),
            OperandDoc::List(items) => Ok(Operand::List(
                items
                    .iter()
                    .map(OperandDoc::build)
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            OperandDoc::Value(value) => Ok(Operand::Value(json_value(value, DataType::Unknown)?)),
        }
    }
}

/// Parse and build in one step.
pub fn parse_document(json: &str) -> Result<ColumnExpr, DocumentError> {
    ExprDoc::from_json(json)?.build()
}

/// Convert a JSON scalar. Decimal-typed strings keep their precision.
fn json_value(value: &serde_json::Value, data_type: DataType) -> Result<Value, DocumentError> {
    match value {
        serde_json::Value::Null => Ok(Value::Null),
        serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_json::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Ok(Value::Int(i)),
            (None, Some(f)) => Ok(Value::Float(f)),
            (None, None) => Err(DocumentError::InvalidValue(n.to_string())),
        },
        serde_json::Value::String(s) if data_type == DataType::Decimal => Ok(Value::decimal(s)?),
        serde_json::Value::String(s) => Ok(Value::Text(s.clone())),
        other => Err(DocumentError::InvalidValue(other.to_string())),
    }
}
