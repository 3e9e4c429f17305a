//! Errors raised while building expressions.
//!
//! Rendering itself never fails: everything that could make a node emit
//! invalid SQL is rejected here, when the node or dialect is constructed.

use super::phrase::Phrase;
use super::types::DataType;

/// Error type for expression construction and dialect setup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExprError {
    #[error("Template has no '?' placeholder for the column expression: {template:?}")]
    MissingPlaceholder { template: String },

    #[error("Invalid argument {name} = {value}: {reason}")]
    InvalidArgument {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Values of type {0} cannot be rendered as SQL literals")]
    UnsupportedType(DataType),

    #[error("Invalid template for phrase {phrase}: {template:?}")]
    InvalidPhrase { phrase: Phrase, template: String },

    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),

    #[error("Unknown data type: {0}")]
    UnknownDataType(String),
}

impl ExprError {
    pub(crate) fn invalid_argument(
        name: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        ExprError::InvalidArgument {
            name: name.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
