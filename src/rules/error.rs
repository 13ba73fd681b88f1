//! Rule compilation errors.
//!
//! These carry no basket context; `BasketRule::compile` attaches it when
//! converting into `SorterError`.

use thiserror::Error;

use super::variables::ValueType;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("at character {pos}: {message}")]
    Syntax { pos: usize, message: String },

    #[error("unknown attribute `{0}`")]
    UnknownIdentifier(String),

    #[error("type error: {0}")]
    Type(String),

    #[error("rule must be a condition, found {0} expression")]
    NotBoolean(ValueType),
}

impl RuleError {
    pub(crate) fn syntax(pos: usize, message: impl Into<String>) -> Self {
        RuleError::Syntax {
            pos,
            message: message.into(),
        }
    }
}
