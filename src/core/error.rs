//! Error type shared by every stage of the sorter.
//!
//! ## Taxonomy
//!
//! - Per-card failures: `NoCandidate`, `EmptyCatalog`. They abort the
//!   routing decision for one card; the sort session decides what to do
//!   with the card.
//! - Configuration failures: `InvalidRule`, `UnknownAttribute`. Raised while
//!   rules are compiled, before the first card is processed.
//! - Ambient failures: I/O, parsing of catalog and config files, actuator
//!   faults.

use thiserror::Error;

use super::basket::Basket;

#[derive(Error, Debug)]
pub enum SorterError {
    #[error("no usable line in OCR text")]
    NoCandidate,

    #[error("catalog is empty")]
    EmptyCatalog,

    #[error("invalid rule for {basket} ({rule:?}): {message}")]
    InvalidRule {
        basket: Basket,
        rule: String,
        message: String,
    },

    #[error("unknown attribute `{name}` in rule for {basket}")]
    UnknownAttribute { basket: Basket, name: String },

    #[error("matched card {0:?} has no catalog entry")]
    MissingEntry(String),

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("actuator error: {0}")]
    Actuator(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("catalog snapshot failed: {0}")]
    Snapshot(#[from] bincode::Error),
}

impl SorterError {
    /// True for failures that only affect the card being routed.
    #[must_use]
    pub fn is_card_failure(&self) -> bool {
        matches!(self, SorterError::NoCandidate | SorterError::EmptyCatalog)
    }

    /// True for rule problems detected while loading configuration.
    #[must_use]
    pub fn is_rule_error(&self) -> bool {
        matches!(
            self,
            SorterError::InvalidRule { .. } | SorterError::UnknownAttribute { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SorterError>;
