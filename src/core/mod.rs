//! Core types: baskets, configuration, errors, RNG.
//!
//! These are shared by every other module. Runtime settings are carried in
//! `SorterConfig` and passed to constructors rather than held globally.

pub mod basket;
pub mod config;
pub mod error;
pub mod rng;

pub use basket::Basket;
pub use config::{
    CatalogConfig, LoggingConfig, MatcherConfig, RulesConfig, SessionConfig, SorterConfig,
};
pub use error::{Result, SorterError};
pub use rng::SimRng;
