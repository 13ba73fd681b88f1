//! # card-sorter
//!
//! Card identification and basket routing for a mechanical card sorter.
//!
//! An ejector throws one card out of a stack, a camera and OCR engine read
//! its title, and this crate decides which of four baskets the card goes to:
//!
//! 1. Pick the most name-like line out of the raw OCR text.
//! 2. Find the closest catalog name by edit distance.
//! 3. Look up that card's attributes.
//! 4. Evaluate the three basket rules in order; the first that holds wins,
//!    otherwise the card goes to basket 3.
//!
//! ## Design Principles
//!
//! 1. **Sandboxed rules**: Basket rules are a small typed expression
//!    language compiled at load time. They can read a fixed set of card
//!    attributes and nothing else.
//!
//! 2. **Deterministic**: Matching scans the catalog in load order and keeps
//!    the first best entry; the same text always routes the same way.
//!
//! 3. **Configuration Over Globals**: Rules, catalog location, failure
//!    policy and logging live in `SorterConfig` and are passed in.
//!
//! ## Modules
//!
//! - `core`: Baskets, configuration, errors, RNG
//! - `cards`: Card attributes and the catalog
//! - `ocr`: OCR text normalization and text sources
//! - `matching`: Levenshtein name matching
//! - `rules`: Rule language and basket rules
//! - `routing`: Coordinator, actuator trait, sort session
//! - `simulate`: Synthetic OCR noise for accuracy estimates
//! - `logging`: Console and log file setup

pub mod cards;
pub mod core;
pub mod logging;
pub mod matching;
pub mod ocr;
pub mod routing;
pub mod rules;
pub mod simulate;

// Re-export commonly used types
pub use crate::core::{
    Basket, CatalogConfig, LoggingConfig, MatcherConfig, Result, RulesConfig, SessionConfig,
    SimRng, SorterConfig, SorterError,
};

pub use crate::cards::{CardAttributes, Catalog, CatalogEntry, Color, Colors, Rarity};

pub use crate::ocr::{normalize, OcrCandidate, TextSource};

pub use crate::matching::{levenshtein, MatchResult, NameMatcher};

pub use crate::rules::{BasketRule, BasketRules};

pub use crate::routing::{
    Actuator, DryRunActuator, RoutingCoordinator, RoutingDecision, SessionSummary, SortSession,
};

pub use crate::simulate::{evaluate_accuracy, AccuracyReport, OcrNoise};
