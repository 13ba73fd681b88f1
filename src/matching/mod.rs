//! Fuzzy name matching against the catalog.
//!
//! - `distance`: Levenshtein edit distance
//! - `glyphs`: optional look-alike glyph folding
//! - `matcher`: linear scan for the closest catalog name

pub mod distance;
pub mod glyphs;
pub mod matcher;

pub use distance::{levenshtein, levenshtein_chars};
pub use glyphs::{fold, fold_char};
pub use matcher::{MatchResult, NameMatcher};
