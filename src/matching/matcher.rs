//! Closest catalog name for an OCR candidate.
//!
//! A linear scan over the catalog in load order. The first entry with the
//! smallest edit distance wins, so results are reproducible for a given
//! catalog file. There is no confidence threshold: the best guess is always
//! returned, and its distance tells the caller how good it is.

use smallvec::SmallVec;
use tracing::trace;

use super::distance::levenshtein_chars;
use super::glyphs::fold_char;
use crate::cards::{Catalog, CatalogEntry};
use crate::core::config::MatcherConfig;
use crate::core::error::{Result, SorterError};

type Chars = SmallVec<[char; 32]>;

/// The best catalog match for one candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchResult<'c> {
    /// The matched catalog entry.
    pub entry: &'c CatalogEntry,

    /// Edit distance between candidate and entry name.
    pub distance: usize,

    /// Load-order position of the entry in the catalog.
    pub position: usize,
}

impl<'c> MatchResult<'c> {
    /// Name of the matched entry.
    #[must_use]
    pub fn matched_name(&self) -> &'c str {
        &self.entry.name
    }

    /// Did the candidate equal the name exactly (after folding, if enabled)?
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.distance == 0
    }
}

/// Edit-distance matcher over a catalog.
///
/// ## Example
///
/// ```
/// use card_sorter::cards::{CardAttributes, Catalog, CatalogEntry};
/// use card_sorter::matching::NameMatcher;
///
/// let catalog = Catalog::from_entries(vec![
///     CatalogEntry::new("Island", CardAttributes::new().land()),
///     CatalogEntry::new("Swamp", CardAttributes::new().land()),
/// ])
/// .unwrap();
///
/// let result = NameMatcher::new().best_match("Ilsand", &catalog).unwrap();
/// assert_eq!(result.matched_name(), "Island");
/// assert_eq!(result.distance, 2);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NameMatcher {
    fold_glyphs: bool,
}

impl NameMatcher {
    /// Matcher comparing names exactly as read.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Matcher configured from `MatcherConfig`.
    #[must_use]
    pub fn from_config(config: &MatcherConfig) -> Self {
        Self::new().with_fold_glyphs(config.fold_glyphs)
    }

    /// Fold look-alike glyphs on both sides before comparing.
    #[must_use]
    pub fn with_fold_glyphs(mut self, fold: bool) -> Self {
        self.fold_glyphs = fold;
        self
    }

    /// Is glyph folding enabled?
    #[must_use]
    pub fn folds_glyphs(&self) -> bool {
        self.fold_glyphs
    }

    fn chars(&self, s: &str, out: &mut Chars) {
        out.clear();
        if self.fold_glyphs {
            out.extend(s.chars().map(fold_char));
        } else {
            out.extend(s.chars());
        }
    }

    /// Distance between two names under this matcher's folding policy.
    #[must_use]
    pub fn distance(&self, a: &str, b: &str) -> usize {
        let mut ca = Chars::new();
        let mut cb = Chars::new();
        self.chars(a, &mut ca);
        self.chars(b, &mut cb);
        levenshtein_chars(&ca, &cb)
    }

    /// Find the closest catalog entry to `candidate`.
    ///
    /// Fails with `EmptyCatalog` when there is nothing to compare against.
    pub fn best_match<'c>(&self, candidate: &str, catalog: &'c Catalog) -> Result<MatchResult<'c>> {
        let mut wanted = Chars::new();
        self.chars(candidate, &mut wanted);
        let mut name = Chars::new();

        let mut best: Option<MatchResult<'c>> = None;
        for (position, entry) in catalog.iter().enumerate() {
            self.chars(&entry.name, &mut name);

            if let Some(b) = &best {
                // The length difference bounds the distance from below; such
                // an entry can never be strictly closer.
                if name.len().abs_diff(wanted.len()) >= b.distance {
                    continue;
                }
            }

            let distance = levenshtein_chars(&name, &wanted);
            if best.as_ref().map_or(true, |b| distance < b.distance) {
                trace!(name = %entry.name, distance, "new best match");
                best = Some(MatchResult {
                    entry,
                    distance,
                    position,
                });
                if distance == 0 {
                    break;
                }
            }
        }

        best.ok_or(SorterError::EmptyCatalog)
    }
}
