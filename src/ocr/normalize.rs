//! Raw OCR text -> the line most likely to be the card name.
//!
//! The OCR engine reads the whole title strip of a card, so its output
//! mixes the name with mana symbols, frame edges and stray glyphs. The
//! name is usually the line made of the longest words:
//!
//! 1. Remove noise glyphs (em dash, `~`, `@`); `_` and `.` become spaces.
//! 2. Split into lines, then into whitespace-delimited tokens.
//! 3. Drop tokens of at most two characters, then lines left empty.
//! 4. Score each line by its mean token length.
//! 5. Keep the best line; on equal scores the earliest line wins.

use smallvec::SmallVec;

use crate::core::error::{Result, SorterError};

/// Tokens at or below this length (in characters) are treated as noise.
pub const MAX_NOISE_TOKEN_LEN: usize = 2;

/// Glyphs removed outright.
const REMOVED: [char; 3] = ['\u{2014}', '~', '@'];

/// Glyphs that separate words.
const SEPARATORS: [char; 2] = ['_', '.'];

/// One cleaned OCR line.
#[derive(Clone, Debug, PartialEq)]
pub struct OcrCandidate {
    /// Tokens longer than `MAX_NOISE_TOKEN_LEN`, in reading order.
    pub tokens: SmallVec<[String; 4]>,

    /// Zero-based index of the source line in the OCR text.
    pub line: usize,

    /// Mean token length in characters.
    pub score: f64,
}

impl OcrCandidate {
    fn from_tokens(line: usize, tokens: SmallVec<[String; 4]>) -> Option<Self> {
        if tokens.is_empty() {
            return None;
        }
        let total: usize = tokens.iter().map(|t| t.chars().count()).sum();
        let score = total as f64 / tokens.len() as f64;
        Some(Self { tokens, line, score })
    }

    /// The candidate name: tokens joined by single spaces.
    #[must_use]
    pub fn text(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Apply the glyph-level cleanup.
#[must_use]
pub fn clean_glyphs(raw: &str) -> String {
    raw.chars()
        .filter(|c| !REMOVED.contains(c))
        .map(|c| if SEPARATORS.contains(&c) { ' ' } else { c })
        .collect()
}

/// Every line that survives token filtering, in text order.
#[must_use]
pub fn candidates(raw: &str) -> Vec<OcrCandidate> {
    clean_glyphs(raw)
        .split('\n')
        .enumerate()
        .filter_map(|(line, text)| {
            let tokens = text
                .split_whitespace()
                .filter(|t| t.chars().count() > MAX_NOISE_TOKEN_LEN)
                .map(str::to_string)
                .collect();
            OcrCandidate::from_tokens(line, tokens)
        })
        .collect()
}

/// Pick the first of the highest-scoring candidates.
#[must_use]
pub fn best_candidate(candidates: &[OcrCandidate]) -> Option<&OcrCandidate> {
    let mut best: Option<&OcrCandidate> = None;
    for candidate in candidates {
        // Strictly greater: ties keep the earlier line.
        if best.map_or(true, |b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }
    best
}

/// Normalize raw OCR text into the most name-like line.
///
/// Fails with `NoCandidate` when no line has a token longer than two
/// characters.
pub fn normalize(raw: &str) -> Result<OcrCandidate> {
    let all = candidates(raw);
    best_candidate(&all).cloned().ok_or(SorterError::NoCandidate)
}
