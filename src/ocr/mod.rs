//! OCR text handling.
//!
//! - `normalize`: picks the card name line out of raw OCR output
//! - `source`: the `TextSource` collaborator that produces that output

pub mod normalize;
pub mod source;

pub use normalize::{best_candidate, candidates, normalize, OcrCandidate};
pub use source::{DirectoryTextSource, FileTextSource, QueuedTextSource, TextSource};
