//! OCR noise simulation for estimating matcher accuracy offline.
//!
//! All randomness comes from `SimRng`, so a run is reproducible from its
//! seed.

pub mod accuracy;
pub mod noise;

pub use accuracy::{evaluate_accuracy, AccuracyReport};
pub use noise::OcrNoise;
