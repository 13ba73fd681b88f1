//! Matcher accuracy under synthetic OCR noise.

use tracing::{debug, info};

use super::noise::OcrNoise;
use crate::cards::Catalog;
use crate::core::{Result, SimRng, SorterError};
use crate::matching::NameMatcher;
use crate::ocr::normalize;

/// Result of an accuracy run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccuracyReport {
    pub samples: usize,
    /// Samples whose best match was the card the text was rendered from.
    pub correct: usize,
    /// Samples the normalizer rejected.
    pub no_candidate: usize,
    /// Sum of match distances over matched samples.
    pub total_distance: usize,
}

impl AccuracyReport {
    /// Fraction of samples identified correctly.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.correct as f64 / self.samples as f64
        }
    }

    /// Mean distance of matched samples.
    #[must_use]
    pub fn mean_distance(&self) -> f64 {
        let matched = self.samples - self.no_candidate;
        if matched == 0 {
            0.0
        } else {
            self.total_distance as f64 / matched as f64
        }
    }
}

impl std::fmt::Display for AccuracyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "samples={} correct={} ({:.1}%) no_candidate={} mean_distance={:.2}",
            self.samples,
            self.correct,
            self.accuracy() * 100.0,
            self.no_candidate,
            self.mean_distance()
        )
    }
}

/// Render `samples` random catalog names through `noise` and match them back.
///
/// Deterministic for a given catalog, noise, matcher and seed.
pub fn evaluate_accuracy(
    catalog: &Catalog,
    matcher: &NameMatcher,
    noise: &OcrNoise,
    samples: usize,
    seed: u64,
) -> Result<AccuracyReport> {
    if catalog.is_empty() {
        return Err(SorterError::EmptyCatalog);
    }

    let root = SimRng::new(seed);
    let mut picker = root.for_context("sample");
    let mut corrupter = root.for_context("corrupt");

    let mut report = AccuracyReport {
        samples,
        ..AccuracyReport::default()
    };

    for i in 0..samples {
        let position = picker.gen_range_usize(0..catalog.len());
        let Some(entry) = catalog.entry_at(position) else {
            continue;
        };

        let mut rng = corrupter.fork();
        let raw = noise.render(&entry.name, &mut rng);

        let candidate = match normalize(&raw) {
            Ok(c) => c,
            Err(SorterError::NoCandidate) => {
                report.no_candidate += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        let result = matcher.best_match(&candidate.text(), catalog)?;
        report.total_distance += result.distance;
        if result.matched_name() == entry.name {
            report.correct += 1;
        } else {
            debug!(
                "sample {}: {:?} read as {:?}, matched {:?}",
                i,
                entry.name,
                candidate.text(),
                result.matched_name()
            );
        }
    }

    info!("accuracy seed={} fold_glyphs={}: {}", seed, matcher.folds_glyphs(), report);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardAttributes, CatalogEntry};

    fn catalog() -> Catalog {
        Catalog::from_entries(
            ["Lightning Bolt", "Counterspell", "Llanowar Elves", "Dark Ritual", "Brainstorm"]
                .into_iter()
                .map(|n| CatalogEntry::new(n, CardAttributes::new())),
        )
        .unwrap()
    }

    #[test]
    fn test_clean_text_is_always_correct() {
        let report =
            evaluate_accuracy(&catalog(), &NameMatcher::new(), &OcrNoise::none(), 50, 7).unwrap();
        assert_eq!(report.samples, 50);
        assert_eq!(report.correct, 50);
        assert_eq!(report.no_candidate, 0);
        assert_eq!(report.mean_distance(), 0.0);
        assert_eq!(report.accuracy(), 1.0);
    }

    #[test]
    fn test_deterministic_per_seed() {
        let noise = OcrNoise::default().scaled(3.0);
        let matcher = NameMatcher::new();
        let a = evaluate_accuracy(&catalog(), &matcher, &noise, 40, 11).unwrap();
        let b = evaluate_accuracy(&catalog(), &matcher, &noise, 40, 11).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_catalog() {
        let result = evaluate_accuracy(&Catalog::new(), &NameMatcher::new(), &OcrNoise::none(), 1, 0);
        assert!(matches!(result, Err(SorterError::EmptyCatalog)));
    }

    #[test]
    fn test_zero_samples() {
        let report =
            evaluate_accuracy(&catalog(), &NameMatcher::new(), &OcrNoise::default(), 0, 1).unwrap();
        assert_eq!(report.accuracy(), 0.0);
        assert_eq!(report.mean_distance(), 0.0);
    }
}
