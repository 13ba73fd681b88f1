//! One card's routing decision: OCR text in, basket out.
//!
//! ```text
//! Normalizing -> Matching -> AttributeLookup -> RuleEvaluating -> Done
//! ```
//!
//! Any stage can fail; the error names the stage in the log and is returned
//! to the caller, which decides what happens to the physical card.

use tracing::{debug, info, warn};

use crate::cards::{Catalog, CatalogEntry};
use crate::core::{Basket, Result, SorterConfig, SorterError};
use crate::matching::{MatchResult, NameMatcher};
use crate::ocr::{best_candidate, candidates, OcrCandidate};
use crate::rules::BasketRules;

/// Pipeline stage, used in log records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoutingStage {
    Normalizing,
    Matching,
    AttributeLookup,
    RuleEvaluating,
    Done,
}

impl std::fmt::Display for RoutingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RoutingStage::Normalizing => "normalizing",
            RoutingStage::Matching => "matching",
            RoutingStage::AttributeLookup => "attribute lookup",
            RoutingStage::RuleEvaluating => "rule evaluating",
            RoutingStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// The outcome of routing one card.
#[derive(Clone, Debug)]
pub struct RoutingDecision<'c> {
    /// The OCR line chosen as the card name.
    pub candidate: OcrCandidate,

    /// Closest catalog entry.
    pub matched: MatchResult<'c>,

    /// Destination basket.
    pub basket: Basket,

    /// Index of the rule that fired, `None` when the card fell through.
    pub rule: Option<usize>,
}

impl<'c> RoutingDecision<'c> {
    /// The matched catalog entry.
    #[must_use]
    pub fn entry(&self) -> &'c CatalogEntry {
        self.matched.entry
    }
}

/// Routes OCR text to a basket using a catalog and compiled rules.
///
/// Catalog and rules are read-only after construction, so a coordinator
/// can be shared freely between threads.
#[derive(Clone, Debug)]
pub struct RoutingCoordinator {
    catalog: Catalog,
    rules: BasketRules,
    matcher: NameMatcher,
    max_distance: Option<usize>,
}

impl RoutingCoordinator {
    /// Create a coordinator from its parts.
    pub fn new(catalog: Catalog, rules: BasketRules, matcher: NameMatcher) -> Self {
        Self {
            catalog,
            rules,
            matcher,
            max_distance: None,
        }
    }

    /// Compile the rules from `config` and attach an already loaded catalog.
    ///
    /// Rule errors surface here, before any card is processed.
    pub fn from_config(config: &SorterConfig, catalog: Catalog) -> Result<Self> {
        let rules = BasketRules::from_config(&config.rules)?;
        let matcher = NameMatcher::from_config(&config.matcher);
        Ok(Self::new(catalog, rules, matcher).with_max_distance(config.matcher.max_distance))
    }

    /// Warn when the best match is further away than `max_distance`.
    #[must_use]
    pub fn with_max_distance(mut self, max_distance: Option<usize>) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn rules(&self) -> &BasketRules {
        &self.rules
    }

    pub fn matcher(&self) -> &NameMatcher {
        &self.matcher
    }

    /// Route one card's raw OCR text.
    pub fn route(&self, raw: &str) -> Result<RoutingDecision<'_>> {
        let lines = candidates(raw);
        for c in &lines {
            info!("ocr line {}: score={:.3} text={:?}", c.line, c.score, c.text());
        }
        let candidate = best_candidate(&lines)
            .cloned()
            .ok_or(SorterError::NoCandidate)
            .inspect_err(|e| warn!("routing failed at {}: {}", RoutingStage::Normalizing, e))?;
        let text = candidate.text();

        let matched = self
            .matcher
            .best_match(&text, &self.catalog)
            .inspect_err(|e| warn!("routing failed at {}: {}", RoutingStage::Matching, e))?;

        let entry = self.catalog.get(matched.matched_name()).ok_or_else(|| {
            let err = SorterError::MissingEntry(matched.matched_name().to_string());
            warn!("routing failed at {}: {}", RoutingStage::AttributeLookup, err);
            err
        })?;

        debug!("{} for {:?}", RoutingStage::RuleEvaluating, entry.name);
        let (basket, rule) = self.rules.classify(&entry.attributes);

        if let Some(max) = self.max_distance {
            if matched.distance > max {
                warn!(
                    "low confidence match: candidate={:?} matched={:?} distance={} max={}",
                    text,
                    matched.matched_name(),
                    matched.distance,
                    max
                );
            }
        }

        info!(
            "candidate={:?} distance={} matched={:?} basket={} rule={}",
            text,
            matched.distance,
            matched.matched_name(),
            basket.index(),
            rule.map_or_else(|| "fallback".to_string(), |i| i.to_string())
        );

        Ok(RoutingDecision {
            candidate,
            matched,
            basket,
            rule,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardAttributes, CatalogEntry, Color, Rarity};

    fn test_catalog() -> Catalog {
        Catalog::from_entries(vec![
            CatalogEntry::new(
                "Grizzly Bears",
                CardAttributes::new().creature().with_cost(2).with_color(Color::Green),
            ),
            CatalogEntry::new(
                "Lightning Bolt",
                CardAttributes::new().instant().with_cost(1).with_color(Color::Red),
            ),
            CatalogEntry::new("Island", CardAttributes::new().land()),
            CatalogEntry::new(
                "Jace Beleren",
                CardAttributes::new()
                    .planeswalker()
                    .with_cost(3)
                    .with_rarity(Rarity::Mythic)
                    .with_color(Color::Blue),
            ),
        ])
        .unwrap()
    }

    fn coordinator(b0: &str, b1: &str, b2: &str) -> RoutingCoordinator {
        let rules = BasketRules::compile(b0, b1, b2).unwrap();
        RoutingCoordinator::new(test_catalog(), rules, NameMatcher::new())
    }

    #[test]
    fn test_route_exact_name() {
        let coord = coordinator("is_creature", "is_instant or is_sorcery", "false");
        let decision = coord.route("Lightning Bolt\n__\n@@").unwrap();

        assert_eq!(decision.candidate.text(), "Lightning Bolt");
        assert_eq!(decision.matched.matched_name(), "Lightning Bolt");
        assert_eq!(decision.matched.distance, 0);
        assert_eq!(decision.basket, Basket::new(1));
        assert_eq!(decision.rule, Some(1));
    }

    #[test]
    fn test_route_noisy_name() {
        let coord = coordinator("is_creature", "is_instant", "is_land");
        let decision = coord.route("{G}\nGrizzIy Bears\n2/2").unwrap();

        assert_eq!(decision.entry().name, "Grizzly Bears");
        assert_eq!(decision.matched.distance, 1);
        assert_eq!(decision.basket, Basket::new(0));
    }

    #[test]
    fn test_route_fallback() {
        let coord = coordinator("is_creature", "is_instant", "is_land");
        let decision = coord.route("Jace Beleren").unwrap();

        assert_eq!(decision.basket, Basket::FALLBACK);
        assert_eq!(decision.rule, None);
    }

    #[test]
    fn test_route_no_candidate() {
        let coord = coordinator("true", "true", "true");
        assert!(matches!(coord.route("__\n@@\nab"), Err(SorterError::NoCandidate)));
        assert!(matches!(coord.route(""), Err(SorterError::NoCandidate)));
    }

    #[test]
    fn test_route_empty_catalog() {
        let rules = BasketRules::compile("true", "true", "true").unwrap();
        let coord = RoutingCoordinator::new(Catalog::new(), rules, NameMatcher::new());
        assert!(matches!(coord.route("Island"), Err(SorterError::EmptyCatalog)));
    }

    #[test]
    fn test_from_config_rejects_bad_rule() {
        let config = SorterConfig::default()
            .with_rules(crate::core::RulesConfig::new("tc", "ts or", "tl"));
        let err = RoutingCoordinator::from_config(&config, test_catalog()).unwrap_err();
        assert!(err.is_rule_error());
    }

    #[test]
    fn test_max_distance_is_not_an_error() {
        let coord = coordinator("is_creature", "is_instant", "is_land")
            .with_max_distance(Some(0));
        let decision = coord.route("Islxnd").unwrap();
        assert_eq!(decision.matched.matched_name(), "Island");
        assert_eq!(decision.basket, Basket::new(2));
    }

    /// Collects formatted log output in memory.
    #[derive(Clone, Default)]
    struct LogBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_line_scores_logged_at_info() {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let coord = coordinator("is_creature", "is_instant", "is_land");
        tracing::subscriber::with_default(subscriber, || {
            coord.route("Island\n{U}").unwrap();
        });

        let log = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(log.contains("ocr line 0: score=6.000 text=\"Island\""), "{}", log);
        assert!(log.contains("candidate="), "{}", log);
    }
}
