//! The sort loop: one card at a time, eject -> capture -> route -> sort.
//!
//! ## Failure policy
//!
//! When a card cannot be identified (`NoCandidate`, `EmptyCatalog`) the
//! session captures it again up to `capture_retries` times. If it still
//! fails, the card is sorted into `defer_basket` so the machine keeps
//! moving. Any other error stops the session.
//!
//! The session ends when the text source runs dry or `max_cards` cards have
//! been sorted.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use super::actuator::Actuator;
use super::coordinator::RoutingCoordinator;
use crate::core::{Basket, Result, SessionConfig};
use crate::ocr::TextSource;

/// Time spent in each stage for one card.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StageTimings {
    /// Camera capture and OCR, summed over attempts.
    pub capture: Duration,
    /// Normalize, match and rules, summed over attempts.
    pub route: Duration,
}

/// What happened to one card.
#[derive(Clone, Debug, PartialEq)]
pub enum SortOutcome {
    /// Identified and routed by the rules.
    Routed {
        matched_name: String,
        distance: usize,
        rule: Option<usize>,
    },
    /// Could not be identified; sent to the defer basket.
    Deferred { reason: String },
}

/// Record of one sorted card.
#[derive(Clone, Debug, PartialEq)]
pub struct SortRecord {
    /// 1-based card number within the session.
    pub card: usize,
    /// Capture attempts used.
    pub attempts: u32,
    pub basket: Basket,
    pub outcome: SortOutcome,
    pub timings: StageTimings,
}

impl SortRecord {
    pub fn is_deferred(&self) -> bool {
        matches!(self.outcome, SortOutcome::Deferred { .. })
    }
}

/// Totals for a finished session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionSummary {
    pub records: Vec<SortRecord>,
}

impl SessionSummary {
    /// Cards sorted.
    pub fn sorted(&self) -> usize {
        self.records.len()
    }

    /// Cards sent to the defer basket.
    pub fn deferred(&self) -> usize {
        self.records.iter().filter(|r| r.is_deferred()).count()
    }

    /// Cards per basket, indexed by basket number.
    pub fn per_basket(&self) -> [usize; Basket::COUNT] {
        let mut counts = [0; Basket::COUNT];
        for record in &self.records {
            counts[usize::from(record.basket.index())] += 1;
        }
        counts
    }
}

/// Drives an actuator and a text source through the routing pipeline.
pub struct SortSession<'a, A, S> {
    coordinator: &'a RoutingCoordinator,
    actuator: A,
    source: S,
    capture_retries: u32,
    defer_basket: Basket,
    max_cards: Option<usize>,
}

impl<'a, A: Actuator, S: TextSource> SortSession<'a, A, S> {
    /// Session with the default failure policy.
    pub fn new(coordinator: &'a RoutingCoordinator, actuator: A, source: S) -> Self {
        let defaults = SessionConfig::default();
        Self {
            coordinator,
            actuator,
            source,
            capture_retries: defaults.capture_retries,
            defer_basket: Basket::FALLBACK,
            max_cards: None,
        }
    }

    /// Session with the failure policy from configuration.
    pub fn from_config(
        coordinator: &'a RoutingCoordinator,
        actuator: A,
        source: S,
        config: &SessionConfig,
    ) -> Result<Self> {
        Ok(Self::new(coordinator, actuator, source)
            .with_capture_retries(config.capture_retries)
            .with_defer_basket(config.defer_basket()?))
    }

    #[must_use]
    pub fn with_capture_retries(mut self, retries: u32) -> Self {
        self.capture_retries = retries;
        self
    }

    #[must_use]
    pub fn with_defer_basket(mut self, basket: Basket) -> Self {
        self.defer_basket = basket;
        self
    }

    /// Stop after `max` cards even if the source has more.
    #[must_use]
    pub fn with_max_cards(mut self, max: Option<usize>) -> Self {
        self.max_cards = max;
        self
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Give back the actuator once the session is over.
    pub fn into_actuator(self) -> A {
        self.actuator
    }

    /// Sort cards until the source is exhausted.
    pub fn run(&mut self) -> Result<SessionSummary> {
        let mut summary = SessionSummary::default();

        while self.max_cards.map_or(true, |max| summary.sorted() < max) {
            let card = summary.sorted() + 1;
            match self.sort_one(card)? {
                Some(record) => summary.records.push(record),
                None => break,
            }
        }

        let counts = summary.per_basket();
        info!(
            "session done: sorted={} deferred={} baskets={:?}",
            summary.sorted(),
            summary.deferred(),
            counts
        );
        Ok(summary)
    }

    /// Eject, identify and sort one card. `None` means the stack was empty.
    fn sort_one(&mut self, card: usize) -> Result<Option<SortRecord>> {
        self.actuator.eject()?;

        let mut timings = StageTimings::default();
        let mut attempts = 0;
        let mut last_failure = String::new();

        while attempts <= self.capture_retries {
            attempts += 1;

            let start = Instant::now();
            let captured = if attempts == 1 {
                self.source.capture()?
            } else {
                self.source.recapture()?
            };
            timings.capture += start.elapsed();

            let Some(raw) = captured else {
                if attempts == 1 {
                    info!("text source exhausted after {} cards", card - 1);
                    return Ok(None);
                }
                last_failure = "text source exhausted during retry".to_string();
                break;
            };

            let start = Instant::now();
            let routed = self.coordinator.route(&raw);
            timings.route += start.elapsed();

            match routed {
                Ok(decision) => {
                    self.actuator.sort_to(decision.basket)?;
                    log_timings(card, &timings);
                    return Ok(Some(SortRecord {
                        card,
                        attempts,
                        basket: decision.basket,
                        outcome: SortOutcome::Routed {
                            matched_name: decision.matched.matched_name().to_string(),
                            distance: decision.matched.distance,
                            rule: decision.rule,
                        },
                        timings,
                    }));
                }
                Err(err) if err.is_card_failure() => {
                    warn!("card #{} attempt {}: {}", card, attempts, err);
                    last_failure = err.to_string();
                }
                Err(err) => return Err(err),
            }
        }

        warn!(
            "card #{} deferred to {} after {} attempts: {}",
            card, self.defer_basket, attempts, last_failure
        );
        self.actuator.sort_to(self.defer_basket)?;
        log_timings(card, &timings);
        Ok(Some(SortRecord {
            card,
            attempts,
            basket: self.defer_basket,
            outcome: SortOutcome::Deferred {
                reason: last_failure,
            },
            timings,
        }))
    }
}

fn log_timings(card: usize, timings: &StageTimings) {
    info!(
        "card #{} timing: capture={:.3}s route={:.3}s",
        card,
        timings.capture.as_secs_f64(),
        timings.route.as_secs_f64()
    );
}
