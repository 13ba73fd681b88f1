//! The machine side of the sorter.
//!
//! Motor drivers live outside the crate; the session drives them through
//! `Actuator`. Two implementations ship here: `DryRunActuator`, which only
//! logs, and `RecordingActuator`, which remembers every command for tests.

use tracing::info;

use crate::core::{Basket, Result};

/// Ejector and sorter motors.
pub trait Actuator {
    /// Throw the next card out of the stack and into the sorter.
    fn eject(&mut self) -> Result<()>;

    /// Move the card in the sorter into `basket`.
    fn sort_to(&mut self, basket: Basket) -> Result<()>;
}

/// Logs commands without moving anything.
#[derive(Clone, Debug, Default)]
pub struct DryRunActuator {
    ejected: usize,
}

impl DryRunActuator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cards ejected so far.
    pub fn ejected(&self) -> usize {
        self.ejected
    }
}

impl Actuator for DryRunActuator {
    fn eject(&mut self) -> Result<()> {
        self.ejected += 1;
        info!("dry run: eject card #{}", self.ejected);
        Ok(())
    }

    fn sort_to(&mut self, basket: Basket) -> Result<()> {
        let throw = if basket.is_far() { "fast" } else { "slow" };
        info!("dry run: sort to {} ({} throw)", basket, throw);
        Ok(())
    }
}

/// A command received by `RecordingActuator`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActuatorCommand {
    Eject,
    SortTo(Basket),
}

/// Records every command in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingActuator {
    commands: Vec<ActuatorCommand>,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[ActuatorCommand] {
        &self.commands
    }

    /// Baskets in the order cards were sorted.
    pub fn baskets(&self) -> Vec<Basket> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                ActuatorCommand::SortTo(b) => Some(*b),
                ActuatorCommand::Eject => None,
            })
            .collect()
    }
}

impl Actuator for RecordingActuator {
    fn eject(&mut self) -> Result<()> {
        self.commands.push(ActuatorCommand::Eject);
        Ok(())
    }

    fn sort_to(&mut self, basket: Basket) -> Result<()> {
        self.commands.push(ActuatorCommand::SortTo(basket));
        Ok(())
    }
}

/// Eject `count` cards straight into `basket` without identifying them.
///
/// Used to clear a stack or test a basket by hand.
pub fn eject_into<A: Actuator>(actuator: &mut A, basket: Basket, count: usize) -> Result<()> {
    for card in 1..=count {
        actuator.eject()?;
        actuator.sort_to(basket)?;
        info!("manual eject #{} -> {}", card, basket);
    }
    Ok(())
}
