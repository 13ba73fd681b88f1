//! Routing: from OCR text to a physical basket.
//!
//! ## Key Types
//!
//! - `RoutingCoordinator`: normalize, match, look up, classify
//! - `RoutingDecision`: the result for one card
//! - `Actuator`: ejector and sorter motors, behind a trait
//! - `SortSession`: the one-card-at-a-time machine loop with its failure policy

pub mod actuator;
pub mod coordinator;
pub mod session;

pub use actuator::{eject_into, Actuator, ActuatorCommand, DryRunActuator, RecordingActuator};
pub use coordinator::{RoutingCoordinator, RoutingDecision, RoutingStage};
pub use session::{SessionSummary, SortOutcome, SortRecord, SortSession, StageTimings};
