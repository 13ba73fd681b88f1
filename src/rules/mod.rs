//! Sandboxed basket rules.
//!
//! Rules are small boolean expressions over a fixed set of card attributes,
//! such as `is_creature and converted_cost <= 3`. They are compiled once at
//! configuration load:
//!
//! - `lexer`: rule text to tokens
//! - `parser`: tokens to an `Expr` tree with resolved variables
//! - `typecheck`: bool/int checking, rule must be a condition
//! - `eval`: total evaluation against `CardAttributes`
//! - `rule`: `BasketRule` and `BasketRules`, first match wins
//!
//! Nothing but the whitelisted `Variable`s is reachable from a rule.

pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod rule;
pub mod typecheck;
pub mod variables;

pub use error::RuleError;
pub use eval::{RuleContext, RuleEvaluator};
pub use parser::{parse, ArithOp, CmpOp, Expr};
pub use rule::{BasketRule, BasketRules};
pub use variables::{Value, ValueType, Variable};
