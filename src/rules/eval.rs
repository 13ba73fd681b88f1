//! Rule evaluation against a card's attributes.
//!
//! Evaluation is total: expressions reaching here have been type checked,
//! arithmetic saturates, and there is no division.

use crate::cards::CardAttributes;

use super::parser::{ArithOp, CmpOp, Expr};
use super::variables::Value;

/// Context for evaluating rules.
pub struct RuleContext<'a> {
    /// The card being classified.
    pub attributes: &'a CardAttributes,
}

impl<'a> RuleContext<'a> {
    /// Create a new context.
    pub fn new(attributes: &'a CardAttributes) -> Self {
        Self { attributes }
    }
}

/// Evaluator for rule expressions.
pub struct RuleEvaluator;

impl RuleEvaluator {
    /// Check if a rule is satisfied.
    pub fn evaluate(expr: &Expr, ctx: &RuleContext) -> bool {
        Self::value(expr, ctx).truthy()
    }

    /// Compute the value of an expression.
    pub fn value(expr: &Expr, ctx: &RuleContext) -> Value {
        match expr {
            Expr::Bool(b) => Value::Bool(*b),

            Expr::Int(i) => Value::Int(*i),

            Expr::Var(var) => var.read(ctx.attributes),

            Expr::Not(inner) => Value::Bool(!Self::evaluate(inner, ctx)),

            Expr::Neg(inner) => Value::Int(Self::value(inner, ctx).as_int().saturating_neg()),

            Expr::And(left, right) => {
                Value::Bool(Self::evaluate(left, ctx) && Self::evaluate(right, ctx))
            }

            Expr::Or(left, right) => {
                Value::Bool(Self::evaluate(left, ctx) || Self::evaluate(right, ctx))
            }

            Expr::Compare { op, left, right } => {
                let l = Self::value(left, ctx).as_int();
                let r = Self::value(right, ctx).as_int();
                Value::Bool(match op {
                    CmpOp::Eq => l == r,
                    CmpOp::NotEq => l != r,
                    CmpOp::Lt => l < r,
                    CmpOp::LtEq => l <= r,
                    CmpOp::Gt => l > r,
                    CmpOp::GtEq => l >= r,
                })
            }

            Expr::Arith { op, left, right } => {
                let l = Self::value(left, ctx).as_int();
                let r = Self::value(right, ctx).as_int();
                Value::Int(match op {
                    ArithOp::Add => l.saturating_add(r),
                    ArithOp::Sub => l.saturating_sub(r),
                    ArithOp::Mul => l.saturating_mul(r),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Color, Rarity};
    use crate::rules::parser::parse;

    fn eval(rule: &str, attrs: &CardAttributes) -> bool {
        RuleEvaluator::evaluate(&parse(rule).unwrap(), &RuleContext::new(attrs))
    }

    #[test]
    fn test_type_flags() {
        let bolt = CardAttributes::new().instant().with_cost(1).with_color(Color::Red);

        assert!(eval("ti", &bolt));
        assert!(eval("is_instant", &bolt));
        assert!(!eval("tc", &bolt));
        assert!(eval("ts or ti or te", &bolt));
        assert!(!eval("tl or ta", &bolt));
        assert!(eval("cr and not cu", &bolt));
    }

    #[test]
    fn test_comparisons() {
        let dragon = CardAttributes::new()
            .creature()
            .with_cost(6)
            .with_rarity(Rarity::Mythic);

        assert!(eval("cmc >= 5", &dragon));
        assert!(!eval("cmc < 5", &dragon));
        assert!(eval("r == mythic", &dragon));
        assert!(eval("r > rare - 1", &dragon));
        assert!(eval("1 <= cmc <= 6", &dragon));
        assert!(!eval("1 <= cmc <= 5", &dragon));
        assert!(eval("tc == true", &dragon));
        assert!(eval("tl != tc", &dragon));
    }

    #[test]
    fn test_arithmetic() {
        let card = CardAttributes::new().with_cost(4);

        assert!(eval("cmc * 2 == 8", &card));
        assert!(eval("-cmc + 10 == 6", &card));
        assert!(eval("cmc - 2 * 3 < 0", &card));
    }

    #[test]
    fn test_saturating_arithmetic() {
        let card = CardAttributes::new().with_cost(i64::MAX);

        assert!(eval("cmc + 1 == cmc", &card));
        assert!(eval("cmc * 2 > 0", &card));
        assert!(eval("-cmc - 10 < 0", &card));
    }

    #[test]
    fn test_short_circuit_still_total() {
        let land = CardAttributes::new().land();

        assert!(eval("tl or cmc * 1000000000000 > 0", &land));
        assert!(!eval("tc and cmc > 0", &land));
    }
}
