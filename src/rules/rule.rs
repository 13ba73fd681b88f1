//! Compiled basket rules.
//!
//! ## Key Types
//!
//! - `BasketRule`: one parsed and type-checked condition and the basket it guards
//! - `BasketRules`: the three ruled baskets in evaluation order
//!
//! Compilation happens once, when configuration is loaded. Any failure is a
//! load-time error naming the basket and the offending rule text.

use crate::cards::CardAttributes;
use crate::core::{Basket, Result, RulesConfig, SorterError};

use super::error::RuleError;
use super::eval::{RuleContext, RuleEvaluator};
use super::parser::{parse, Expr};
use super::typecheck::check_condition;

/// A compiled basket condition.
#[derive(Clone, Debug)]
pub struct BasketRule {
    basket: Basket,
    source: String,
    expr: Expr,
}

impl BasketRule {
    /// Parse and type check a rule for `basket`.
    pub fn compile(basket: Basket, source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let expr = parse(&source)
            .and_then(|expr| check_condition(&expr).map(|()| expr))
            .map_err(|err| match err {
                RuleError::UnknownIdentifier(name) => SorterError::UnknownAttribute { basket, name },
                other => SorterError::InvalidRule {
                    basket,
                    rule: source.clone(),
                    message: other.to_string(),
                },
            })?;

        Ok(Self {
            basket,
            source,
            expr,
        })
    }

    /// The basket this rule guards.
    #[must_use]
    pub fn basket(&self) -> Basket {
        self.basket
    }

    /// The rule text as configured.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The compiled expression.
    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Evaluate the rule against a card.
    #[must_use]
    pub fn matches(&self, attributes: &CardAttributes) -> bool {
        RuleEvaluator::evaluate(&self.expr, &RuleContext::new(attributes))
    }
}

/// The rules for baskets 0, 1 and 2.
#[derive(Clone, Debug)]
pub struct BasketRules {
    rules: [BasketRule; Basket::RULED],
}

impl BasketRules {
    /// Compile rules from configuration.
    pub fn from_config(config: &RulesConfig) -> Result<Self> {
        let [b0, b1, b2] = config.sources();
        Ok(Self {
            rules: [
                BasketRule::compile(b0.0, b0.1)?,
                BasketRule::compile(b1.0, b1.1)?,
                BasketRule::compile(b2.0, b2.1)?,
            ],
        })
    }

    /// Compile three rule strings, in basket order.
    pub fn compile(basket0: &str, basket1: &str, basket2: &str) -> Result<Self> {
        Self::from_config(&RulesConfig::new(basket0, basket1, basket2))
    }

    /// Rules in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &BasketRule> {
        self.rules.iter()
    }

    /// Get the rule guarding `basket`, if it is a ruled basket.
    #[must_use]
    pub fn get(&self, basket: Basket) -> Option<&BasketRule> {
        self.rules.get(usize::from(basket.index()))
    }

    /// Pick the basket for a card.
    ///
    /// Rules are tried in order and the first that holds wins. Returns the
    /// basket and the index of the rule that fired, or the fallback basket
    /// and `None` when no rule holds.
    #[must_use]
    pub fn classify(&self, attributes: &CardAttributes) -> (Basket, Option<usize>) {
        self.rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(attributes))
            .map_or((Basket::FALLBACK, None), |(i, rule)| (rule.basket(), Some(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Rarity;

    #[test]
    fn test_compile_and_match() {
        let creature = CardAttributes::new()
            .creature()
            .with_cost(3)
            .with_rarity(Rarity::Common);

        let rule = BasketRule::compile(Basket::new(0), "is_creature").unwrap();
        assert!(rule.matches(&creature));
        assert_eq!(rule.source(), "is_creature");
        assert_eq!(rule.basket(), Basket::new(0));

        let expensive = BasketRule::compile(Basket::new(1), "converted_cost > 5").unwrap();
        assert!(!expensive.matches(&creature));
    }

    #[test]
    fn test_unknown_attribute_names_basket() {
        let err = BasketRule::compile(Basket::new(2), "is_land or power > 3").unwrap_err();
        match err {
            SorterError::UnknownAttribute { basket, name } => {
                assert_eq!(basket, Basket::new(2));
                assert_eq!(name, "power");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_rule_keeps_source() {
        let err = BasketRule::compile(Basket::new(1), "ts or").unwrap_err();
        match err {
            SorterError::InvalidRule { basket, rule, .. } => {
                assert_eq!(basket, Basket::new(1));
                assert_eq!(rule, "ts or");
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(BasketRule::compile(Basket::new(0), "cmc").unwrap_err().is_rule_error());
        assert!(BasketRule::compile(Basket::new(0), "tc == 1").unwrap_err().is_rule_error());
    }

    #[test]
    fn test_first_match_wins() {
        let rules = BasketRules::compile("true", "true", "true").unwrap();
        let card = CardAttributes::new();
        assert_eq!(rules.classify(&card), (Basket::new(0), Some(0)));

        let rules = BasketRules::compile("false", "tl", "tl or ta").unwrap();
        let land = CardAttributes::new().land();
        assert_eq!(rules.classify(&land), (Basket::new(1), Some(1)));
    }

    #[test]
    fn test_fallback() {
        let rules = BasketRules::compile("false", "false", "false").unwrap();
        assert_eq!(rules.classify(&CardAttributes::new()), (Basket::FALLBACK, None));
    }

    fn default_rules() -> BasketRules {
        BasketRules::from_config(&RulesConfig::default()).unwrap()
    }

    #[test]
    fn test_default_rules() {
        let rules = default_rules();

        let creature = CardAttributes::new().creature();
        let instant = CardAttributes::new().instant();
        let artifact = CardAttributes::new().artifact();
        let walker = CardAttributes::new().planeswalker();

        assert_eq!(rules.classify(&creature).0, Basket::new(0));
        assert_eq!(rules.classify(&instant).0, Basket::new(1));
        assert_eq!(rules.classify(&artifact).0, Basket::new(2));
        assert_eq!(rules.classify(&walker).0, Basket::FALLBACK);

        // artifact creatures are claimed by the first rule
        let golem = CardAttributes::new().artifact().creature();
        assert_eq!(rules.classify(&golem).0, Basket::new(0));
    }

    #[test]
    fn test_get_rule() {
        let rules = default_rules();
        assert_eq!(rules.get(Basket::new(2)).unwrap().source(), "is_land or is_artifact");
        assert!(rules.get(Basket::FALLBACK).is_none());
        assert_eq!(rules.iter().count(), 3);
    }
}
