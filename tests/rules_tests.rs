//! Rule language integration tests.
//!
//! These tests compile rules the way configuration does and check them
//! against card attributes, including the short variable names used by the
//! legacy command line.

use proptest::prelude::*;

use card_sorter::cards::{CardAttributes, Color, Rarity};
use card_sorter::core::{Basket, RulesConfig, SorterConfig, SorterError};
use card_sorter::rules::{parse, BasketRule, BasketRules, RuleContext, RuleEvaluator, Variable};

fn rule(source: &str) -> BasketRule {
    BasketRule::compile(Basket::new(0), source).unwrap()
}

fn common_creature() -> CardAttributes {
    CardAttributes::new()
        .creature()
        .with_cost(3)
        .with_rarity(Rarity::Common)
}

#[test]
fn test_creature_cost_scenario() {
    let card = common_creature();
    assert!(rule("is_creature").matches(&card));
    assert!(!rule("converted_cost > 5").matches(&card));
}

#[test]
fn test_short_names_match_long_names() {
    let cards = [
        common_creature(),
        CardAttributes::new().sorcery().with_color(Color::Black),
        CardAttributes::new().instant().with_color(Color::Blue).with_color(Color::Red),
        CardAttributes::new().artifact().land(),
        CardAttributes::new().enchantment().with_color(Color::White),
        CardAttributes::new().planeswalker().with_color(Color::Green).with_rarity(Rarity::Mythic),
    ];

    for var in Variable::ALL {
        let long = match var.value_type() {
            card_sorter::rules::ValueType::Bool => rule(var.name()),
            card_sorter::rules::ValueType::Int => rule(&format!("{} > 0", var.name())),
        };
        let short = match var.value_type() {
            card_sorter::rules::ValueType::Bool => rule(var.alias()),
            card_sorter::rules::ValueType::Int => rule(&format!("{} > 0", var.alias())),
        };
        for card in &cards {
            assert_eq!(long.matches(card), short.matches(card), "{} vs {}", var.name(), var.alias());
        }
    }
}

#[test]
fn test_legacy_default_conditions() {
    let rules = BasketRules::compile("tc", "ts or ti or te", "tl or ta").unwrap();

    assert_eq!(rules.classify(&common_creature()).0, Basket::new(0));
    assert_eq!(rules.classify(&CardAttributes::new().enchantment()).0, Basket::new(1));
    assert_eq!(rules.classify(&CardAttributes::new().land()).0, Basket::new(2));
    assert_eq!(rules.classify(&CardAttributes::new().planeswalker()).0, Basket::FALLBACK);
}

#[test]
fn test_color_rules() {
    let gold = CardAttributes::new()
        .creature()
        .with_color(Color::White)
        .with_color(Color::Blue);

    assert!(rule("cw and cu").matches(&gold));
    assert!(!rule("cr or cg or cb").matches(&gold));
    assert!(rule("is_white && !is_red").matches(&gold));
}

#[test]
fn test_python_style_literals() {
    assert!(rule("True").matches(&CardAttributes::new()));
    assert!(!rule("False or not True").matches(&CardAttributes::new()));
}

#[test]
fn test_unsafe_rules_rejected() {
    for source in [
        "__import__('os')",
        "open('cards.json')",
        "tc.__class__",
        "exec",
        "lambda",
        "card_prop[0]",
        "cmc / 0",
        "cmc ** 2 > 1",
        "tc if ts else ti",
        "",
    ] {
        let err = BasketRule::compile(Basket::new(1), source).unwrap_err();
        assert!(err.is_rule_error(), "{:?} should be rejected, got {}", source, err);
    }
}

#[test]
fn test_error_messages_name_the_basket() {
    let err = BasketRules::compile("tc", "ts", "tl and").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("basket 2"), "{}", message);
    assert!(message.contains("tl and"), "{}", message);
}

#[test]
fn test_rules_from_toml() {
    let config = SorterConfig::from_toml_str(
        r#"
        [rules]
        basket0 = "rarity == mythic"
        basket1 = "1 <= cmc <= 2"
        basket2 = "not is_land"
        "#,
    )
    .unwrap();
    let rules = BasketRules::from_config(&config.rules).unwrap();

    let mythic = CardAttributes::new().with_rarity(Rarity::Mythic).with_cost(7);
    let cheap = CardAttributes::new().with_cost(2);
    let pricey = CardAttributes::new().with_cost(4);
    let land = CardAttributes::new().land();

    assert_eq!(rules.classify(&mythic), (Basket::new(0), Some(0)));
    assert_eq!(rules.classify(&cheap), (Basket::new(1), Some(1)));
    assert_eq!(rules.classify(&pricey), (Basket::new(2), Some(2)));
    assert_eq!(rules.classify(&land), (Basket::FALLBACK, None));
}

#[test]
fn test_unknown_attribute_from_config() {
    let config = RulesConfig::new("tc", "ts", "is_foil and tl");
    match BasketRules::from_config(&config) {
        Err(SorterError::UnknownAttribute { basket, name }) => {
            assert_eq!(basket, Basket::new(2));
            assert_eq!(name, "is_foil");
        }
        other => panic!("unexpected: {:?}", other.map(|_| ())),
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn arb_attributes() -> impl Strategy<Value = CardAttributes> {
    (
        prop::array::uniform7(any::<bool>()),
        -2i64..20,
        0i64..4,
        prop::array::uniform5(any::<bool>()),
    )
        .prop_map(|(flags, cost, rarity, colors)| {
            let mut attrs = CardAttributes::new()
                .with_cost(cost)
                .with_rarity(Rarity::from_code(rarity).unwrap());
            attrs.is_creature = flags[0];
            attrs.is_sorcery = flags[1];
            attrs.is_instant = flags[2];
            attrs.is_artifact = flags[3];
            attrs.is_land = flags[4];
            attrs.is_enchantment = flags[5];
            attrs.is_planeswalker = flags[6];
            for (color, on) in Color::ALL.into_iter().zip(colors) {
                if on {
                    attrs = attrs.with_color(color);
                }
            }
            attrs
        })
}

fn eval(source: &str, attrs: &CardAttributes) -> bool {
    RuleEvaluator::evaluate(&parse(source).unwrap(), &RuleContext::new(attrs))
}

proptest! {
    #[test]
    fn negation_inverts(attrs in arb_attributes(), n in -5i64..25) {
        let base = format!("cmc >= {n} or tl");
        let negated = format!("not ({base})");
        prop_assert_eq!(eval(&negated, &attrs), !eval(&base, &attrs));
    }

    #[test]
    fn chained_comparison_is_conjunction(attrs in arb_attributes(), lo in -3i64..10, hi in -3i64..10) {
        let chained = format!("{lo} <= cmc <= {hi}");
        let expanded = format!("{lo} <= cmc and cmc <= {hi}");
        prop_assert_eq!(eval(&chained, &attrs), eval(&expanded, &attrs));
        prop_assert_eq!(eval(&chained, &attrs), lo <= attrs.converted_cost && attrs.converted_cost <= hi);
    }

    #[test]
    fn default_rules_first_match_wins(attrs in arb_attributes()) {
        let rules = BasketRules::from_config(&RulesConfig::default()).unwrap();
        let (basket, fired) = rules.classify(&attrs);
        let expected = if attrs.is_creature {
            0
        } else if attrs.is_sorcery || attrs.is_instant || attrs.is_enchantment {
            1
        } else if attrs.is_land || attrs.is_artifact {
            2
        } else {
            3
        };
        prop_assert_eq!(basket.index(), expected);
        prop_assert_eq!(fired.is_none(), expected == 3);
    }
}
