//! The fixed variable set rules may reference.
//!
//! Rules never see a card record directly. Identifiers are resolved to a
//! `Variable` when the rule is parsed, and only a `Variable` can read from
//! `CardAttributes`. Anything not listed here is rejected at load time.
//!
//! | Variable           | Alias | Type |
//! |--------------------|-------|------|
//! | `is_creature`      | `tc`  | bool |
//! | `is_sorcery`       | `ts`  | bool |
//! | `is_instant`       | `ti`  | bool |
//! | `is_artifact`      | `ta`  | bool |
//! | `is_land`          | `tl`  | bool |
//! | `is_enchantment`   | `te`  | bool |
//! | `is_planeswalker`  | `tp`  | bool |
//! | `converted_cost`   | `cmc` | int  |
//! | `rarity`           | `r`   | int (0 common .. 3 mythic) |
//! | `is_white`         | `cw`  | bool |
//! | `is_black`         | `cb`  | bool |
//! | `is_red`           | `cr`  | bool |
//! | `is_green`         | `cg`  | bool |
//! | `is_blue`          | `cu`  | bool |

use crate::cards::{CardAttributes, Color};

/// Static type of a rule expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueType {
    Bool,
    Int,
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::Bool => write!(f, "bool"),
            ValueType::Int => write!(f, "int"),
        }
    }
}

/// Runtime value of a rule expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Int(i64),
}

impl Value {
    /// Boolean reading of the value.
    #[must_use]
    pub fn truthy(self) -> bool {
        match self {
            Value::Bool(b) => b,
            Value::Int(i) => i != 0,
        }
    }

    /// Integer reading of the value.
    #[must_use]
    pub fn as_int(self) -> i64 {
        match self {
            Value::Bool(b) => i64::from(b),
            Value::Int(i) => i,
        }
    }
}

/// A whitelisted card attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variable {
    IsCreature,
    IsSorcery,
    IsInstant,
    IsArtifact,
    IsLand,
    IsEnchantment,
    IsPlaneswalker,
    ConvertedCost,
    Rarity,
    IsWhite,
    IsBlack,
    IsRed,
    IsGreen,
    IsBlue,
}

impl Variable {
    /// Every variable, in table order.
    pub const ALL: [Variable; 14] = [
        Variable::IsCreature,
        Variable::IsSorcery,
        Variable::IsInstant,
        Variable::IsArtifact,
        Variable::IsLand,
        Variable::IsEnchantment,
        Variable::IsPlaneswalker,
        Variable::ConvertedCost,
        Variable::Rarity,
        Variable::IsWhite,
        Variable::IsBlack,
        Variable::IsRed,
        Variable::IsGreen,
        Variable::IsBlue,
    ];

    /// Canonical rule name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Variable::IsCreature => "is_creature",
            Variable::IsSorcery => "is_sorcery",
            Variable::IsInstant => "is_instant",
            Variable::IsArtifact => "is_artifact",
            Variable::IsLand => "is_land",
            Variable::IsEnchantment => "is_enchantment",
            Variable::IsPlaneswalker => "is_planeswalker",
            Variable::ConvertedCost => "converted_cost",
            Variable::Rarity => "rarity",
            Variable::IsWhite => "is_white",
            Variable::IsBlack => "is_black",
            Variable::IsRed => "is_red",
            Variable::IsGreen => "is_green",
            Variable::IsBlue => "is_blue",
        }
    }

    /// Short name from the legacy command line (`tc`, `cmc`, ...).
    #[must_use]
    pub const fn alias(self) -> &'static str {
        match self {
            Variable::IsCreature => "tc",
            Variable::IsSorcery => "ts",
            Variable::IsInstant => "ti",
            Variable::IsArtifact => "ta",
            Variable::IsLand => "tl",
            Variable::IsEnchantment => "te",
            Variable::IsPlaneswalker => "tp",
            Variable::ConvertedCost => "cmc",
            Variable::Rarity => "r",
            Variable::IsWhite => "cw",
            Variable::IsBlack => "cb",
            Variable::IsRed => "cr",
            Variable::IsGreen => "cg",
            Variable::IsBlue => "cu",
        }
    }

    /// Resolve an identifier, canonical name or alias.
    #[must_use]
    pub fn lookup(ident: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.name() == ident || v.alias() == ident)
    }

    /// Static type of the variable.
    #[must_use]
    pub const fn value_type(self) -> ValueType {
        match self {
            Variable::ConvertedCost | Variable::Rarity => ValueType::Int,
            _ => ValueType::Bool,
        }
    }

    /// Read the variable from an attribute record.
    #[must_use]
    pub fn read(self, attrs: &CardAttributes) -> Value {
        match self {
            Variable::IsCreature => Value::Bool(attrs.is_creature),
            Variable::IsSorcery => Value::Bool(attrs.is_sorcery),
            Variable::IsInstant => Value::Bool(attrs.is_instant),
            Variable::IsArtifact => Value::Bool(attrs.is_artifact),
            Variable::IsLand => Value::Bool(attrs.is_land),
            Variable::IsEnchantment => Value::Bool(attrs.is_enchantment),
            Variable::IsPlaneswalker => Value::Bool(attrs.is_planeswalker),
            Variable::ConvertedCost => Value::Int(attrs.converted_cost),
            Variable::Rarity => Value::Int(attrs.rarity.code()),
            Variable::IsWhite => Value::Bool(attrs.has_color(Color::White)),
            Variable::IsBlack => Value::Bool(attrs.has_color(Color::Black)),
            Variable::IsRed => Value::Bool(attrs.has_color(Color::Red)),
            Variable::IsGreen => Value::Bool(attrs.has_color(Color::Green)),
            Variable::IsBlue => Value::Bool(attrs.has_color(Color::Blue)),
        }
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
