//! Card attributes used by basket rules.
//!
//! Every catalog entry carries the same fixed attribute set:
//!
//! - Type flags: creature, sorcery, instant, artifact, land, enchantment,
//!   planeswalker
//! - `converted_cost`: total mana cost
//! - `rarity`: common, uncommon, rare, mythic (codes 0..3)
//! - `colors`: subset of white, black, red, green, blue

use serde::{Deserialize, Serialize};

/// Card rarity, ordered from common to mythic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Mythic,
}

impl Rarity {
    /// All rarities in code order.
    pub const ALL: [Rarity; 4] = [Rarity::Common, Rarity::Uncommon, Rarity::Rare, Rarity::Mythic];

    /// Numeric rarity code (0 = common .. 3 = mythic).
    #[must_use]
    pub const fn code(self) -> i64 {
        self as i64
    }

    /// Rarity for a numeric code.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    /// Lowercase name, as used in rules and catalog files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Mythic => "mythic",
        }
    }

    /// Rarity for a lowercase name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }
}

/// One of the five card colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
    Red,
    Green,
    Blue,
}

impl Color {
    /// All colors in WBRGU order.
    pub const ALL: [Color; 5] = [Color::White, Color::Black, Color::Red, Color::Green, Color::Blue];

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Color for a color-identity letter (W, B, R, G, U).
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'W' => Some(Color::White),
            'B' => Some(Color::Black),
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            'U' => Some(Color::Blue),
            _ => None,
        }
    }
}

/// Set of card colors.
///
/// Serialized as a list of color names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Color>", into = "Vec<Color>")]
pub struct Colors(u8);

impl Colors {
    /// The empty (colorless) set.
    pub const NONE: Colors = Colors(0);

    /// Add a color (builder pattern).
    #[must_use]
    pub const fn with(self, color: Color) -> Self {
        Self(self.0 | color.bit())
    }

    /// Insert a color.
    pub fn insert(&mut self, color: Color) {
        self.0 |= color.bit();
    }

    /// Check membership.
    #[must_use]
    pub const fn contains(self, color: Color) -> bool {
        self.0 & color.bit() != 0
    }

    /// Is the set empty?
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of colors.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate colors in WBRGU order.
    pub fn iter(self) -> impl Iterator<Item = Color> {
        Color::ALL.into_iter().filter(move |c| self.contains(*c))
    }

    /// Parse a color identity string such as `"WU"`.
    ///
    /// Letters that are not color letters are ignored.
    #[must_use]
    pub fn from_identity(identity: &str) -> Self {
        identity
            .chars()
            .filter_map(Color::from_letter)
            .fold(Colors::NONE, Colors::with)
    }
}

impl From<Vec<Color>> for Colors {
    fn from(colors: Vec<Color>) -> Self {
        colors.into_iter().fold(Colors::NONE, Colors::with)
    }
}

impl From<Colors> for Vec<Color> {
    fn from(colors: Colors) -> Self {
        colors.iter().collect()
    }
}

impl FromIterator<Color> for Colors {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        iter.into_iter().fold(Colors::NONE, Colors::with)
    }
}

/// The attribute record of one catalog entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardAttributes {
    pub is_creature: bool,
    pub is_sorcery: bool,
    pub is_instant: bool,
    pub is_artifact: bool,
    pub is_land: bool,
    pub is_enchantment: bool,
    pub is_planeswalker: bool,
    pub converted_cost: i64,
    pub rarity: Rarity,
    pub colors: Colors,
}

impl CardAttributes {
    /// Create an attribute record with no flags, cost 0, common, colorless.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn creature(mut self) -> Self {
        self.is_creature = true;
        self
    }

    #[must_use]
    pub fn sorcery(mut self) -> Self {
        self.is_sorcery = true;
        self
    }

    #[must_use]
    pub fn instant(mut self) -> Self {
        self.is_instant = true;
        self
    }

    #[must_use]
    pub fn artifact(mut self) -> Self {
        self.is_artifact = true;
        self
    }

    #[must_use]
    pub fn land(mut self) -> Self {
        self.is_land = true;
        self
    }

    #[must_use]
    pub fn enchantment(mut self) -> Self {
        self.is_enchantment = true;
        self
    }

    #[must_use]
    pub fn planeswalker(mut self) -> Self {
        self.is_planeswalker = true;
        self
    }

    /// Set the converted cost.
    #[must_use]
    pub fn with_cost(mut self, cost: i64) -> Self {
        self.converted_cost = cost;
        self
    }

    /// Set the rarity.
    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Add a color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.colors.insert(color);
        self
    }

    /// Check for a color.
    #[must_use]
    pub fn has_color(&self, color: Color) -> bool {
        self.colors.contains(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_codes() {
        assert_eq!(Rarity::Common.code(), 0);
        assert_eq!(Rarity::Mythic.code(), 3);
        assert_eq!(Rarity::from_code(2), Some(Rarity::Rare));
        assert_eq!(Rarity::from_code(4), None);
        assert_eq!(Rarity::from_code(-1), None);
        assert!(Rarity::Uncommon < Rarity::Rare);
    }

    #[test]
    fn test_rarity_names() {
        for rarity in Rarity::ALL {
            assert_eq!(Rarity::from_name(rarity.name()), Some(rarity));
        }
        assert_eq!(Rarity::from_name("special"), None);
    }

    #[test]
    fn test_colors_set() {
        let colors = Colors::NONE.with(Color::Red).with(Color::Blue);
        assert!(colors.contains(Color::Red));
        assert!(colors.contains(Color::Blue));
        assert!(!colors.contains(Color::Green));
        assert_eq!(colors.len(), 2);
        assert_eq!(colors.iter().collect::<Vec<_>>(), vec![Color::Red, Color::Blue]);
    }

    #[test]
    fn test_colors_from_identity() {
        let colors = Colors::from_identity("WU");
        assert!(colors.contains(Color::White));
        assert!(colors.contains(Color::Blue));
        assert_eq!(colors.len(), 2);

        assert!(Colors::from_identity("").is_empty());
        assert_eq!(Colors::from_identity("r,g"), Colors::NONE.with(Color::Red).with(Color::Green));
    }

    #[test]
    fn test_attributes_builder() {
        let attrs = CardAttributes::new()
            .creature()
            .artifact()
            .with_cost(4)
            .with_rarity(Rarity::Rare)
            .with_color(Color::Green);

        assert!(attrs.is_creature);
        assert!(attrs.is_artifact);
        assert!(!attrs.is_land);
        assert_eq!(attrs.converted_cost, 4);
        assert_eq!(attrs.rarity, Rarity::Rare);
        assert!(attrs.has_color(Color::Green));
        assert!(!attrs.has_color(Color::Black));
    }

    #[test]
    fn test_attributes_json() {
        let attrs: CardAttributes = serde_json::from_str(
            r#"{"is_instant": true, "converted_cost": 1, "rarity": "uncommon", "colors": ["red"]}"#,
        )
        .unwrap();

        assert!(attrs.is_instant);
        assert!(!attrs.is_creature);
        assert_eq!(attrs.rarity, Rarity::Uncommon);
        assert_eq!(attrs.colors, Colors::NONE.with(Color::Red));

        let json = serde_json::to_string(&attrs).unwrap();
        assert!(json.contains(r#""colors":["red"]"#));
    }
}
