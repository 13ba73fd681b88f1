//! Basket identification.
//!
//! The sorter has four physical output bins. Baskets 0, 1 and 2 are guarded
//! by configurable rules; basket 3 is the fallback for cards no rule claims.
//!
//! ```
//! use card_sorter::core::Basket;
//!
//! let basket = Basket::new(1);
//! assert_eq!(basket.index(), 1);
//! assert!(!basket.is_fallback());
//!
//! assert_eq!(Basket::try_new(4), None);
//! assert!(Basket::FALLBACK.is_fallback());
//! ```

use serde::{Deserialize, Serialize};

/// One of the four output baskets, index 0..=3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Basket(u8);

impl Basket {
    /// Number of physical baskets.
    pub const COUNT: usize = 4;

    /// Number of baskets guarded by a rule.
    pub const RULED: usize = 3;

    /// Basket for cards that match none of the rules.
    pub const FALLBACK: Basket = Basket(3);

    /// Create a basket from its index.
    ///
    /// Panics if `index` is not a valid basket.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!((index as usize) < Self::COUNT, "basket index out of range");
        Self(index)
    }

    /// Create a basket, returning `None` for an out-of-range index.
    #[must_use]
    pub const fn try_new(index: u8) -> Option<Self> {
        if (index as usize) < Self::COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Get the basket index.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Is this the fallback basket?
    #[must_use]
    pub const fn is_fallback(self) -> bool {
        self.0 == Self::FALLBACK.0
    }

    /// Baskets 0..3 in rule evaluation order.
    pub fn ruled() -> impl Iterator<Item = Basket> {
        (0..Self::RULED as u8).map(Basket)
    }

    /// Does the sorter need its fast throw for this basket?
    ///
    /// Baskets 0 and 1 sit close to the sorter and need a slow nudge;
    /// baskets 2 and 3 are reached by a fast throw.
    #[must_use]
    pub const fn is_far(self) -> bool {
        self.0 & 2 != 0
    }
}

impl std::fmt::Display for Basket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "basket {}", self.0)
    }
}
