//! Catalog entries - static card data.
//!
//! A `CatalogEntry` is the reference record for one card name: the name the
//! matcher compares OCR text against, and the attributes basket rules are
//! evaluated over. Entries are immutable once the catalog is loaded.

use serde::{Deserialize, Serialize};

use super::attributes::CardAttributes;

/// One card of the reference catalog.
///
/// ## Example
///
/// ```
/// use card_sorter::cards::{CardAttributes, CatalogEntry, Rarity};
///
/// let bolt = CatalogEntry::new(
///     "Lightning Bolt",
///     CardAttributes::new().instant().with_cost(1),
/// );
///
/// assert_eq!(bolt.name, "Lightning Bolt");
/// assert_eq!(bolt.attributes.rarity, Rarity::Common);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Printed card name. Unique within a catalog.
    pub name: String,

    /// Attributes visible to basket rules.
    #[serde(flatten)]
    pub attributes: CardAttributes,
}

impl CatalogEntry {
    /// Create a new entry.
    #[must_use]
    pub fn new(name: impl Into<String>, attributes: CardAttributes) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    /// The name reduced to ASCII letters, everything else replaced by `_`.
    ///
    /// Suitable as a file name stem for archived card images.
    #[must_use]
    pub fn file_stem(&self) -> String {
        self.name
            .chars()
            .map(|c| if c.is_ascii_alphabetic() { c } else { '_' })
            .collect()
    }
}
