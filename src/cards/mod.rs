//! Card catalog: attributes, entries, and loading.
//!
//! ## Key Types
//!
//! - `CardAttributes`: the fixed attribute set rules can see
//! - `CatalogEntry`: one card name with its attributes
//! - `Catalog`: every known card, in load order, indexed by name
//!
//! ## Formats
//!
//! Catalogs load from a native JSON array, from the legacy
//! two-file dataset (`legacy`), or from a bincode snapshot.

pub mod attributes;
pub mod catalog;
pub mod entry;
mod legacy;

pub use attributes::{CardAttributes, Color, Colors, Rarity};
pub use catalog::Catalog;
pub use entry::CatalogEntry;
