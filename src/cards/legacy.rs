//! Legacy two-file dataset.
//!
//! - names file: JSON object mapping card name -> index into the properties
//! - properties file: JSON array of compact attribute records
//!
//! ```json
//! {"tc": 1, "ts": 0, "ti": 0, "ta": 0, "tl": 0, "te": 0, "tp": 0, "c": 2, "r": 1, "i": "G"}
//! ```
//!
//! Flags may be booleans or 0/1, and the color identity `i` may be a string
//! of letters or a list of letters.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::attributes::{CardAttributes, Colors, Rarity};
use super::entry::CatalogEntry;
use crate::core::error::{Result, SorterError};

/// Boolean flag written either as `true`/`false` or as a number.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
}

impl Default for Flag {
    fn default() -> Self {
        Flag::Bool(false)
    }
}

impl Flag {
    fn get(self) -> bool {
        match self {
            Flag::Bool(b) => b,
            Flag::Int(i) => i != 0,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum Identity {
    Letters(String),
    List(Vec<String>),
}

impl Default for Identity {
    fn default() -> Self {
        Identity::Letters(String::new())
    }
}

impl Identity {
    fn colors(&self) -> Colors {
        match self {
            Identity::Letters(s) => Colors::from_identity(s),
            Identity::List(items) => Colors::from_identity(&items.concat()),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
struct LegacyProps {
    tc: Flag,
    ts: Flag,
    ti: Flag,
    ta: Flag,
    tl: Flag,
    te: Flag,
    tp: Flag,
    c: f64,
    r: i64,
    i: Identity,
}

impl LegacyProps {
    fn into_attributes(self, position: usize) -> Result<CardAttributes> {
        let rarity = Rarity::from_code(self.r).ok_or_else(|| {
            SorterError::Catalog(format!(
                "property record {} has rarity code {} (expected 0..=3)",
                position, self.r
            ))
        })?;

        Ok(CardAttributes {
            is_creature: self.tc.get(),
            is_sorcery: self.ts.get(),
            is_instant: self.ti.get(),
            is_artifact: self.ta.get(),
            is_land: self.tl.get(),
            is_enchantment: self.te.get(),
            is_planeswalker: self.tp.get(),
            // Split and half-cost cards carry fractional costs.
            converted_cost: self.c.floor() as i64,
            rarity,
            colors: self.i.colors(),
        })
    }
}

/// Parse the names and properties documents into entries.
///
/// Entries keep the key order of the names file, which decides ties when
/// two names are equally close to a capture.
pub(crate) fn parse_entries(names_json: &str, props_json: &str) -> Result<Vec<CatalogEntry>> {
    let names: Map<String, Value> = serde_json::from_str(names_json)?;
    let props: Vec<LegacyProps> = serde_json::from_str(props_json)?;

    let attributes = props
        .into_iter()
        .enumerate()
        .map(|(i, p)| p.into_attributes(i))
        .collect::<Result<Vec<_>>>()?;

    names
        .into_iter()
        .map(|(name, index)| {
            let index = property_index(&name, &index)?;
            let attrs = attributes.get(index).ok_or_else(|| {
                SorterError::Catalog(format!(
                    "card {:?} points at property record {} but only {} exist",
                    name,
                    index,
                    attributes.len()
                ))
            })?;
            Ok(CatalogEntry::new(name, attrs.clone()))
        })
        .collect()
}

fn property_index(name: &str, value: &Value) -> Result<usize> {
    value
        .as_u64()
        .and_then(|i| usize::try_from(i).ok())
        .ok_or_else(|| {
            SorterError::Catalog(format!(
                "card {:?} has property index {} (expected a non-negative integer)",
                name, value
            ))
        })
}
