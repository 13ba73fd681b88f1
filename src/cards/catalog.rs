//! Reference catalog of known cards.
//!
//! The `Catalog` stores every `CatalogEntry` in load order, plus a name
//! index for attribute lookup. Load order is the matcher's scan order, so
//! ties between equally distant names resolve the same way on every run.
//!
//! Catalogs are loaded in full before any card is matched and never
//! mutated afterwards.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::attributes::CardAttributes;
use super::entry::CatalogEntry;
use super::legacy;
use crate::core::config::CatalogConfig;
use crate::core::error::{Result, SorterError};

/// Snapshot format version written by `save_snapshot`.
const SNAPSHOT_VERSION: u32 = 1;

// Entries are stored without `#[serde(flatten)]`, which bincode cannot encode.
#[derive(Serialize, Deserialize)]
struct SnapshotEntry {
    name: String,
    attributes: CardAttributes,
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    entries: Vec<SnapshotEntry>,
}

/// Catalog of card entries keyed by name.
///
/// ## Example
///
/// ```
/// use card_sorter::cards::{CardAttributes, Catalog, CatalogEntry};
///
/// let catalog = Catalog::from_entries(vec![
///     CatalogEntry::new("Lightning Bolt", CardAttributes::new().instant().with_cost(1)),
///     CatalogEntry::new("Grizzly Bears", CardAttributes::new().creature().with_cost(2)),
/// ])
/// .unwrap();
///
/// let bolt = catalog.get("Lightning Bolt").unwrap();
/// assert!(bolt.attributes.is_instant);
/// assert_eq!(catalog.len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    index: FxHashMap<String, usize>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, rejecting empty and duplicate names.
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Result<Self> {
        let mut catalog = Self::new();
        for entry in entries {
            catalog.insert(entry)?;
        }
        Ok(catalog)
    }

    fn insert(&mut self, entry: CatalogEntry) -> Result<()> {
        if entry.name.is_empty() {
            return Err(SorterError::Catalog(format!(
                "entry {} has an empty name",
                self.entries.len()
            )));
        }
        if self.index.contains_key(&entry.name) {
            return Err(SorterError::Catalog(format!(
                "duplicate card name {:?}",
                entry.name
            )));
        }
        self.index.insert(entry.name.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Load a catalog as described by configuration.
    ///
    /// - `names` set: legacy two-file format (`names` + `path` properties)
    /// - `path` ending in `.bin`: binary snapshot
    /// - otherwise: native JSON array
    pub fn load(config: &CatalogConfig) -> Result<Self> {
        let catalog = match &config.names {
            Some(names) => Self::load_legacy(names, &config.path)?,
            None if config.path.extension().is_some_and(|ext| ext == "bin") => {
                Self::load_snapshot(&config.path)?
            }
            None => Self::load_json(&config.path)?,
        };
        info!(
            path = %config.path.display(),
            entries = catalog.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Load a native JSON catalog (array of entries).
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_catalog_file(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Parse a native JSON catalog.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// Load the legacy two-file format.
    pub fn load_legacy(names_path: impl AsRef<Path>, props_path: impl AsRef<Path>) -> Result<Self> {
        let names = read_catalog_file(names_path.as_ref())?;
        let props = read_catalog_file(props_path.as_ref())?;
        Self::from_legacy_json(&names, &props)
    }

    /// Parse the legacy two-file format.
    pub fn from_legacy_json(names_json: &str, props_json: &str) -> Result<Self> {
        Self::from_entries(legacy::parse_entries(names_json, props_json)?)
    }

    /// Load a binary snapshot written by `save_snapshot`.
    pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            SorterError::Catalog(format!("cannot open snapshot '{}': {}", path.display(), e))
        })?;
        let snapshot: Snapshot = bincode::deserialize_from(BufReader::new(file))?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SorterError::Catalog(format!(
                "snapshot '{}' has version {}, expected {}",
                path.display(),
                snapshot.version,
                SNAPSHOT_VERSION
            )));
        }
        Self::from_entries(
            snapshot
                .entries
                .into_iter()
                .map(|e| CatalogEntry::new(e.name, e.attributes)),
        )
    }

    /// Write a binary snapshot of this catalog.
    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let writer = BufWriter::new(File::create(path)?);
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            entries: self
                .entries
                .iter()
                .map(|e| SnapshotEntry {
                    name: e.name.clone(),
                    attributes: e.attributes.clone(),
                })
                .collect(),
        };
        bincode::serialize_into(writer, &snapshot)?;
        debug!(path = %path.display(), entries = self.len(), "catalog snapshot written");
        Ok(())
    }

    /// Get an entry by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Check if a name is in the catalog.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Get the entry at a load-order position.
    #[must_use]
    pub fn entry_at(&self, position: usize) -> Option<&CatalogEntry> {
        self.entries.get(position)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in load order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Find entries matching a predicate, in load order.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CatalogEntry>
    where
        F: Fn(&CatalogEntry) -> bool,
    {
        self.entries.iter().filter(move |e| predicate(e))
    }
}

fn read_catalog_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        SorterError::Catalog(format!("cannot read '{}': {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::attributes::Rarity;

    fn entry(name: &str) -> CatalogEntry {
        CatalogEntry::new(name, CardAttributes::new())
    }

    #[test]
    fn test_from_entries_and_get() {
        let catalog = Catalog::from_entries(vec![entry("Island"), entry("Forest")]).unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("Island"));
        assert!(catalog.get("Swamp").is_none());
        assert_eq!(catalog.get("Forest").unwrap().name, "Forest");
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let err = Catalog::from_entries(vec![entry("Island"), entry("Island")]).unwrap_err();
        assert!(matches!(err, SorterError::Catalog(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = Catalog::from_entries(vec![entry("")]).unwrap_err();
        assert!(matches!(err, SorterError::Catalog(_)));
    }

    #[test]
    fn test_iteration_keeps_load_order() {
        let names = ["Plains", "Island", "Swamp", "Mountain", "Forest"];
        let catalog = Catalog::from_entries(names.iter().map(|n| entry(n))).unwrap();

        let order: Vec<_> = catalog.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(order, names);
        assert_eq!(catalog.entry_at(2).unwrap().name, "Swamp");
    }

    #[test]
    fn test_find_with_predicate() {
        let catalog = Catalog::from_entries(vec![
            CatalogEntry::new("Cheap", CardAttributes::new().with_cost(1)),
            CatalogEntry::new("Expensive", CardAttributes::new().with_cost(7)),
        ])
        .unwrap();

        let cheap: Vec<_> = catalog.find(|e| e.attributes.converted_cost <= 2).collect();
        assert_eq!(cheap.len(), 1);
        assert_eq!(cheap[0].name, "Cheap");
    }

    #[test]
    fn test_from_json_str() {
        let catalog = Catalog::from_json_str(
            r#"[
                {"name": "Lightning Bolt", "is_instant": true, "converted_cost": 1},
                {"name": "Shivan Dragon", "is_creature": true, "converted_cost": 6, "rarity": "rare", "colors": ["red"]}
            ]"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("Shivan Dragon").unwrap().attributes.rarity, Rarity::Rare);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.bin");

        let catalog = Catalog::from_entries(vec![
            CatalogEntry::new("Serra Angel", CardAttributes::new().creature().with_cost(5)),
            entry("Island"),
        ])
        .unwrap();
        catalog.save_snapshot(&path).unwrap();

        let loaded = Catalog::load(&CatalogConfig {
            path: path.clone(),
            names: None,
        })
        .unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.entry_at(0), catalog.entry_at(0));
        assert!(loaded.get("Serra Angel").unwrap().attributes.is_creature);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalog::load_json("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SorterError::Catalog(_)));
    }

    #[test]
    fn test_load_legacy_files() {
        let dir = tempfile::tempdir().unwrap();
        let names = dir.path().join("mtg_card_dic.json");
        let props = dir.path().join("mtg_card_prop.json");
        fs::write(&names, r#"{"Lightning Bolt": 0}"#).unwrap();
        fs::write(&props, r#"[{"ti": 1, "c": 1, "r": 0, "i": "R"}]"#).unwrap();

        let catalog = Catalog::load(&CatalogConfig {
            path: props,
            names: Some(names),
        })
        .unwrap();

        assert!(catalog.get("Lightning Bolt").unwrap().attributes.is_instant);
    }
}
