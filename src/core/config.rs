//! Sorter configuration.
//!
//! Basket conditions, failure handling and the log destination are
//! configured here and passed into constructors:
//! - `CatalogConfig`: where the reference dataset lives
//! - `RulesConfig`: the three basket conditions
//! - `MatcherConfig`: name matching options
//! - `SessionConfig`: what to do with cards that cannot be identified
//! - `LoggingConfig`: diagnostic log file and level
//!
//! Configuration is read from TOML. Every section has defaults, so an empty
//! file is a valid configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::basket::Basket;
use super::error::{Result, SorterError};

/// Default rule for basket 0.
pub const DEFAULT_BASKET0_RULE: &str = "is_creature";
/// Default rule for basket 1.
pub const DEFAULT_BASKET1_RULE: &str = "is_sorcery or is_instant or is_enchantment";
/// Default rule for basket 2.
pub const DEFAULT_BASKET2_RULE: &str = "is_land or is_artifact";

/// Catalog location.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Native JSON catalog, legacy properties file, or `.bin` snapshot.
    pub path: PathBuf,

    /// Legacy names file (name -> property index). Selects the two-file format.
    pub names: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("cards.json"),
            names: None,
        }
    }
}

/// Basket conditions, one per ruled basket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub basket0: String,
    pub basket1: String,
    pub basket2: String,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            basket0: DEFAULT_BASKET0_RULE.to_string(),
            basket1: DEFAULT_BASKET1_RULE.to_string(),
            basket2: DEFAULT_BASKET2_RULE.to_string(),
        }
    }
}

impl RulesConfig {
    /// Create rules from three condition strings.
    pub fn new(
        basket0: impl Into<String>,
        basket1: impl Into<String>,
        basket2: impl Into<String>,
    ) -> Self {
        Self {
            basket0: basket0.into(),
            basket1: basket1.into(),
            basket2: basket2.into(),
        }
    }

    /// Rule sources in evaluation order, paired with their basket.
    #[must_use]
    pub fn sources(&self) -> [(Basket, &str); Basket::RULED] {
        [
            (Basket::new(0), self.basket0.as_str()),
            (Basket::new(1), self.basket1.as_str()),
            (Basket::new(2), self.basket2.as_str()),
        ]
    }
}

/// Name matching options.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Fold look-alike glyphs (0/O, l/I, accented vowels) before comparing.
    /// Off by default: names are compared exactly as read.
    pub fold_glyphs: bool,

    /// Log a warning when the best match is further away than this.
    /// Never rejects a match.
    pub max_distance: Option<usize>,
}

/// Handling of cards the core cannot route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Extra OCR captures to attempt after a failed identification.
    pub capture_retries: u32,

    /// Basket index for cards that still cannot be identified.
    pub defer_basket: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capture_retries: 1,
            defer_basket: Basket::FALLBACK.index(),
        }
    }
}

impl SessionConfig {
    /// The validated defer basket.
    pub fn defer_basket(&self) -> Result<Basket> {
        Basket::try_new(self.defer_basket).ok_or_else(|| {
            SorterError::Config(format!(
                "session.defer_basket must be 0..=3, got {}",
                self.defer_basket
            ))
        })
    }
}

/// Diagnostic log settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Append-only log file.
    pub file: PathBuf,

    /// Default level filter when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("card_sorter.log"),
            level: "info".to_string(),
        }
    }
}

/// Complete sorter configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SorterConfig {
    pub catalog: CatalogConfig,
    pub rules: RulesConfig,
    pub matcher: MatcherConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

impl SorterConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SorterError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SorterConfig = toml::from_str(content)?;
        config.session.defer_basket()?;
        Ok(config)
    }

    /// Replace the catalog path.
    #[must_use]
    pub fn with_catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog.path = path.into();
        self
    }

    /// Replace the basket rules.
    #[must_use]
    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Enable or disable glyph folding.
    #[must_use]
    pub fn with_fold_glyphs(mut self, fold: bool) -> Self {
        self.matcher.fold_glyphs = fold;
        self
    }

    /// Replace the log file.
    #[must_use]
    pub fn with_log_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.logging.file = file.into();
        self
    }
}
