//! Configuration for the OPACK decision structures.
//!
//! Maps directly to `opack.toml`:
//!
//! ```toml
//! [history]
//! capacity = 10
//!
//! [selection]
//! register_choices = false
//! seed = 42
//! ```

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Top-level OPACK configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpackConfig {
    /// Per-agent action history settings.
    #[serde(default)]
    pub history: HistoryConfig,
    /// Influence-graph action selection settings.
    #[serde(default)]
    pub selection: SelectionConfig,
}

impl OpackConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `OpackError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::OpackError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Bounded action history settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// How many past actions each agent remembers.
    ///
    /// `0` is accepted here and replaced by `1` when the history is built.
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_history_capacity(),
        }
    }
}

/// Influence-graph action selection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Register every offered choice with a zero score before impacts run,
    /// so that a choice nobody voted for can still win.
    #[serde(default)]
    pub register_choices: bool,
    /// Seed for the tie-break generator. Unset means seeded from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SelectionConfig {
    /// Build the tie-break generator described by this config.
    #[must_use]
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_history_capacity() -> usize { 10 }
