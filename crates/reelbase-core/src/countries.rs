//! Country name to country code table.
//!
//! The table is stored as a JSON object of code to display name, the same
//! shape flag services use. Only the reverse direction (name to code) is
//! needed at runtime, so the table is inverted once when loaded.

use crate::error::{ReelError, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Table bundled with the crate, used when no override is configured.
const BUNDLED: &str = include_str!("../data/countries.json");

/// Reverse lookup from country name to its short code.
#[derive(Debug, Clone, Default)]
pub struct CountryCodes {
    by_name: HashMap<String, String>,
}

impl CountryCodes {
    /// Load the bundled table.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED).map_err(|e| ReelError::ConfigError {
            reason: format!("bundled country table is invalid: {}", e),
        })
    }

    /// Load a table from a JSON file.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading country table");
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents).map_err(|e| ReelError::ConfigError {
            reason: format!("invalid country table {}: {}", path.display(), e),
        })
    }

    /// Load the configured table, or the bundled one when `path` is None.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::bundled(),
        }
    }

    fn from_json(contents: &str) -> std::result::Result<Self, serde_json::Error> {
        // Sorted by code, so a name listed twice always keeps the lowest code.
        let by_code: BTreeMap<String, String> = serde_json::from_str(contents)?;

        let mut by_name: HashMap<String, String> = HashMap::with_capacity(by_code.len());
        for (code, name) in by_code {
            match by_name.get(&name) {
                Some(kept) => {
                    warn!(
                        country = %name,
                        kept = %kept,
                        dropped = %code,
                        "Country listed under two codes"
                    );
                }
                None => {
                    by_name.insert(name, code);
                }
            }
        }

        Ok(CountryCodes { by_name })
    }

    /// Short code for a country name, e.g. "Germany" -> "de".
    pub fn code_for(&self, name: &str) -> Option<&str> {
        self.by_name.get(name.trim()).map(String::as_str)
    }

    /// Number of countries in the table
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns true if the table is empty
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
