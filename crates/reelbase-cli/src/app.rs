//! Application state management.

use reelbase_core::{Config, CountryCodes, MovieStore, Storage, TitleMatcher};
use std::path::PathBuf;
use tracing::info;

/// Shared application state.
pub struct App {
    /// Configuration
    pub config: Config,

    /// The catalog store, format chosen from the file extension
    pub store: Storage,
}

impl App {
    /// Create a new application instance.
    ///
    /// `file` overrides the catalog path from the configuration.
    pub fn new(config: Config, file: Option<PathBuf>) -> anyhow::Result<Self> {
        let path = match file {
            Some(path) => path,
            None => config.store_path()?,
        };
        let store = Storage::open(&path)?;

        info!(
            path = %store.path().display(),
            format = ?store.format(),
            "Application initialized"
        );

        Ok(App { config, store })
    }

    /// Title matcher using the configured threshold.
    pub fn matcher(&self) -> TitleMatcher {
        TitleMatcher::new(self.config.search.fuzzy_threshold)
    }

    /// Country table from the configured file or the bundled one.
    pub fn countries(&self) -> anyhow::Result<CountryCodes> {
        Ok(CountryCodes::load(self.config.countries.path.as_deref())?)
    }
}
