//! # Reelbase Core Library
//!
//! This crate provides catalog storage, title search, and rating statistics
//! for the Reelbase movie catalog. The file format and the external movie
//! lookup are both abstracted behind traits.
//!
//! ## Architecture
//!
//! - **Types** (`types`): The movie record and catalog snapshot
//! - **Storage** (`storage`): `MovieStore` with CSV and JSON backends
//! - **Lookup** (`lookup`): Resolving titles through OMDb
//! - **Search** (`search`): Exact substring search with a fuzzy fallback
//! - **Stats** (`stats`): Averages, medians, and orderings
//! - **Countries** (`countries`): Country name to code table
//! - **Config** (`config`): Configuration management
//!
//! ## Example
//!
//! ```rust,ignore
//! use reelbase_core::{MovieStore, Storage, TitleMatcher};
//!
//! let store = Storage::open("movies.json")?;
//! let catalog = store.list_movies()?;
//!
//! let result = TitleMatcher::default().match_titles("matrix", &catalog);
//! for title in result.titles() {
//!     println!("{}", title);
//! }
//! ```

pub mod config;
pub mod countries;
pub mod error;
pub mod lookup;
pub mod search;
pub mod stats;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use countries::CountryCodes;
pub use error::{ReelError, Result};
pub use lookup::{LookupRecord, MovieLookup, OmdbClient, StaticLookup};
pub use search::{TitleMatch, TitleMatcher};
pub use stats::CatalogStats;
pub use storage::{CsvStore, JsonStore, MovieStore, Storage, StoreFormat};
pub use types::{Catalog, Movie};
