//! Structured-document catalog.
//!
//! The whole file is one JSON object keyed by title:
//!
//! ```json
//! {
//!     "Inception": {
//!         "rating": 8.8,
//!         "year": 2010,
//!         "poster": "https://...",
//!         "id": "tt1375666",
//!         "country": "United States, United Kingdom",
//!         "comment": "watch again"
//!     }
//! }
//! ```
//!
//! Every operation reads and writes the full document.

use super::{comment_value, needs_init, write_atomically, MovieStore};
use crate::error::{ReelError, Result};
use crate::types::{normalize_countries, Catalog, Movie};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Fields stored under each title.
#[derive(Debug, Serialize, Deserialize)]
struct JsonEntry {
    rating: f64,
    year: i32,
    #[serde(default)]
    poster: String,
    #[serde(default)]
    id: String,
    #[serde(default)]
    country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
}

impl JsonEntry {
    fn into_movie(self, title: String) -> Movie {
        Movie {
            title,
            rating: self.rating,
            year: self.year,
            imdb_id: self.id,
            countries: normalize_countries(&self.country),
            poster: self.poster,
            comment: self.comment.as_deref().and_then(comment_value),
        }
    }
}

impl From<&Movie> for JsonEntry {
    fn from(movie: &Movie) -> Self {
        JsonEntry {
            rating: movie.rating,
            year: movie.year,
            poster: movie.poster.clone(),
            id: movie.imdb_id.clone(),
            country: movie.country_string(),
            comment: movie.comment.clone(),
        }
    }
}

/// Catalog stored as a JSON document.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Open the catalog at `path`, writing `{}` if it is missing or empty.
    /// Existing content is never modified.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let store = JsonStore {
            path: path.as_ref().to_path_buf(),
        };

        if needs_init(&store.path)? {
            info!(path = %store.path.display(), "Creating empty JSON catalog");
            store.save(&Catalog::new())?;
        }

        Ok(store)
    }

    fn load(&self) -> Result<Catalog> {
        let contents = fs::read_to_string(&self.path).map_err(|e| ReelError::storage(&self.path, e))?;
        let document: Map<String, Value> =
            serde_json::from_str(&contents).map_err(|e| ReelError::corrupt(&self.path, e))?;

        let mut catalog = Catalog::new();
        for (title, value) in document {
            let entry: JsonEntry = serde_json::from_value(value)
                .map_err(|e| ReelError::corrupt(&self.path, format!("entry \"{}\": {}", title, e)))?;
            catalog.insert(entry.into_movie(title));
        }

        Ok(catalog)
    }

    fn save(&self, catalog: &Catalog) -> Result<()> {
        let mut document = Map::with_capacity(catalog.len());
        for movie in catalog {
            let entry = serde_json::to_value(JsonEntry::from(movie))
                .map_err(|e| ReelError::storage(&self.path, e))?;
            document.insert(movie.title.clone(), entry);
        }

        write_atomically(&self.path, |w| {
            serde_json::to_writer_pretty(&mut *w, &document)
                .map_err(|e| ReelError::storage(&self.path, e))
        })
    }
}

impl MovieStore for JsonStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn list_movies(&self) -> Result<Catalog> {
        let catalog = self.load()?;
        debug!(path = %self.path.display(), movies = catalog.len(), "Read JSON catalog");
        Ok(catalog)
    }

    fn insert_movie(&self, movie: &Movie) -> Result<()> {
        let mut catalog = self.load()?;
        catalog.insert(movie.clone());
        self.save(&catalog)
    }

    fn delete_movie(&self, title: &str) -> Result<Movie> {
        let mut catalog = self.load()?;
        let movie = catalog.remove(title).ok_or_else(|| ReelError::not_found(title))?;

        self.save(&catalog)?;
        info!(path = %self.path.display(), title, "Movie deleted");

        Ok(movie)
    }

    fn update_movie(&self, title: &str, comment: &str) -> Result<Movie> {
        let mut catalog = self.load()?;
        let movie = catalog
            .get_mut(title)
            .ok_or_else(|| ReelError::not_found(title))?;
        movie.comment = comment_value(comment);
        let updated = movie.clone();

        self.save(&catalog)?;
        info!(path = %self.path.display(), title, "Movie comment updated");

        Ok(updated)
    }
}
