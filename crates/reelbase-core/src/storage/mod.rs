//! Persistence layer for the movie catalog.
//!
//! A catalog lives in a single file whose extension picks the format:
//!
//! - `.csv`: one header row, then one row per movie (`CsvStore`)
//! - `.json`: one object mapping title to its fields (`JsonStore`)
//!
//! Both formats implement `MovieStore` and behave identically from the
//! caller's point of view. `Storage::open` is the only place the format is
//! chosen.
//!
//! ## Durability
//!
//! Whole-file rewrites go to a `.tmp` sibling first and are renamed over the
//! original, so an interrupted write leaves the previous file intact.

mod csv_store;
mod json_store;

pub use csv_store::CsvStore;
pub use json_store::JsonStore;

use crate::countries::CountryCodes;
use crate::error::{ReelError, Result};
use crate::lookup::MovieLookup;
use crate::types::{Catalog, Movie};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Operations every catalog format supports.
///
/// Reads always go to the file; nothing is cached between calls, so a
/// `Catalog` obtained before a mutation must be fetched again afterwards.
pub trait MovieStore {
    /// The backing file
    fn path(&self) -> &Path;

    /// Read every movie, keyed by title, in file order.
    fn list_movies(&self) -> Result<Catalog>;

    /// Persist `movie`, replacing any record with the same title.
    ///
    /// This is the write half of `add_movie`; it performs no duplicate check.
    fn insert_movie(&self, movie: &Movie) -> Result<()>;

    /// Remove the movie with this exact title and return it.
    fn delete_movie(&self, title: &str) -> Result<Movie>;

    /// Set the comment of the movie with this exact title and return the
    /// updated record. A blank comment clears it.
    fn update_movie(&self, title: &str, comment: &str) -> Result<Movie>;

    /// Resolve `query` through `lookup` and store the result.
    ///
    /// - no match: `NotFound`, nothing written
    /// - identical listing already stored: `DuplicateEntry`, nothing written
    /// - same title with different data: the stored record is replaced
    /// - otherwise the movie is added without a comment
    fn add_movie<L>(&self, query: &str, lookup: &L) -> Result<Movie>
    where
        L: MovieLookup + ?Sized,
    {
        let catalog = self.list_movies()?;

        let movie = lookup
            .find_by_title(query)?
            .ok_or_else(|| ReelError::not_found(query))?
            .into_movie();

        if let Some(existing) = catalog.get(&movie.title) {
            if existing.same_listing(&movie) {
                return Err(ReelError::DuplicateEntry { title: movie.title });
            }
            info!(title = %movie.title, "Replacing stored movie with fresh lookup data");
        }

        self.insert_movie(&movie)?;
        info!(
            path = %self.path().display(),
            title = %movie.title,
            year = movie.year,
            "Movie added"
        );

        Ok(movie)
    }

    /// Short code of the first country of a movie, e.g. "us".
    ///
    /// `None` when the movie is absent, has no country, or its first country
    /// is not in `countries`.
    fn get_country_id_flag(&self, title: &str, countries: &CountryCodes) -> Result<Option<String>> {
        let catalog = self.list_movies()?;
        Ok(catalog
            .get(title)
            .and_then(Movie::primary_country)
            .and_then(|country| countries.code_for(country))
            .map(str::to_string))
    }
}

/// Supported catalog formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFormat {
    Csv,
    Json,
}

impl StoreFormat {
    /// Pick the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("csv") => Ok(StoreFormat::Csv),
            Some("json") => Ok(StoreFormat::Json),
            _ => Err(ReelError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// A catalog store in whichever format its file uses.
///
/// ## Example
///
/// ```rust,ignore
/// use reelbase_core::{MovieStore, Storage};
///
/// let store = Storage::open("movies.csv")?;
/// for movie in &store.list_movies()? {
///     println!("{}", movie);
/// }
/// ```
#[derive(Debug)]
pub enum Storage {
    Csv(CsvStore),
    Json(JsonStore),
}

impl Storage {
    /// Open (creating if needed) the catalog at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match StoreFormat::from_path(path)? {
            StoreFormat::Csv => Ok(Storage::Csv(CsvStore::open(path)?)),
            StoreFormat::Json => Ok(Storage::Json(JsonStore::open(path)?)),
        }
    }

    /// The format of the opened file
    pub fn format(&self) -> StoreFormat {
        match self {
            Storage::Csv(_) => StoreFormat::Csv,
            Storage::Json(_) => StoreFormat::Json,
        }
    }
}

impl MovieStore for Storage {
    fn path(&self) -> &Path {
        match self {
            Storage::Csv(s) => s.path(),
            Storage::Json(s) => s.path(),
        }
    }

    fn list_movies(&self) -> Result<Catalog> {
        match self {
            Storage::Csv(s) => s.list_movies(),
            Storage::Json(s) => s.list_movies(),
        }
    }

    fn insert_movie(&self, movie: &Movie) -> Result<()> {
        match self {
            Storage::Csv(s) => s.insert_movie(movie),
            Storage::Json(s) => s.insert_movie(movie),
        }
    }

    fn delete_movie(&self, title: &str) -> Result<Movie> {
        match self {
            Storage::Csv(s) => s.delete_movie(title),
            Storage::Json(s) => s.delete_movie(title),
        }
    }

    fn update_movie(&self, title: &str, comment: &str) -> Result<Movie> {
        match self {
            Storage::Csv(s) => s.update_movie(title, comment),
            Storage::Json(s) => s.update_movie(title, comment),
        }
    }
}

/// Normalize a user comment: blank means "no comment".
pub(crate) fn comment_value(comment: &str) -> Option<String> {
    if comment.trim().is_empty() {
        None
    } else {
        Some(comment.to_string())
    }
}

/// Returns true if `path` must be initialized (missing or zero bytes).
pub(crate) fn needs_init(path: &Path) -> Result<bool> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.len() == 0),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(true),
        Err(e) => Err(ReelError::storage(path, e)),
    }
}

/// Path of the temporary file used while rewriting `path`.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Replace the contents of `path` atomically.
///
/// `write` fills a temporary sibling which is then renamed over `path`. On
/// any failure the temporary file is removed and `path` is left untouched.
pub(crate) fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ReelError::storage(path, e))?;
    }

    let temp_path = temp_path(path);
    let result = (|| {
        let file = File::create(&temp_path).map_err(|e| ReelError::storage(&temp_path, e))?;
        let mut writer = BufWriter::new(file);
        write(&mut writer)?;
        writer.flush().map_err(|e| ReelError::storage(&temp_path, e))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| ReelError::storage(&temp_path, e))?;
        fs::rename(&temp_path, path).map_err(|e| ReelError::storage(path, e))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    } else {
        debug!(path = %path.display(), "Catalog file replaced");
    }

    result
}
