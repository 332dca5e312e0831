//! Delimited-text catalog.
//!
//! ```text
//! title,year,rating,id,country,comment,poster
//! Inception,2010,8.8,tt1375666,"United States, United Kingdom",,https://...
//! ```
//!
//! Rows are read by header name, so files whose columns are in a different
//! order still load. Rewrites copy untouched rows field-for-field instead of
//! reformatting them, and keep the file's line ending (`\n` or `\r\n`).

use super::{comment_value, needs_init, write_atomically, MovieStore};
use crate::error::{ReelError, Result};
use crate::types::{normalize_countries, Catalog, Movie};
use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use serde::Deserialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Columns written to new files, in order.
pub const HEADER: [&str; 7] = ["title", "year", "rating", "id", "country", "comment", "poster"];

/// One row as read from disk.
#[derive(Debug, Deserialize)]
struct CsvRow {
    title: String,
    year: i32,
    rating: f64,
    id: String,
    country: String,
    #[serde(default)]
    comment: String,
    poster: String,
}

impl From<CsvRow> for Movie {
    fn from(row: CsvRow) -> Self {
        Movie {
            title: row.title,
            rating: row.rating,
            year: row.year,
            imdb_id: row.id,
            countries: normalize_countries(&row.country),
            poster: row.poster,
            comment: comment_value(&row.comment),
        }
    }
}

/// A catalog file as stored, plus the layout needed to write it back.
struct RawCsv {
    headers: StringRecord,
    rows: Vec<StringRecord>,
    /// Rows end in `\r\n` rather than `\n`
    crlf: bool,
    /// The last byte is a line terminator (or the file is empty)
    terminated: bool,
}

impl RawCsv {
    fn terminator(&self) -> &'static [u8] {
        if self.crlf {
            b"\r\n"
        } else {
            b"\n"
        }
    }
}

/// Row writer using the given line ending.
fn row_writer<W: Write>(writer: W, crlf: bool) -> csv::Writer<W> {
    let mut builder = WriterBuilder::new();
    builder.has_headers(false);
    if crlf {
        builder.terminator(Terminator::CRLF);
    }
    builder.from_writer(writer)
}

/// Catalog stored as a CSV file.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    /// Open the catalog at `path`, writing a header-only file if it is
    /// missing or empty. Existing content is never modified.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let store = CsvStore {
            path: path.as_ref().to_path_buf(),
        };

        if needs_init(&store.path)? {
            info!(path = %store.path.display(), "Creating empty CSV catalog");
            write_atomically(&store.path, |w| {
                let mut writer = WriterBuilder::new().from_writer(w);
                writer.write_record(HEADER).map_err(|e| store.write_err(e))?;
                writer.flush().map_err(|e| store.write_err(e))
            })?;
        }

        Ok(store)
    }

    /// Header and raw rows exactly as stored.
    fn read_raw(&self) -> Result<RawCsv> {
        let bytes = fs::read(&self.path).map_err(|e| ReelError::storage(&self.path, e))?;
        let crlf = bytes
            .iter()
            .position(|&b| b == b'\n')
            .map_or(false, |pos| pos > 0 && bytes[pos - 1] == b'\r');
        let terminated = bytes.last().map_or(true, |&b| b == b'\n');

        let mut reader = ReaderBuilder::new().from_reader(bytes.as_slice());
        let headers = reader.headers().map_err(|e| self.read_err(e))?.clone();
        let rows = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| self.read_err(e))?;

        Ok(RawCsv {
            headers,
            rows,
            crlf,
            terminated,
        })
    }

    /// Write the header and rows through a temporary file.
    fn rewrite(&self, raw: &RawCsv) -> Result<()> {
        write_atomically(&self.path, |w| {
            let mut writer = row_writer(w, raw.crlf);
            writer.write_record(&raw.headers).map_err(|e| self.write_err(e))?;
            for row in &raw.rows {
                writer.write_record(row).map_err(|e| self.write_err(e))?;
            }
            writer.flush().map_err(|e| self.write_err(e))
        })
    }

    fn parse_row(&self, headers: &StringRecord, row: &StringRecord) -> Result<Movie> {
        row.deserialize::<CsvRow>(Some(headers))
            .map(Movie::from)
            .map_err(|e| ReelError::corrupt(&self.path, e))
    }

    fn column(&self, headers: &StringRecord, name: &str) -> Result<usize> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| ReelError::corrupt(&self.path, format!("missing column \"{}\"", name)))
    }

    /// Render a movie as a row matching the file's column order.
    fn movie_row(&self, headers: &StringRecord, movie: &Movie) -> Result<StringRecord> {
        // Every known column must exist before a row is written.
        for name in HEADER {
            self.column(headers, name)?;
        }

        let country = movie.country_string();
        let comment = movie.comment.clone().unwrap_or_default();
        let rating = movie.rating.to_string();
        let year = movie.year.to_string();

        Ok(headers
            .iter()
            .map(|h| match h.trim() {
                "title" => movie.title.as_str(),
                "year" => year.as_str(),
                "rating" => rating.as_str(),
                "id" => movie.imdb_id.as_str(),
                "country" => country.as_str(),
                "comment" => comment.as_str(),
                "poster" => movie.poster.as_str(),
                _ => "",
            })
            .collect())
    }

    fn read_err(&self, err: csv::Error) -> ReelError {
        if err.is_io_error() {
            ReelError::storage(&self.path, err)
        } else {
            ReelError::corrupt(&self.path, err)
        }
    }

    fn write_err(&self, err: impl ToString) -> ReelError {
        ReelError::storage(&self.path, err)
    }
}

impl MovieStore for CsvStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn list_movies(&self) -> Result<Catalog> {
        let raw = self.read_raw()?;

        let mut catalog = Catalog::new();
        for row in &raw.rows {
            catalog.insert(self.parse_row(&raw.headers, row)?);
        }

        debug!(path = %self.path.display(), movies = catalog.len(), "Read CSV catalog");
        Ok(catalog)
    }

    fn insert_movie(&self, movie: &Movie) -> Result<()> {
        let mut raw = self.read_raw()?;
        let title_col = self.column(&raw.headers, "title")?;
        let new_row = self.movie_row(&raw.headers, movie)?;

        let existing = raw
            .rows
            .iter()
            .position(|r| r.get(title_col) == Some(movie.title.as_str()));

        match existing {
            Some(pos) => {
                // Keep the title unique: replace the first row, drop the rest.
                raw.rows[pos] = new_row;
                let mut seen = false;
                raw.rows.retain(|r| {
                    if r.get(title_col) != Some(movie.title.as_str()) {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                });
                self.rewrite(&raw)
            }
            None => {
                let mut file = OpenOptions::new()
                    .append(true)
                    .open(&self.path)
                    .map_err(|e| self.write_err(e))?;
                if !raw.terminated {
                    // Last row has no line ending; the new row must not join it.
                    file.write_all(raw.terminator()).map_err(|e| self.write_err(e))?;
                }
                let mut writer = row_writer(file, raw.crlf);
                writer.write_record(&new_row).map_err(|e| self.write_err(e))?;
                writer.flush().map_err(|e| self.write_err(e))
            }
        }
    }

    fn delete_movie(&self, title: &str) -> Result<Movie> {
        let mut raw = self.read_raw()?;
        let title_col = self.column(&raw.headers, "title")?;

        let (removed, kept): (Vec<StringRecord>, Vec<StringRecord>) =
            std::mem::take(&mut raw.rows)
                .into_iter()
                .partition(|r| r.get(title_col) == Some(title));

        let last = removed.last().ok_or_else(|| ReelError::not_found(title))?;
        let movie = self.parse_row(&raw.headers, last)?;

        raw.rows = kept;
        self.rewrite(&raw)?;
        info!(path = %self.path.display(), title, "Movie deleted");

        Ok(movie)
    }

    fn update_movie(&self, title: &str, comment: &str) -> Result<Movie> {
        let mut raw = self.read_raw()?;
        let title_col = self.column(&raw.headers, "title")?;
        let comment_col = self.column(&raw.headers, "comment")?;
        let comment = comment_value(comment).unwrap_or_default();

        let mut updated = None;
        for row in raw.rows.iter_mut() {
            if row.get(title_col) != Some(title) {
                continue;
            }
            *row = row
                .iter()
                .enumerate()
                .map(|(i, field)| if i == comment_col { comment.as_str() } else { field })
                .collect();
            updated = Some(self.parse_row(&raw.headers, row)?);
        }

        let movie = updated.ok_or_else(|| ReelError::not_found(title))?;
        self.rewrite(&raw)?;
        info!(path = %self.path.display(), title, "Movie comment updated");

        Ok(movie)
    }
}
