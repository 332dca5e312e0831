//! External movie lookup.
//!
//! Stores never talk to the network directly: adding a movie goes through a
//! `MovieLookup`, which resolves a free-text title into the fields of a new
//! record. `OmdbClient` is the production implementation; `StaticLookup`
//! answers from memory.

use crate::config::OmdbConfig;
use crate::error::{ReelError, Result};
use crate::types::Movie;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Fields returned by a lookup, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupRecord {
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub imdb_id: String,
    /// Comma-separated country list, as the service returns it
    pub country: String,
    pub poster: String,
}

impl LookupRecord {
    /// Build the catalog record: countries normalized, no comment.
    pub fn into_movie(self) -> Movie {
        Movie::new(
            self.title,
            self.rating,
            self.year,
            self.imdb_id,
            &self.country,
            self.poster,
        )
    }
}

/// Resolves a title to movie data.
pub trait MovieLookup {
    /// Look up a movie by title.
    ///
    /// Returns `Ok(None)` when the service has no such movie and
    /// `LookupUnavailable` when the service could not be asked.
    fn find_by_title(&self, title: &str) -> Result<Option<LookupRecord>>;
}

/// Client for the OMDb API.
#[derive(Debug, Clone)]
pub struct OmdbClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    /// Create a client from configuration.
    ///
    /// Fails with `ConfigError` if no API key is configured.
    pub fn new(config: &OmdbConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ReelError::ConfigError {
                reason: "no OMDb API key configured (set omdb.api_key or REEL_OMDB_API_KEY)"
                    .to_string(),
            })?;

        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("reelbase/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ReelError::ConfigError {
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(OmdbClient {
            http,
            base_url: config.base_url.clone(),
            api_key,
        })
    }
}

impl MovieLookup for OmdbClient {
    fn find_by_title(&self, title: &str) -> Result<Option<LookupRecord>> {
        debug!(title, "Querying OMDb");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(ReelError::lookup)?;

        let body: OmdbResponse = response.json().map_err(ReelError::lookup)?;
        body.into_record()
    }
}

/// Raw OMDb payload. Everything but `Response` is absent on a miss.
#[derive(Debug, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "imdbRating")]
    rating: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Country")]
    country: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

impl OmdbResponse {
    fn into_record(self) -> Result<Option<LookupRecord>> {
        if !self.response.eq_ignore_ascii_case("true") {
            debug!(error = ?self.error, "OMDb reported no match");
            return Ok(None);
        }

        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ReelError::lookup("response is missing Title"))?;
        let year = parse_year(self.year.as_deref().unwrap_or_default())
            .ok_or_else(|| ReelError::lookup(format!("unreadable year for {}", title)))?;
        let rating = parse_rating(self.rating.as_deref().unwrap_or("N/A"))
            .ok_or_else(|| ReelError::lookup(format!("unreadable rating for {}", title)))?;

        Ok(Some(LookupRecord {
            title,
            year,
            rating,
            imdb_id: self.imdb_id.unwrap_or_default(),
            country: self.country.unwrap_or_default(),
            poster: self.poster.unwrap_or_default(),
        }))
    }
}

/// Leading four-digit year; series report ranges like "2008–2013".
fn parse_year(raw: &str) -> Option<i32> {
    let digits: String = raw.trim().chars().take_while(char::is_ascii_digit).collect();
    if digits.len() == 4 {
        digits.parse().ok()
    } else {
        None
    }
}

/// Unrated titles ("N/A") are stored as 0.0.
fn parse_rating(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("n/a") {
        warn!("Movie has no rating, storing 0.0");
        return Some(0.0);
    }
    raw.parse().ok().filter(|r: &f64| r.is_finite())
}

/// Lookup answering from an in-memory table, keyed case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct StaticLookup {
    records: HashMap<String, LookupRecord>,
}

impl StaticLookup {
    /// Create an empty lookup
    pub fn new() -> Self {
        StaticLookup::default()
    }

    /// Add a record, answering queries equal to its title
    pub fn with_record(mut self, record: LookupRecord) -> Self {
        self.records.insert(record.title.to_lowercase(), record);
        self
    }
}

impl MovieLookup for StaticLookup {
    fn find_by_title(&self, title: &str) -> Result<Option<LookupRecord>> {
        Ok(self.records.get(&title.trim().to_lowercase()).cloned())
    }
}
