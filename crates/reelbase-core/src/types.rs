//! Core data types for Reelbase.
//!
//! This module defines the movie record and the catalog snapshot returned by
//! the stores. These types are format-agnostic: neither the CSV nor the JSON
//! layout leaks into them.

use std::fmt;

/// Country that is always listed first when a movie has several.
pub const PRIMARY_COUNTRY: &str = "United States";

/// Separator used when the country list is stored as a single string.
pub const COUNTRY_SEPARATOR: &str = ", ";

/// A single movie in the catalog.
///
/// The title is the identity of a record: it is unique within one store.
/// Everything except `comment` comes from the external lookup when the movie
/// is added.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    /// Display title, also the catalog key
    pub title: String,

    /// Rating, typically on a 0-10 scale
    pub rating: f64,

    /// Release year
    pub year: i32,

    /// External catalog identifier (e.g. "tt1375666")
    pub imdb_id: String,

    /// Production countries, "United States" first if present
    pub countries: Vec<String>,

    /// Poster URI or path
    pub poster: String,

    /// Free-text note set by the user
    pub comment: Option<String>,
}

impl Movie {
    /// Create a movie without a comment.
    ///
    /// The country list is normalized on the way in.
    pub fn new(
        title: impl Into<String>,
        rating: f64,
        year: i32,
        imdb_id: impl Into<String>,
        countries: &str,
        poster: impl Into<String>,
    ) -> Self {
        Movie {
            title: title.into(),
            rating,
            year,
            imdb_id: imdb_id.into(),
            countries: normalize_countries(countries),
            poster: poster.into(),
            comment: None,
        }
    }

    /// Set the comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// The country list as stored on disk ("United States, Germany")
    pub fn country_string(&self) -> String {
        self.countries.join(COUNTRY_SEPARATOR)
    }

    /// The first listed country, if any
    pub fn primary_country(&self) -> Option<&str> {
        self.countries.first().map(String::as_str)
    }

    /// Returns true if both records describe the same listing.
    ///
    /// Compares title, year, rating, identifier and countries as typed
    /// values. The comment is not part of the listing.
    pub fn same_listing(&self, other: &Movie) -> bool {
        self.title == other.title
            && self.year == other.year
            && self.rating == other.rating
            && self.imdb_id == other.imdb_id
            && self.countries == other.countries
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.title, self.year, self.rating)
    }
}

/// Split a comma-separated country string and move "United States" first.
///
/// Names are trimmed and empty entries dropped; the remaining order is kept.
pub fn normalize_countries(raw: &str) -> Vec<String> {
    let mut countries: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();

    if let Some(pos) = countries.iter().position(|c| c == PRIMARY_COUNTRY) {
        let us = countries.remove(pos);
        countries.insert(0, us);
    }

    countries
}

/// A read-only snapshot of every movie in a store.
///
/// Keyed by title and iterated in file order. Inserting a title that is
/// already present replaces the earlier record in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    movies: Vec<Movie>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Insert a movie, replacing any record with the same title.
    ///
    /// Returns the replaced record.
    pub fn insert(&mut self, movie: Movie) -> Option<Movie> {
        match self.position(&movie.title) {
            Some(pos) => Some(std::mem::replace(&mut self.movies[pos], movie)),
            None => {
                self.movies.push(movie);
                None
            }
        }
    }

    /// Remove the movie with this exact title
    pub fn remove(&mut self, title: &str) -> Option<Movie> {
        self.position(title).map(|pos| self.movies.remove(pos))
    }

    /// Look up a movie by exact title
    pub fn get(&self, title: &str) -> Option<&Movie> {
        self.movies.iter().find(|m| m.title == title)
    }

    /// Mutable lookup by exact title
    pub fn get_mut(&mut self, title: &str) -> Option<&mut Movie> {
        self.movies.iter_mut().find(|m| m.title == title)
    }

    /// Returns true if a movie with this exact title exists
    pub fn contains(&self, title: &str) -> bool {
        self.position(title).is_some()
    }

    /// Iterate over movies in snapshot order
    pub fn iter(&self) -> std::slice::Iter<'_, Movie> {
        self.movies.iter()
    }

    /// All titles in snapshot order
    pub fn titles(&self) -> Vec<&str> {
        self.movies.iter().map(|m| m.title.as_str()).collect()
    }

    /// All ratings in snapshot order
    pub fn ratings(&self) -> Vec<f64> {
        self.movies.iter().map(|m| m.rating).collect()
    }

    /// Number of movies
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// Returns true if the catalog holds no movies
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.movies.iter().position(|m| m.title == title)
    }
}

impl FromIterator<Movie> for Catalog {
    fn from_iter<I: IntoIterator<Item = Movie>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for movie in iter {
            catalog.insert(movie);
        }
        catalog
    }
}

impl IntoIterator for Catalog {
    type Item = Movie;
    type IntoIter = std::vec::IntoIter<Movie>;

    fn into_iter(self) -> Self::IntoIter {
        self.movies.into_iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Movie;
    type IntoIter = std::slice::Iter<'a, Movie>;

    fn into_iter(self) -> Self::IntoIter {
        self.movies.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, rating: f64) -> Movie {
        Movie::new(title, rating, 2000, "tt0000001", "France", "poster.jpg")
    }

    #[test]
    fn test_normalize_moves_us_first() {
        assert_eq!(
            normalize_countries("Germany, United States"),
            vec!["United States".to_string(), "Germany".to_string()]
        );
        assert_eq!(
            normalize_countries("United Kingdom, France, United States, Japan"),
            vec!["United States", "United Kingdom", "France", "Japan"]
        );
    }

    #[test]
    fn test_normalize_without_us() {
        assert_eq!(normalize_countries("France, Italy"), vec!["France", "Italy"]);
        assert_eq!(normalize_countries("Japan"), vec!["Japan"]);
        assert!(normalize_countries("").is_empty());
        assert!(normalize_countries(" , ").is_empty());
    }

    #[test]
    fn test_country_string() {
        let m = Movie::new("Heat", 8.3, 1995, "tt0113277", "Germany,United States", "");
        assert_eq!(m.country_string(), "United States, Germany");
        assert_eq!(m.primary_country(), Some("United States"));
    }

    #[test]
    fn test_same_listing_ignores_comment() {
        let a = movie("Amelie", 8.3);
        let b = movie("Amelie", 8.3).with_comment("lovely");
        assert!(a.same_listing(&b));

        let c = movie("Amelie", 8.2);
        assert!(!a.same_listing(&c));
    }

    #[test]
    fn test_catalog_insert_replaces_in_place() {
        let mut catalog = Catalog::new();
        catalog.insert(movie("A", 1.0));
        catalog.insert(movie("B", 2.0));
        let old = catalog.insert(movie("A", 3.0));

        assert_eq!(old.map(|m| m.rating), Some(1.0));
        assert_eq!(catalog.titles(), vec!["A", "B"]);
        assert_eq!(catalog.get("A").map(|m| m.rating), Some(3.0));
    }

    #[test]
    fn test_catalog_remove() {
        let mut catalog: Catalog = vec![movie("A", 1.0), movie("B", 2.0)].into_iter().collect();
        assert!(catalog.remove("A").is_some());
        assert!(catalog.remove("A").is_none());
        assert_eq!(catalog.len(), 1);
        assert!(!catalog.contains("A"));
        assert!(catalog.contains("B"));
    }
}
