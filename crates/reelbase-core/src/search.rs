//! Title search for Reelbase.
//!
//! Searching runs in two stages over a catalog snapshot:
//! - Exact stage: case-insensitive substring containment
//! - Fuzzy stage: edit-distance similarity, only when the exact stage is empty
//!
//! The fuzzy stage exists so a misspelled query still produces suggestions
//! instead of an empty answer.

use crate::types::Catalog;
use strsim::normalized_levenshtein;

/// Similarity a title must strictly exceed to be suggested.
pub const DEFAULT_THRESHOLD: u8 = 50;

/// Outcome of a title search.
#[derive(Debug, Clone, PartialEq)]
pub enum TitleMatch {
    /// Titles containing the query, paired with their rating
    Exact(Vec<(String, f64)>),

    /// Titles similar to the query
    Fuzzy(Vec<String>),

    /// Neither stage produced anything
    NoMatch,
}

impl TitleMatch {
    /// Returns true if nothing matched
    pub fn is_empty(&self) -> bool {
        matches!(self, TitleMatch::NoMatch)
    }

    /// Matched titles regardless of stage
    pub fn titles(&self) -> Vec<&str> {
        match self {
            TitleMatch::Exact(hits) => hits.iter().map(|(t, _)| t.as_str()).collect(),
            TitleMatch::Fuzzy(titles) => titles.iter().map(String::as_str).collect(),
            TitleMatch::NoMatch => Vec::new(),
        }
    }
}

/// Two-stage title matcher.
///
/// ## Example
///
/// ```rust
/// use reelbase_core::{Catalog, Movie, TitleMatch, TitleMatcher};
///
/// let catalog: Catalog = vec![Movie::new("Inception", 8.8, 2010, "tt1375666", "", "")]
///     .into_iter()
///     .collect();
///
/// let matcher = TitleMatcher::default();
/// assert!(matches!(matcher.match_titles("incepton", &catalog), TitleMatch::Fuzzy(_)));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TitleMatcher {
    threshold: u8,
}

impl Default for TitleMatcher {
    fn default() -> Self {
        TitleMatcher::new(DEFAULT_THRESHOLD)
    }
}

impl TitleMatcher {
    /// Create a matcher suggesting titles whose similarity exceeds `threshold`.
    pub fn new(threshold: u8) -> Self {
        TitleMatcher { threshold }
    }

    /// The configured fuzzy threshold
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Run both stages.
    ///
    /// The fuzzy stage only runs when the exact stage finds nothing.
    pub fn match_titles(&self, query: &str, catalog: &Catalog) -> TitleMatch {
        let exact = self.exact_matches(query, catalog);
        if !exact.is_empty() {
            return TitleMatch::Exact(exact);
        }

        let possible = self.possible_matches(query, catalog);
        if !possible.is_empty() {
            return TitleMatch::Fuzzy(possible);
        }

        TitleMatch::NoMatch
    }

    /// Titles whose lowercase form contains the lowercase query.
    pub fn exact_matches(&self, query: &str, catalog: &Catalog) -> Vec<(String, f64)> {
        let query_lower = query.to_lowercase();
        catalog
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&query_lower))
            .map(|m| (m.title.clone(), m.rating))
            .collect()
    }

    /// Titles whose similarity to the query exceeds the threshold.
    pub fn possible_matches(&self, query: &str, catalog: &Catalog) -> Vec<String> {
        let query_lower = query.to_lowercase();
        catalog
            .iter()
            .filter(|m| similarity(&query_lower, &m.title.to_lowercase()) > self.threshold)
            .map(|m| m.title.clone())
            .collect()
    }
}

/// Similarity of two strings on a 0-100 scale.
///
/// Based on Levenshtein distance normalized by the longer length, so it is
/// symmetric and 100 only for equal strings.
pub fn similarity(a: &str, b: &str) -> u8 {
    (normalized_levenshtein(a, b) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Movie;

    fn catalog(titles: &[(&str, f64)]) -> Catalog {
        titles
            .iter()
            .map(|(t, r)| Movie::new(*t, *r, 2000, "tt0000001", "", ""))
            .collect()
    }

    #[test]
    fn test_exact_stage_has_priority() {
        let catalog = catalog(&[("The Matrix", 8.7), ("Matrix Reloaded", 7.2)]);
        let result = TitleMatcher::default().match_titles("matrix", &catalog);

        assert_eq!(
            result,
            TitleMatch::Exact(vec![
                ("The Matrix".to_string(), 8.7),
                ("Matrix Reloaded".to_string(), 7.2),
            ])
        );
    }

    #[test]
    fn test_exact_is_case_insensitive() {
        let catalog = catalog(&[("The Matrix", 8.7)]);
        let hits = TitleMatcher::default().exact_matches("MATRIX", &catalog);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_exact_skips_fuzzy_candidates() {
        // "Heat" is close to "Heap" but "Heap Of Trouble" contains the query.
        let catalog = catalog(&[("Heat", 8.3), ("Heap Of Trouble", 5.0)]);
        let result = TitleMatcher::default().match_titles("heap", &catalog);
        assert_eq!(result.titles(), vec!["Heap Of Trouble"]);
    }

    #[test]
    fn test_fuzzy_fallback() {
        let catalog = catalog(&[("Inception", 8.8)]);
        let result = TitleMatcher::default().match_titles("incepton", &catalog);
        assert_eq!(result, TitleMatch::Fuzzy(vec!["Inception".to_string()]));
    }

    #[test]
    fn test_no_match() {
        let catalog = catalog(&[("Inception", 8.8), ("Heat", 8.3)]);
        let result = TitleMatcher::default().match_titles("zzzzzzzzzz", &catalog);
        assert!(result.is_empty());
        assert!(result.titles().is_empty());
    }

    #[test]
    fn test_threshold_is_strict() {
        // "abcd" vs "abxy": distance 2 over length 4 -> exactly 50.
        assert_eq!(similarity("abcd", "abxy"), 50);
        let catalog = catalog(&[("abxy", 1.0)]);
        assert!(TitleMatcher::new(50).possible_matches("abcd", &catalog).is_empty());
        assert_eq!(TitleMatcher::new(49).possible_matches("abcd", &catalog), vec!["abxy"]);
    }

    #[test]
    fn test_similarity_symmetric() {
        assert_eq!(similarity("incepton", "inception"), similarity("inception", "incepton"));
        assert_eq!(similarity("heat", "heat"), 100);
        assert_eq!(similarity("abc", "xyz"), 0);
    }

    #[test]
    fn test_empty_catalog() {
        let result = TitleMatcher::default().match_titles("anything", &Catalog::new());
        assert_eq!(result, TitleMatch::NoMatch);
    }
}
