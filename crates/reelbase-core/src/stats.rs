//! Rating statistics and orderings over a catalog snapshot.

use crate::types::{Catalog, Movie};

/// Summary of the ratings in a catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogStats {
    /// Number of movies
    pub count: usize,

    /// Mean rating rounded to one decimal
    pub average: f64,

    /// Median rating
    pub median: f64,

    /// Highest rated movie (earliest wins ties)
    pub best: Movie,

    /// Lowest rated movie (earliest wins ties)
    pub worst: Movie,
}

impl CatalogStats {
    /// Compute statistics, or `None` for an empty catalog.
    pub fn compute(catalog: &Catalog) -> Option<Self> {
        let first = catalog.iter().next()?;

        let mut best = first;
        let mut worst = first;
        for movie in catalog.iter().skip(1) {
            if movie.rating > best.rating {
                best = movie;
            }
            if movie.rating < worst.rating {
                worst = movie;
            }
        }

        let ratings = catalog.ratings();
        let sum: f64 = ratings.iter().sum();
        let average = round1(sum / ratings.len() as f64);

        Some(CatalogStats {
            count: ratings.len(),
            average,
            median: median(ratings),
            best: best.clone(),
            worst: worst.clone(),
        })
    }
}

/// Movies ordered from highest to lowest rating; ties keep snapshot order.
pub fn sorted_by_rating(catalog: &Catalog) -> Vec<&Movie> {
    let mut movies: Vec<&Movie> = catalog.iter().collect();
    movies.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    movies
}

/// Pick a movie using `seed`. The same seed always picks the same movie.
pub fn pick_random(catalog: &Catalog, seed: u64) -> Option<&Movie> {
    if catalog.is_empty() {
        return None;
    }
    // splitmix64 finalizer so nearby seeds spread across the catalog
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^= z >> 31;

    catalog.iter().nth((z % catalog.len() as u64) as usize)
}

fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(entries: &[(&str, f64)]) -> Catalog {
        entries
            .iter()
            .map(|(t, r)| Movie::new(*t, *r, 2000, "tt0000001", "", ""))
            .collect()
    }

    #[test]
    fn test_stats() {
        let catalog = catalog(&[("A", 7.0), ("B", 9.0), ("C", 5.5), ("D", 8.2)]);
        let stats = CatalogStats::compute(&catalog).unwrap();

        assert_eq!(stats.count, 4);
        assert_eq!(stats.average, 7.4);
        assert_eq!(stats.median, 7.6);
        assert_eq!(stats.best.title, "B");
        assert_eq!(stats.worst.title, "C");
    }

    #[test]
    fn test_stats_odd_count_and_ties() {
        let catalog = catalog(&[("A", 8.0), ("B", 8.0), ("C", 6.0)]);
        let stats = CatalogStats::compute(&catalog).unwrap();

        assert_eq!(stats.median, 8.0);
        assert_eq!(stats.best.title, "A");
        assert_eq!(stats.worst.title, "C");
    }

    #[test]
    fn test_stats_empty() {
        assert!(CatalogStats::compute(&Catalog::new()).is_none());
    }

    #[test]
    fn test_sorted_by_rating() {
        let catalog = catalog(&[("A", 7.0), ("B", 9.0), ("C", 7.0)]);
        let titles: Vec<&str> = sorted_by_rating(&catalog)
            .iter()
            .map(|m| m.title.as_str())
            .collect();
        assert_eq!(titles, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_pick_random_deterministic() {
        let catalog = catalog(&[("A", 1.0), ("B", 2.0), ("C", 3.0)]);
        let first = pick_random(&catalog, 42).map(|m| m.title.clone());
        let again = pick_random(&catalog, 42).map(|m| m.title.clone());
        assert!(first.is_some());
        assert_eq!(first, again);
        assert!(pick_random(&Catalog::new(), 42).is_none());
    }
}
