//! Behavior shared by every catalog format.
//!
//! Each check runs against a CSV and a JSON store opened through
//! `Storage::open`, the same entry point the CLI uses.

use reelbase_core::{
    CountryCodes, LookupRecord, MovieLookup, MovieStore, ReelError, Result, StaticLookup,
    Storage,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const FORMATS: [&str; 2] = ["csv", "json"];

fn record(title: &str, year: i32, rating: f64, id: &str, country: &str) -> LookupRecord {
    LookupRecord {
        title: title.to_string(),
        year,
        rating,
        imdb_id: id.to_string(),
        country: country.to_string(),
        poster: format!("https://posters.example/{}.jpg", id),
    }
}

fn lookup() -> StaticLookup {
    StaticLookup::new()
        .with_record(record("Inception", 2010, 8.8, "tt1375666", "United Kingdom, United States"))
        .with_record(record("Heat", 1995, 8.3, "tt0113277", "United States"))
        .with_record(record("Amelie", 2001, 8.3, "tt0211915", "France, Germany"))
        .with_record(record("Run Lola Run", 1998, 7.7, "tt0130827", "Germany, United States"))
}

fn store_path(dir: &TempDir, format: &str) -> PathBuf {
    dir.path().join(format!("movies.{}", format))
}

/// A store pre-populated with Inception, Heat and Amelie.
fn populated(dir: &TempDir, format: &str) -> Storage {
    let store = Storage::open(store_path(dir, format)).unwrap();
    let lookup = lookup();
    for title in ["Inception", "Heat", "Amelie"] {
        store.add_movie(title, &lookup).unwrap();
    }
    store
}

struct FailingLookup;

impl MovieLookup for FailingLookup {
    fn find_by_title(&self, _title: &str) -> Result<Option<LookupRecord>> {
        Err(ReelError::LookupUnavailable {
            reason: "connection refused".to_string(),
        })
    }
}

#[test]
fn round_trip_preserves_every_field() {
    for format in FORMATS {
        let dir = TempDir::new().unwrap();
        let store = populated(&dir, format);
        store.update_movie("Heat", "De Niro, \"Pacino\" and a diner").unwrap();

        let reopened = Storage::open(store_path(&dir, format)).unwrap();
        let catalog = reopened.list_movies().unwrap();

        assert_eq!(catalog.len(), 3, "{}", format);
        let heat = catalog.get("Heat").unwrap();
        assert_eq!(heat.year, 1995);
        assert_eq!(heat.rating, 8.3);
        assert_eq!(heat.imdb_id, "tt0113277");
        assert_eq!(heat.countries, vec!["United States"]);
        assert_eq!(heat.poster, "https://posters.example/tt0113277.jpg");
        assert_eq!(heat.comment.as_deref(), Some("De Niro, \"Pacino\" and a diner"));

        let inception = catalog.get("Inception").unwrap();
        assert_eq!(inception.rating, 8.8);
        assert!(inception.comment.is_none(), "{}", format);
    }
}

#[test]
fn open_is_idempotent_and_non_destructive() {
    for format in FORMATS {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir, format);

        let first = Storage::open(&path).unwrap();
        assert!(first.list_movies().unwrap().is_empty());
        let second = Storage::open(&path).unwrap();
        assert!(second.list_movies().unwrap().is_empty());

        second.add_movie("heat", &lookup()).unwrap();
        let before = fs::read(&path).unwrap();
        Storage::open(&path).unwrap();
        assert_eq!(fs::read(&path).unwrap(), before, "{}", format);
    }
}

#[test]
fn open_creates_parent_directories() {
    for format in FORMATS {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(format!("movies.{}", format));

        let store = Storage::open(&path).unwrap();
        assert!(path.exists());
        assert!(store.list_movies().unwrap().is_empty());
    }
}

#[test]
fn adding_duplicate_is_rejected() {
    for format in FORMATS {
        let dir = TempDir::new().unwrap();
        let store = populated(&dir, format);
        let before = fs::read(store_path(&dir, format)).unwrap();

        let result = store.add_movie("Heat", &lookup());
        assert!(matches!(result, Err(ReelError::DuplicateEntry { .. })), "{}", format);
        assert_eq!(fs::read(store_path(&dir, format)).unwrap(), before);
        assert_eq!(store.list_movies().unwrap().len(), 3);
    }
}

#[test]
fn adding_changed_listing_replaces_record() {
    for format in FORMATS {
        let dir = TempDir::new().unwrap();
        let store = populated(&dir, format);

        let rerated = StaticLookup::new().with_record(record(
            "Heat",
            1995,
            8.4,
            "tt0113277",
            "United States",
        ));
        store.add_movie("Heat", &rerated).unwrap();

        let catalog = store.list_movies().unwrap();
        assert_eq!(catalog.len(), 3, "{}", format);
        assert_eq!(catalog.get("Heat").unwrap().rating, 8.4);
    }
}

#[test]
fn adding_unknown_title_reports_not_found() {
    for format in FORMATS {
        let dir = TempDir::new().unwrap();
        let store = populated(&dir, format);

        let result = store.add_movie("Not A Real Movie", &lookup());
        assert!(matches!(result, Err(ReelError::NotFound { .. })), "{}", format);
        assert_eq!(store.list_movies().unwrap().len(), 3);
    }
}

#[test]
fn lookup_failure_leaves_store_untouched() {
    for format in FORMATS {
        let dir = TempDir::new().unwrap();
        let store = populated(&dir, format);
        let before = fs::read(store_path(&dir, format)).unwrap();

        let result = store.add_movie("Ronin", &FailingLookup);
        assert!(matches!(result, Err(ReelError::LookupUnavailable { .. })));
        assert!(result.unwrap_err().is_user_facing());
        assert_eq!(fs::read(store_path(&dir, format)).unwrap(), before, "{}", format);
    }
}

#[test]
fn countries_are_stored_us_first() {
    for format in FORMATS {
        let dir = TempDir::new().unwrap();
        let store = Storage::open(store_path(&dir, format)).unwrap();

        let added = store.add_movie("run lola run", &lookup()).unwrap();
        assert_eq!(added.country_string(), "United States, Germany");

        let contents = fs::read_to_string(store_path(&dir, format)).unwrap();
        assert!(contents.contains("United States, Germany"), "{}", format);
        assert!(!contents.contains("Germany, United States"), "{}", format);
    }
}

#[test]
fn delete_removes_exactly_one_entry() {
    for format in FORMATS {
        let dir = TempDir::new().unwrap();
        let store = populated(&dir, format);
        store.update_movie("Amelie", "charming").unwrap();
        let before = store.list_movies().unwrap();

        let deleted = store.delete_movie("Heat").unwrap();
        assert_eq!(deleted.title, "Heat");

        let after = store.list_movies().unwrap();
        assert_eq!(after.titles(), vec!["Inception", "Amelie"], "{}", format);
        assert_eq!(after.get("Inception"), before.get("Inception"));
        assert_eq!(after.get("Amelie"), before.get("Amelie"));
        assert_eq!(after.get("Amelie").unwrap().comment.as_deref(), Some("charming"));

        let tmp = PathBuf::from(format!("{}.tmp", store_path(&dir, format).display()));
        assert!(!tmp.exists());
    }
}

#[test]
fn csv_delete_keeps_other_rows_byte_for_byte() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir, "csv");
    let store = populated(&dir, "csv");
    store.update_movie("Amelie", "say \"bonjour\", then leave").unwrap();

    let before = fs::read_to_string(&path).unwrap();
    store.delete_movie("Heat").unwrap();
    let after = fs::read_to_string(&path).unwrap();

    let expected: Vec<&str> = before.lines().filter(|l| !l.starts_with("Heat,")).collect();
    assert_eq!(after.lines().collect::<Vec<_>>(), expected);
}

#[test]
fn csv_delete_keeps_crlf_rows_byte_for_byte() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir, "csv");
    let amelie = "Amelie,2001,8.3,tt0211915,France,,a.jpg\r\n";
    fs::write(
        &path,
        format!(
            "title,year,rating,id,country,comment,poster\r\nHeat,1995,8.3,tt0113277,United States,,h.jpg\r\n{}",
            amelie
        ),
    )
    .unwrap();

    let store = Storage::open(&path).unwrap();
    store.delete_movie("Heat").unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        format!("title,year,rating,id,country,comment,poster\r\n{}", amelie)
    );
}

#[test]
fn csv_add_after_row_without_final_newline() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir, "csv");
    fs::write(
        &path,
        "title,year,rating,id,country,comment,poster\nHeat,1995,8.3,tt0113277,United States,,h.jpg",
    )
    .unwrap();

    let store = Storage::open(&path).unwrap();
    let added = store.add_movie("Inception", &lookup()).unwrap();
    assert_eq!(added.title, "Inception");

    let catalog = store.list_movies().unwrap();
    assert_eq!(catalog.titles(), vec!["Heat", "Inception"]);
    assert_eq!(catalog.get("Heat").unwrap().poster, "h.jpg");
}

#[test]
fn delete_missing_title_reports_not_found() {
    for format in FORMATS {
        let dir = TempDir::new().unwrap();
        let store = populated(&dir, format);
        let before = fs::read(store_path(&dir, format)).unwrap();

        let result = store.delete_movie("heat");
        assert!(matches!(result, Err(ReelError::NotFound { .. })), "{}", format);
        assert_eq!(fs::read(store_path(&dir, format)).unwrap(), before);
    }
}

#[test]
fn update_changes_only_the_comment() {
    for format in FORMATS {
        let dir = TempDir::new().unwrap();
        let store = populated(&dir, format);
        let before = store.list_movies().unwrap();

        let updated = store.update_movie("Inception", "dream within a dream").unwrap();
        assert_eq!(updated.comment.as_deref(), Some("dream within a dream"));

        let after = store.list_movies().unwrap();
        let (old, new) = (before.get("Inception").unwrap(), after.get("Inception").unwrap());
        assert!(old.same_listing(new), "{}", format);
        assert_eq!(old.poster, new.poster);
        assert_eq!(new.comment.as_deref(), Some("dream within a dream"));
        assert_eq!(after.get("Heat"), before.get("Heat"));
        assert_eq!(after.get("Amelie"), before.get("Amelie"));
        assert_eq!(after.titles(), before.titles());
    }
}

#[test]
fn blank_update_clears_comment() {
    for format in FORMATS {
        let dir = TempDir::new().unwrap();
        let store = populated(&dir, format);

        store.update_movie("Heat", "tense").unwrap();
        store.update_movie("Heat", "   ").unwrap();

        let catalog = store.list_movies().unwrap();
        assert!(catalog.get("Heat").unwrap().comment.is_none(), "{}", format);
    }
}

#[test]
fn update_missing_title_reports_not_found() {
    for format in FORMATS {
        let dir = TempDir::new().unwrap();
        let store = populated(&dir, format);

        let result = store.update_movie("Ronin", "never added");
        assert!(matches!(result, Err(ReelError::NotFound { .. })), "{}", format);
    }
}

#[test]
fn country_flag_uses_first_country() {
    let countries = CountryCodes::bundled().unwrap();
    for format in FORMATS {
        let dir = TempDir::new().unwrap();
        let store = populated(&dir, format);

        assert_eq!(
            store.get_country_id_flag("Inception", &countries).unwrap().as_deref(),
            Some("us")
        );
        assert_eq!(
            store.get_country_id_flag("Amelie", &countries).unwrap().as_deref(),
            Some("fr")
        );
        assert_eq!(store.get_country_id_flag("Ronin", &countries).unwrap(), None);
    }
}

#[test]
fn country_flag_without_mapping_is_none() {
    let countries = CountryCodes::bundled().unwrap();
    let unmapped = StaticLookup::new().with_record(record("Oz", 1939, 8.1, "tt0032138", "Freedonia"));

    for format in FORMATS {
        let dir = TempDir::new().unwrap();
        let store = Storage::open(store_path(&dir, format)).unwrap();
        store.add_movie("Oz", &unmapped).unwrap();

        assert_eq!(store.get_country_id_flag("Oz", &countries).unwrap(), None, "{}", format);
    }
}
