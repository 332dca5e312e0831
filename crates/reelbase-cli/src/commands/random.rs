//! Random command - pick a movie for tonight.

use crate::app::App;
use reelbase_core::{stats::pick_random, MovieStore};
use std::time::{SystemTime, UNIX_EPOCH};

/// Run the random command.
pub fn run(app: &App) -> anyhow::Result<()> {
    let catalog = app.store.list_movies()?;

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();

    match pick_random(&catalog, seed) {
        Some(movie) => println!(
            "Your movie for tonight: {}, it's rated {}",
            movie.title, movie.rating
        ),
        None => println!("The catalog is empty."),
    }

    Ok(())
}
