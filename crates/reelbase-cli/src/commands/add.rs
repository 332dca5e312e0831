//! Add command - look a movie up and store it.

use crate::app::App;
use reelbase_core::{MovieStore, OmdbClient};

/// Run the add command.
pub fn run(app: &App, title: &str, api_key: Option<String>) -> anyhow::Result<()> {
    let mut omdb = app.config.omdb.clone();
    if api_key.is_some() {
        omdb.api_key = api_key;
    }
    let client = OmdbClient::new(&omdb)?;

    let movie = app.store.add_movie(title, &client)?;
    println!("Movie {} ({}) successfully added", movie.title, movie.year);

    Ok(())
}
