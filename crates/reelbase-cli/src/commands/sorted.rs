//! Sorted command - movies by rating, best first.

use crate::app::App;
use crate::commands::list::movie_json;
use crate::OutputFormat;
use reelbase_core::{stats::sorted_by_rating, MovieStore};

/// Run the sorted command.
pub fn run(app: &App, output: OutputFormat) -> anyhow::Result<()> {
    let catalog = app.store.list_movies()?;
    let movies = sorted_by_rating(&catalog);

    match output {
        OutputFormat::Text => {
            for movie in movies {
                println!("{}: {}", movie.title, movie.rating);
            }
        }
        OutputFormat::Json => {
            let json_movies: Vec<serde_json::Value> =
                movies.into_iter().map(movie_json).collect();
            println!("{}", serde_json::to_string_pretty(&json_movies)?);
        }
    }

    Ok(())
}
