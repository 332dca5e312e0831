//! List command - show every movie in the catalog.

use crate::app::App;
use crate::OutputFormat;
use reelbase_core::{Movie, MovieStore};

/// Run the list command.
pub fn run(app: &App, output: OutputFormat) -> anyhow::Result<()> {
    let catalog = app.store.list_movies()?;

    match output {
        OutputFormat::Text => {
            println!("{} movies in total", catalog.len());
            for movie in &catalog {
                println!("{}: {}, {}", movie.title, movie.rating, movie.year);
            }
        }
        OutputFormat::Json => {
            let json_movies: Vec<serde_json::Value> = catalog.iter().map(movie_json).collect();
            println!("{}", serde_json::to_string_pretty(&json_movies)?);
        }
    }

    Ok(())
}

/// JSON view of a movie shared by the listing commands.
pub fn movie_json(movie: &Movie) -> serde_json::Value {
    serde_json::json!({
        "title": movie.title,
        "year": movie.year,
        "rating": movie.rating,
        "id": movie.imdb_id,
        "countries": movie.countries,
        "poster": movie.poster,
        "comment": movie.comment,
    })
}
