//! Update command - set a movie's comment.

use crate::app::App;
use reelbase_core::MovieStore;

/// Run the update command.
pub fn run(app: &App, title: &str, comment: &str) -> anyhow::Result<()> {
    let movie = app.store.update_movie(title, comment)?;

    match movie.comment {
        Some(_) => println!("Movie {} successfully updated", movie.title),
        None => println!("Comment of {} cleared", movie.title),
    }

    Ok(())
}
