//! Delete command - remove a movie by title.

use crate::app::App;
use reelbase_core::MovieStore;

/// Run the delete command.
pub fn run(app: &App, title: &str) -> anyhow::Result<()> {
    let movie = app.store.delete_movie(title)?;
    println!("{} has been deleted.", movie.title);
    Ok(())
}
