//! Stats command - rating summary.

use crate::app::App;
use reelbase_core::{CatalogStats, MovieStore};

/// Run the stats command.
pub fn run(app: &App) -> anyhow::Result<()> {
    let catalog = app.store.list_movies()?;

    let Some(stats) = CatalogStats::compute(&catalog) else {
        println!("The catalog is empty.");
        return Ok(());
    };

    println!("Movies:         {}", stats.count);
    println!("Average rating: {:.1}", stats.average);
    println!("Median rating:  {:.1}", stats.median);
    println!("Best movie:     {}, {}", stats.best.title, stats.best.rating);
    println!("Worst movie:    {}, {}", stats.worst.title, stats.worst.rating);

    Ok(())
}
