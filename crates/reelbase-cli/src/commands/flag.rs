//! Flag command - country code of a movie's first country.

use crate::app::App;
use reelbase_core::MovieStore;

/// Run the flag command.
pub fn run(app: &App, title: &str) -> anyhow::Result<()> {
    let countries = app.countries()?;

    match app.store.get_country_id_flag(title, &countries)? {
        Some(code) => println!("{}", code),
        None => eprintln!("No country code found for {}", title),
    }

    Ok(())
}
