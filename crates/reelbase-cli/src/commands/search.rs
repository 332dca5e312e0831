//! Search command - find titles, suggesting close matches on a miss.

use crate::app::App;
use crate::OutputFormat;
use reelbase_core::{MovieStore, TitleMatch};
use tracing::debug;

/// Run the search command.
pub fn run(app: &App, query: &str, output: OutputFormat) -> anyhow::Result<()> {
    let catalog = app.store.list_movies()?;
    let query = query.trim().to_lowercase();
    let matcher = app.matcher();
    debug!(query = %query, threshold = matcher.threshold(), "Searching catalog");
    let result = matcher.match_titles(&query, &catalog);

    match output {
        OutputFormat::Text => match result {
            TitleMatch::Exact(hits) => {
                for (title, rating) in hits {
                    println!("{}, {}", title, rating);
                }
            }
            TitleMatch::Fuzzy(titles) => {
                println!("The movie \"{}\" does not exist. Did you mean:", query);
                for title in titles {
                    println!("{}", title);
                }
            }
            TitleMatch::NoMatch => eprintln!("No movies matched your search"),
        },
        OutputFormat::Json => {
            let json = match result {
                TitleMatch::Exact(hits) => serde_json::json!({
                    "stage": "exact",
                    "matches": hits
                        .iter()
                        .map(|(title, rating)| serde_json::json!({ "title": title, "rating": rating }))
                        .collect::<Vec<_>>(),
                }),
                TitleMatch::Fuzzy(titles) => serde_json::json!({
                    "stage": "fuzzy",
                    "matches": titles
                        .iter()
                        .map(|title| serde_json::json!({ "title": title }))
                        .collect::<Vec<_>>(),
                }),
                TitleMatch::NoMatch => serde_json::json!({ "stage": "none", "matches": [] }),
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}
