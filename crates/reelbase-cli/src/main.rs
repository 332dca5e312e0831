//! # Reelbase CLI
//!
//! Command-line interface for the Reelbase movie catalog.
//!
//! ## Commands
//!
//! - `reel list` - List every movie with its rating and year
//! - `reel add <title>` - Look a movie up on OMDb and add it
//! - `reel delete <title>` - Remove a movie
//! - `reel update <title> <comment>` - Set a movie's comment
//! - `reel search <query>` - Search titles, suggesting close matches
//! - `reel sorted` - List movies by rating, best first
//! - `reel stats` - Average, median, best and worst ratings
//! - `reel random` - Pick a movie for tonight
//! - `reel flag <title>` - Country code of a movie's first country
//!
//! ## Example Usage
//!
//! ```bash
//! # Use a CSV catalog instead of the default JSON one
//! reel --file ~/movies.csv add "The Matrix"
//!
//! # Misspelled searches still suggest titles
//! reel search "matirx"
//! ```

mod app;
mod commands;

use clap::{Parser, Subcommand};
use reelbase_core::ReelError;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Reelbase - Personal movie catalog
#[derive(Parser)]
#[command(name = "reel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Catalog file (.csv or .json); overrides the configured one
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all movies with rating and year
    #[command(alias = "ls")]
    List {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Look up a movie by title and add it
    Add {
        /// Title to look up
        title: String,

        /// OMDb API key; overrides the configured one
        #[arg(long, env = "REEL_OMDB_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },

    /// Delete a movie by its exact title
    #[command(alias = "rm")]
    Delete {
        /// Exact title
        title: String,
    },

    /// Set or replace the comment of a movie
    Update {
        /// Exact title
        title: String,

        /// New comment (empty clears it)
        comment: String,
    },

    /// Search titles, falling back to similar titles
    Search {
        /// Part of a movie title
        query: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// List movies from highest to lowest rating
    Sorted {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Show rating statistics
    Stats,

    /// Pick a random movie
    Random,

    /// Show the country code of a movie's first country
    Flag {
        /// Exact title
        title: String,
    },
}

#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => reelbase_core::Config::load_from(path)?,
        None => reelbase_core::Config::load()?,
    };

    // Setup logging
    let log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => config.general.log_level.as_str(),
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .init();

    let app = app::App::new(config, cli.file)?;

    // Execute command
    let result = match cli.command {
        Commands::List { output } => commands::list::run(&app, output),
        Commands::Add { title, api_key } => commands::add::run(&app, &title, api_key),
        Commands::Delete { title } => commands::delete::run(&app, &title),
        Commands::Update { title, comment } => commands::update::run(&app, &title, &comment),
        Commands::Search { query, output } => commands::search::run(&app, &query, output),
        Commands::Sorted { output } => commands::sorted::run(&app, output),
        Commands::Stats => commands::stats::run(&app),
        Commands::Random => commands::random::run(&app),
        Commands::Flag { title } => commands::flag::run(&app, &title),
    };

    // Catalog misses are reported, not treated as failures
    match result {
        Err(err) => match err.downcast_ref::<ReelError>() {
            Some(reel_err) if reel_err.is_user_facing() => {
                eprintln!("{}", reel_err);
                Ok(())
            }
            _ => Err(err),
        },
        ok => ok,
    }
}
