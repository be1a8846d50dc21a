//! # Cinerank CLI (`cine`)
//!
//! The `cine` binary is the primary interface to the recommendation
//! service. It provides commands for searching the catalog, inspecting
//! titles and filter values, reporting catalog statistics, and starting
//! the JSON HTTP server.
//!
//! ## Usage
//!
//! ```bash
//! cine --config ./config/cinerank.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `cine search "<query>"` | Rank the catalog against a free-text query |
//! | `cine get <id>` | Print a full title record |
//! | `cine filters` | List available filter values |
//! | `cine stats` | Print catalog statistics |
//! | `cine serve` | Start the JSON HTTP server |
//!
//! ## Examples
//!
//! ```bash
//! # Top matches for a free-text query
//! cine search "romantic bollywood movie 2015"
//!
//! # Narrow by explicit filters
//! cine search "heist" --genre thriller --year 2019 --kind movie
//!
//! # Inspect one title
//! cine get 550
//!
//! # Serve the HTTP API
//! cine serve --config ./config/cinerank.toml
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cinerank::models::MediaType;
use cinerank::{config, get, search, server, stats};

/// Cinerank CLI — a TF-IDF movie and show recommendation service.
///
/// All commands accept a `--config` flag pointing to a TOML
/// configuration file. See `config/cinerank.example.toml`.
#[derive(Parser)]
#[command(
    name = "cine",
    about = "Cinerank — a TF-IDF movie and show recommendation service",
    version,
    long_about = "Cinerank loads a fixed catalog of movie and show records from a JSON dataset, \
    vectorizes it with TF-IDF, and ranks it against free-text queries by cosine similarity, \
    with optional genre/year/language/media-type filters. Results are served over a CLI \
    and a JSON HTTP API."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/cinerank.toml`. The dataset path,
    /// vectorizer, retrieval, and server settings are read from it.
    #[arg(long, global = true, default_value = "./config/cinerank.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Rank the catalog against a free-text query.
    ///
    /// Keywords inside the query (a year, a genre word, "bollywood",
    /// "web series", ...) become filters automatically; the flags below
    /// override them.
    Search {
        /// The query string.
        query: String,

        /// Maximum number of results (default from config).
        #[arg(long)]
        limit: Option<usize>,

        /// Only return titles with this genre.
        #[arg(long)]
        genre: Option<String>,

        /// Only return titles released in this year.
        #[arg(long)]
        year: Option<i32>,

        /// Only return titles in this language code (e.g. `en`, `hi`).
        #[arg(long)]
        language: Option<String>,

        /// Only return this media type: `movie` or `series`.
        #[arg(long)]
        kind: Option<MediaType>,
    },

    /// Print a full title record by id.
    Get {
        /// Title id (as found in search results).
        id: u64,
    },

    /// List the filter values present in the catalog.
    ///
    /// Shows which languages, genres, years, and media types a query
    /// can be narrowed by.
    Filters,

    /// Print catalog statistics.
    ///
    /// Title counts, media-type and region breakdowns, top genres, and
    /// the release-year span of the loaded dataset.
    Stats,

    /// Start the JSON HTTP server.
    ///
    /// Binds to the address configured in `[server].bind` and serves
    /// the recommendation and catalog read endpoints.
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Search {
            query,
            limit,
            genre,
            year,
            language,
            kind,
        } => {
            search::run_search(&cfg, &query, limit, genre, year, language, kind)?;
        }
        Commands::Get { id } => {
            get::run_get(&cfg, id)?;
        }
        Commands::Filters => {
            stats::run_filters(&cfg)?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg)?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
