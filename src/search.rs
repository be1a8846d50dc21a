//! CLI search command.
//!
//! Loads the catalog, runs the recommendation pipeline, and prints a
//! ranked result list. Used by `cine search`; the HTTP server goes
//! through the same [`crate::recommend`] entry point.

use anyhow::Result;

use crate::catalog::{self, Catalog};
use crate::config::Config;
use crate::filters::{FilterCriteria, QueryScanner};
use crate::models::MediaType;
use crate::recommend::recommend;

pub fn run_search(
    config: &Config,
    query: &str,
    limit: Option<usize>,
    genre: Option<String>,
    year: Option<i32>,
    language: Option<String>,
    media_type: Option<MediaType>,
) -> Result<()> {
    let catalog = Catalog::load(&config.catalog.path, &config.vectorizer)?;
    let scanner = QueryScanner::new()?;

    let explicit = FilterCriteria {
        genre,
        year,
        year_range: None,
        languages: language.into_iter().collect(),
        media_type,
    };

    let final_limit = limit
        .unwrap_or(config.retrieval.final_limit)
        .clamp(1, config.retrieval.max_limit);

    let outcome = recommend(&catalog, &scanner, query, final_limit, explicit)?;

    if outcome.recommendations.is_empty() {
        println!("No results.");
        return Ok(());
    }

    if outcome.expanded_query != outcome.query {
        println!("query expanded to: \"{}\"", outcome.expanded_query);
        println!();
    }

    for (i, rec) in outcome.recommendations.iter().enumerate() {
        let date = rec.release_date.as_deref().unwrap_or("N/A");

        println!(
            "{}. [{:.2}] {} ({})",
            i + 1,
            rec.similarity_score,
            rec.title,
            date
        );
        if let Some(record) = catalog.find(rec.id) {
            if !record.genres.is_empty() {
                println!("    genres: {}", record.genres.join(", "));
            }
            println!(
                "    language: {}",
                catalog::language_name(&record.language)
            );
        }
        println!("    type: {}", rec.media_type);
        println!("    id: {}", rec.id);
        println!();
    }

    Ok(())
}
