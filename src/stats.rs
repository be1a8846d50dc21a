//! Catalog statistics and filter-value overview.
//!
//! A quick summary of what's loaded: title counts, media-type and
//! region breakdowns, top genres, year spread. Used by `cine stats` and
//! `cine filters` to give confidence that a dataset looks the way it
//! should; the HTTP server serves the same summaries as JSON.

use anyhow::Result;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::catalog::{self, Catalog};
use crate::config::Config;
use crate::models::MediaType;

/// Aggregate catalog statistics.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub movies: usize,
    pub series: usize,
    pub hollywood: usize,
    pub bollywood: usize,
    pub south_indian: usize,
    pub top_genres: Vec<GenreCount>,
    pub years: BTreeMap<i32, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

const SOUTH_INDIAN_LANGUAGES: &[&str] = &["ta", "te", "ml", "kn"];
const TOP_GENRE_COUNT: usize = 15;

/// Compute summary statistics over the whole catalog.
pub fn catalog_stats(catalog: &Catalog) -> CatalogStats {
    let mut movies = 0;
    let mut series = 0;
    let mut hollywood = 0;
    let mut bollywood = 0;
    let mut south_indian = 0;
    let mut genre_counts: HashMap<&str, usize> = HashMap::new();
    let mut years: BTreeMap<i32, usize> = BTreeMap::new();

    for record in catalog.titles() {
        match record.media_type {
            MediaType::Movie => movies += 1,
            MediaType::Series => series += 1,
        }

        if record.media_type == MediaType::Movie && record.language == "en" {
            hollywood += 1;
        }
        if record.language == "hi" {
            bollywood += 1;
        }
        if SOUTH_INDIAN_LANGUAGES.contains(&record.language.as_str()) {
            south_indian += 1;
        }

        for genre in &record.genres {
            *genre_counts.entry(genre.as_str()).or_insert(0) += 1;
        }

        if let Some(year) = catalog::release_year(record) {
            *years.entry(year).or_insert(0) += 1;
        }
    }

    let mut top_genres: Vec<(&str, usize)> = genre_counts.into_iter().collect();
    top_genres.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    top_genres.truncate(TOP_GENRE_COUNT);

    CatalogStats {
        total: catalog.len(),
        movies,
        series,
        hollywood,
        bollywood,
        south_indian,
        top_genres: top_genres
            .into_iter()
            .map(|(genre, count)| GenreCount {
                genre: genre.to_string(),
                count,
            })
            .collect(),
        years,
    }
}

/// Run the stats command: load the catalog and print a summary.
pub fn run_stats(config: &Config) -> Result<()> {
    let catalog = Catalog::load(&config.catalog.path, &config.vectorizer)?;
    let stats = catalog_stats(&catalog);

    println!("Cinerank — Catalog Stats");
    println!("========================");
    println!();
    println!("  Dataset:      {}", config.catalog.path.display());
    println!("  Vocabulary:   {} terms", catalog.vocab_len());
    println!();
    println!("  Titles:       {}", stats.total);
    println!("  Movies:       {}", stats.movies);
    println!("  Series:       {}", stats.series);
    println!();
    println!("  By region:");
    println!("    hollywood:    {}", stats.hollywood);
    println!("    bollywood:    {}", stats.bollywood);
    println!("    south indian: {}", stats.south_indian);

    if !stats.top_genres.is_empty() {
        println!();
        println!("  Top genres:");
        println!("  {:<24} {:>6}", "GENRE", "COUNT");
        println!("  {}", "-".repeat(32));
        for entry in &stats.top_genres {
            println!("  {:<24} {:>6}", entry.genre, entry.count);
        }
    }

    if let (Some((first, _)), Some((last, _))) =
        (stats.years.iter().next(), stats.years.iter().next_back())
    {
        println!();
        println!("  Release years: {} – {}", first, last);
    }

    println!();
    Ok(())
}

/// Run the filters command: list the values a query can filter on.
pub fn run_filters(config: &Config) -> Result<()> {
    let catalog = Catalog::load(&config.catalog.path, &config.vectorizer)?;
    let values = catalog.filter_values();

    println!("Languages:");
    for language in &values.languages {
        println!("  {:<4} {}", language.code, language.name);
    }

    println!();
    println!("Genres:");
    for genre in &values.genres {
        println!("  {}", genre);
    }

    println!();
    println!("Media types:");
    for media_type in &values.media_types {
        println!("  {}", media_type);
    }

    if let (Some(first), Some(last)) = (values.years.first(), values.years.last()) {
        println!();
        println!("Years: {} – {}", first, last);
    }

    Ok(())
}
