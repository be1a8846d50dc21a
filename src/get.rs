//! Title retrieval by id.
//!
//! Fetches a full catalog record. Used by the `cine get` CLI command;
//! the HTTP server serves the same record from `GET /api/title/{id}`.

use anyhow::Result;

use crate::catalog::{self, Catalog};
use crate::config::Config;

pub fn run_get(config: &Config, id: u64) -> Result<()> {
    let catalog = Catalog::load(&config.catalog.path, &config.vectorizer)?;

    let record = match catalog.find(id) {
        Some(record) => record,
        None => {
            eprintln!("Error: title not found: {}", id);
            std::process::exit(1);
        }
    };

    println!("--- Title ---");
    println!("id:             {}", record.id);
    println!("title:          {}", record.title);
    if !record.original_title.is_empty() && record.original_title != record.title {
        println!("original title: {}", record.original_title);
    }
    println!(
        "release date:   {}",
        record.release_date.as_deref().unwrap_or("N/A")
    );
    if !record.genres.is_empty() {
        println!("genres:         {}", record.genres.join(", "));
    }
    println!(
        "language:       {}",
        catalog::language_name(&record.language)
    );
    println!("type:           {}", record.media_type);
    if let Some(ref poster) = record.poster_path {
        println!("poster:         {}", poster);
    }
    println!();

    println!("--- Overview ---");
    println!("{}", record.overview);

    Ok(())
}
