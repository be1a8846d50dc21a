//! Read-only in-memory catalog store.
//!
//! The catalog is loaded once at process start from a JSON dataset file
//! and never mutated afterwards: records, TF-IDF vectors, and the
//! vocabulary are built together in [`Catalog::from_records`] so query
//! vectors and document vectors always share one term space. Handlers
//! and commands receive the catalog as an injected `Arc<Catalog>`
//! rather than reaching for a global.

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

use crate::config::VectorizerConfig;
use crate::models::{MediaType, TitleRecord};
use crate::preprocess;
use crate::vectorizer::{TermVector, Vectorizer};

#[derive(Debug)]
pub struct Catalog {
    titles: Vec<TitleRecord>,
    vectors: Vec<TermVector>,
    vectorizer: Vectorizer,
    by_id: HashMap<u64, usize>,
    min_token_len: usize,
}

impl Catalog {
    /// Load the catalog from a JSON dataset file (an array of records).
    pub fn load(path: &Path, cfg: &VectorizerConfig) -> Result<Catalog> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset file: {}", path.display()))?;

        let records: Vec<TitleRecord> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse dataset file: {}", path.display()))?;

        Self::from_records(records, cfg)
    }

    /// Build a catalog from already-deserialized records.
    ///
    /// Also the seam for tests: small fixture catalogs are constructed
    /// directly instead of through a dataset file.
    pub fn from_records(records: Vec<TitleRecord>, cfg: &VectorizerConfig) -> Result<Catalog> {
        if records.is_empty() {
            bail!("dataset contains no records");
        }

        let documents: Vec<Vec<String>> = records
            .iter()
            .map(|record| preprocess::normalize(&searchable_text(record), cfg.min_token_len))
            .collect();

        let vectorizer = Vectorizer::fit(&documents, cfg.max_features);
        let vectors: Vec<TermVector> = documents
            .iter()
            .map(|tokens| vectorizer.transform(tokens))
            .collect();

        let by_id = records
            .iter()
            .enumerate()
            .map(|(index, record)| (record.id, index))
            .collect();

        Ok(Catalog {
            titles: records,
            vectors,
            vectorizer,
            by_id,
            min_token_len: cfg.min_token_len,
        })
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn titles(&self) -> &[TitleRecord] {
        &self.titles
    }

    pub fn record(&self, index: usize) -> &TitleRecord {
        &self.titles[index]
    }

    pub fn find(&self, id: u64) -> Option<&TitleRecord> {
        self.by_id.get(&id).map(|&index| &self.titles[index])
    }

    pub fn vectors(&self) -> &[TermVector] {
        &self.vectors
    }

    pub fn vocab_len(&self) -> usize {
        self.vectorizer.vocab_len()
    }

    /// Vectorize query text in the catalog's term space.
    pub fn query_vector(&self, query: &str) -> TermVector {
        let tokens = preprocess::normalize(query, self.min_token_len);
        self.vectorizer.transform(&tokens)
    }

    /// Enumerate the distinct filter values present in the catalog,
    /// sorted and duplicate-free.
    pub fn filter_values(&self) -> FilterValues {
        let mut languages: Vec<String> = Vec::new();
        let mut genres: Vec<String> = Vec::new();
        let mut years: Vec<i32> = Vec::new();
        let mut has_movies = false;
        let mut has_series = false;

        for record in &self.titles {
            if !record.language.is_empty() {
                languages.push(record.language.clone());
            }
            for genre in &record.genres {
                genres.push(genre.clone());
            }
            if let Some(year) = release_year(record) {
                years.push(year);
            }
            match record.media_type {
                MediaType::Movie => has_movies = true,
                MediaType::Series => has_series = true,
            }
        }

        languages.sort_unstable();
        languages.dedup();
        genres.sort_unstable();
        genres.dedup();
        years.sort_unstable();
        years.dedup();

        let mut languages: Vec<LanguageOption> = languages
            .into_iter()
            .map(|code| LanguageOption {
                name: language_name(&code).to_string(),
                code,
            })
            .collect();
        languages.sort_by(|a, b| a.name.cmp(&b.name));

        let mut media_types = Vec::new();
        if has_movies {
            media_types.push(MediaType::Movie);
        }
        if has_series {
            media_types.push(MediaType::Series);
        }

        FilterValues {
            languages,
            genres,
            years,
            media_types,
        }
    }
}

/// Filter values advertised to consumers by `GET /api/filters`.
#[derive(Debug, Clone, Serialize)]
pub struct FilterValues {
    pub languages: Vec<LanguageOption>,
    pub genres: Vec<String>,
    pub years: Vec<i32>,
    pub media_types: Vec<MediaType>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LanguageOption {
    pub code: String,
    pub name: String,
}

/// The text a record is indexed under: the prepared `document` field
/// when the dataset carries one, otherwise a composition of the
/// record's own metadata.
pub fn searchable_text(record: &TitleRecord) -> String {
    if !record.document.trim().is_empty() {
        return record.document.clone();
    }

    let mut parts: Vec<&str> = vec![&record.title, &record.original_title, &record.overview];
    parts.extend(record.genres.iter().map(String::as_str));
    let mut text = parts.join(" ");

    match record.media_type {
        MediaType::Movie => text.push_str(" movie film"),
        MediaType::Series => text.push_str(" series tv show"),
    }
    match record.language.as_str() {
        "en" => text.push_str(" english hollywood international"),
        "hi" => text.push_str(" hindi bollywood indian"),
        "ta" => text.push_str(" tamil south indian"),
        "te" => text.push_str(" telugu south indian"),
        "ml" => text.push_str(" malayalam south indian"),
        "kn" => text.push_str(" kannada south indian"),
        _ => {}
    }
    text
}

/// Release year of a record, if its date parses.
pub fn release_year(record: &TitleRecord) -> Option<i32> {
    let date = record.release_date.as_deref()?;
    if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(parsed.year());
    }
    // Some records carry a bare year or a truncated date.
    date.get(..4)?.parse().ok()
}

/// Display name for a language code, falling back to the code itself.
pub fn language_name(code: &str) -> &str {
    match code {
        "en" => "English",
        "hi" => "Hindi",
        "ta" => "Tamil",
        "te" => "Telugu",
        "ml" => "Malayalam",
        "kn" => "Kannada",
        other => other,
    }
}
