//! Core data models for the recommendation pipeline.
//!
//! These types represent the catalog records, per-request ranking
//! artifacts, and the wire shapes returned to consumers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a catalog entry is a feature film or an episodic series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Series,
}

impl Default for MediaType {
    fn default() -> Self {
        MediaType::Movie
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Movie => write!(f, "movie"),
            MediaType::Series => write!(f, "series"),
        }
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "movie" | "film" => Ok(MediaType::Movie),
            "series" | "tv" | "show" => Ok(MediaType::Series),
            other => Err(format!(
                "unknown media type '{}': use movie or series",
                other
            )),
        }
    }
}

/// One catalog row, deserialized from the dataset file.
///
/// Immutable after load. `document` is the combined searchable text
/// prepared at dataset build time (title, overview, genres, people,
/// keywords, region tags); when a dataset omits it, the catalog
/// composes a fallback from the other fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleRecord {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub media_type: MediaType,
    #[serde(default)]
    pub document: String,
}

fn default_language() -> String {
    "en".to_string()
}

/// A ranked catalog position produced per request and discarded after
/// the response. `index` points into the catalog's original order,
/// which is also the tie-break order for equal scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedTitle {
    pub index: usize,
    pub score: f32,
}

/// One recommendation as returned to consumers.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub id: u64,
    pub title: String,
    pub overview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    pub media_type: MediaType,
    pub similarity_score: f32,
}

impl Recommendation {
    pub fn from_record(record: &TitleRecord, score: f32) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            overview: record.overview.clone(),
            poster_path: record.poster_path.clone(),
            release_date: record.release_date.clone(),
            media_type: record.media_type,
            similarity_score: score,
        }
    }
}
