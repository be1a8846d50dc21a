//! Filter criteria and free-text keyword extraction.
//!
//! Filters run after ranking and before truncation: they only ever
//! remove entries, never reorder them. Criteria come from two places —
//! explicit fields on the request, and keywords recognized inside the
//! query text itself ("bollywood", a 4-digit year, a genre word). Mood
//! words don't filter; they expand the query with related genre terms
//! before vectorization.

use anyhow::Result;
use regex::Regex;
use serde::Serialize;

use crate::catalog::release_year;
use crate::models::{MediaType, RankedTitle, TitleRecord};

/// Optional narrowing criteria applied to the ranked list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Inclusive `(from, to)` release-year window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_range: Option<(i32, i32)>,
    /// Any-of language codes. A region keyword like "south indian"
    /// expands to several codes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.genre.is_none()
            && self.year.is_none()
            && self.year_range.is_none()
            && self.languages.is_empty()
            && self.media_type.is_none()
    }

    /// Overlay explicit request criteria on top of query-derived ones.
    /// A field set on `explicit` always wins.
    pub fn merged(self, explicit: FilterCriteria) -> FilterCriteria {
        FilterCriteria {
            genre: explicit.genre.or(self.genre),
            year: explicit.year.or(self.year),
            year_range: explicit.year_range.or(self.year_range),
            languages: if explicit.languages.is_empty() {
                self.languages
            } else {
                explicit.languages
            },
            media_type: explicit.media_type.or(self.media_type),
        }
    }

    pub fn matches(&self, record: &TitleRecord) -> bool {
        if let Some(ref genre) = self.genre {
            if !record
                .genres
                .iter()
                .any(|g| g.eq_ignore_ascii_case(genre))
            {
                return false;
            }
        }

        if let Some(year) = self.year {
            if release_year(record) != Some(year) {
                return false;
            }
        }

        if let Some((from, to)) = self.year_range {
            match release_year(record) {
                Some(year) if year >= from && year <= to => {}
                _ => return false,
            }
        }

        if !self.languages.is_empty() && !self.languages.iter().any(|l| *l == record.language) {
            return false;
        }

        if let Some(media_type) = self.media_type {
            if record.media_type != media_type {
                return false;
            }
        }

        true
    }
}

/// Drop ranked entries that fail the criteria, preserving rank order.
pub fn apply(
    criteria: &FilterCriteria,
    titles: &[TitleRecord],
    ranked: Vec<RankedTitle>,
) -> Vec<RankedTitle> {
    if criteria.is_empty() {
        return ranked;
    }
    ranked
        .into_iter()
        .filter(|r| criteria.matches(&titles[r.index]))
        .collect()
}

/// Recognizes filter keywords and mood words inside free-text queries.
///
/// Compiled once at startup and shared across requests.
pub struct QueryScanner {
    re_year: Regex,
    re_genre: Regex,
    re_region: Regex,
    re_media: Regex,
    re_mood: Regex,
}

const MOOD_EXPANSIONS: &[(&str, &str)] = &[
    ("happy", "comedy feel-good uplifting"),
    ("sad", "drama tragedy emotional"),
    ("scary", "horror thriller suspense"),
    ("exciting", "action adventure thriller"),
    ("thoughtful", "drama philosophical thought-provoking"),
    ("romantic", "romance love story romantic comedy"),
];

impl QueryScanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_year: Regex::new(r"\b(19\d{2}|20\d{2})\b")?,
            re_genre: Regex::new(
                r"\b(action|comedy|drama|horror|sci-fi|romance|thriller|adventure|fantasy|animation|documentary|biography)\b",
            )?,
            re_region: Regex::new(
                r"\b(south indian|hollywood|bollywood|hindi|tamil|telugu|malayalam|kannada|indian)\b",
            )?,
            re_media: Regex::new(
                r"\b(web series|tv series|tv show|television|streaming|ott|movie|film|show|series)\b",
            )?,
            re_mood: Regex::new(r"\b(happy|sad|scary|exciting|thoughtful|romantic)\b")?,
        })
    }

    /// Scan a query for filter keywords and mood words.
    ///
    /// Returns the (possibly expanded) query text plus the derived
    /// criteria. The original text is left intact; expansions are
    /// appended so the vectorizer sees both.
    pub fn derive(&self, query: &str) -> (String, FilterCriteria) {
        let lowered = query.to_lowercase();
        let mut criteria = FilterCriteria::default();

        if let Some(m) = self.re_year.find(&lowered) {
            if let Ok(year) = m.as_str().parse() {
                criteria.year = Some(year);
            }
        }

        if let Some(m) = self.re_genre.find(&lowered) {
            criteria.genre = Some(m.as_str().to_string());
        }

        if let Some(m) = self.re_region.find(&lowered) {
            criteria.languages = region_languages(m.as_str());
        }

        if let Some(m) = self.re_media.find(&lowered) {
            criteria.media_type = Some(match m.as_str() {
                "movie" | "film" => MediaType::Movie,
                _ => MediaType::Series,
            });
        }

        let mut expanded = query.to_string();
        if let Some(m) = self.re_mood.find(&lowered) {
            for (mood, terms) in MOOD_EXPANSIONS {
                if *mood == m.as_str() {
                    expanded.push(' ');
                    expanded.push_str(terms);
                    break;
                }
            }
        }

        (expanded, criteria)
    }
}

fn region_languages(keyword: &str) -> Vec<String> {
    let codes: &[&str] = match keyword {
        "hollywood" => &["en"],
        "bollywood" | "hindi" => &["hi"],
        "tamil" => &["ta"],
        "telugu" => &["te"],
        "malayalam" => &["ml"],
        "kannada" => &["kn"],
        "south indian" => &["ta", "te", "ml", "kn"],
        "indian" => &["hi", "ta", "te", "ml", "kn"],
        _ => &[],
    };
    codes.iter().map(|c| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64) -> TitleRecord {
        TitleRecord {
            id,
            title: format!("Title {}", id),
            original_title: String::new(),
            overview: String::new(),
            poster_path: None,
            release_date: None,
            genres: Vec::new(),
            language: "en".to_string(),
            media_type: MediaType::Movie,
            document: String::new(),
        }
    }

    fn scanner() -> QueryScanner {
        QueryScanner::new().unwrap()
    }

    #[test]
    fn test_derive_year() {
        let (_, criteria) = scanner().derive("best heist movies 2015");
        assert_eq!(criteria.year, Some(2015));
    }

    #[test]
    fn test_derive_genre_and_media_type() {
        let (_, criteria) = scanner().derive("a horror movie");
        assert_eq!(criteria.genre.as_deref(), Some("horror"));
        assert_eq!(criteria.media_type, Some(MediaType::Movie));

        let (_, criteria) = scanner().derive("gritty crime web series");
        assert_eq!(criteria.media_type, Some(MediaType::Series));
    }

    #[test]
    fn test_derive_region_keywords() {
        let (_, criteria) = scanner().derive("bollywood blockbuster");
        assert_eq!(criteria.languages, vec!["hi"]);

        let (_, criteria) = scanner().derive("south indian action");
        assert_eq!(criteria.languages, vec!["ta", "te", "ml", "kn"]);
    }

    #[test]
    fn test_mood_expands_query_without_filtering() {
        let (expanded, criteria) = scanner().derive("something romantic");
        assert!(expanded.starts_with("something romantic"));
        assert!(expanded.contains("romance"));
        assert!(expanded.contains("love story"));
        assert!(criteria.genre.is_none());
    }

    #[test]
    fn test_plain_query_derives_nothing() {
        let (expanded, criteria) = scanner().derive("giant robots fighting kaiju");
        assert_eq!(expanded, "giant robots fighting kaiju");
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_merged_explicit_overrides_derived() {
        let derived = FilterCriteria {
            year: Some(2015),
            languages: vec!["hi".to_string()],
            ..Default::default()
        };
        let explicit = FilterCriteria {
            year: Some(1999),
            ..Default::default()
        };
        let merged = derived.merged(explicit);
        assert_eq!(merged.year, Some(1999));
        assert_eq!(merged.languages, vec!["hi"]);
    }

    #[test]
    fn test_matches_genre_case_insensitive() {
        let mut r = record(1);
        r.genres = vec!["Romance".to_string()];
        let criteria = FilterCriteria {
            genre: Some("romance".to_string()),
            ..Default::default()
        };
        assert!(criteria.matches(&r));
    }

    #[test]
    fn test_matches_year_range() {
        let mut r = record(1);
        r.release_date = Some("2012-07-20".to_string());
        let inside = FilterCriteria {
            year_range: Some((2010, 2015)),
            ..Default::default()
        };
        let outside = FilterCriteria {
            year_range: Some((2013, 2015)),
            ..Default::default()
        };
        assert!(inside.matches(&r));
        assert!(!outside.matches(&r));

        // A record without a date never matches a year window.
        r.release_date = None;
        assert!(!inside.matches(&r));
    }

    #[test]
    fn test_apply_preserves_order_and_never_grows() {
        let mut titles = vec![record(1), record(2), record(3)];
        titles[0].language = "hi".to_string();
        titles[2].language = "hi".to_string();

        let ranked = vec![
            RankedTitle { index: 2, score: 0.9 },
            RankedTitle { index: 1, score: 0.5 },
            RankedTitle { index: 0, score: 0.2 },
        ];

        let criteria = FilterCriteria {
            languages: vec!["hi".to_string()],
            ..Default::default()
        };
        let filtered = apply(&criteria, &titles, ranked.clone());

        assert!(filtered.len() <= ranked.len());
        let order: Vec<usize> = filtered.iter().map(|r| r.index).collect();
        assert_eq!(order, vec![2, 0]);
    }

    #[test]
    fn test_apply_without_criteria_is_identity() {
        let titles = vec![record(1)];
        let ranked = vec![RankedTitle { index: 0, score: 0.7 }];
        let out = apply(&FilterCriteria::default(), &titles, ranked.clone());
        assert_eq!(out, ranked);
    }

    #[test]
    fn test_no_survivors_is_valid_empty_outcome() {
        let titles = vec![record(1)];
        let ranked = vec![RankedTitle { index: 0, score: 0.7 }];
        let criteria = FilterCriteria {
            languages: vec!["hi".to_string()],
            ..Default::default()
        };
        assert!(apply(&criteria, &titles, ranked).is_empty());
    }
}
