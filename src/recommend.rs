//! The query-to-ranking pipeline.
//!
//! One entry point, [`recommend`], shared by the CLI and the HTTP
//! server: validate the query, derive filters from its text, vectorize,
//! rank the whole catalog, filter, truncate to K. Stateless per call —
//! the catalog and scanner are read-only injected dependencies.

use anyhow::{bail, Result};

use crate::catalog::Catalog;
use crate::filters::{self, FilterCriteria, QueryScanner};
use crate::models::Recommendation;
use crate::rank::rank_titles;

/// Everything a consumer needs to render one answered query.
#[derive(Debug, Clone)]
pub struct RecommendOutcome {
    /// The query as submitted.
    pub query: String,
    /// The query after mood-word expansion (what was vectorized).
    pub expanded_query: String,
    /// The criteria actually applied (derived merged with explicit).
    pub filters: FilterCriteria,
    pub recommendations: Vec<Recommendation>,
}

/// Rank the catalog against a free-text query.
///
/// An empty or whitespace-only query is rejected before any pipeline
/// work. A query with no vocabulary overlap, or filters with no
/// survivors, yield an empty recommendation list — a valid outcome,
/// not an error.
pub fn recommend(
    catalog: &Catalog,
    scanner: &QueryScanner,
    query: &str,
    limit: usize,
    explicit: FilterCriteria,
) -> Result<RecommendOutcome> {
    if query.trim().is_empty() {
        bail!("query must not be empty");
    }

    let (expanded_query, derived) = scanner.derive(query);
    let criteria = derived.merged(explicit);

    let query_vec = catalog.query_vector(&expanded_query);
    let ranked = rank_titles(&query_vec, catalog.vectors());
    let mut ranked = filters::apply(&criteria, catalog.titles(), ranked);
    ranked.truncate(limit);

    let recommendations = ranked
        .iter()
        .map(|r| Recommendation::from_record(catalog.record(r.index), r.score))
        .collect();

    Ok(RecommendOutcome {
        query: query.to_string(),
        expanded_query,
        filters: criteria,
        recommendations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VectorizerConfig;
    use crate::models::{MediaType, TitleRecord};

    fn record(
        id: u64,
        title: &str,
        overview: &str,
        genres: &[&str],
        language: &str,
        release_date: Option<&str>,
    ) -> TitleRecord {
        TitleRecord {
            id,
            title: title.to_string(),
            original_title: String::new(),
            overview: overview.to_string(),
            poster_path: None,
            release_date: release_date.map(|d| d.to_string()),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            language: language.to_string(),
            media_type: MediaType::Movie,
            document: String::new(),
        }
    }

    fn fixture_catalog() -> Catalog {
        // Documents are composed from metadata at load time, including
        // region tags ("bollywood", "hollywood") per language code.
        let records = vec![
            record(
                1,
                "Dread Manor",
                "A haunted house terrorizes its new owners",
                &["Horror"],
                "en",
                Some("2014-10-01"),
            ),
            record(
                2,
                "Dil Aur Baarish",
                "A sweeping romance about love found in the monsoon",
                &["Romance", "Drama"],
                "hi",
                Some("2015-02-14"),
            ),
            record(
                3,
                "Steel Circuit",
                "Street racers pull one last job",
                &["Action"],
                "en",
                Some("2015-06-01"),
            ),
        ];
        Catalog::from_records(records, &VectorizerConfig::default()).unwrap()
    }

    fn run(query: &str) -> RecommendOutcome {
        let catalog = fixture_catalog();
        let scanner = QueryScanner::new().unwrap();
        recommend(&catalog, &scanner, query, 10, FilterCriteria::default()).unwrap()
    }

    #[test]
    fn test_empty_query_is_rejected() {
        let catalog = fixture_catalog();
        let scanner = QueryScanner::new().unwrap();
        for query in ["", "   ", "\t\n"] {
            let err =
                recommend(&catalog, &scanner, query, 10, FilterCriteria::default()).unwrap_err();
            assert!(err.to_string().contains("must not be empty"));
        }
    }

    #[test]
    fn test_no_vocabulary_overlap_is_empty_not_error() {
        let outcome = run("xylophone zeppelin quasar");
        assert!(outcome.recommendations.is_empty());
    }

    #[test]
    fn test_scores_in_unit_interval_sorted_descending() {
        let outcome = run("love and romance in the rain");
        assert!(!outcome.recommendations.is_empty());
        for rec in &outcome.recommendations {
            assert!(rec.similarity_score > 0.0 && rec.similarity_score <= 1.0);
        }
        for pair in outcome.recommendations.windows(2) {
            assert!(pair[0].similarity_score >= pair[1].similarity_score);
        }
    }

    #[test]
    fn test_bollywood_romance_scenario() {
        // The 2015 Bollywood romance must outrank the unrelated
        // Hollywood horror title.
        let outcome = run("romantic bollywood movie 2015");

        assert_eq!(outcome.filters.year, Some(2015));
        assert_eq!(outcome.filters.languages, vec!["hi"]);
        assert_eq!(outcome.filters.media_type, Some(MediaType::Movie));

        assert!(!outcome.recommendations.is_empty());
        assert_eq!(outcome.recommendations[0].id, 2);
        assert!(outcome.recommendations.iter().all(|r| r.id != 1));
    }

    #[test]
    fn test_ranking_without_filters_favors_term_overlap() {
        // Even unfiltered, the romance shares far more terms with the
        // query than the horror title does.
        let outcome = run("a sweeping bollywood romance");
        let ids: Vec<u64> = outcome.recommendations.iter().map(|r| r.id).collect();
        assert_eq!(ids[0], 2);
        if let Some(horror_pos) = ids.iter().position(|&id| id == 1) {
            assert!(horror_pos > 0);
        }
    }

    #[test]
    fn test_mood_expansion_reaches_genre_terms() {
        // "romantic" alone matches nothing verbatim; the expansion
        // ("romance love story ...") connects it to the romance title.
        let outcome = run("something romantic");
        assert!(outcome.expanded_query.contains("romance"));
        assert!(outcome
            .recommendations
            .iter()
            .any(|r| r.id == 2));
    }

    #[test]
    fn test_explicit_filters_override_derived() {
        let catalog = fixture_catalog();
        let scanner = QueryScanner::new().unwrap();
        let explicit = FilterCriteria {
            languages: vec!["en".to_string()],
            ..Default::default()
        };
        let outcome =
            recommend(&catalog, &scanner, "bollywood romance love", 10, explicit).unwrap();
        assert_eq!(outcome.filters.languages, vec!["en"]);
        assert!(outcome.recommendations.iter().all(|r| r.id != 2));
    }

    #[test]
    fn test_filters_never_grow_results() {
        // No filter keywords in this query, so the baseline is unfiltered.
        let catalog = fixture_catalog();
        let scanner = QueryScanner::new().unwrap();
        let query = "love racers haunted house monsoon";
        let unfiltered =
            recommend(&catalog, &scanner, query, 10, FilterCriteria::default()).unwrap();
        assert!(unfiltered.filters.is_empty());
        assert_eq!(unfiltered.recommendations.len(), 3);

        let filtered = recommend(
            &catalog,
            &scanner,
            query,
            10,
            FilterCriteria {
                year: Some(2015),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(filtered.recommendations.len() < unfiltered.recommendations.len());

        // Survivors keep their relative pre-filter order.
        let unfiltered_ids: Vec<u64> =
            unfiltered.recommendations.iter().map(|r| r.id).collect();
        let filtered_ids: Vec<u64> = filtered.recommendations.iter().map(|r| r.id).collect();
        let expected: Vec<u64> = unfiltered_ids
            .into_iter()
            .filter(|id| filtered_ids.contains(id))
            .collect();
        assert_eq!(filtered_ids, expected);
    }

    #[test]
    fn test_limit_truncates() {
        let catalog = fixture_catalog();
        let scanner = QueryScanner::new().unwrap();
        let outcome = recommend(
            &catalog,
            &scanner,
            "love romance racers haunted house job",
            1,
            FilterCriteria::default(),
        )
        .unwrap();
        assert_eq!(outcome.recommendations.len(), 1);
    }

    #[test]
    fn test_identical_queries_identical_output() {
        let first = run("haunted house horror");
        let second = run("haunted house horror");
        let ids_a: Vec<u64> = first.recommendations.iter().map(|r| r.id).collect();
        let ids_b: Vec<u64> = second.recommendations.iter().map(|r| r.id).collect();
        assert_eq!(ids_a, ids_b);
        for (a, b) in first
            .recommendations
            .iter()
            .zip(second.recommendations.iter())
        {
            assert_eq!(a.similarity_score, b.similarity_score);
        }
    }
}
