//! Cosine similarity ranking.
//!
//! A single O(N·D) scan of the catalog vectors per query — no index
//! structure, which is fine at a few thousand titles. Scores land in
//! `[0, 1]` because all vectors are non-negative and L2-normalized.
//! Truncation to top-K happens after the filter stage, so this module
//! returns the full ranked list.

use crate::models::RankedTitle;
use crate::vectorizer::TermVector;

/// Score every catalog vector against the query and sort.
///
/// Titles with zero similarity are dropped (a query with no shared
/// vocabulary produces no results rather than arbitrary ones). Sorting
/// is descending by score with ties broken by original catalog order,
/// so identical queries always produce identical output.
pub fn rank_titles(query: &TermVector, vectors: &[TermVector]) -> Vec<RankedTitle> {
    if query.is_zero() {
        return Vec::new();
    }

    let mut ranked: Vec<RankedTitle> = vectors
        .iter()
        .enumerate()
        .map(|(index, vector)| RankedTitle {
            index,
            score: query.dot(vector).min(1.0),
        })
        .filter(|ranked| ranked.score > 0.0)
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.index.cmp(&b.index))
    });

    ranked
}
