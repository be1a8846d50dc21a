//! TF-IDF vocabulary and term weighting.
//!
//! The vocabulary is fixed when the catalog is built: [`Vectorizer::fit`]
//! scans the tokenized corpus, keeps the `max_features` most frequent
//! terms, and records a smoothed inverse document frequency per term.
//! [`Vectorizer::transform`] then maps any token list — catalog document
//! or incoming query — into that same term space, so every vector the
//! ranker compares shares one vocabulary and dimension.
//!
//! # Weighting
//!
//! ```text
//! idf(t) = ln((1 + N) / (1 + df(t))) + 1
//! w(t,d) = tf(t,d) × idf(t)
//! ```
//!
//! Document vectors are L2-normalized, so cosine similarity between two
//! vectors reduces to a sparse dot product.

use std::collections::{HashMap, HashSet};

/// A sparse, L2-normalized term-weight vector.
///
/// Entries are `(term_id, weight)` pairs sorted by term id. An empty
/// entry list is the zero vector (a query with no known terms).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    entries: Vec<(u32, f32)>,
}

impl TermVector {
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dot product over the shared term space. Since both vectors are
    /// L2-normalized this is their cosine similarity.
    pub fn dot(&self, other: &TermVector) -> f32 {
        let mut sum = 0.0f32;
        let mut a = self.entries.iter().peekable();
        let mut b = other.entries.iter().peekable();

        while let (Some(&&(ia, wa)), Some(&&(ib, wb))) = (a.peek(), b.peek()) {
            match ia.cmp(&ib) {
                std::cmp::Ordering::Less => {
                    a.next();
                }
                std::cmp::Ordering::Greater => {
                    b.next();
                }
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    a.next();
                    b.next();
                }
            }
        }

        sum
    }
}

/// TF-IDF vectorizer with a vocabulary frozen at fit time.
#[derive(Debug, Clone)]
pub struct Vectorizer {
    /// term → term id, ids assigned in alphabetical term order.
    vocab: HashMap<String, u32>,
    /// idf value per term id.
    idf: Vec<f32>,
}

impl Vectorizer {
    /// Build the vocabulary from a tokenized corpus.
    ///
    /// Keeps the `max_features` terms with the highest total corpus
    /// frequency; ties resolve alphabetically so fitting is
    /// deterministic across runs.
    pub fn fit(documents: &[Vec<String>], max_features: usize) -> Self {
        let mut corpus_tf: HashMap<&str, u64> = HashMap::new();
        let mut df: HashMap<&str, u32> = HashMap::new();

        for tokens in documents {
            let mut seen: HashSet<&str> = HashSet::new();
            for token in tokens {
                *corpus_tf.entry(token.as_str()).or_insert(0) += 1;
                seen.insert(token.as_str());
            }
            for term in seen {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        let mut by_frequency: Vec<(&str, u64)> = corpus_tf.into_iter().collect();
        by_frequency.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        by_frequency.truncate(max_features);

        let mut terms: Vec<&str> = by_frequency.into_iter().map(|(term, _)| term).collect();
        terms.sort_unstable();

        let n = documents.len() as f32;
        let mut vocab = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());

        for (id, term) in terms.iter().enumerate() {
            let term_df = *df.get(term).unwrap_or(&0) as f32;
            vocab.insert(term.to_string(), id as u32);
            idf.push(((1.0 + n) / (1.0 + term_df)).ln() + 1.0);
        }

        Self { vocab, idf }
    }

    /// Map a token list into the fixed term space.
    ///
    /// Tokens outside the vocabulary are dropped; a token list with no
    /// known terms yields the zero vector.
    pub fn transform(&self, tokens: &[String]) -> TermVector {
        let mut counts: HashMap<u32, u32> = HashMap::new();
        for token in tokens {
            if let Some(&id) = self.vocab.get(token.as_str()) {
                *counts.entry(id).or_insert(0) += 1;
            }
        }

        if counts.is_empty() {
            return TermVector::default();
        }

        let mut entries: Vec<(u32, f32)> = counts
            .into_iter()
            .map(|(id, count)| (id, count as f32 * self.idf[id as usize]))
            .collect();
        entries.sort_unstable_by_key(|&(id, _)| id);

        let norm = entries
            .iter()
            .map(|&(_, w)| w * w)
            .sum::<f32>()
            .sqrt();
        if norm > f32::EPSILON {
            for entry in &mut entries {
                entry.1 /= norm;
            }
        }

        TermVector { entries }
    }

    pub fn vocab_len(&self) -> usize {
        self.vocab.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn fit_corpus(docs: &[&[&str]], max_features: usize) -> Vectorizer {
        let corpus: Vec<Vec<String>> = docs.iter().map(|d| tokens(d)).collect();
        Vectorizer::fit(&corpus, max_features)
    }

    #[test]
    fn test_vectors_are_l2_normalized() {
        let v = fit_corpus(
            &[&["space", "opera", "space"], &["heist", "thriller"]],
            100,
        );
        let vec = v.transform(&tokens(&["space", "opera", "space"]));
        assert!((vec.dot(&vec) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_terms_yield_zero_vector() {
        let v = fit_corpus(&[&["space", "opera"]], 100);
        let vec = v.transform(&tokens(&["zebra", "quartz"]));
        assert!(vec.is_zero());
    }

    #[test]
    fn test_empty_tokens_yield_zero_vector() {
        let v = fit_corpus(&[&["space", "opera"]], 100);
        assert!(v.transform(&[]).is_zero());
    }

    #[test]
    fn test_max_features_caps_vocabulary() {
        let v = fit_corpus(
            &[
                &["alpha", "alpha", "alpha", "beta", "beta", "gamma"],
                &["alpha", "beta", "delta"],
            ],
            2,
        );
        // alpha (4) and beta (3) survive; gamma and delta are dropped.
        assert_eq!(v.vocab_len(), 2);
        assert!(v.transform(&tokens(&["gamma"])).is_zero());
        assert!(v.transform(&tokens(&["delta"])).is_zero());
        assert!(!v.transform(&tokens(&["alpha"])).is_zero());
    }

    #[test]
    fn test_max_features_tie_breaks_alphabetically() {
        // Equal total frequency: the alphabetically-first term wins.
        let v = fit_corpus(&[&["zeta", "alpha"]], 1);
        assert!(!v.transform(&tokens(&["alpha"])).is_zero());
        assert!(v.transform(&tokens(&["zeta"])).is_zero());
    }

    #[test]
    fn test_rare_term_outweighs_common_term() {
        // "ubiquitous" is in every doc, "rare" in one; idf must favor "rare".
        let v = fit_corpus(
            &[
                &["ubiquitous", "rare"],
                &["ubiquitous", "filler"],
                &["ubiquitous", "other"],
            ],
            100,
        );
        let doc = v.transform(&tokens(&["ubiquitous", "rare"]));
        let common_query = v.transform(&tokens(&["ubiquitous"]));
        let rare_query = v.transform(&tokens(&["rare"]));
        assert!(rare_query.dot(&doc) > common_query.dot(&doc));
    }

    #[test]
    fn test_fit_is_deterministic() {
        let docs: Vec<Vec<String>> = vec![
            tokens(&["space", "opera", "space", "heist"]),
            tokens(&["heist", "thriller", "crew"]),
        ];
        let a = Vectorizer::fit(&docs, 3);
        let b = Vectorizer::fit(&docs, 3);
        let query = tokens(&["space", "heist", "crew"]);
        assert_eq!(a.transform(&query), b.transform(&query));
    }

    #[test]
    fn test_dot_of_disjoint_vectors_is_zero() {
        let v = fit_corpus(&[&["space", "opera"], &["heist", "thriller"]], 100);
        let a = v.transform(&tokens(&["space"]));
        let b = v.transform(&tokens(&["heist"]));
        assert_eq!(a.dot(&b), 0.0);
    }
}
