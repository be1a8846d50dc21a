//! Text normalization for the vectorizer.
//!
//! Both catalog documents (at build time) and queries (per request) go
//! through the same pipeline: lowercase, strip punctuation and digits,
//! tokenize on whitespace, drop English stop words, lemmatize. The
//! query and the catalog must agree on this pipeline or they end up in
//! different term spaces.

/// English stop words removed before weighting.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me",
    "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "only",
    "or", "other", "our", "ours", "ourselves", "out", "over", "own", "s", "same", "she",
    "should", "so", "some", "such", "t", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Normalize raw text into weighting-ready tokens.
///
/// Digits are stripped along with punctuation, so a year like `2015`
/// never reaches the vector space; years act through the filter stage
/// instead. Tokens shorter than `min_token_len` are dropped after
/// lemmatization.
pub fn normalize(text: &str, min_token_len: usize) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphabetic() { c } else { ' ' })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|token| !is_stop_word(token))
        .map(lemmatize)
        .filter(|token| token.len() >= min_token_len)
        .collect()
}

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok()
}

/// Light noun lemmatization: collapse regular plurals so that
/// "movies" and "movie" share a term. Irregular forms pass through
/// unchanged.
fn lemmatize(token: &str) -> String {
    for suffix in ["sses", "shes", "ches", "xes", "zes"] {
        if token.len() > suffix.len() && token.ends_with(suffix) {
            return token[..token.len() - 2].to_string();
        }
    }
    if token.ends_with("ss") || token.ends_with("us") || token.ends_with("is") {
        return token.to_string();
    }
    if token.len() > 2 && token.ends_with('s') {
        return token[..token.len() - 1].to_string();
    }
    token.to_string()
}
