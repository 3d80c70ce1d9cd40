//! TF-IDF (Term Frequency - Inverse Document Frequency) vectorization.
//!
//! Turns titles into sparse, L2-normalized term vectors over a sorted
//! vocabulary, the input matrix of the topic model.

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Sparse document vector: (term index, weight), sorted by term index.
pub type SparseVector = Vec<(usize, f64)>;

/// TF-IDF vectorizer fitted on a corpus.
pub struct TfIdf {
    /// Sorted vocabulary
    vocabulary: Vec<String>,
    /// Term -> position in `vocabulary`
    index: HashMap<String, usize>,
    /// Documents containing each vocabulary term
    doc_frequencies: Vec<usize>,
    /// Number of documents
    doc_count: usize,
}

impl TfIdf {
    /// Fit the vocabulary and document frequencies of a corpus.
    pub fn fit(documents: &[&str]) -> Self {
        let mut frequencies: BTreeMap<String, usize> = BTreeMap::new();

        for doc in documents {
            // Count document frequency (each term counted once per doc)
            let unique_terms: BTreeSet<String> = tokenize(doc).into_iter().collect();
            for term in unique_terms {
                *frequencies.entry(term).or_insert(0) += 1;
            }
        }

        let (vocabulary, doc_frequencies): (Vec<String>, Vec<usize>) =
            frequencies.into_iter().unzip();
        let index = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();

        Self {
            vocabulary,
            index,
            doc_frequencies,
            doc_count: documents.len(),
        }
    }

    /// Vocabulary in index order.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Get document count.
    pub fn doc_count(&self) -> usize {
        self.doc_count
    }

    /// Get unique term count.
    pub fn term_count(&self) -> usize {
        self.vocabulary.len()
    }

    /// Inverse document frequency of a term, 0.0 if unknown.
    ///
    /// Uses smoothed IDF: log((N + 1) / (df + 1)) + 1
    pub fn inverse_document_frequency(&self, term: &str) -> f64 {
        self.index
            .get(term)
            .map(|&i| self.idf_at(i))
            .unwrap_or(0.0)
    }

    fn idf_at(&self, term_index: usize) -> f64 {
        let df = self.doc_frequencies[term_index] as f64;
        let n = self.doc_count as f64;
        ((n + 1.0) / (df + 1.0)).ln() + 1.0
    }

    /// Vectorize one document.
    ///
    /// TF is the term count over the document's token count. Terms outside
    /// the vocabulary are ignored; a document without known terms maps to
    /// an empty vector.
    pub fn transform(&self, document: &str) -> SparseVector {
        let terms = tokenize(document);
        if terms.is_empty() {
            return Vec::new();
        }

        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for term in &terms {
            if let Some(&i) = self.index.get(term) {
                *counts.entry(i).or_insert(0) += 1;
            }
        }

        let total = terms.len() as f64;
        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(i, count)| (i, count as f64 / total * self.idf_at(i)))
            .collect();

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in vector.iter_mut() {
                *w /= norm;
            }
        }
        vector
    }
}

/// Tokenize text into lowercase words.
///
/// Filters out:
/// - Stop words (common English words)
/// - Single character tokens
/// - Numbers
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| s.chars().count() > 1)
        .filter(|s| !is_stop_word(s))
        .filter(|s| !s.chars().all(|c| c.is_numeric()))
        .map(String::from)
        .collect()
}

/// Check if a word is a stop word.
fn is_stop_word(word: &str) -> bool {
    const STOP_WORDS: &[&str] = &[
        "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is",
        "it", "its", "of", "on", "or", "that", "the", "to", "was", "were", "will", "with", "this",
        "they", "but", "have", "had", "what", "when", "where", "who", "which", "why", "how", "all",
        "each", "every", "both", "few", "more", "most", "other", "some", "such", "no", "nor",
        "not", "only", "own", "same", "so", "than", "too", "very", "can", "just", "should", "now",
        "also", "been", "being", "do", "does", "did", "doing", "would", "could", "might", "must",
        "shall", "about", "above", "after", "again", "against", "am", "any", "before", "below",
        "between", "into", "through", "during", "out", "over", "under", "up", "down", "then",
        "once", "here", "there", "if", "else", "while", "because", "until", "we", "you", "your",
        "our", "their", "him", "her", "them", "me", "my", "myself", "itself", "those", "these",
        "his", "vs", "ft", "feat", "official", "video",
    ];

    STOP_WORDS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_basic() {
        let tokens = tokenize("Hello World");
        assert_eq!(tokens, vec!["hello", "world"]);
    }

    #[test]
    fn test_tokenize_removes_stop_words() {
        let tokens = tokenize("the quick brown fox");
        assert!(!tokens.contains(&"the".to_string()));
        assert!(tokens.contains(&"quick".to_string()));
        assert!(tokens.contains(&"brown".to_string()));
        assert!(tokens.contains(&"fox".to_string()));
    }

    #[test]
    fn test_tokenize_removes_single_chars_and_numbers() {
        let tokens = tokenize("a b c rust 2024 programming");
        assert_eq!(tokens, vec!["rust", "programming"]);
    }

    #[test]
    fn test_tokenize_handles_punctuation() {
        let tokens = tokenize("Python Programming Tutorial - Basic Concepts!");
        assert_eq!(
            tokens,
            vec!["python", "programming", "tutorial", "basic", "concepts"]
        );
    }

    #[test]
    fn test_is_stop_word() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("official"));
        assert!(!is_stop_word("rust"));
    }

    #[test]
    fn test_fit_sorted_vocabulary() {
        let docs = vec!["rust programming", "python programming", "rust systems"];
        let tfidf = TfIdf::fit(&docs);

        assert_eq!(tfidf.doc_count(), 3);
        assert_eq!(
            tfidf.vocabulary(),
            &["programming", "python", "rust", "systems"]
        );
    }

    #[test]
    fn test_idf_rare_term_higher() {
        let docs = vec!["term1 term2", "term1 term3", "term1 term4"];
        let tfidf = TfIdf::fit(&docs);

        // term1 in all docs: ln(4/4)+1 = 1.0; term2 in one: ln(4/2)+1
        assert!((tfidf.inverse_document_frequency("term1") - 1.0).abs() < 1e-9);
        assert!(
            (tfidf.inverse_document_frequency("term2") - ((2.0f64).ln() + 1.0)).abs() < 1e-9
        );
        assert_eq!(tfidf.inverse_document_frequency("missing"), 0.0);
    }

    #[test]
    fn test_transform_normalized() {
        let docs = vec!["rust rust programming", "python scripting"];
        let tfidf = TfIdf::fit(&docs);
        let vector = tfidf.transform(docs[0]);

        assert_eq!(vector.len(), 2);
        let norm: f64 = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);

        // repeated term gets the larger weight
        let rust = tfidf.vocabulary().iter().position(|t| t == "rust").unwrap();
        let prog = tfidf
            .vocabulary()
            .iter()
            .position(|t| t == "programming")
            .unwrap();
        let weight = |i: usize| vector.iter().find(|(j, _)| *j == i).unwrap().1;
        assert!(weight(rust) > weight(prog));
    }

    #[test]
    fn test_transform_stop_words_only() {
        let tfidf = TfIdf::fit(&["rust programming"]);
        assert!(tfidf.transform("the and of").is_empty());
        assert!(tfidf.transform("unknown words").is_empty());
    }

    #[test]
    fn test_empty_corpus() {
        let docs: Vec<&str> = vec![];
        let tfidf = TfIdf::fit(&docs);

        assert_eq!(tfidf.doc_count(), 0);
        assert_eq!(tfidf.term_count(), 0);
    }
}
