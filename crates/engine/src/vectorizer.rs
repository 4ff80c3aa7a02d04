//! TF-IDF vectorizer over the feature soups.
//!
//! ## Algorithm
//! 1. Tokenize: lower-case, split on anything that is not a letter, digit or
//!    underscore, keep tokens of two or more characters, drop stop words
//! 2. Vocabulary: every remaining term, indexed in sorted order
//! 3. IDF (smoothed): `ln((1 + n) / (1 + df)) + 1`
//! 4. Weight: raw term count × IDF, then each document scaled to unit length
//!
//! Unit-length rows mean cosine similarity is a plain dot product.

use crate::similarity::SparseVector;
use crate::stopwords::is_stop_word;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Split a document into vocabulary candidates
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Fitted TF-IDF model
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn the vocabulary and IDF weights from `documents`, then return
    /// one unit-length vector per document, in input order.
    pub fn fit_transform<S: AsRef<str> + Sync>(&mut self, documents: &[S]) -> Vec<SparseVector> {
        let tokenized: Vec<Vec<String>> = documents
            .par_iter()
            .map(|doc| tokenize(doc.as_ref()))
            .collect();

        let terms: BTreeSet<&str> = tokenized
            .iter()
            .flat_map(|tokens| tokens.iter().map(String::as_str))
            .collect();
        self.vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term.to_string(), index))
            .collect();

        // Term counts per document, keyed by vocabulary index
        let counts: Vec<BTreeMap<usize, f64>> = tokenized
            .par_iter()
            .map(|tokens| {
                let mut tf = BTreeMap::new();
                for token in tokens {
                    if let Some(&index) = self.vocabulary.get(token) {
                        *tf.entry(index).or_insert(0.0) += 1.0;
                    }
                }
                tf
            })
            .collect();

        let mut doc_freq = vec![0usize; self.vocabulary.len()];
        for tf in &counts {
            for &index in tf.keys() {
                doc_freq[index] += 1;
            }
        }

        let n = documents.len() as f64;
        self.idf = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        debug!(
            "Fitted TF-IDF over {} documents, vocabulary size {}",
            documents.len(),
            self.vocabulary.len()
        );

        counts
            .into_par_iter()
            .map(|tf| {
                let mut vector = SparseVector::new(
                    tf.into_iter()
                        .map(|(index, count)| (index, count * self.idf[index]))
                        .collect(),
                );
                vector.normalize();
                vector
            })
            .collect()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Vocabulary index of a term, if it survived fitting
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Learned IDF weight of a term
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|index| self.idf[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("Sci-Fi  the Matrix x k1 wachowski_sisters"),
            vec!["sci", "fi", "matrix", "k1", "wachowski_sisters"]
        );
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let mut vectorizer = TfidfVectorizer::new();
        vectorizer.fit_transform(&["zebra apple", "mango"]);

        assert_eq!(vectorizer.vocabulary_size(), 3);
        assert_eq!(vectorizer.term_index("apple"), Some(0));
        assert_eq!(vectorizer.term_index("mango"), Some(1));
        assert_eq!(vectorizer.term_index("zebra"), Some(2));
        assert_eq!(vectorizer.term_index("the"), None);
    }

    #[test]
    fn test_smoothed_idf() {
        let mut vectorizer = TfidfVectorizer::new();
        vectorizer.fit_transform(&["action drama", "action", "comedy"]);

        // action: df = 2 of 3 documents
        let expected = (4.0f64 / 3.0).ln() + 1.0;
        assert!((vectorizer.idf("action").unwrap() - expected).abs() < 1e-12);
        // comedy: df = 1
        let expected = (4.0f64 / 2.0).ln() + 1.0;
        assert!((vectorizer.idf("comedy").unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_vectors_are_unit_length() {
        let mut vectorizer = TfidfVectorizer::new();
        let vectors = vectorizer.fit_transform(&["action action drama", "comedy romance", "the of"]);

        assert_eq!(vectors.len(), 3);
        assert!((vectors[0].norm() - 1.0).abs() < 1e-12);
        assert!((vectors[1].norm() - 1.0).abs() < 1e-12);
        // Only stop words: nothing left to weight
        assert!(vectors[2].is_empty());
    }

    #[test]
    fn test_empty_corpus() {
        let mut vectorizer = TfidfVectorizer::new();
        let vectors = vectorizer.fit_transform::<&str>(&[]);
        assert!(vectors.is_empty());
        assert_eq!(vectorizer.vocabulary_size(), 0);
    }
}
