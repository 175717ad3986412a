//! TF-IDF vector space fitted on the knowledge base questions.
//!
//! The fitted vocabulary and IDF weights come only from the fitting corpus:
//! query terms outside the vocabulary carry no weight. Weights are
//!
//! ```text
//! tf(t, d)  = raw count of t in d
//! idf(t)    = ln((1 + n) / (1 + df(t))) + 1
//! w(t, d)   = tf(t, d) * idf(t), then L2-normalised per document
//! ```

use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use crate::scoring::{SparseVector, cosine_similarity};
use crate::text::tokenize;

/// Immutable TF-IDF model plus the vectors of the documents it was fitted on.
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    documents: Vec<SparseVector>,
}

impl TfidfVectorizer {
    /// Fit vocabulary and IDF weights on `corpus` and vectorize every document.
    #[must_use]
    pub fn fit<S: AsRef<str>>(corpus: &[S]) -> Self {
        let tokenized: Vec<Vec<String>> =
            corpus.iter().map(|doc| tokenize(doc.as_ref())).collect();

        let terms: BTreeSet<&str> = tokenized.iter().flatten().map(String::as_str).collect();
        let vocabulary: HashMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term.to_string(), index))
            .collect();

        let mut document_frequency = vec![0_usize; vocabulary.len()];
        for tokens in &tokenized {
            let unique: BTreeSet<usize> = tokens
                .iter()
                .filter_map(|t| vocabulary.get(t))
                .copied()
                .collect();
            for index in unique {
                document_frequency[index] += 1;
            }
        }

        let n = corpus.len() as f64;
        let idf = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let mut vectorizer = Self {
            vocabulary,
            idf,
            documents: Vec::with_capacity(tokenized.len()),
        };
        let documents = tokenized
            .iter()
            .map(|tokens| vectorizer.weigh(tokens))
            .collect();
        vectorizer.documents = documents;

        debug!(
            "Fitted TF-IDF on {} documents, vocabulary size {}",
            vectorizer.documents.len(),
            vectorizer.vocabulary.len()
        );

        vectorizer
    }

    /// Project `text` into the fitted space.
    #[must_use]
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&tokenize(text))
    }

    /// Cosine similarity of `query` against every fitted document, in document order.
    #[must_use]
    pub fn score(&self, query: &str) -> Vec<f64> {
        let query = self.transform(query);
        self.documents
            .iter()
            .map(|doc| cosine_similarity(&query, doc))
            .collect()
    }

    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    #[must_use]
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// IDF weight of `term`, if it is in the vocabulary.
    #[must_use]
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&index| self.idf[index])
    }

    fn weigh(&self, tokens: &[String]) -> SparseVector {
        let entries = tokens
            .iter()
            .filter_map(|token| self.vocabulary.get(token))
            .map(|&index| (index, self.idf[index]))
            .collect();
        SparseVector::from_entries(entries).l2_normalized()
    }
}

/// Fit on `corpus_questions` and score `query` against each of them.
///
/// An empty corpus yields an empty score list.
#[must_use]
pub fn score<S: AsRef<str>>(query: &str, corpus_questions: &[S]) -> Vec<f64> {
    TfidfVectorizer::fit(corpus_questions).score(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: [&str; 3] = [
        "how to install vim editor",
        "how to configure neovim",
        "pacman package manager",
    ];

    #[test]
    fn idf_uses_smoothed_formula() {
        let v = TfidfVectorizer::fit(&CORPUS);
        // "how" appears in 2 of 3 documents
        let expected = (4.0_f64 / 3.0).ln() + 1.0;
        assert!((v.idf("how").unwrap_or_default() - expected).abs() < 1e-12);
        // "vim" appears once
        let expected = 2.0_f64.ln() + 1.0;
        assert!((v.idf("vim").unwrap_or_default() - expected).abs() < 1e-12);
        assert!(v.idf("emacs").is_none());
    }

    #[test]
    fn identical_document_scores_one() {
        let scores = score("how to configure neovim", &CORPUS);
        assert_eq!(scores.len(), 3);
        assert!((scores[1] - 1.0).abs() < 1e-9, "scores: {scores:?}");
        assert!(scores[2].abs() < 1e-9);
    }

    #[test]
    fn unknown_terms_contribute_nothing() {
        let scores = score("emacs org mode", &CORPUS);
        assert!(scores.iter().all(|s| *s == 0.0));
        assert!(TfidfVectorizer::fit(&CORPUS).transform("emacs").is_empty());
    }

    #[test]
    fn repeated_terms_weigh_more() {
        let v = TfidfVectorizer::fit(&CORPUS);
        let once = v.score("vim manager");
        let twice = v.score("vim vim manager");
        assert!(twice[0] > once[0]);
        assert!(twice[2] < once[2]);
    }

    #[test]
    fn empty_corpus_scores_nothing() {
        let empty: [&str; 0] = [];
        assert!(score("anything", &empty).is_empty());
        let v = TfidfVectorizer::fit(&empty);
        assert_eq!(v.vocabulary_size(), 0);
        assert_eq!(v.document_count(), 0);
    }

    #[test]
    fn scores_stay_in_unit_interval() {
        let v = TfidfVectorizer::fit(&CORPUS);
        for query in ["how to", "package", "vim editor how", ""] {
            for s in v.score(query) {
                assert!((0.0..=1.0 + 1e-12).contains(&s), "{query:?} -> {s}");
            }
        }
    }
}
