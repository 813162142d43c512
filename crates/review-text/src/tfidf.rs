//! TF-IDF (Term Frequency-Inverse Document Frequency) term-document matrix.
//!
//! This module provides the weighting used by the subjectivity scorer:
//! - Word-boundary tokenization (maximal runs of `\w` characters)
//! - Corpus statistics for smoothed IDF
//! - A sparse document x vocabulary matrix of raw `tf * idf` weights
//!
//! Rows are left unnormalized: a row's magnitude grows with
//! document length, so dividing a row's weighted sum by the document's word
//! count gives a per-word average.
//!
//! Weighting:
//!
//! ```text
//! tf(t, d)  = number of times t occurs in d
//! idf(t)    = ln((1 + n) / (1 + df(t))) + 1
//! w(t, d)   = tf(t, d) * idf(t)
//! ```
//!
//! where `n` is the number of documents and `df(t)` the number of documents
//! containing `t`.

use std::collections::{HashMap, HashSet};

use regex::Regex;

/// Pattern for a token: a maximal run of word characters between word
/// boundaries.
pub const TOKEN_PATTERN: &str = r"\b\w+\b";

/// Errors raised while building a term-document matrix.
#[derive(Debug, thiserror::Error)]
pub enum TfIdfError {
    /// No document produced a single token.
    #[error("empty vocabulary; documents contain no tokens")]
    EmptyVocabulary,

    /// The token pattern failed to compile.
    #[error("invalid token pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Splits text into word tokens.
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    pattern: Regex,
}

impl WordTokenizer {
    /// Creates a tokenizer using [`TOKEN_PATTERN`].
    pub fn new() -> Result<Self, TfIdfError> {
        Ok(Self {
            pattern: Regex::new(TOKEN_PATTERN)?,
        })
    }

    /// Returns the tokens of `text`, lowercased, in order of appearance.
    pub fn tokenize<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        self.pattern
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
    }
}

/// Counts how many times each token occurs in a document.
///
/// # Arguments
///
/// * `tokens` - The tokenized document
///
/// # Returns
///
/// A map from term to its raw occurrence count
pub fn term_counts(tokens: &[String]) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for token in tokens {
        *counts.entry(token.clone()).or_insert(0) += 1;
    }
    counts
}

/// Statistics about a corpus of documents for IDF computation.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CorpusStats {
    /// Number of documents in the corpus
    pub document_count: usize,
    /// Number of documents containing each term
    pub document_frequencies: HashMap<String, usize>,
}

impl CorpusStats {
    /// Creates a new empty corpus stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document's tokens to the corpus statistics.
    ///
    /// Updates document count and document frequencies for each unique term.
    pub fn add_document(&mut self, tokens: &[String]) {
        self.document_count += 1;

        // Count each unique term once per document
        let unique_terms: HashSet<&String> = tokens.iter().collect();
        for term in unique_terms {
            *self.document_frequencies.entry(term.clone()).or_insert(0) += 1;
        }
    }

    /// Computes the smoothed inverse document frequency for a term.
    ///
    /// IDF = ln((1 + N) / (1 + df)) + 1, as if one extra document contained
    /// every term once. Terms outside the corpus get the maximum IDF.
    pub fn idf(&self, term: &str) -> f64 {
        let df = self.document_frequencies.get(term).copied().unwrap_or(0);
        ((1 + self.document_count) as f64 / (1 + df) as f64).ln() + 1.0
    }
}

/// A sparse matrix of unnormalized TF-IDF weights.
///
/// Rows are documents in input order; columns are the corpus vocabulary in
/// lexical order.
#[derive(Debug, Clone)]
pub struct TermDocumentMatrix {
    vocabulary: Vec<String>,
    rows: Vec<Vec<(usize, f64)>>,
}

impl TermDocumentMatrix {
    /// Learns the vocabulary and IDF from `documents` and returns their
    /// weight rows.
    ///
    /// Fails with [`TfIdfError::EmptyVocabulary`] when no document contains
    /// a token.
    pub fn fit_transform<S: AsRef<str>>(documents: &[S]) -> Result<Self, TfIdfError> {
        let tokenizer = WordTokenizer::new()?;
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| tokenizer.tokenize(doc.as_ref()).collect())
            .collect();

        let mut corpus = CorpusStats::new();
        for tokens in &tokenized {
            corpus.add_document(tokens);
        }
        if corpus.document_frequencies.is_empty() {
            return Err(TfIdfError::EmptyVocabulary);
        }

        let mut vocabulary: Vec<String> = corpus.document_frequencies.keys().cloned().collect();
        vocabulary.sort();
        let index: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.as_str(), i))
            .collect();

        let rows = tokenized
            .iter()
            .map(|tokens| {
                let mut row: Vec<(usize, f64)> = term_counts(tokens)
                    .into_iter()
                    .map(|(term, count)| (index[term.as_str()], count as f64 * corpus.idf(&term)))
                    .collect();
                row.sort_by_key(|(column, _)| *column);
                row
            })
            .collect();

        Ok(Self { vocabulary, rows })
    }

    /// The vocabulary, one entry per column.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Number of documents (rows).
    pub fn n_documents(&self) -> usize {
        self.rows.len()
    }

    /// Non-zero entries of a row as `(column, weight)` pairs.
    pub fn row(&self, document: usize) -> &[(usize, f64)] {
        &self.rows[document]
    }

    /// Weight of `term` in `document`, zero when absent.
    pub fn weight(&self, document: usize, term: &str) -> f64 {
        let Ok(column) = self.vocabulary.binary_search_by(|t| t.as_str().cmp(term)) else {
            return 0.0;
        };
        self.rows[document]
            .iter()
            .find(|(c, _)| *c == column)
            .map_or(0.0, |(_, w)| *w)
    }

    /// Multiplies the matrix by a per-column weight vector.
    ///
    /// # Arguments
    ///
    /// * `column_weights` - One weight per vocabulary entry
    ///
    /// # Returns
    ///
    /// One value per document: the sum over its terms of
    /// `tfidf(term, doc) * column_weights[term]`
    pub fn dot(&self, column_weights: &[f64]) -> Vec<f64> {
        debug_assert_eq!(column_weights.len(), self.vocabulary.len());
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|(column, weight)| weight * column_weights[*column])
                    .sum()
            })
            .collect()
    }
}
