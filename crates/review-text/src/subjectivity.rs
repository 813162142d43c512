//! Lexicon-weighted subjectivity scoring.
//!
//! ## Algorithm
//!
//! 1. Build an unnormalized TF-IDF matrix over the batch's cleaned comments.
//!    The vocabulary is whatever tokens this batch contains.
//! 2. Weight each vocabulary word by its lexicon weight (2.0 or 4.0), or by
//!    [`BACKGROUND_WEIGHT`] when the word is not in the lexicon.
//! 3. Raw score = dot product of a review's matrix row with the weights.
//! 4. Score = raw score / clean word count (zero counts are treated as 1).
//!
//! The matrix and weight vector live only for the duration of one call.
//!
//! An empty lexicon or a batch with no tokens is not an error: every score
//! is zero and the returned [`ScoreStatus`] says why.

use serde::Serialize;

use crate::lexicon::Lexicon;
use crate::tfidf::TermDocumentMatrix;

/// Weight of a vocabulary word that is not in the lexicon.
///
/// Half the lowest lexicon weight, so polar words dominate the score.
pub const BACKGROUND_WEIGHT: f64 = 0.5;

/// How a batch of scores was produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum ScoreStatus {
    /// Scores were computed from the lexicon-weighted matrix.
    Scored,
    /// The lexicon was empty; every score is zero.
    EmptyLexicon,
    /// The matrix could not be built; every score is zero.
    Degraded(String),
}

/// Scores for one batch of documents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreOutcome {
    /// One score per input document, in input order.
    pub scores: Vec<f64>,
    pub status: ScoreStatus,
}

impl ScoreOutcome {
    fn zeros(n: usize, status: ScoreStatus) -> Self {
        Self {
            scores: vec![0.0; n],
            status,
        }
    }

    /// Mean score, or `None` for an empty batch.
    pub fn mean(&self) -> Option<f64> {
        if self.scores.is_empty() {
            None
        } else {
            Some(self.scores.iter().sum::<f64>() / self.scores.len() as f64)
        }
    }
}

/// The per-word weight of every vocabulary entry.
pub fn vocabulary_weights(vocabulary: &[String], lexicon: &Lexicon) -> Vec<f64> {
    vocabulary
        .iter()
        .map(|word| lexicon.weight(word).unwrap_or(BACKGROUND_WEIGHT))
        .collect()
}

/// Computes the subjectivity score of each document.
///
/// # Arguments
///
/// * `documents` - Cleaned comments of the whole batch
/// * `word_counts` - Clean word count of each document, aligned with `documents`
/// * `lexicon` - Subjectivity lexicon
///
/// # Returns
///
/// A [`ScoreOutcome`] with one score per document
pub fn score_documents<S: AsRef<str>>(
    documents: &[S],
    word_counts: &[usize],
    lexicon: &Lexicon,
) -> ScoreOutcome {
    if lexicon.is_empty() {
        tracing::warn!("Lexicon is empty. Subjectivity scores will be 0.");
        return ScoreOutcome::zeros(documents.len(), ScoreStatus::EmptyLexicon);
    }

    let matrix = match TermDocumentMatrix::fit_transform(documents) {
        Ok(matrix) => matrix,
        Err(e) => {
            tracing::warn!("Warning during TF-IDF: {}. Setting scores to 0.", e);
            return ScoreOutcome::zeros(documents.len(), ScoreStatus::Degraded(e.to_string()));
        }
    };

    let weights = vocabulary_weights(matrix.vocabulary(), lexicon);
    let raw_scores = matrix.dot(&weights);
    tracing::debug!(
        "Scored {} documents over a vocabulary of {} words",
        matrix.n_documents(),
        weights.len()
    );

    let scores = raw_scores
        .into_iter()
        .enumerate()
        .map(|(i, raw)| {
            let count = word_counts.get(i).copied().unwrap_or(1).max(1);
            raw / count as f64
        })
        .collect();

    ScoreOutcome {
        scores,
        status: ScoreStatus::Scored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::SubjectivityClass;

    fn lexicon() -> Lexicon {
        Lexicon::from_classes([
            ("great", SubjectivityClass::Strong),
            ("awful", SubjectivityClass::VeryStrong),
        ])
    }

    fn idf(n: usize, df: usize) -> f64 {
        ((1 + n) as f64 / (1 + df) as f64).ln() + 1.0
    }

    #[test]
    fn empty_lexicon_scores_zero() {
        let outcome = score_documents(&["great film", "awful plot"], &[2, 2], &Lexicon::empty());
        assert_eq!(outcome.scores, vec![0.0, 0.0]);
        assert_eq!(outcome.status, ScoreStatus::EmptyLexicon);
    }

    #[test]
    fn empty_vocabulary_degrades_to_zero() {
        let outcome = score_documents(&["", ""], &[0, 0], &lexicon());
        assert_eq!(outcome.scores, vec![0.0, 0.0]);
        assert!(matches!(outcome.status, ScoreStatus::Degraded(_)));
    }

    #[test]
    fn lexicon_words_outweigh_background_words() {
        let docs = ["great great awful", "great awful boring"];
        let outcome = score_documents(&docs, &[3, 3], &lexicon());
        assert_eq!(outcome.status, ScoreStatus::Scored);

        // great and awful are in both documents; boring in one
        let expected_a = (2.0 * idf(2, 2) * 2.0 + 1.0 * idf(2, 2) * 4.0) / 3.0;
        let expected_b =
            (1.0 * idf(2, 2) * 2.0 + 1.0 * idf(2, 2) * 4.0 + 1.0 * idf(2, 1) * BACKGROUND_WEIGHT)
                / 3.0;

        assert!((outcome.scores[0] - expected_a).abs() < 1e-12);
        assert!((outcome.scores[1] - expected_b).abs() < 1e-12);
        assert!(outcome.scores[0] > outcome.scores[1]);
    }

    #[test]
    fn score_is_divided_by_word_count() {
        let docs = ["great film"];
        let one = score_documents(&docs, &[1], &lexicon()).scores[0];
        let four = score_documents(&docs, &[4], &lexicon()).scores[0];
        assert!((one - 4.0 * four).abs() < 1e-12);
    }

    #[test]
    fn zero_word_count_is_treated_as_one() {
        let docs = ["great"];
        let zero = score_documents(&docs, &[0], &lexicon()).scores[0];
        let one = score_documents(&docs, &[1], &lexicon()).scores[0];
        assert_eq!(zero, one);
        assert!(zero.is_finite());
    }

    #[test]
    fn vocabulary_is_batch_specific() {
        // The same review scores differently next to different neighbours,
        // because IDF is learned from the batch.
        let alone = score_documents(&["great film"], &[2], &lexicon()).scores[0];
        let with_neighbour =
            score_documents(&["great film", "great plot"], &[2, 2], &lexicon()).scores[0];
        assert!((alone - with_neighbour).abs() > 1e-9);
    }

    #[test]
    fn background_weight_applies_outside_lexicon() {
        let weights = vocabulary_weights(
            &["awful".to_string(), "boring".to_string(), "great".to_string()],
            &lexicon(),
        );
        assert_eq!(weights, vec![4.0, BACKGROUND_WEIGHT, 2.0]);
    }

    #[test]
    fn outcome_mean() {
        let outcome = score_documents(&["great", "awful"], &[1, 1], &lexicon());
        let mean = outcome.mean().unwrap();
        assert!((mean - (outcome.scores[0] + outcome.scores[1]) / 2.0).abs() < 1e-12);

        let empty: [&str; 0] = [];
        assert_eq!(score_documents(&empty, &[], &lexicon()).mean(), None);
    }
}
