//! Review records at each stage of the pipeline.
//!
//! A row moves through three shapes:
//!
//! 1. [`RawReview`]: a crawler row, any field possibly missing
//! 2. [`CleanedReview`]: survived every filter, carries `clean_comment`
//! 3. [`Review`]: has the derived features (`year_month`,
//!    `clean_word_count`, `subjectivity_score`)
//!
//! Rows that fail a filter are dropped rather than carried with empty
//! features, so the derived fields are never optional.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::types::{Language, YearMonth};

/// A row as read from a crawler CSV.
///
/// `extra` holds the values of passthrough columns, aligned with
/// [`ReviewTable::extra_columns`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReview {
    pub rating: Option<String>,
    pub date: Option<String>,
    pub comment: Option<String>,
    #[serde(default)]
    pub extra: Vec<String>,
}

/// A review that passed ingestion and text cleaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedReview {
    /// Rating exactly as scraped (numeric or star text).
    pub rating: String,
    pub date: NaiveDateTime,
    /// Comment with surrounding whitespace stripped.
    pub comment: String,
    pub language: Language,
    /// Whitespace-token count of `comment`.
    pub raw_word_count: usize,
    pub clean_comment: String,
    #[serde(default)]
    pub extra: Vec<String>,
}

/// A fully processed review with derived features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(flatten)]
    pub cleaned: CleanedReview,
    pub year_month: YearMonth,
    /// Whitespace-token count of `clean_comment`.
    pub clean_word_count: usize,
    pub subjectivity_score: f64,
}

impl Review {
    /// Attaches features to a cleaned review.
    #[must_use]
    pub fn new(cleaned: CleanedReview, clean_word_count: usize, subjectivity_score: f64) -> Self {
        let year_month = YearMonth::from_datetime(&cleaned.date);
        Self {
            cleaned,
            year_month,
            clean_word_count,
            subjectivity_score,
        }
    }

    /// The numeric value of the rating, when it parses as one.
    #[must_use]
    pub fn numeric_rating(&self) -> Option<f64> {
        self.cleaned
            .rating
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|r| r.is_finite())
    }
}

/// An in-memory table of reviews with passthrough columns.
///
/// The pipeline owns one table per run; columns other than the ones it
/// understands are kept verbatim in each row's `extra` vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewTable<R> {
    /// Names of passthrough columns, in input order.
    pub extra_columns: Vec<String>,
    pub rows: Vec<R>,
}

impl<R> ReviewTable<R> {
    #[must_use]
    pub fn new(extra_columns: Vec<String>, rows: Vec<R>) -> Self {
        Self {
            extra_columns,
            rows,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replaces every row, keeping the column layout.
    pub fn map_rows<T>(self, f: impl FnMut(R) -> T) -> ReviewTable<T> {
        ReviewTable {
            extra_columns: self.extra_columns,
            rows: self.rows.into_iter().map(f).collect(),
        }
    }
}

impl<R> Default for ReviewTable<R> {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}
