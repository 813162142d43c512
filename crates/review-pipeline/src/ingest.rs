//! Ingestion and filtering of raw review tables.
//!
//! [`preprocess`] turns a crawler table into cleaned English reviews. Rows
//! are checked in a fixed order and dropped at the first filter they fail;
//! [`FilterStats`] records how many rows each filter removed.
//!
//! 1. comment empty after stripping whitespace
//! 2. rating, date or comment missing
//! 3. comment contains the site's spoiler-shield phrase
//! 4. fewer than `min_words` whitespace tokens
//! 5. detected language is not English (undetectable counts as not English)
//! 6. date does not parse
//!
//! Malformed rows never cause an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

use review_core::{CleanedReview, Detection, RawReview, ReviewTable, Site};
use review_text::{TextResources, word_count};

use crate::config::DEFAULT_MIN_WORDS;

/// Date-time layouts the crawlers are known to emit.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Date-only layouts; parsed to midnight.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y.%m.%d.",
    "%Y.%m.%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Parses a scraped date into a timestamp.
///
/// Returns `None` when no known layout matches. Offsets in RFC 3339 input
/// are dropped, keeping the local wall-clock time.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.naive_local());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DATE_FORMATS.iter().find_map(|format| {
                NaiveDate::parse_from_str(value, format)
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
        })
}

/// Per-site filtering options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOptions {
    /// Minimum whitespace-token count of a kept comment.
    pub min_words: usize,
    /// Boilerplate text whose presence marks a row as noise.
    pub spoiler_shield: Option<String>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            min_words: DEFAULT_MIN_WORDS,
            spoiler_shield: None,
        }
    }
}

impl IngestOptions {
    /// Options for a known site.
    pub fn for_site(site: Site) -> Self {
        Self {
            spoiler_shield: site.spoiler_shield().map(str::to_string),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_min_words(mut self, min_words: usize) -> Self {
        self.min_words = min_words;
        self
    }

    #[must_use]
    pub fn with_spoiler_shield(mut self, phrase: impl Into<String>) -> Self {
        self.spoiler_shield = Some(phrase.into());
        self
    }
}

/// How many rows each filter removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    pub rows_read: usize,
    pub empty_comment: usize,
    pub missing_field: usize,
    pub spoiler_shield: usize,
    pub too_short: usize,
    pub non_english: usize,
    pub bad_date: usize,
    /// Of the non-English drops, how many the detector could not decide.
    pub undetected: usize,
    pub rows_kept: usize,
}

impl FilterStats {
    /// Total rows removed.
    pub fn dropped(&self) -> usize {
        self.empty_comment
            + self.missing_field
            + self.spoiler_shield
            + self.too_short
            + self.non_english
            + self.bad_date
    }
}

/// Why a row was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DropReason {
    EmptyComment,
    MissingField,
    SpoilerShield,
    TooShort,
    NonEnglish { undetected: bool },
    BadDate,
}

impl FilterStats {
    fn record(&mut self, reason: DropReason) {
        match reason {
            DropReason::EmptyComment => self.empty_comment += 1,
            DropReason::MissingField => self.missing_field += 1,
            DropReason::SpoilerShield => self.spoiler_shield += 1,
            DropReason::TooShort => self.too_short += 1,
            DropReason::NonEnglish { undetected } => {
                self.non_english += 1;
                if undetected {
                    self.undetected += 1;
                }
            }
            DropReason::BadDate => self.bad_date += 1,
        }
    }
}

fn ingest_row(
    raw: RawReview,
    options: &IngestOptions,
    resources: &TextResources,
) -> Result<CleanedReview, DropReason> {
    let comment = raw.comment.as_deref().map(str::trim);
    if comment == Some("") {
        return Err(DropReason::EmptyComment);
    }
    let (Some(rating), Some(date), Some(comment)) = (raw.rating, raw.date, comment) else {
        return Err(DropReason::MissingField);
    };

    if let Some(phrase) = &options.spoiler_shield {
        if comment.contains(phrase.as_str()) {
            return Err(DropReason::SpoilerShield);
        }
    }

    let raw_word_count = word_count(comment);
    if raw_word_count < options.min_words {
        return Err(DropReason::TooShort);
    }

    let detection = resources.detect(comment);
    if !detection.is_english() {
        return Err(DropReason::NonEnglish {
            undetected: detection == Detection::Unknown,
        });
    }

    let clean_comment = resources.cleaner().clean(comment);

    let date = parse_date(&date).ok_or(DropReason::BadDate)?;

    Ok(CleanedReview {
        rating,
        date,
        comment: comment.to_string(),
        language: detection.into_language(),
        raw_word_count,
        clean_comment,
        extra: raw.extra,
    })
}

/// Cleans and filters a raw table.
///
/// # Arguments
///
/// * `raw` - Table as read from the crawler CSV
/// * `options` - Site-specific filter settings
/// * `resources` - Cleaner and language detector shared by the run
///
/// # Returns
///
/// The surviving rows, densely indexed in input order, and the number of
/// rows each filter removed
pub fn preprocess(
    raw: ReviewTable<RawReview>,
    options: &IngestOptions,
    resources: &TextResources,
) -> (ReviewTable<CleanedReview>, FilterStats) {
    let mut stats = FilterStats {
        rows_read: raw.len(),
        ..FilterStats::default()
    };

    let mut rows = Vec::with_capacity(raw.len());
    for row in raw.rows {
        match ingest_row(row, options, resources) {
            Ok(cleaned) => rows.push(cleaned),
            Err(reason) => stats.record(reason),
        }
    }
    stats.rows_kept = rows.len();

    tracing::debug!(
        empty_comment = stats.empty_comment,
        missing_field = stats.missing_field,
        spoiler_shield = stats.spoiler_shield,
        too_short = stats.too_short,
        non_english = stats.non_english,
        bad_date = stats.bad_date,
        "Filter drop counts"
    );
    if stats.undetected > 0 {
        tracing::warn!(
            "Language detection failed for {} reviews; treated as unknown",
            stats.undetected
        );
    }
    tracing::info!("Preprocessed {} -> {} rows", stats.rows_read, stats.rows_kept);

    (ReviewTable::new(raw.extra_columns, rows), stats)
}
