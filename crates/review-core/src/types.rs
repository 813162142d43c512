//! Core value types for the review analysis pipeline.
//!
//! These are small, copyable or cheaply cloned values shared by every stage:
//!
//! - [`Site`]: the review source a table was scraped from
//! - [`Language`] and [`Detection`]: the outcome of language detection
//! - [`YearMonth`]: the calendar bucket used for temporal aggregation
//!
//! All types derive `Debug`, `Clone`, `Serialize`, and `Deserialize` and have
//! `Display`/`FromStr` round-trips so they can live in CSV cells.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Sites
// ============================================================================

/// Boilerplate Letterboxd renders in place of a review hidden behind its
/// spoiler warning.
pub const LETTERBOXD_SPOILER_SHIELD: &str =
    "This review may contain spoilers. I can handle the truth.";

/// A movie review website the crawlers collect from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Site {
    Imdb,
    Letterboxd,
    RottenTomatoes,
}

impl Site {
    /// Every known site, in processing order.
    pub const ALL: [Site; 3] = [Site::Imdb, Site::Letterboxd, Site::RottenTomatoes];

    /// Identifier used on the command line.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Imdb => "imdb",
            Self::Letterboxd => "letterboxd",
            Self::RottenTomatoes => "rotten_tomatoes",
        }
    }

    /// File-name token the crawlers use for this site's CSV files.
    #[must_use]
    pub const fn file_token(&self) -> &'static str {
        match self {
            Self::Imdb => "imdb",
            Self::Letterboxd => "letterboxd",
            Self::RottenTomatoes => "RottenTomatoes",
        }
    }

    /// Name of the raw crawler output, e.g. `reviews_imdb.csv`.
    #[must_use]
    pub fn input_file_name(&self) -> String {
        format!("reviews_{}.csv", self.file_token())
    }

    /// The site a crawler file belongs to, judged by its name.
    ///
    /// Matches `reviews_<token>.csv` and suffixed variants such as
    /// `reviews_letterboxd_newest.csv`. The token compares case-insensitively.
    #[must_use]
    pub fn from_input_file_name(name: &str) -> Option<Self> {
        let rest = name.strip_suffix(".csv")?.strip_prefix("reviews_")?;
        Self::ALL.into_iter().find(|site| {
            let token = site.file_token();
            rest.get(..token.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(token))
                && matches!(rest.as_bytes().get(token.len()), None | Some(b'_'))
        })
    }

    /// Name of the preprocessed output, e.g. `preprocessed_reviews_imdb.csv`.
    #[must_use]
    pub fn output_file_name(&self) -> String {
        format!("preprocessed_reviews_{}.csv", self.file_token())
    }

    /// Placeholder text this site shows instead of a spoiler-hidden review.
    #[must_use]
    pub const fn spoiler_shield(&self) -> Option<&'static str> {
        match self {
            Self::Letterboxd => Some(LETTERBOXD_SPOILER_SHIELD),
            Self::Imdb | Self::RottenTomatoes => None,
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Imdb => "IMDb",
            Self::Letterboxd => "Letterboxd",
            Self::RottenTomatoes => "RottenTomatoes",
        };
        f.write_str(name)
    }
}

impl FromStr for Site {
    type Err = ParseSiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "imdb" => Ok(Self::Imdb),
            "letterboxd" => Ok(Self::Letterboxd),
            "rotten_tomatoes" | "rottentomatoes" => Ok(Self::RottenTomatoes),
            _ => Err(ParseSiteError(s.to_string())),
        }
    }
}

/// Error returned when a site name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown review site: {0} (expected imdb, letterboxd or rotten_tomatoes)")]
pub struct ParseSiteError(pub String);

// ============================================================================
// Language
// ============================================================================

/// A language code as reported by the detector (`"en"`, `"es"`, ...).
///
/// Detector failures are recorded with the sentinel [`Language::UNKNOWN`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language(String);

impl Language {
    /// Sentinel code for text the detector could not decide on.
    pub const UNKNOWN: &'static str = "unknown";

    /// Code for English, the only language the pipeline keeps.
    pub const ENGLISH: &'static str = "en";

    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn english() -> Self {
        Self(Self::ENGLISH.to_string())
    }

    #[must_use]
    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_english(&self) -> bool {
        self.0 == Self::ENGLISH
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of running language detection on a piece of text.
///
/// Detection is allowed to fail on undecidable input (empty text, digits,
/// emoji). Failure is a regular outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "language", rename_all = "snake_case")]
pub enum Detection {
    Detected(Language),
    Unknown,
}

impl Detection {
    /// Collapses the outcome into the value stored in the `language` column.
    #[must_use]
    pub fn into_language(self) -> Language {
        match self {
            Self::Detected(language) => language,
            Self::Unknown => Language::unknown(),
        }
    }

    #[must_use]
    pub fn is_english(&self) -> bool {
        matches!(self, Self::Detected(language) if language.is_english())
    }
}

// ============================================================================
// Year-month buckets
// ============================================================================

/// Calendar month bucket, rendered as `YYYY-MM`.
///
/// Ordering is chronological, and the rendered form sorts lexically in the
/// same order for years 0 through 9999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a bucket, returning `None` if `month` is not in `1..=12`.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The bucket containing a timestamp.
    #[must_use]
    pub fn from_datetime(timestamp: &NaiveDateTime) -> Self {
        Self {
            year: timestamp.year(),
            month: timestamp.month(),
        }
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ParseYearMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseYearMonthError(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for YearMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Error returned when a `YYYY-MM` string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid year-month: {0:?} (expected YYYY-MM)")]
pub struct ParseYearMonthError(pub String);
