//! review-core: shared data model for the movie review analysis pipeline
//!
//! This crate provides:
//! - Review records for each pipeline stage (raw, cleaned, featured)
//! - The review table container with passthrough columns
//! - Site, language and year-month value types
//!
//! It performs no I/O; reading and writing tables lives in `review-pipeline`.

pub mod review;
pub mod types;

pub use review::{CleanedReview, RawReview, Review, ReviewTable};
pub use types::{
    Detection, LETTERBOXD_SPOILER_SHIELD, Language, ParseSiteError, ParseYearMonthError, Site,
    YearMonth,
};
