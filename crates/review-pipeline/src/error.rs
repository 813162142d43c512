//! Error types for the review pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors that can occur while running the pipeline.
///
/// Malformed rows are never errors; ingestion drops them. These variants
/// cover unreadable input, stages called out of order, and bad
/// configuration.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader or writer failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the input header.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// A processed table holds a value that does not parse.
    #[error("invalid value {value:?} in column {column} at row {row}")]
    InvalidField {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// A stage ran before `preprocess`.
    #[error("{stage} called before preprocess")]
    NotPreprocessed { stage: &'static str },

    /// `save` ran before `feature_engineering`.
    #[error("save called before feature_engineering")]
    NotFeatured,

    /// Nothing survived preprocessing, so there is nothing to save.
    #[error("no rows to save")]
    NoData,

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
