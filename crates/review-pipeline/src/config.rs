//! Pipeline configuration from environment variables.

use std::env;
use std::fs;
use std::path::PathBuf;

use review_core::Site;
use review_text::DEFAULT_LEXICON_FILE;

use crate::error::{PipelineError, PipelineResult};

/// Default directory for crawler CSVs and preprocessed output.
pub const DEFAULT_DATA_DIR: &str = "database";

/// Default minimum whitespace-token count of a kept comment.
pub const DEFAULT_MIN_WORDS: usize = 3;

/// Pipeline configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Directory holding `reviews_<site>.csv` crawler output.
    pub data_dir: PathBuf,
    /// Directory preprocessed tables are written to.
    pub output_dir: PathBuf,
    /// Subjectivity lexicon CSV.
    pub lexicon_path: PathBuf,
    /// Minimum raw word count of a kept review.
    pub min_words: usize,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            output_dir: PathBuf::from(DEFAULT_DATA_DIR),
            lexicon_path: PathBuf::from(DEFAULT_LEXICON_FILE),
            min_words: DEFAULT_MIN_WORDS,
            log_level: "info".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `REVIEW_DATA_DIR`: Input directory (default: "database")
    /// - `REVIEW_OUTPUT_DIR`: Output directory (default: "database")
    /// - `REVIEW_LEXICON_PATH`: Lexicon CSV (default: "movie_review_lexicon.csv")
    /// - `REVIEW_MIN_WORDS`: Minimum raw word count (default: 3)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> PipelineResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> PipelineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let min_words = match var("REVIEW_MIN_WORDS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                PipelineError::Config(format!(
                    "invalid value for REVIEW_MIN_WORDS: {raw:?} is not a non-negative integer"
                ))
            })?,
            None => defaults.min_words,
        };

        Ok(Self {
            data_dir: var("REVIEW_DATA_DIR").map_or(defaults.data_dir, PathBuf::from),
            output_dir: var("REVIEW_OUTPUT_DIR").map_or(defaults.output_dir, PathBuf::from),
            lexicon_path: var("REVIEW_LEXICON_PATH").map_or(defaults.lexicon_path, PathBuf::from),
            min_words,
            log_level: var("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    /// Path of a site's crawler output inside the data directory.
    pub fn site_input(&self, site: Site) -> PathBuf {
        self.data_dir.join(site.input_file_name())
    }

    /// Every crawler file for `site` in the data directory, sorted by name.
    ///
    /// Picks up suffixed crawls such as `reviews_letterboxd_newest.csv`
    /// next to the plain `reviews_letterboxd.csv`. A missing data directory
    /// holds no files.
    pub fn site_inputs(&self, site: Site) -> PipelineResult<Vec<PathBuf>> {
        if !self.data_dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries =
            fs::read_dir(&self.data_dir).map_err(|e| PipelineError::io(&self.data_dir, e))?;
        let mut inputs = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| PipelineError::io(&self.data_dir, e))?.path();
            let matches = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(Site::from_input_file_name)
                == Some(site);
            if matches && path.is_file() {
                inputs.push(path);
            }
        }
        inputs.sort();
        Ok(inputs)
    }
}
