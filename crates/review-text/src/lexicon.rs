//! Subjectivity lexicon loading.
//!
//! The lexicon is a CSV with `word` and `type` columns. Only two subjectivity
//! classes carry weight:
//!
//! | type             | weight |
//! |------------------|--------|
//! | `strongsubj`     | 2.0    |
//! | `verystrongsubj` | 4.0    |
//!
//! Rows of any other type are ignored. A missing lexicon file is not an
//! error: [`Lexicon::load`] logs a warning and returns an empty lexicon, which
//! makes every subjectivity score zero.
//!
//! The default lexicon is compiled into the binary, so an installed tool
//! scores reviews without any resource files next to it.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// File name of the lexicon bundled with this crate.
pub const DEFAULT_LEXICON_FILE: &str = "movie_review_lexicon.csv";

/// Contents of the bundled lexicon.
pub const BUNDLED_LEXICON: &str = include_str!("../resources/movie_review_lexicon.csv");

/// Errors raised while parsing a lexicon file.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    /// The file could not be opened or read.
    #[error("failed to read lexicon {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV could not be parsed.
    #[error("malformed lexicon: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header.
    #[error("lexicon is missing the {0:?} column")]
    MissingColumn(&'static str),
}

/// The subjectivity classes that carry weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectivityClass {
    Strong,
    VeryStrong,
}

impl SubjectivityClass {
    /// Parses a lexicon `type` label; labels are trimmed and lowercased.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "strongsubj" => Some(Self::Strong),
            "verystrongsubj" => Some(Self::VeryStrong),
            _ => None,
        }
    }

    pub const fn weight(&self) -> f64 {
        match self {
            Self::Strong => 2.0,
            Self::VeryStrong => 4.0,
        }
    }
}

/// Where a loaded lexicon came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum LexiconSource {
    /// The requested path.
    Requested(PathBuf),
    /// The default file name was requested but not found on disk; the
    /// copy compiled into the binary was used.
    Bundled,
    /// Neither location exists; the lexicon is empty.
    Missing,
    /// A file was found but could not be parsed; the lexicon is empty.
    Unreadable(PathBuf),
}

/// An immutable word -> subjectivity weight mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lexicon {
    weights: HashMap<String, f64>,
}

/// A lexicon together with the location it was read from.
#[derive(Debug, Clone)]
pub struct LoadedLexicon {
    pub lexicon: Lexicon,
    pub source: LexiconSource,
}

impl Lexicon {
    /// An empty lexicon.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a lexicon from `(word, class)` pairs; later words overwrite
    /// earlier ones.
    pub fn from_classes<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, SubjectivityClass)>,
        S: AsRef<str>,
    {
        let weights = entries
            .into_iter()
            .map(|(word, class)| (word.as_ref().trim().to_lowercase(), class.weight()))
            .collect();
        Self { weights }
    }

    /// Parses lexicon CSV from a reader.
    ///
    /// Words and types are trimmed and lowercased. Rows whose type is not a
    /// weighted class are skipped, as are rows with an empty word. A word
    /// listed more than once keeps the weight of its last row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LexiconError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let column = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim().eq_ignore_ascii_case(name))
                .ok_or(LexiconError::MissingColumn(name))
        };
        let word_idx = column("word")?;
        let type_idx = column("type")?;

        let mut weights = HashMap::new();
        for record in csv_reader.records() {
            let record = record?;
            let word = record.get(word_idx).unwrap_or("").trim().to_lowercase();
            let class = record.get(type_idx).and_then(SubjectivityClass::from_label);

            if let Some(class) = class {
                if !word.is_empty() {
                    weights.insert(word, class.weight());
                }
            }
        }

        Ok(Self { weights })
    }

    /// Parses a lexicon file, failing on any I/O or format error.
    pub fn from_path(path: &Path) -> Result<Self, LexiconError> {
        let file = File::open(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Parses the lexicon compiled into the binary.
    pub fn bundled() -> Result<Self, LexiconError> {
        Self::from_reader(BUNDLED_LEXICON.as_bytes())
    }

    /// Loads a lexicon, degrading to an empty one instead of failing.
    ///
    /// Lookup order:
    /// 1. `path` as given
    /// 2. the bundled lexicon, when the file name of `path` is
    ///    [`DEFAULT_LEXICON_FILE`]
    ///
    /// When neither applies, or the lexicon found cannot be parsed, a warning
    /// is logged and the returned lexicon is empty.
    pub fn load(path: impl AsRef<Path>) -> LoadedLexicon {
        let requested = path.as_ref();

        let (parsed, source) = if requested.is_file() {
            (
                Self::from_path(requested),
                LexiconSource::Requested(requested.to_path_buf()),
            )
        } else if is_default_name(requested) {
            tracing::debug!(
                "Lexicon not found at {}, using the bundled copy",
                requested.display()
            );
            (Self::bundled(), LexiconSource::Bundled)
        } else {
            tracing::warn!(
                "Lexicon file not found at {}. Returning empty lexicon.",
                requested.display()
            );
            return LoadedLexicon {
                lexicon: Self::empty(),
                source: LexiconSource::Missing,
            };
        };

        match parsed {
            Ok(lexicon) => {
                tracing::info!("Loaded {} lexicon words ({:?})", lexicon.len(), source);
                LoadedLexicon { lexicon, source }
            }
            Err(e) => {
                tracing::warn!("{}. Returning empty lexicon.", e);
                LoadedLexicon {
                    lexicon: Self::empty(),
                    source: LexiconSource::Unreadable(requested.to_path_buf()),
                }
            }
        }
    }

    /// Weight of a word, if it is in the lexicon.
    pub fn weight(&self, word: &str) -> Option<f64> {
        self.weights.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.weights.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Number of words per weight class, as `(strong, very_strong)`.
    pub fn class_counts(&self) -> (usize, usize) {
        self.weights.values().fold((0, 0), |(strong, very), w| {
            if *w == SubjectivityClass::VeryStrong.weight() {
                (strong, very + 1)
            } else {
                (strong + 1, very)
            }
        })
    }
}

/// Loads a lexicon from `path`; a missing file yields an empty lexicon.
pub fn load_lexicon(path: impl AsRef<Path>) -> Lexicon {
    Lexicon::load(path).lexicon
}

fn is_default_name(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name == DEFAULT_LEXICON_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_lexicon(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_weighted_classes_only() {
        let csv = "word,type\n\
                   great,strongsubj\n\
                   awful,verystrongsubj\n\
                   film,weaksubj\n\
                   plot,neutral\n";
        let lexicon = Lexicon::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.weight("great"), Some(2.0));
        assert_eq!(lexicon.weight("awful"), Some(4.0));
        assert_eq!(lexicon.weight("film"), None);
    }

    #[test]
    fn trims_and_lowercases_fields() {
        let csv = "word,type\n  Masterpiece , VeryStrongSubj \n";
        let lexicon = Lexicon::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(lexicon.weight("masterpiece"), Some(4.0));
    }

    #[test]
    fn last_row_wins_for_duplicates() {
        let csv = "word,type\nbrilliant,strongsubj\nbrilliant,verystrongsubj\n";
        let lexicon = Lexicon::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(lexicon.weight("brilliant"), Some(4.0));

        let csv = "word,type\nbrilliant,verystrongsubj\nbrilliant,strongsubj\n";
        let lexicon = Lexicon::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(lexicon.weight("brilliant"), Some(2.0));
    }

    #[test]
    fn extra_columns_and_bom_are_tolerated() {
        let csv = "\u{feff}word,priorpolarity,type\nboring,negative,strongsubj\n";
        let lexicon = Lexicon::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(lexicon.weight("boring"), Some(2.0));
    }

    #[test]
    fn missing_type_column_is_an_error() {
        let err = Lexicon::from_reader("word,label\ngreat,strongsubj\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LexiconError::MissingColumn("type")));
    }

    #[test]
    fn load_reads_requested_path() {
        let file = write_lexicon("word,type\nstunning,verystrongsubj\n");
        let loaded = Lexicon::load(file.path());

        assert_eq!(loaded.lexicon.weight("stunning"), Some(4.0));
        assert_eq!(loaded.source, LexiconSource::Requested(file.path().to_path_buf()));
    }

    #[test]
    fn load_missing_path_returns_empty() {
        let loaded = Lexicon::load("/nonexistent/path");
        assert!(loaded.lexicon.is_empty());
        assert_eq!(loaded.source, LexiconSource::Missing);
        assert!(load_lexicon("/nonexistent/path").is_empty());
    }

    #[test]
    fn load_malformed_file_returns_empty() {
        let file = write_lexicon("term,label\nstunning,verystrongsubj\n");
        let loaded = Lexicon::load(file.path());
        assert!(loaded.lexicon.is_empty());
        assert!(matches!(loaded.source, LexiconSource::Unreadable(_)));
    }

    #[test]
    fn load_falls_back_to_bundled_copy() {
        let loaded = Lexicon::load(Path::new("/nowhere").join(DEFAULT_LEXICON_FILE));
        assert_eq!(loaded.source, LexiconSource::Bundled);
        assert_eq!(loaded.lexicon, Lexicon::bundled().unwrap());
        assert!(!loaded.lexicon.is_empty());
    }

    #[test]
    fn bundled_copy_needs_no_resource_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let loaded = Lexicon::load(dir.path().join("lexicons").join(DEFAULT_LEXICON_FILE));
        assert_eq!(loaded.source, LexiconSource::Bundled);
        assert!(loaded.lexicon.contains("brilliant"));

        // Only the default name falls back.
        let other = Lexicon::load(dir.path().join("custom_lexicon.csv"));
        assert_eq!(other.source, LexiconSource::Missing);
    }

    #[test]
    fn requested_file_wins_over_bundled_copy() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_LEXICON_FILE);
        std::fs::write(&path, "word,type\nstunning,verystrongsubj\n").unwrap();

        let loaded = Lexicon::load(&path);
        assert_eq!(loaded.source, LexiconSource::Requested(path));
        assert_eq!(loaded.lexicon.len(), 1);
    }

    #[test]
    fn bundled_lexicon_only_has_weighted_words() {
        let lexicon = Lexicon::bundled().unwrap();
        let (strong, very_strong) = lexicon.class_counts();
        assert!(strong > 0);
        assert!(very_strong > 0);
        assert_eq!(strong + very_strong, lexicon.len());
    }

    #[test]
    fn from_classes_builds_lexicon() {
        let lexicon = Lexicon::from_classes([
            ("Great", SubjectivityClass::Strong),
            ("awful", SubjectivityClass::VeryStrong),
        ]);
        assert_eq!(lexicon.weight("great"), Some(2.0));
        assert_eq!(lexicon.class_counts(), (1, 1));
    }
}
