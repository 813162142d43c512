//! Text processing for movie review analysis.
//!
//! - [`cleaner`]: lowercase, letters-only, stopword-free lemmatized text
//! - [`language`]: deterministic language detection
//! - [`lexicon`]: subjectivity lexicon loading with a bundled fallback
//! - [`tfidf`]: unnormalized TF-IDF term-document matrix
//! - [`subjectivity`]: lexicon-weighted subjectivity scores
//! - [`resources`]: the cleaner/detector bundle shared across sites

pub mod cleaner;
pub mod language;
pub mod lemmatizer;
pub mod lexicon;
pub mod resources;
pub mod stopwords;
pub mod subjectivity;
pub mod tfidf;

pub use cleaner::{TextCleaner, word_count};
pub use language::{FixedDetector, LanguageDetector, LinguaDetector};
pub use lemmatizer::Lemmatizer;
pub use lexicon::{
    BUNDLED_LEXICON, DEFAULT_LEXICON_FILE, Lexicon, LexiconError, LexiconSource, LoadedLexicon,
    SubjectivityClass, load_lexicon,
};
pub use resources::TextResources;
pub use stopwords::StopWords;
pub use subjectivity::{BACKGROUND_WEIGHT, ScoreOutcome, ScoreStatus, score_documents};
pub use tfidf::{TermDocumentMatrix, TfIdfError};
