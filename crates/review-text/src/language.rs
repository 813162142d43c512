//! Language detection for review comments.
//!
//! The pipeline only keeps English reviews, so detection sits behind the
//! [`LanguageDetector`] trait: production code uses the n-gram models from
//! `lingua`, tests can substitute a fixed answer.
//!
//! Reviews that survive the word-count filter can be as short as three
//! words, so the detector runs in high-accuracy mode, which also looks at
//! single words and word pairs.
//!
//! Detection is deterministic. The same text always yields the same
//! [`Detection`], across runs and across machines.

use lingua::LanguageDetectorBuilder;
use review_core::{Detection, Language};

/// Something that can tell which language a text is written in.
pub trait LanguageDetector: Send + Sync {
    /// Detects the language of `text`.
    ///
    /// Undecidable input (empty text, digits, emoji) yields
    /// [`Detection::Unknown`] rather than an error.
    fn detect(&self, text: &str) -> Detection;
}

/// Detector backed by `lingua`, over every language it knows.
pub struct LinguaDetector {
    detector: lingua::LanguageDetector,
}

impl LinguaDetector {
    pub fn new() -> Self {
        Self {
            detector: LanguageDetectorBuilder::from_all_languages().build(),
        }
    }
}

impl Default for LinguaDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LinguaDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinguaDetector").finish_non_exhaustive()
    }
}

impl LanguageDetector for LinguaDetector {
    fn detect(&self, text: &str) -> Detection {
        // None only for text without letters of any known alphabet.
        match self.detector.detect_language_of(text) {
            Some(language) => Detection::Detected(language_code(language)),
            None => Detection::Unknown,
        }
    }
}

/// The ISO 639-1 code of a `lingua` language, e.g. `"en"`.
pub fn language_code(language: lingua::Language) -> Language {
    Language::new(language.iso_code_639_1().to_string())
}

/// A detector that always gives the same answer.
#[derive(Debug, Clone)]
pub struct FixedDetector(pub Detection);

impl LanguageDetector for FixedDetector {
    fn detect(&self, _text: &str) -> Detection {
        self.0.clone()
    }
}
