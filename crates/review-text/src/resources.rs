//! The text-processing resources shared by every site in one run.
//!
//! Stopword tables, the lemmatizer and the language model are built once
//! and passed by reference to each processor, so a multi-site run pays the
//! setup cost once.

use review_core::Detection;

use crate::cleaner::TextCleaner;
use crate::language::{LanguageDetector, LinguaDetector};

/// Cleaner and language detector for one invocation.
pub struct TextResources {
    cleaner: TextCleaner,
    detector: Box<dyn LanguageDetector>,
}

impl TextResources {
    /// English cleaner with the `lingua` detector.
    pub fn english() -> Self {
        Self::with_detector(Box::new(LinguaDetector::new()))
    }

    /// English cleaner with a caller-supplied detector.
    pub fn with_detector(detector: Box<dyn LanguageDetector>) -> Self {
        Self {
            cleaner: TextCleaner::english(),
            detector,
        }
    }

    pub fn cleaner(&self) -> &TextCleaner {
        &self.cleaner
    }

    pub fn detector(&self) -> &dyn LanguageDetector {
        self.detector.as_ref()
    }

    /// Shorthand for `self.detector().detect(text)`.
    pub fn detect(&self, text: &str) -> Detection {
        self.detector.detect(text)
    }
}

impl Default for TextResources {
    fn default() -> Self {
        Self::english()
    }
}

impl std::fmt::Debug for TextResources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextResources")
            .field("cleaner", &self.cleaner)
            .finish_non_exhaustive()
    }
}
