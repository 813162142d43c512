//! Review text normalization.
//!
//! Produces the `clean_comment` column: lowercase ASCII lemmas separated by
//! single spaces, with stopwords removed. Every step is total, so cleaning
//! never fails; text with nothing left to keep becomes the empty string.

use crate::lemmatizer::Lemmatizer;
use crate::stopwords::StopWords;

/// Normalizes raw review text into space-joined lemmas.
///
/// Processing steps:
/// 1. Convert to lowercase
/// 2. Replace every character that is not `a-z` or whitespace with a space
/// 3. Split on whitespace
/// 4. Remove stopwords
/// 5. Lemmatize the remaining tokens
///
/// A lemma that collides with a stopword (`wills` -> `will`) keeps its
/// surface form, which makes cleaning idempotent.
#[derive(Debug, Clone, Default)]
pub struct TextCleaner {
    stop_words: StopWords,
    lemmatizer: Lemmatizer,
}

impl TextCleaner {
    /// Creates a cleaner with the given resources.
    pub fn new(stop_words: StopWords, lemmatizer: Lemmatizer) -> Self {
        Self {
            stop_words,
            lemmatizer,
        }
    }

    /// Creates a cleaner for English reviews.
    pub fn english() -> Self {
        Self::new(StopWords::english(), Lemmatizer::english())
    }

    /// Cleans a possibly missing text value; missing input cleans to `""`.
    pub fn clean_opt(&self, text: Option<&str>) -> String {
        text.map(|t| self.clean(t)).unwrap_or_default()
    }

    /// Cleans review text.
    pub fn clean(&self, text: &str) -> String {
        self.tokens(text).join(" ")
    }

    /// Returns the cleaned tokens without joining them.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let letters_only: String = text
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_lowercase() || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        letters_only
            .split_whitespace()
            .filter(|token| !self.stop_words.contains(token))
            .map(|token| {
                let lemma = self.lemmatizer.lemmatize(token);
                if self.stop_words.contains(&lemma) {
                    token.to_string()
                } else {
                    lemma.into_owned()
                }
            })
            .collect()
    }
}

/// Counts whitespace-separated tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_basic() {
        let cleaner = TextCleaner::english();
        assert_eq!(
            cleaner.clean("The actors' performances were AMAZING!!!"),
            "actor performance amazing"
        );
    }

    #[test]
    fn clean_strips_digits_and_accents() {
        let cleaner = TextCleaner::english();
        assert_eq!(cleaner.clean("10/10 would watch again"), "would watch");
        assert_eq!(cleaner.clean("Excelente película"), "excelente pel cula");
    }

    #[test]
    fn clean_contractions_split_into_stopwords() {
        let cleaner = TextCleaner::english();
        assert_eq!(cleaner.clean("I didn't like it, don't bother"), "like bother");
    }

    #[test]
    fn clean_empty_and_missing() {
        let cleaner = TextCleaner::english();
        assert_eq!(cleaner.clean(""), "");
        assert_eq!(cleaner.clean("... ??? !!!"), "");
        assert_eq!(cleaner.clean("the and of"), "");
        assert_eq!(cleaner.clean_opt(None), "");
    }

    #[test]
    fn clean_collapses_whitespace() {
        let cleaner = TextCleaner::english();
        assert_eq!(cleaner.clean("  great\n\tfilm   "), "great film");
    }

    #[test]
    fn clean_lemmas_are_dictionary_words() {
        let cleaner = TextCleaner::english();
        assert_eq!(
            cleaner.clean("buses goes axes viruses bonuses james"),
            "bus go axe virus bonus james"
        );
    }

    #[test]
    fn clean_keeps_surface_form_when_lemma_is_stopword() {
        let cleaner = TextCleaner::english();
        assert_eq!(cleaner.clean("wills"), "wills");
    }

    #[test]
    fn clean_is_idempotent() {
        let cleaner = TextCleaner::english();
        for text in [
            "The stories and the characters felt like real lives, 5 stars!",
            "Boxes of watches; classes of children. Movies, heroes & zombies.",
            "Wills and cans... the mens' oscars",
            "Ça n'a aucun sens - 最高の映画",
            "",
        ] {
            let once = cleaner.clean(text);
            assert_eq!(cleaner.clean(&once), once, "cleaning {text:?} twice changed it");
        }
    }

    #[test]
    fn word_count_splits_on_whitespace() {
        assert_eq!(word_count("so good"), 2);
        assert_eq!(word_count("  one\ttwo\nthree "), 3);
        assert_eq!(word_count(""), 0);
    }
}
