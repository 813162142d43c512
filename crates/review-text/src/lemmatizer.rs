//! Noun lemmatizer for cleaned review tokens.
//!
//! Reduces plural nouns to their dictionary form (`reviews` -> `review`,
//! `stories` -> `story`, `children` -> `child`). Words are treated as nouns,
//! so verb inflections such as `running` are left alone.
//!
//! Lookup order:
//! 1. Irregular plurals table
//! 2. Words that end in `s` but are already base forms, and their `-es`
//!    plurals (`buses` -> `bus`, `lenses` -> `lens`)
//! 3. Suffix rules, whose output is checked against the irregular table again
//!
//! Every lemma is a fixed point: lemmatizing a lemma returns it unchanged.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

/// Plurals that suffix rules get wrong.
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("mice", "mouse"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("wolves", "wolf"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("thieves", "thief"),
    ("selves", "self"),
    ("heroes", "hero"),
    ("potatoes", "potato"),
    ("tomatoes", "tomato"),
    ("echoes", "echo"),
    ("vetoes", "veto"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("analyses", "analysis"),
    ("theses", "thesis"),
    ("crises", "crisis"),
    ("diagnoses", "diagnosis"),
    ("oases", "oasis"),
    ("movies", "movie"),
    ("zombies", "zombie"),
    ("cookies", "cookie"),
    ("rookies", "rookie"),
    ("hippies", "hippie"),
    ("goalies", "goalie"),
    ("selfies", "selfie"),
    ("indies", "indie"),
    ("brownies", "brownie"),
    ("calories", "calorie"),
    ("genies", "genie"),
    ("smoothies", "smoothie"),
    ("groupies", "groupie"),
    ("freebies", "freebie"),
    ("newbies", "newbie"),
    ("prairies", "prairie"),
    ("aunties", "auntie"),
    ("aches", "ache"),
    ("headaches", "headache"),
    ("caches", "cache"),
    ("niches", "niche"),
    ("cliches", "cliche"),
    ("mustaches", "mustache"),
    ("moustaches", "moustache"),
    ("goes", "go"),
    ("axes", "axe"),
    ("quizzes", "quiz"),
];

/// Words ending in `s` that are already base forms.
const BASE_FORMS_ENDING_IN_S: &[&str] = &[
    "always", "perhaps", "sometimes", "besides", "towards", "afterwards", "backwards",
    "forwards", "upwards", "downwards", "anyways", "nowadays", "overseas", "whereas", "thus",
    "plus", "series", "species", "news", "lens", "bias", "atlas", "canvas", "chaos", "kudos",
    "pathos", "ethos", "christmas", "physics", "mathematics", "politics", "economics",
    "ethics", "athletics", "gymnastics", "aesthetics", "graphics", "mechanics", "dynamics",
    "electronics", "headquarters", "means", "pants", "jeans", "scissors", "thanks",
    "congratulations", "odds", "outskirts", "whereabouts", "texas", "vegas", "dallas",
    "james", "charles", "jones", "williams", "thomas", "nicholas", "holmes", "hughes",
    "gas", "bus", "minibus", "virus", "bonus", "campus", "chorus", "circus", "genius",
    "census", "status", "sinus", "octopus", "fetus", "apparatus", "consensus", "syllabus",
    "walrus", "thesaurus", "prospectus", "surplus", "lotus", "cactus", "focus", "iris",
    "alias", "boss", "class", "glass", "dress", "process",
];

/// Minimum length of a word the suffix rules apply to.
const MIN_RULE_LENGTH: usize = 4;

/// A rule-based noun lemmatizer.
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    irregular: HashMap<&'static str, &'static str>,
    base_forms: HashSet<&'static str>,
}

impl Lemmatizer {
    /// Creates the English noun lemmatizer.
    pub fn english() -> Self {
        Self {
            irregular: IRREGULAR_PLURALS.iter().copied().collect(),
            base_forms: BASE_FORMS_ENDING_IN_S.iter().copied().collect(),
        }
    }

    /// Returns the lemma of a lowercase ASCII word.
    pub fn lemmatize<'a>(&self, word: &'a str) -> Cow<'a, str> {
        if let Some(lemma) = self.irregular.get(word) {
            return Cow::Borrowed(*lemma);
        }
        if self.base_forms.contains(word) || word.len() < MIN_RULE_LENGTH {
            return Cow::Borrowed(word);
        }
        if let Some(stem) = word.strip_suffix("es") {
            if self.base_forms.contains(stem) {
                return Cow::Borrowed(stem);
            }
        }

        let stripped = strip_plural(word);
        match self.irregular.get(stripped.as_ref()) {
            Some(lemma) => Cow::Borrowed(*lemma),
            None => stripped,
        }
    }
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::english()
    }
}

/// Applies the regular plural suffix rules.
fn strip_plural(word: &str) -> Cow<'_, str> {
    // Singular endings that look plural: glass, bonus, analysis.
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return Cow::Borrowed(word);
    }
    if let Some(stem) = word.strip_suffix("ies") {
        // A one-letter stem is a plain `-s` plural: ties, lies, pies.
        return if stem.len() >= 2 {
            Cow::Owned(format!("{stem}y"))
        } else {
            Cow::Borrowed(&word[..word.len() - 1])
        };
    }
    if word.ends_with("sses")
        || word.ends_with("zzes")
        || word.ends_with("xes")
        || word.ends_with("ches")
        || word.ends_with("shes")
    {
        return Cow::Borrowed(&word[..word.len() - 2]);
    }
    Cow::Borrowed(word.strip_suffix('s').unwrap_or(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemma(word: &str) -> String {
        Lemmatizer::english().lemmatize(word).into_owned()
    }

    #[test]
    fn regular_plurals() {
        assert_eq!(lemma("reviews"), "review");
        assert_eq!(lemma("scenes"), "scene");
        assert_eq!(lemma("actors"), "actor");
        assert_eq!(lemma("stories"), "story");
        assert_eq!(lemma("comedies"), "comedy");
        assert_eq!(lemma("ties"), "tie");
        assert_eq!(lemma("boxes"), "box");
        assert_eq!(lemma("watches"), "watch");
        assert_eq!(lemma("dishes"), "dish");
        assert_eq!(lemma("classes"), "class");
        assert_eq!(lemma("buzzes"), "buzz");
    }

    #[test]
    fn es_plurals_of_words_ending_in_s() {
        assert_eq!(lemma("buses"), "bus");
        assert_eq!(lemma("viruses"), "virus");
        assert_eq!(lemma("bonuses"), "bonus");
        assert_eq!(lemma("geniuses"), "genius");
        assert_eq!(lemma("lenses"), "lens");
        assert_eq!(lemma("gases"), "gas");
        assert_eq!(lemma("biases"), "bias");
        // Singulars in `-use` only drop the `s`.
        assert_eq!(lemma("causes"), "cause");
        assert_eq!(lemma("houses"), "house");
        assert_eq!(lemma("excuses"), "excuse");
    }

    #[test]
    fn no_suffix_rule_yields_a_non_word() {
        assert_eq!(lemma("goes"), "go");
        assert_eq!(lemma("axes"), "axe");
        assert_eq!(lemma("quizzes"), "quiz");
        assert_eq!(lemma("james"), "james");
        assert_eq!(lemma("thomas"), "thomas");
    }

    #[test]
    fn irregular_plurals() {
        assert_eq!(lemma("children"), "child");
        assert_eq!(lemma("women"), "woman");
        assert_eq!(lemma("movies"), "movie");
        assert_eq!(lemma("heroes"), "hero");
        assert_eq!(lemma("lives"), "life");
    }

    #[test]
    fn singular_words_ending_in_s_are_kept() {
        for word in ["glass", "bonus", "analysis", "series", "always", "gas", "yes"] {
            assert_eq!(lemma(word), word);
        }
    }

    #[test]
    fn verb_forms_are_not_touched() {
        assert_eq!(lemma("running"), "running");
        assert_eq!(lemma("better"), "better");
    }

    #[test]
    fn lemmas_are_fixed_points() {
        let lemmatizer = Lemmatizer::english();
        for word in [
            "reviews", "stories", "boxes", "watches", "classes", "children", "mens", "movies",
            "ties", "cries", "analyses", "buses", "themes", "oscars", "viruses", "bonuses",
            "goes", "axes", "causes", "james", "buzzes", "quizzes",
        ] {
            let once = lemmatizer.lemmatize(word).into_owned();
            let twice = lemmatizer.lemmatize(&once).into_owned();
            assert_eq!(once, twice, "lemma of {word} is not stable");
        }
    }
}
