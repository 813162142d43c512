//! Subjectivity Scoring Benchmark
//!
//! Measures the cost of the text stages applied to every review:
//! - TextCleaner.clean() throughput
//! - score_documents() at various batch sizes (TF-IDF fit + weighted dot)
//! - Language detection per review

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::Rng;
use review_text::language::{LanguageDetector, LinguaDetector};
use review_text::{Lexicon, TextCleaner, score_documents, word_count};

/// Words that appear in the bundled lexicon
const POLAR_WORDS: &[&str] = &[
    "great", "awful", "boring", "brilliant", "terrible", "masterpiece", "stunning", "dull",
    "beautiful", "horrible",
];

/// Neutral words that fall back to the background weight
const NEUTRAL_WORDS: &[&str] = &[
    "movie", "film", "plot", "actor", "scene", "director", "character", "ending", "story",
    "camera", "sequel", "soundtrack", "cast", "script", "studio",
];

const CONNECTIVES: &[&str] = &["the", "and", "but", "was", "is", "a", "very", "really"];

/// Generates a raw review of `words` words
fn generate_review(rng: &mut impl Rng, words: usize) -> String {
    (0..words)
        .map(|_| match rng.gen_range(0..10) {
            0..=2 => POLAR_WORDS[rng.gen_range(0..POLAR_WORDS.len())],
            3..=6 => NEUTRAL_WORDS[rng.gen_range(0..NEUTRAL_WORDS.len())],
            _ => CONNECTIVES[rng.gen_range(0..CONNECTIVES.len())],
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Generates a batch of cleaned reviews and their word counts
fn generate_batch(size: usize, cleaner: &TextCleaner) -> (Vec<String>, Vec<usize>) {
    let mut rng = rand::thread_rng();
    let cleaned: Vec<String> = (0..size)
        .map(|_| {
            let len = rng.gen_range(5..80);
            cleaner.clean(&generate_review(&mut rng, len))
        })
        .collect();
    let counts = cleaned.iter().map(|c| word_count(c)).collect();
    (cleaned, counts)
}

/// Benchmarks cleaning a single review of various lengths
fn cleaning_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("clean");
    let cleaner = TextCleaner::english();
    let mut rng = rand::thread_rng();

    for words in [10, 50, 200] {
        let review = generate_review(&mut rng, words);
        group.throughput(Throughput::Elements(words as u64));
        group.bench_with_input(BenchmarkId::new("words", words), &review, |b, review| {
            b.iter(|| black_box(cleaner.clean(review)))
        });
    }

    group.finish();
}

/// Benchmarks batch scoring at various corpus sizes
fn scoring_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_documents");
    let cleaner = TextCleaner::english();
    let lexicon = Lexicon::bundled().unwrap_or_default();

    for size in [100, 1000, 10000] {
        let (docs, counts) = generate_batch(size, &cleaner);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("reviews", size), &size, |b, _| {
            b.iter(|| black_box(score_documents(&docs, &counts, &lexicon)))
        });
    }

    group.finish();
}

/// Benchmarks the empty-lexicon fast path
fn empty_lexicon_benchmark(c: &mut Criterion) {
    let cleaner = TextCleaner::english();
    let (docs, counts) = generate_batch(1000, &cleaner);
    let lexicon = Lexicon::empty();

    c.bench_function("score_documents_empty_lexicon", |b| {
        b.iter(|| black_box(score_documents(&docs, &counts, &lexicon)))
    });
}

/// Benchmarks language detection on a typical review
fn detection_benchmark(c: &mut Criterion) {
    let detector = LinguaDetector::new();
    let mut rng = rand::thread_rng();
    let review = generate_review(&mut rng, 40);

    c.bench_function("detect_language", |b| {
        b.iter(|| black_box(detector.detect(&review)))
    });
}

criterion_group!(
    benches,
    cleaning_benchmark,
    scoring_benchmark,
    empty_lexicon_benchmark,
    detection_benchmark,
);
criterion_main!(benches);
