//! Command-line interface for the movie review preprocessing pipeline.
//!
//! Commands:
//! - run: Preprocess crawler CSVs into scored tables
//! - clean: Clean a piece of review text
//! - lexicon: Inspect the subjectivity lexicon
//! - trend: Aggregate a preprocessed table by month
//!
//! Configuration via environment (flags take precedence):
//! - REVIEW_DATA_DIR: Directory of `reviews_<site>.csv` files (default: database)
//! - REVIEW_OUTPUT_DIR: Directory for preprocessed output (default: database)
//! - REVIEW_LEXICON_PATH: Lexicon CSV (default: movie_review_lexicon.csv)
//! - REVIEW_MIN_WORDS: Minimum raw word count (default: 3)
//! - LOG_LEVEL: Logging level when RUST_LOG is unset (default: info)

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use review_pipeline::PipelineConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use commands::{clean::CleanArgs, lexicon::LexiconArgs, run::RunArgs, trend::TrendArgs};

/// Movie review preprocessing CLI
///
/// Cleans scraped reviews, keeps English ones, and scores their
/// subjectivity. Prints JSON by default; --human for formatted output.
#[derive(Parser)]
#[command(name = "reviews")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output human-readable formatted text instead of JSON
    #[arg(long, global = true)]
    human: bool,

    /// Directory holding reviews_<site>.csv files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory preprocessed tables are written to
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Subjectivity lexicon CSV
    #[arg(long, global = true)]
    lexicon: Option<PathBuf>,

    /// Minimum number of words in a kept review
    #[arg(long, global = true)]
    min_words: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Preprocess crawler output into scored tables
    Run(RunArgs),

    /// Clean a piece of review text
    Clean(CleanArgs),

    /// Show lexicon size, source and class counts
    Lexicon(LexiconArgs),

    /// Aggregate a preprocessed table by month
    Trend(TrendArgs),
}

impl Cli {
    /// Environment configuration with command-line overrides applied.
    fn config(&self, mut config: PipelineConfig) -> PipelineConfig {
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(path) = &self.lexicon {
            config.lexicon_path = path.clone();
        }
        if let Some(min_words) = self.min_words {
            config.min_words = min_words;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        config
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match PipelineConfig::from_env() {
        Ok(config) => cli.config(config),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log_level, cli.log_json);
    tracing::debug!(
        "Configuration: data_dir={}, output_dir={}, lexicon={}, min_words={}",
        config.data_dir.display(),
        config.output_dir.display(),
        config.lexicon_path.display(),
        config.min_words
    );

    let result: Result<()> = match cli.command {
        Commands::Run(args) => commands::run::execute(&config, cli.human, args),
        Commands::Clean(args) => commands::clean::execute(cli.human, args),
        Commands::Lexicon(args) => commands::lexicon::execute(&config, cli.human, args),
        Commands::Trend(args) => commands::trend::execute(cli.human, args),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `log_level`; logs go
/// to stderr so stdout carries only command output.
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
