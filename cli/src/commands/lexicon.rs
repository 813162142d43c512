//! LEXICON command - Inspect the subjectivity lexicon.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use review_pipeline::PipelineConfig;
use review_text::{Lexicon, LexiconSource};
use serde::Serialize;

use super::{HumanReadable, output};

/// Arguments for the lexicon command.
#[derive(Args)]
pub struct LexiconArgs {
    /// Lexicon CSV to load (defaults to the configured lexicon)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

/// Summary of a loaded lexicon.
#[derive(Debug, Serialize)]
pub struct LexiconSummary {
    pub requested: PathBuf,
    pub source: LexiconSource,
    pub size: usize,
    pub strong: usize,
    pub very_strong: usize,
}

impl HumanReadable for LexiconSummary {
    fn print_human(&self) {
        println!("{}", "Subjectivity Lexicon".green().bold());
        println!("{}", "=".repeat(60));
        println!("  {} {}", "Requested:".cyan(), self.requested.display());

        let source = match &self.source {
            LexiconSource::Requested(path) => path.display().to_string(),
            LexiconSource::Bundled => "built-in default lexicon".to_string(),
            LexiconSource::Missing => "not found".red().to_string(),
            LexiconSource::Unreadable(path) => {
                format!("{} {}", path.display(), "(unreadable)".red())
            }
        };
        println!("  {} {}", "Loaded:".cyan(), source);
        println!("  {} {}", "Words:".cyan(), self.size);
        println!("    {} {} (weight 2.0)", "strongsubj:".dimmed(), self.strong);
        println!(
            "    {} {} (weight 4.0)",
            "verystrongsubj:".dimmed(),
            self.very_strong
        );
    }
}

/// Execute the lexicon command.
pub fn execute(config: &PipelineConfig, human: bool, args: LexiconArgs) -> Result<()> {
    let requested = args.path.unwrap_or_else(|| config.lexicon_path.clone());
    let loaded = Lexicon::load(&requested);
    let (strong, very_strong) = loaded.lexicon.class_counts();

    let summary = LexiconSummary {
        requested,
        source: loaded.source,
        size: loaded.lexicon.len(),
        strong,
        very_strong,
    };
    output(&summary, human)
}
