//! CLEAN command - Show what the cleaner makes of a piece of text.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use review_text::{TextCleaner, word_count};
use serde::Serialize;

use super::{HumanReadable, output};

/// Arguments for the clean command.
#[derive(Args)]
pub struct CleanArgs {
    /// Text to clean (multiple words are joined with spaces)
    #[arg(required = true)]
    pub text: Vec<String>,
}

/// Result of cleaning one text.
#[derive(Debug, Serialize)]
pub struct CleanOutput {
    pub text: String,
    pub clean_comment: String,
    pub raw_word_count: usize,
    pub clean_word_count: usize,
}

impl HumanReadable for CleanOutput {
    fn print_human(&self) {
        println!("{} {}", "Input:".cyan(), self.text);
        if self.clean_comment.is_empty() {
            println!("{} {}", "Clean:".cyan(), "(nothing left)".dimmed());
        } else {
            println!("{} {}", "Clean:".cyan(), self.clean_comment.green());
        }
        println!(
            "{} {} -> {}",
            "Words:".cyan(),
            self.raw_word_count,
            self.clean_word_count
        );
    }
}

/// Execute the clean command.
pub fn execute(human: bool, args: CleanArgs) -> Result<()> {
    let text = args.text.join(" ");
    let clean_comment = TextCleaner::english().clean(&text);

    let result = CleanOutput {
        raw_word_count: word_count(&text),
        clean_word_count: word_count(&clean_comment),
        text,
        clean_comment,
    };
    output(&result, human)
}
