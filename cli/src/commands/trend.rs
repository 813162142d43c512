//! TREND command - Aggregate a preprocessed table by month.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use review_pipeline::{MonthlyTrend, read_processed_table, trend};
use serde::Serialize;

use super::{HumanReadable, format_optional, output};

/// Arguments for the trend command.
#[derive(Args)]
pub struct TrendArgs {
    /// A preprocessed_reviews_<site>.csv file
    pub file: PathBuf,
}

/// Monthly aggregates of one table.
#[derive(Debug, Serialize)]
pub struct TrendOutput {
    pub file: PathBuf,
    pub total_reviews: usize,
    pub months: Vec<MonthlyTrend>,
}

impl HumanReadable for TrendOutput {
    fn print_human(&self) {
        println!(
            "{} {}",
            "Monthly Trend:".green().bold(),
            self.file.display()
        );
        println!("{}", "=".repeat(60));

        if self.months.is_empty() {
            println!("  {}", "(No reviews)".dimmed());
            return;
        }

        println!(
            "  {:<10} {:>8} {:>12} {:>14}",
            "Month".bold(),
            "Reviews".bold(),
            "Mean Rating".bold(),
            "Subjectivity".bold()
        );
        for month in &self.months {
            println!(
                "  {:<10} {:>8} {:>12} {:>14.3}",
                month.year_month.to_string(),
                month.review_count,
                format_optional(month.mean_rating),
                month.mean_subjectivity
            );
        }
        println!();
        println!("  {} {}", "Total:".cyan(), self.total_reviews);
    }
}

/// Execute the trend command.
pub fn execute(human: bool, args: TrendArgs) -> Result<()> {
    let table = read_processed_table(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;

    let result = TrendOutput {
        total_reviews: table.len(),
        months: trend(&table),
        file: args.file,
    };
    output(&result, human)
}
