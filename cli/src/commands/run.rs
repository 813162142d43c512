//! RUN command - Preprocess crawler output into scored tables.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Args};
use colored::Colorize;
use review_core::Site;
use review_pipeline::{PipelineConfig, PipelineError, ReviewProcessor, RunReport};
use review_text::{ScoreStatus, TextResources};
use serde::Serialize;

use super::{HumanReadable, format_optional, output};

/// Arguments for the run command.
#[derive(Args)]
#[command(group(ArgGroup::new("target").required(true).args(["all", "site", "input"])))]
pub struct RunArgs {
    /// Process every crawler file found in the data directory
    #[arg(long)]
    pub all: bool,

    /// Process one site (imdb, letterboxd, rotten_tomatoes)
    #[arg(long)]
    pub site: Option<Site>,

    /// Process an arbitrary crawler CSV
    #[arg(long)]
    pub input: Option<PathBuf>,
}

/// Outcome of processing one input file.
#[derive(Debug, Serialize)]
pub struct RunOutcome {
    #[serde(flatten)]
    pub report: RunReport,
    /// Why nothing was written, when nothing was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
}

/// Outcomes of every processed input.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub runs: Vec<RunOutcome>,
}

impl HumanReadable for RunSummary {
    fn print_human(&self) {
        println!("{}", "Preprocessing Runs".green().bold());
        println!("{}", "=".repeat(60));

        if self.runs.is_empty() {
            println!("  {}", "(No input files found)".dimmed());
            return;
        }

        for run in &self.runs {
            let report = &run.report;
            let name = report
                .site
                .map(|s| s.to_string())
                .unwrap_or_else(|| report.input.display().to_string());
            println!();
            println!("  {}", name.bold());
            println!("    {} {}", "Input:".cyan(), report.input.display());

            match &run.skipped {
                Some(reason) => println!("    {} {}", "Skipped:".yellow(), reason),
                None => println!("    {} {}", "Output:".cyan(), report.output.display()),
            }

            let filters = &report.filters;
            println!(
                "    {} {} read, {} kept",
                "Rows:".cyan(),
                filters.rows_read,
                filters.rows_kept
            );
            println!(
                "    {} empty {}, missing {}, spoiler {}, short {}, non-English {}, bad date {}",
                "Dropped:".cyan(),
                filters.empty_comment,
                filters.missing_field,
                filters.spoiler_shield,
                filters.too_short,
                filters.non_english,
                filters.bad_date
            );
            println!("    {} {} words", "Lexicon:".cyan(), report.lexicon_size);

            let status = match &report.score_status {
                Some(ScoreStatus::Scored) => "scored".green().to_string(),
                Some(ScoreStatus::EmptyLexicon) => "empty lexicon, all zero".yellow().to_string(),
                Some(ScoreStatus::Degraded(reason)) => format!("{} ({})", "degraded".red(), reason),
                None => "-".to_string(),
            };
            println!(
                "    {} {}, mean {}",
                "Scores:".cyan(),
                status,
                format_optional(report.mean_subjectivity)
            );
        }
    }
}

/// Runs one processor; an empty result is reported rather than failing.
fn process(mut processor: ReviewProcessor<'_>) -> Result<RunOutcome> {
    match processor.run() {
        Ok(report) => Ok(RunOutcome {
            report,
            skipped: None,
        }),
        Err(PipelineError::NoData) => {
            tracing::warn!(
                "No survivable data in {}; nothing written",
                processor.input_path().display()
            );
            Ok(RunOutcome {
                report: processor.report().clone(),
                skipped: Some("no survivable data".to_string()),
            })
        }
        Err(e) => Err(e).with_context(|| format!("processing {}", processor.input_path().display())),
    }
}

/// Execute the run command.
pub fn execute(config: &PipelineConfig, human: bool, args: RunArgs) -> Result<()> {
    let resources = TextResources::english();
    let mut runs = Vec::new();

    if args.all {
        for site in Site::ALL {
            let inputs = config.site_inputs(site)?;
            if inputs.is_empty() {
                tracing::info!(
                    "No input for {} in {}, skipping",
                    site,
                    config.data_dir.display()
                );
            }
            for input in inputs {
                runs.push(process(ReviewProcessor::for_site_file(
                    site, input, config, &resources,
                ))?);
            }
        }
    } else if let Some(site) = args.site {
        let inputs = config.site_inputs(site)?;
        if inputs.is_empty() {
            // Reports the missing canonical file as an error.
            runs.push(process(ReviewProcessor::for_site(site, config, &resources))?);
        }
        for input in inputs {
            runs.push(process(ReviewProcessor::for_site_file(
                site, input, config, &resources,
            ))?);
        }
    } else if let Some(input) = args.input {
        runs.push(process(ReviewProcessor::for_input(input, config, &resources))?);
    }

    output(&RunSummary { runs }, human)
}
