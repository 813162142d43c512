//! Orchestration of one preprocessing run.
//!
//! A [`ReviewProcessor`] owns the table for one input file from load to
//! save. Its stages must run in order:
//!
//! ```text
//! preprocess -> feature_engineering -> save
//! ```
//!
//! [`ReviewProcessor::run`] chains all three. Calling a stage early is a
//! caller bug and fails with [`PipelineError::NotPreprocessed`] or
//! [`PipelineError::NotFeatured`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use review_core::{CleanedReview, Review, ReviewTable, Site};
use review_text::{Lexicon, LexiconSource, ScoreStatus, TextResources};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::features::{add_subjectivity_score, feature_engineer};
use crate::ingest::{self, FilterStats, IngestOptions};
use crate::io::{read_raw_table, write_table};

/// Name of the preprocessed file for an input file.
///
/// `reviews_imdb.csv` becomes `preprocessed_reviews_imdb.csv`; a stem
/// without the `reviews_` prefix is used whole.
pub fn output_file_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("input");
    let token = stem.strip_prefix("reviews_").unwrap_or(stem);
    format!("preprocessed_reviews_{token}.csv")
}

/// Settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorOptions {
    pub ingest: IngestOptions,
    pub lexicon_path: PathBuf,
}

impl ProcessorOptions {
    /// Options for an arbitrary input file.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            ingest: IngestOptions::default().with_min_words(config.min_words),
            lexicon_path: config.lexicon_path.clone(),
        }
    }

    /// Options for a known site, including its spoiler shield.
    pub fn for_site(site: Site, config: &PipelineConfig) -> Self {
        Self {
            ingest: IngestOptions::for_site(site).with_min_words(config.min_words),
            lexicon_path: config.lexicon_path.clone(),
        }
    }
}

/// Summary of a run, filled in as stages complete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<Site>,
    pub input: PathBuf,
    pub output: PathBuf,
    /// Whether the output file was written.
    pub saved: bool,
    #[serde(flatten)]
    pub filters: FilterStats,
    pub lexicon_size: usize,
    pub lexicon_source: Option<LexiconSource>,
    pub score_status: Option<ScoreStatus>,
    pub mean_subjectivity: Option<f64>,
}

enum Stage {
    Pending,
    Preprocessed(ReviewTable<CleanedReview>),
    Featured(ReviewTable<Review>),
}

/// Runs the pipeline for one input file.
pub struct ReviewProcessor<'a> {
    input: PathBuf,
    output: PathBuf,
    options: ProcessorOptions,
    resources: &'a TextResources,
    stage: Stage,
    report: RunReport,
}

impl<'a> ReviewProcessor<'a> {
    /// Creates a processor for `input`, writing into `output_dir`.
    pub fn new(
        input: impl Into<PathBuf>,
        output_dir: impl AsRef<Path>,
        options: ProcessorOptions,
        resources: &'a TextResources,
    ) -> Self {
        let input = input.into();
        let output = output_dir.as_ref().join(output_file_name(&input));
        let report = RunReport {
            site: None,
            input: input.clone(),
            output: output.clone(),
            saved: false,
            filters: FilterStats::default(),
            lexicon_size: 0,
            lexicon_source: None,
            score_status: None,
            mean_subjectivity: None,
        };

        Self {
            input,
            output,
            options,
            resources,
            stage: Stage::Pending,
            report,
        }
    }

    /// Creates a processor for a site's crawler output in the data directory.
    pub fn for_site(site: Site, config: &PipelineConfig, resources: &'a TextResources) -> Self {
        Self::for_site_file(site, config.site_input(site), config, resources)
    }

    /// Creates a processor for one of a site's crawler files.
    pub fn for_site_file(
        site: Site,
        input: impl Into<PathBuf>,
        config: &PipelineConfig,
        resources: &'a TextResources,
    ) -> Self {
        let mut processor = Self::new(
            input,
            &config.output_dir,
            ProcessorOptions::for_site(site, config),
            resources,
        );
        processor.report.site = Some(site);
        processor
    }

    /// Creates a processor for an arbitrary input file.
    ///
    /// A file named like a site's crawler output, e.g.
    /// `reviews_letterboxd_newest.csv`, gets that site's options.
    pub fn for_input(
        input: impl Into<PathBuf>,
        config: &PipelineConfig,
        resources: &'a TextResources,
    ) -> Self {
        let input = input.into();
        let site = input
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(Site::from_input_file_name);
        match site {
            Some(site) => Self::for_site_file(site, input, config, resources),
            None => Self::new(
                input,
                &config.output_dir,
                ProcessorOptions::from_config(config),
                resources,
            ),
        }
    }

    pub fn input_path(&self) -> &Path {
        &self.input
    }

    pub fn output_path(&self) -> &Path {
        &self.output
    }

    /// What has happened so far.
    pub fn report(&self) -> &RunReport {
        &self.report
    }

    /// The featured table, once `feature_engineering` has run.
    pub fn table(&self) -> Option<&ReviewTable<Review>> {
        match &self.stage {
            Stage::Featured(table) => Some(table),
            _ => None,
        }
    }

    /// Loads the input and applies every ingestion filter.
    ///
    /// # Errors
    ///
    /// Fails only when the input file cannot be read or lacks a required
    /// column.
    pub fn preprocess(&mut self) -> PipelineResult<&FilterStats> {
        let raw = read_raw_table(&self.input)?;
        let (table, stats) = ingest::preprocess(raw, &self.options.ingest, self.resources);
        self.report.filters = stats;
        self.stage = Stage::Preprocessed(table);
        Ok(&self.report.filters)
    }

    /// Derives `year_month`, `clean_word_count` and `subjectivity_score`.
    ///
    /// Loads the lexicon for this run. Running it again on a featured table
    /// reloads the lexicon and recomputes the scores.
    ///
    /// # Errors
    ///
    /// [`PipelineError::NotPreprocessed`] if `preprocess` has not run.
    pub fn feature_engineering(&mut self) -> PipelineResult<()> {
        let (table, status) = match std::mem::replace(&mut self.stage, Stage::Pending) {
            Stage::Pending => {
                return Err(PipelineError::NotPreprocessed {
                    stage: "feature_engineering",
                });
            }
            Stage::Preprocessed(table) => {
                let lexicon = self.load_lexicon();
                feature_engineer(table, &lexicon)
            }
            Stage::Featured(mut table) => {
                let lexicon = self.load_lexicon();
                let status = add_subjectivity_score(&mut table, &lexicon);
                (table, status)
            }
        };

        self.report.mean_subjectivity = (!table.is_empty()).then(|| {
            table.rows.iter().map(|r| r.subjectivity_score).sum::<f64>() / table.len() as f64
        });
        self.report.score_status = Some(status);
        tracing::info!("Feature engineering done for {} rows", table.len());
        self.stage = Stage::Featured(table);
        Ok(())
    }

    fn load_lexicon(&mut self) -> Lexicon {
        let loaded = Lexicon::load(&self.options.lexicon_path);
        self.report.lexicon_size = loaded.lexicon.len();
        self.report.lexicon_source = Some(loaded.source);
        loaded.lexicon
    }

    /// Writes the featured table to the output path.
    ///
    /// # Errors
    ///
    /// Fails if earlier stages have not run, if no rows survived
    /// ([`PipelineError::NoData`]), or on I/O errors.
    pub fn save(&mut self) -> PipelineResult<&Path> {
        let table = match &self.stage {
            Stage::Pending => return Err(PipelineError::NotPreprocessed { stage: "save" }),
            Stage::Preprocessed(_) => return Err(PipelineError::NotFeatured),
            Stage::Featured(table) if table.is_empty() => return Err(PipelineError::NoData),
            Stage::Featured(table) => table,
        };

        if let Some(dir) = self.output.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| PipelineError::io(dir, e))?;
        }
        write_table(&self.output, table)?;
        self.report.saved = true;
        Ok(&self.output)
    }

    /// Runs preprocess, feature engineering and save in order.
    pub fn run(&mut self) -> PipelineResult<RunReport> {
        tracing::info!("Start preprocessing: {}", self.input.display());
        self.preprocess()?;
        self.feature_engineering()?;
        self.save()?;
        tracing::info!("Finished preprocessing: {}", self.output.display());
        Ok(self.report.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_strips_reviews_prefix() {
        assert_eq!(
            output_file_name(Path::new("database/reviews_letterboxd.csv")),
            "preprocessed_reviews_letterboxd.csv"
        );
        assert_eq!(
            output_file_name(Path::new("reviews_RottenTomatoes.csv")),
            "preprocessed_reviews_RottenTomatoes.csv"
        );
        assert_eq!(
            output_file_name(Path::new("/tmp/scrape.csv")),
            "preprocessed_reviews_scrape.csv"
        );
    }

    #[test]
    fn site_output_names_agree() {
        for site in Site::ALL {
            assert_eq!(
                output_file_name(Path::new(&site.input_file_name())),
                site.output_file_name()
            );
        }
    }

    #[test]
    fn stages_out_of_order_fail() {
        let resources = TextResources::english();
        let mut processor = ReviewProcessor::new(
            "/nonexistent/reviews_x.csv",
            "/tmp",
            ProcessorOptions::from_config(&PipelineConfig::default()),
            &resources,
        );

        assert!(matches!(
            processor.feature_engineering(),
            Err(PipelineError::NotPreprocessed { stage: "feature_engineering" })
        ));
        assert!(matches!(
            processor.save(),
            Err(PipelineError::NotPreprocessed { stage: "save" })
        ));
        assert!(matches!(processor.preprocess(), Err(PipelineError::Io { .. })));
        assert!(processor.table().is_none());
    }

    #[test]
    fn for_site_uses_config_paths() {
        let resources = TextResources::english();
        let config = PipelineConfig {
            data_dir: PathBuf::from("raw"),
            output_dir: PathBuf::from("out"),
            ..PipelineConfig::default()
        };
        let processor = ReviewProcessor::for_site(Site::Letterboxd, &config, &resources);

        assert_eq!(processor.input_path(), Path::new("raw/reviews_letterboxd.csv"));
        assert_eq!(
            processor.output_path(),
            Path::new("out/preprocessed_reviews_letterboxd.csv")
        );
        assert_eq!(processor.report().site, Some(Site::Letterboxd));
        assert!(processor.options.ingest.spoiler_shield.is_some());
    }

    #[test]
    fn suffixed_crawler_file_gets_site_options() {
        let resources = TextResources::english();
        let config = PipelineConfig {
            output_dir: PathBuf::from("out"),
            ..PipelineConfig::default()
        };

        let processor =
            ReviewProcessor::for_input("raw/reviews_letterboxd_newest.csv", &config, &resources);
        assert_eq!(processor.report().site, Some(Site::Letterboxd));
        assert_eq!(
            processor.options.ingest.spoiler_shield.as_deref(),
            Site::Letterboxd.spoiler_shield()
        );
        assert_eq!(
            processor.output_path(),
            Path::new("out/preprocessed_reviews_letterboxd_newest.csv")
        );

        let other = ReviewProcessor::for_input("raw/scrape.csv", &config, &resources);
        assert_eq!(other.report().site, None);
        assert!(other.options.ingest.spoiler_shield.is_none());
    }
}
