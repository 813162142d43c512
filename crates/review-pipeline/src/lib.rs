//! review-pipeline: batch preprocessing of scraped movie reviews
//!
//! This crate provides:
//! - CSV input with column aliasing and NA handling, BOM-prefixed CSV output
//! - The ingestion filter chain (empty, missing, spoiler shield, length,
//!   language, date)
//! - Feature assembly with lexicon-weighted subjectivity scores
//! - [`ReviewProcessor`], which runs the stages for one input file
//! - Monthly trend aggregation over a processed table
//! - Configuration from environment variables

pub mod config;
pub mod error;
pub mod features;
pub mod ingest;
pub mod io;
pub mod processor;
pub mod trend;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use features::{add_subjectivity_score, feature_engineer};
pub use ingest::{FilterStats, IngestOptions, parse_date, preprocess};
pub use io::{read_processed_table, read_raw_table, write_table};
pub use processor::{ProcessorOptions, ReviewProcessor, RunReport, output_file_name};
pub use trend::{MonthlyTrend, trend};
