//! Reading crawler CSVs and writing preprocessed tables.
//!
//! Input is UTF-8 with or without a byte-order mark. The comment column may
//! be called `comment` or `content`; any other columns pass through to the
//! output untouched.
//!
//! Output is UTF-8 with a byte-order mark, so spreadsheet tools open it
//! with the right encoding. Column order:
//!
//! ```text
//! rating, date, comment, <passthrough...>, raw_word_count, language,
//! clean_comment, year_month, clean_word_count, subjectivity_score
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::NaiveDateTime;
use csv::StringRecord;
use review_core::{CleanedReview, Language, RawReview, Review, ReviewTable, YearMonth};

use crate::error::{PipelineError, PipelineResult};
use crate::ingest::parse_date;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Format of the `date` column in preprocessed output.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const RATING: &str = "rating";
pub const DATE: &str = "date";
pub const COMMENT: &str = "comment";
/// Alternative name some crawlers use for the comment column.
pub const CONTENT: &str = "content";
pub const RAW_WORD_COUNT: &str = "raw_word_count";
pub const LANGUAGE: &str = "language";
pub const CLEAN_COMMENT: &str = "clean_comment";
pub const YEAR_MONTH: &str = "year_month";
pub const CLEAN_WORD_COUNT: &str = "clean_word_count";
pub const SUBJECTIVITY_SCORE: &str = "subjectivity_score";

/// Cell values read as missing.
const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(value: &str) -> bool {
    NA_VALUES.contains(&value)
}

fn read_bytes(path: &Path) -> PipelineResult<Vec<u8>> {
    let mut bytes = fs::read(path).map_err(|e| PipelineError::io(path, e))?;
    if bytes.starts_with(UTF8_BOM) {
        bytes.drain(..UTF8_BOM.len());
    }
    Ok(bytes)
}

fn csv_reader(bytes: &[u8]) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new().flexible(true).from_reader(bytes)
}

fn position(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

fn require(headers: &StringRecord, name: &str) -> PipelineResult<usize> {
    position(headers, name).ok_or_else(|| PipelineError::MissingColumn(name.to_string()))
}

/// Reads a crawler CSV into a raw table.
///
/// A missing `comment` column falls back to `content`. Empty cells and the
/// usual NA markers (`NaN`, `NULL`, `None`, ...) read as missing values.
///
/// # Errors
///
/// Fails when the file cannot be read, is not CSV, or lacks a `rating`,
/// `date` or comment column.
pub fn read_raw_table(path: &Path) -> PipelineResult<ReviewTable<RawReview>> {
    let bytes = read_bytes(path)?;
    let mut reader = csv_reader(&bytes);
    let headers = reader.headers()?.clone();

    let rating_idx = require(&headers, RATING)?;
    let date_idx = require(&headers, DATE)?;
    let comment_idx = match position(&headers, COMMENT) {
        Some(idx) => idx,
        None => {
            let idx = require(&headers, CONTENT)
                .map_err(|_| PipelineError::MissingColumn(COMMENT.to_string()))?;
            tracing::debug!("Using column {} as {}", CONTENT, COMMENT);
            idx
        }
    };

    let extra_idx: Vec<usize> = (0..headers.len())
        .filter(|i| ![rating_idx, date_idx, comment_idx].contains(i))
        .collect();
    let extra_columns = extra_idx
        .iter()
        .map(|&i| headers.get(i).unwrap_or_default().trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let field = |idx: usize| {
            record
                .get(idx)
                .filter(|v| !is_missing(v))
                .map(str::to_string)
        };
        rows.push(RawReview {
            rating: field(rating_idx),
            date: field(date_idx),
            comment: field(comment_idx),
            extra: extra_idx
                .iter()
                .map(|&i| record.get(i).unwrap_or_default().to_string())
                .collect(),
        });
    }

    tracing::info!("Read {} rows from {}", rows.len(), path.display());
    Ok(ReviewTable::new(extra_columns, rows))
}

/// Writes a processed table as UTF-8 CSV with a byte-order mark.
///
/// # Errors
///
/// Fails when the file cannot be created or written.
pub fn write_table(path: &Path, table: &ReviewTable<Review>) -> PipelineResult<()> {
    let file = File::create(path).map_err(|e| PipelineError::io(path, e))?;
    let mut out = BufWriter::new(file);
    out.write_all(UTF8_BOM)
        .map_err(|e| PipelineError::io(path, e))?;

    let mut writer = csv::Writer::from_writer(out);

    let mut header: Vec<&str> = vec![RATING, DATE, COMMENT];
    header.extend(table.extra_columns.iter().map(String::as_str));
    header.extend([
        RAW_WORD_COUNT,
        LANGUAGE,
        CLEAN_COMMENT,
        YEAR_MONTH,
        CLEAN_WORD_COUNT,
        SUBJECTIVITY_SCORE,
    ]);
    writer.write_record(&header)?;

    for review in &table.rows {
        let cleaned = &review.cleaned;
        let mut record: Vec<String> = vec![
            cleaned.rating.clone(),
            cleaned.date.format(DATE_FORMAT).to_string(),
            cleaned.comment.clone(),
        ];
        record.extend(cleaned.extra.iter().cloned());
        record.extend([
            cleaned.raw_word_count.to_string(),
            cleaned.language.to_string(),
            cleaned.clean_comment.clone(),
            review.year_month.to_string(),
            review.clean_word_count.to_string(),
            review.subjectivity_score.to_string(),
        ]);
        writer.write_record(&record)?;
    }

    writer.flush().map_err(|e| PipelineError::io(path, e))?;

    tracing::info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

/// Reads a table written by [`write_table`].
///
/// Columns not produced by the pipeline are kept as passthrough columns.
///
/// # Errors
///
/// Fails on I/O or CSV errors, a missing pipeline column, or a cell that
/// does not parse as its column's type.
pub fn read_processed_table(path: &Path) -> PipelineResult<ReviewTable<Review>> {
    let bytes = read_bytes(path)?;
    let mut reader = csv_reader(&bytes);
    let headers = reader.headers()?.clone();

    let known = [
        RATING,
        DATE,
        COMMENT,
        RAW_WORD_COUNT,
        LANGUAGE,
        CLEAN_COMMENT,
        YEAR_MONTH,
        CLEAN_WORD_COUNT,
        SUBJECTIVITY_SCORE,
    ];
    let idx = known
        .iter()
        .map(|name| require(&headers, name))
        .collect::<PipelineResult<Vec<usize>>>()?;

    let extra_idx: Vec<usize> = (0..headers.len()).filter(|i| !idx.contains(i)).collect();
    let extra_columns = extra_idx
        .iter()
        .map(|&i| headers.get(i).unwrap_or_default().trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let cell = |pos: usize| record.get(idx[pos]).unwrap_or_default();
        let invalid = |pos: usize| PipelineError::InvalidField {
            row,
            column: known[pos],
            value: cell(pos).to_string(),
        };

        let date = NaiveDateTime::parse_from_str(cell(1), DATE_FORMAT)
            .ok()
            .or_else(|| parse_date(cell(1)))
            .ok_or_else(|| invalid(1))?;
        let raw_word_count = cell(3).parse::<usize>().map_err(|_| invalid(3))?;
        let year_month = cell(6).parse::<YearMonth>().map_err(|_| invalid(6))?;
        let clean_word_count = cell(7).parse::<usize>().map_err(|_| invalid(7))?;
        let subjectivity_score = cell(8).parse::<f64>().map_err(|_| invalid(8))?;

        let cleaned = CleanedReview {
            rating: cell(0).to_string(),
            date,
            comment: cell(2).to_string(),
            language: Language::new(cell(4)),
            raw_word_count,
            clean_comment: cell(5).to_string(),
            extra: extra_idx
                .iter()
                .map(|&i| record.get(i).unwrap_or_default().to_string())
                .collect(),
        };
        rows.push(Review {
            cleaned,
            year_month,
            clean_word_count,
            subjectivity_score,
        });
    }

    Ok(ReviewTable::new(extra_columns, rows))
}
