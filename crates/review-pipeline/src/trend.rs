//! Monthly aggregation of processed reviews.

use std::collections::BTreeMap;

use serde::Serialize;

use review_core::{Review, ReviewTable, YearMonth};

/// Aggregates for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrend {
    pub year_month: YearMonth,
    pub review_count: usize,
    /// Mean of the ratings that parse as numbers; `None` if none do.
    pub mean_rating: Option<f64>,
    pub mean_subjectivity: f64,
}

#[derive(Default)]
struct Accumulator {
    count: usize,
    rating_sum: f64,
    rating_count: usize,
    subjectivity_sum: f64,
}

/// Groups reviews by `year_month`, oldest month first.
pub fn trend(table: &ReviewTable<Review>) -> Vec<MonthlyTrend> {
    let mut months: BTreeMap<YearMonth, Accumulator> = BTreeMap::new();

    for review in &table.rows {
        let acc = months.entry(review.year_month).or_default();
        acc.count += 1;
        acc.subjectivity_sum += review.subjectivity_score;
        if let Some(rating) = review.numeric_rating() {
            acc.rating_sum += rating;
            acc.rating_count += 1;
        }
    }

    months
        .into_iter()
        .map(|(year_month, acc)| MonthlyTrend {
            year_month,
            review_count: acc.count,
            mean_rating: (acc.rating_count > 0).then(|| acc.rating_sum / acc.rating_count as f64),
            mean_subjectivity: acc.subjectivity_sum / acc.count as f64,
        })
        .collect()
}
