//! Feature assembly: year-month buckets, clean word counts and
//! subjectivity scores.

use review_core::{CleanedReview, Review, ReviewTable};
use review_text::{Lexicon, ScoreOutcome, ScoreStatus, score_documents, word_count};

/// Attaches derived features to every cleaned review.
///
/// `clean_word_count` is computed first and fed to the scorer, which sees the
/// whole table as one batch.
pub fn feature_engineer(
    table: ReviewTable<CleanedReview>,
    lexicon: &Lexicon,
) -> (ReviewTable<Review>, ScoreStatus) {
    let mut featured = table.map_rows(|cleaned| {
        let clean_word_count = word_count(&cleaned.clean_comment);
        Review::new(cleaned, clean_word_count, 0.0)
    });
    let status = add_subjectivity_score(&mut featured, lexicon);
    (featured, status)
}

/// Recomputes `subjectivity_score` for every row of a featured table.
///
/// Uses each row's existing `clean_word_count`. On an empty lexicon or a
/// degenerate corpus every score becomes 0.0 and the status says why.
pub fn add_subjectivity_score(table: &mut ReviewTable<Review>, lexicon: &Lexicon) -> ScoreStatus {
    let documents: Vec<&str> = table
        .rows
        .iter()
        .map(|r| r.cleaned.clean_comment.as_str())
        .collect();
    let word_counts: Vec<usize> = table.rows.iter().map(|r| r.clean_word_count).collect();

    let ScoreOutcome { scores, status } = score_documents(&documents, &word_counts, lexicon);
    for (review, score) in table.rows.iter_mut().zip(scores) {
        review.subjectivity_score = score;
    }
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use review_core::Language;
    use review_text::SubjectivityClass;

    fn cleaned(month: u32, clean_comment: &str) -> CleanedReview {
        CleanedReview {
            rating: "7".to_string(),
            date: NaiveDate::from_ymd_opt(2024, month, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            comment: clean_comment.to_string(),
            language: Language::english(),
            raw_word_count: clean_comment.split_whitespace().count(),
            clean_comment: clean_comment.to_string(),
            extra: Vec::new(),
        }
    }

    fn lexicon() -> Lexicon {
        Lexicon::from_classes([
            ("great", SubjectivityClass::Strong),
            ("awful", SubjectivityClass::VeryStrong),
        ])
    }

    #[test]
    fn derives_year_month_and_word_count() {
        let table = ReviewTable::new(
            Vec::new(),
            vec![cleaned(3, "great great awful"), cleaned(11, "great awful boring")],
        );
        let (featured, status) = feature_engineer(table, &lexicon());

        assert_eq!(status, ScoreStatus::Scored);
        assert_eq!(featured.rows[0].year_month.to_string(), "2024-03");
        assert_eq!(featured.rows[1].year_month.to_string(), "2024-11");
        assert_eq!(featured.rows[0].clean_word_count, 3);
        assert!(featured.rows[0].subjectivity_score > featured.rows[1].subjectivity_score);
    }

    #[test]
    fn empty_lexicon_zeroes_scores() {
        let table = ReviewTable::new(Vec::new(), vec![cleaned(1, "great film"), cleaned(2, "awful")]);
        let (mut featured, _) = feature_engineer(table, &lexicon());
        assert!(featured.rows.iter().all(|r| r.subjectivity_score > 0.0));

        let status = add_subjectivity_score(&mut featured, &Lexicon::empty());
        assert_eq!(status, ScoreStatus::EmptyLexicon);
        assert!(featured.rows.iter().all(|r| r.subjectivity_score == 0.0));
    }

    #[test]
    fn empty_clean_comments_degrade() {
        let table = ReviewTable::new(Vec::new(), vec![cleaned(1, ""), cleaned(2, "")]);
        let (featured, status) = feature_engineer(table, &lexicon());

        assert!(matches!(status, ScoreStatus::Degraded(_)));
        assert!(featured.rows.iter().all(|r| r.subjectivity_score == 0.0));
        assert!(featured.rows.iter().all(|r| r.clean_word_count == 0));
    }

    #[test]
    fn empty_table_is_fine() {
        let (featured, _) = feature_engineer(ReviewTable::default(), &lexicon());
        assert!(featured.is_empty());
    }
}
