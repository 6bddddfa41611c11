//! Test-score table rows.

use crate::format;
use serde::Serialize;
use util::models::TestScore;

/// One pre-formatted row of the test result table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestScoreRow {
    /// 1-based position in the payload order.
    pub index: usize,
    pub name: String,
    /// `"<score>/<max> pts"`
    pub score: String,
    /// `"<weight> pts"`
    pub weight: String,
}

/// Builds table rows in payload order.
pub fn test_score_rows(scores: &[TestScore]) -> Vec<TestScoreRow> {
    scores
        .iter()
        .enumerate()
        .map(|(i, t)| TestScoreRow {
            index: i + 1,
            name: t.name.clone(),
            score: format!("{}/{}", t.score, format::points(t.max_score)),
            weight: format::points(t.weight),
        })
        .collect()
}
