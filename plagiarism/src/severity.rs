//! Per-user overview highlighting.
//!
//! Each lab is highlighted by how many independent detectors flagged it. The
//! count is a highlight intensity, not a score.

use serde::Serialize;
use util::models::{PlagiarismLabResult, PlagiarismUserSummary};

/// Highlight intensity for one (user, lab) overview cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HighlightTier {
    Light,
    Medium,
    High,
}

impl HighlightTier {
    /// Tier for a flagged-detector count. `0` means no highlight.
    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(HighlightTier::Light),
            2 => Some(HighlightTier::Medium),
            3 => Some(HighlightTier::High),
            _ => None,
        }
    }

    /// Background colour for surfaces that paint cells.
    pub fn color(&self) -> &'static str {
        match self {
            HighlightTier::Light => "#f7bbbb",
            HighlightTier::Medium => "#f08080",
            HighlightTier::High => "#e73232",
        }
    }
}

/// Number of detectors reporting a strictly positive percentage, in `0..=3`.
pub fn flagged_count(result: &PlagiarismLabResult) -> usize {
    [result.moss_pct, result.jplag_pct, result.dupl_pct]
        .into_iter()
        .filter(|pct| *pct > 0.0)
        .count()
}

/// Highlight for one lab of the overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabHighlight {
    pub lab: String,
    pub count: usize,
    pub tier: HighlightTier,
}

/// Highlights for every real lab in `summary` that at least one detector flagged.
///
/// The empty-key sentinel row and unflagged labs produce nothing.
pub fn user_overview(summary: &PlagiarismUserSummary) -> Vec<LabHighlight> {
    summary
        .labs()
        .filter_map(|(lab, result)| {
            let count = flagged_count(result);
            HighlightTier::from_count(count).map(|tier| LabHighlight {
                lab: lab.to_string(),
                count,
                tier,
            })
        })
        .collect()
}
