//! Detector output, normalized to one field naming regardless of which
//! endpoint produced it.

use serde::Serialize;
use std::collections::BTreeMap;

/// Plagiarism-detector percentages for one (user, lab).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PlagiarismLabResult {
    pub moss_pct: f64,
    pub jplag_pct: f64,
    /// Reported as a percentage, consumed as a flag.
    pub dupl_pct: f64,
}

impl PlagiarismLabResult {
    pub fn new(moss_pct: f64, jplag_pct: f64, dupl_pct: f64) -> Self {
        Self {
            moss_pct,
            jplag_pct,
            dupl_pct,
        }
    }

    /// Duplicate code was found iff the duplication percentage is positive.
    pub fn dupl_found(&self) -> bool {
        self.dupl_pct > 0.0
    }
}

/// Per-lab detector percentages for one user.
///
/// The source data may contain a row keyed by the empty string; it is kept here
/// as delivered and skipped by consumers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlagiarismUserSummary {
    pub labs: BTreeMap<String, PlagiarismLabResult>,
}

impl PlagiarismUserSummary {
    /// Iterates real labs only, skipping the empty-key sentinel row.
    pub fn labs(&self) -> impl Iterator<Item = (&str, &PlagiarismLabResult)> {
        self.labs
            .iter()
            .filter(|(name, _)| !name.is_empty())
            .map(|(name, result)| (name.as_str(), result))
    }
}

impl FromIterator<(String, PlagiarismLabResult)> for PlagiarismUserSummary {
    fn from_iter<I: IntoIterator<Item = (String, PlagiarismLabResult)>>(iter: I) -> Self {
        Self {
            labs: iter.into_iter().collect(),
        }
    }
}
