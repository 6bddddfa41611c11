//! Build and test evaluation snapshots.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::collections::BTreeMap;

/// One weighted test outcome inside a [`LabBuildResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestScore {
    pub name: String,
    pub score: f64,
    pub max_score: f64,
    pub weight: f64,
}

/// One build/test evaluation of a (user, lab) pair.
///
/// Every fetch produces a fresh snapshot which fully replaces whatever was on
/// display; snapshots are never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabBuildResult {
    pub status: String,
    pub num_passes: u32,
    pub num_fails: u32,
    pub log: Vec<String>,
    pub build_timestamp: DateTime<FixedOffset>,
    pub push_timestamp: DateTime<FixedOffset>,
    pub num_build_failures: u32,
    /// Percentage in `[0, 100]`. Only meaningful when `num_build_failures == 0`.
    pub total_score: f64,
    /// Empty when no test run produced scores.
    pub test_scores: Vec<TestScore>,
}

impl LabBuildResult {
    pub fn has_build_failure(&self) -> bool {
        self.num_build_failures > 0
    }
}

/// Latest build result for every lab a user has been built for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildSummary {
    pub course: String,
    pub user: String,
    pub labs: BTreeMap<String, LabBuildResult>,
}
