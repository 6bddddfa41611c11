//! # Aggregator Module
//!
//! Maps a build snapshot, or its absence, onto a [`BuildDisplayState`].

use crate::format;
use crate::types::{BuildDisplayState, BuildSeverity};
use util::models::LabBuildResult;

/// Smallest bar fill ever drawn for a non-failed build.
pub const FLOOR_BAR_VALUE: u32 = 6;

/// Bar label shown when any build step failed.
pub const BUILD_FAILURE_LABEL: &str = "Build Failure!";

const DANGER_FROM: f64 = 6.0;
const WARNING_FROM: f64 = 40.0;
const SUCCESS_FROM: f64 = 60.0;

/// Band a total score.
///
/// The bands partition `[0, 100]` without overlap:
/// `< 6` floor, `[6, 40)` danger, `[40, 60)` warning, `>= 60` success.
pub fn band(total_score: f64) -> BuildSeverity {
    if total_score < DANGER_FROM {
        BuildSeverity::DangerFloor
    } else if total_score < WARNING_FROM {
        BuildSeverity::Danger
    } else if total_score < SUCCESS_FROM {
        BuildSeverity::Warning
    } else {
        BuildSeverity::Success
    }
}

/// State shown when there is no build to display.
pub fn no_build() -> BuildDisplayState {
    BuildDisplayState {
        percent_label: format::percent(0.0),
        severity: BuildSeverity::DangerFloor,
        bar_value: FLOOR_BAR_VALUE,
    }
}

/// Computes the progress state for `result`.
///
/// Rules are evaluated in order and the first match wins:
/// 1. no result: `0%`, floor band, bar 6;
/// 2. any build failure: `Build Failure!`, bar 100, regardless of score;
/// 3. otherwise the score is banded with [`band`]. In the floor band the bar is
///    clamped to 6 while the label keeps the true score.
pub fn aggregate(result: Option<&LabBuildResult>) -> BuildDisplayState {
    let Some(result) = result else {
        return no_build();
    };

    if result.has_build_failure() {
        return BuildDisplayState {
            percent_label: BUILD_FAILURE_LABEL.to_string(),
            severity: BuildSeverity::BuildFailure,
            bar_value: 100,
        };
    }

    let score = result.total_score;
    let severity = band(score);
    let bar_value = match severity {
        BuildSeverity::DangerFloor => FLOOR_BAR_VALUE,
        _ => score.floor().clamp(0.0, 100.0) as u32,
    };

    BuildDisplayState {
        percent_label: format::percent(score),
        severity,
        bar_value,
    }
}
