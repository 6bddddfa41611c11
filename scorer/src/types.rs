//! # Types Module
//!
//! Display-level results produced by the aggregator.

use serde::Serialize;

/// Visual tier of the build progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildSeverity {
    /// Score of 60% or more.
    Success,
    /// Score in `[40, 60)`.
    Warning,
    /// Score in `[6, 40)`.
    Danger,
    /// Score under 6%, or no build at all. The bar is clamped to 6.
    DangerFloor,
    /// At least one build step failed. Dominates any score.
    BuildFailure,
}

impl BuildSeverity {
    /// Failures are drawn striped on top of the danger colour.
    pub fn is_striped(&self) -> bool {
        matches!(self, BuildSeverity::BuildFailure)
    }
}

/// Normalized progress state for one build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildDisplayState {
    /// Text drawn on the bar, e.g. `"35%"` or `"Build Failure!"`.
    pub percent_label: String,
    pub severity: BuildSeverity,
    /// Bar fill in `[0, 100]`.
    pub bar_value: u32,
}
