//! Classification of plagiarism-detector output for display.
//!
//! Three detectors are consumed: Moss (token similarity), JPlag (structural
//! similarity) and dupl (duplicate code). Their percentages are only ever read
//! as display text for a single lab, or as a present/absent signal when counting
//! how many detectors flagged a submission.

pub mod detail;
pub mod severity;

pub use detail::{ERROR_MARKER, LabPlagiarismDisplay, lab_display};
pub use severity::{HighlightTier, LabHighlight, flagged_count, user_overview};
