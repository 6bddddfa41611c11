//! # Scorer
//!
//! Turns a lab's build/test snapshot into what the progress indicator and the
//! result table display.
//!
//! ## Key Concepts
//! - **Banding**: a total score maps to exactly one [`BuildSeverity`]; a build
//!   failure overrides any score.
//! - **Floor clamp**: scores under 6% still draw a 6% bar while the label keeps
//!   the true value.
//! - **Rows**: test scores become numbered, pre-formatted table rows.

pub mod aggregator;
pub mod format;
pub mod table;
pub mod types;

pub use aggregator::aggregate;
pub use table::{TestScoreRow, test_score_rows};
pub use types::{BuildDisplayState, BuildSeverity};
