//! The abstract sink every view renders into.
//!
//! Nothing here assumes a rendering technology; a surface may paint a web page,
//! print to a terminal or just record what it was told.

pub mod recording;
pub mod terminal;

use plagiarism::HighlightTier;
use scorer::{BuildSeverity, TestScoreRow};
use std::fmt;

pub use recording::RecordingSurface;
pub use terminal::TerminalSurface;

/// Text fields the dashboard writes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    LabHeadline,
    Status,
    Passes,
    Fails,
    BuildTime,
    PushTime,
    /// Footer of the test table.
    TotalScore,
    MossResult,
    JplagResult,
    DuplResult,
    /// Per-lab cell of the build summary.
    LabSummary(String),
}

impl Field {
    pub fn id(&self) -> String {
        match self {
            Field::LabHeadline => "lab-headline".into(),
            Field::Status => "status".into(),
            Field::Passes => "passes".into(),
            Field::Fails => "fails".into(),
            Field::BuildTime => "timedate".into(),
            Field::PushTime => "pushtime".into(),
            Field::TotalScore => "totalscore".into(),
            Field::MossResult => "mossResults".into(),
            Field::JplagResult => "jplagResults".into(),
            Field::DuplResult => "duplResults".into(),
            Field::LabSummary(lab) => format!("summary-{lab}"),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

/// One (user, lab) cell of the plagiarism overview.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellId {
    pub user: String,
    pub lab: String,
}

impl CellId {
    pub fn new(user: impl Into<String>, lab: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            lab: lab.into(),
        }
    }
}

/// Transient notice styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    Info,
    /// A command is in progress.
    Running,
    Success,
    Error,
}

/// Rendering sink consumed by the presenter.
///
/// Each setter fully overwrites what it targets; nothing accumulates across
/// calls. Methods take `&self` so several in-flight views can share one surface.
pub trait UiSurface: Send + Sync {
    fn set_field(&self, field: &Field, text: &str);

    fn set_highlight(&self, cell: &CellId, tier: HighlightTier);

    fn set_progress(&self, value: u32, label: &str, severity: BuildSeverity);

    /// Replaces the build log.
    fn set_log(&self, lines: &[String]);

    /// Replaces the test table body.
    fn set_table(&self, rows: &[TestScoreRow]);

    fn show_notice(&self, kind: NoticeKind, text: &str);

    /// Asks the operator a yes/no question.
    fn confirm(&self, prompt: &str) -> bool;
}
