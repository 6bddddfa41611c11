//! Render plans: pure mappings from a payload (or its absence) to the list of
//! surface updates that display it.
//!
//! Every plan writes each of its targets exactly once and replaces rather than
//! appends, so applying the same plan twice leaves the surface unchanged.

use crate::surface::{CellId, Field, NoticeKind, UiSurface};
use plagiarism::{HighlightTier, LabPlagiarismDisplay};
use scorer::{BuildDisplayState, BuildSeverity, TestScoreRow};
use util::models::{BuildSummary, LabBuildResult, PlagiarismLabResult, PlagiarismUserSummary};

pub const NOTHING_BUILT_STATUS: &str = "Status: Nothing built yet.";
pub const NO_BUILD_LOG_LINE: &str = "There is no build for this lab yet.";
pub const SCAN_ACCEPTED: &str = "The anti-plagiarism command was sent. It will take several minutes at the minimum to process. Please be patient.";
pub const SCAN_FAILED: &str = "The anti-plagiarism command failed.";
pub const REBUILD_RUNNING: &str = "Running build";
pub const REBUILD_DONE: &str = "Successful rebuild. Build log updated.";
pub const REBUILD_FAILED: &str = "Rebuild failure";
pub const APPROVE_PROMPT: &str = "Are you sure you want to approve this lab?";
pub const APPROVE_FAILED: &str = "Lab approval failed.";

/// One surface update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOp {
    SetField(Field, String),
    SetHighlight(CellId, HighlightTier),
    SetProgress {
        value: u32,
        label: String,
        severity: BuildSeverity,
    },
    SetLog(Vec<String>),
    SetTable(Vec<TestScoreRow>),
    ShowNotice(NoticeKind, String),
}

impl RenderOp {
    fn field(field: Field, text: impl Into<String>) -> Self {
        RenderOp::SetField(field, text.into())
    }

    fn progress(state: BuildDisplayState) -> Self {
        RenderOp::SetProgress {
            value: state.bar_value,
            label: state.percent_label,
            severity: state.severity,
        }
    }

    fn notice(kind: NoticeKind, text: impl Into<String>) -> Self {
        RenderOp::ShowNotice(kind, text.into())
    }
}

/// Applies `ops` to `surface` in order.
pub fn apply<S: UiSurface + ?Sized>(ops: &[RenderOp], surface: &S) {
    for op in ops {
        match op {
            RenderOp::SetField(field, text) => surface.set_field(field, text),
            RenderOp::SetHighlight(cell, tier) => surface.set_highlight(cell, *tier),
            RenderOp::SetProgress {
                value,
                label,
                severity,
            } => surface.set_progress(*value, label, *severity),
            RenderOp::SetLog(lines) => surface.set_log(lines),
            RenderOp::SetTable(rows) => surface.set_table(rows),
            RenderOp::ShowNotice(kind, text) => surface.show_notice(*kind, text),
        }
    }
}

/// Transient notice for a command outcome.
pub fn notice_plan(kind: NoticeKind, text: &str) -> Vec<RenderOp> {
    vec![RenderOp::notice(kind, text)]
}

/// Names the lab whose build is being loaded.
pub fn headline_plan(lab: &str) -> Vec<RenderOp> {
    vec![RenderOp::field(Field::LabHeadline, lab)]
}

/// Detail view for one build, or the "nothing built yet" fallback.
pub fn build_result_plan(result: Option<&LabBuildResult>) -> Vec<RenderOp> {
    let progress = RenderOp::progress(scorer::aggregate(result));

    let Some(r) = result else {
        return vec![
            RenderOp::field(Field::Status, NOTHING_BUILT_STATUS),
            RenderOp::field(Field::Passes, "Number of passed tests: -"),
            RenderOp::field(Field::Fails, "Number of failed tests: -"),
            RenderOp::field(Field::BuildTime, "Build time: -"),
            RenderOp::field(Field::PushTime, "Code delivered: -"),
            progress,
            RenderOp::SetLog(vec![NO_BUILD_LOG_LINE.to_string()]),
            RenderOp::field(Field::TotalScore, scorer::format::percent(0.0)),
            RenderOp::SetTable(Vec::new()),
        ];
    };

    vec![
        RenderOp::field(Field::Status, format!("Status: {}", r.status)),
        RenderOp::field(
            Field::Passes,
            format!("Number of passed tests: {}", r.num_passes),
        ),
        RenderOp::field(
            Field::Fails,
            format!("Number of failed tests: {}", r.num_fails),
        ),
        RenderOp::field(
            Field::BuildTime,
            format!("Build time: {}", scorer::format::timestamp(&r.build_timestamp)),
        ),
        RenderOp::field(
            Field::PushTime,
            format!(
                "Code delivered: {}",
                scorer::format::timestamp(&r.push_timestamp)
            ),
        ),
        progress,
        RenderOp::SetLog(r.log.clone()),
        RenderOp::field(Field::TotalScore, scorer::format::percent(r.total_score)),
        RenderOp::SetTable(scorer::test_score_rows(&r.test_scores)),
    ]
}

/// Detector fields for one lab, or the error markers.
pub fn lab_plagiarism_plan(result: Option<&PlagiarismLabResult>) -> Vec<RenderOp> {
    let LabPlagiarismDisplay { moss, jplag, dupl } = plagiarism::lab_display(result);
    vec![
        RenderOp::SetField(Field::MossResult, moss),
        RenderOp::SetField(Field::JplagResult, jplag),
        RenderOp::SetField(Field::DuplResult, dupl),
    ]
}

/// Overview highlights for `user`. Clean labs and the sentinel row are omitted.
pub fn user_overview_plan(user: &str, summary: &PlagiarismUserSummary) -> Vec<RenderOp> {
    plagiarism::user_overview(summary)
        .into_iter()
        .map(|h| RenderOp::SetHighlight(CellId::new(user, h.lab), h.tier))
        .collect()
}

/// One percent label per built lab.
pub fn build_summary_plan(summary: &BuildSummary) -> Vec<RenderOp> {
    summary
        .labs
        .iter()
        .filter(|(lab, _)| !lab.is_empty())
        .map(|(lab, result)| {
            let state = scorer::aggregate(Some(result));
            RenderOp::SetField(Field::LabSummary(lab.clone()), state.percent_label)
        })
        .collect()
}
