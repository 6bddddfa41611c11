use async_trait::async_trait;
use chrono::DateTime;
use dashboard::render::{
    APPROVE_FAILED, APPROVE_PROMPT, NO_BUILD_LOG_LINE, NOTHING_BUILT_STATUS, REBUILD_DONE,
    REBUILD_FAILED, REBUILD_RUNNING, SCAN_ACCEPTED, SCAN_FAILED,
};
use dashboard::surface::RecordingSurface;
use dashboard::{CellId, DashboardPresenter, Field, NoticeKind};
use plagiarism::HighlightTier;
use result_client::error::FetchResult;
use result_client::{FetchError, ResultSource};
use scorer::BuildSeverity;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use util::models::{
    BuildSummary, LabBuildResult, LabScope, PlagiarismLabResult, PlagiarismUserSummary,
    SelectionContext, TestScore,
};

fn down() -> FetchError {
    FetchError::Transport("connection refused".into())
}

fn build(total_score: f64, num_build_failures: u32, log: &[&str]) -> LabBuildResult {
    LabBuildResult {
        status: "Active lab assignment".into(),
        num_passes: 6,
        num_fails: 2,
        log: log.iter().map(|l| l.to_string()).collect(),
        build_timestamp: DateTime::parse_from_rfc3339("2015-03-01T12:30:05Z").unwrap(),
        push_timestamp: DateTime::parse_from_rfc3339("2015-03-01T12:29:00Z").unwrap(),
        num_build_failures,
        total_score,
        test_scores: vec![TestScore {
            name: "TestA".into(),
            score: 1.0,
            max_score: 2.0,
            weight: 1.0,
        }],
    }
}

/// In-memory `ResultSource` with per-(user, lab) canned answers.
struct FakeSource {
    builds: Mutex<HashMap<(String, String), FetchResult<LabBuildResult>>>,
    lab_plagiarism: HashMap<(String, String), FetchResult<PlagiarismLabResult>>,
    user_plagiarism: HashMap<String, FetchResult<PlagiarismUserSummary>>,
    summary: FetchResult<BuildSummary>,
    command_result: FetchResult<()>,
    /// Build fetches for these labs wait until notified.
    gates: HashMap<String, Arc<Notify>>,
    /// Rebuild commands wait until notified.
    rebuild_gate: Option<Arc<Notify>>,
    /// Build stored for the rebuilt (user, lab) once a rebuild succeeds.
    rebuilt: Option<LabBuildResult>,
    calls: Mutex<Vec<String>>,
}

impl Default for FakeSource {
    fn default() -> Self {
        Self {
            builds: Mutex::default(),
            lab_plagiarism: HashMap::new(),
            user_plagiarism: HashMap::new(),
            summary: Err(down()),
            command_result: Ok(()),
            gates: HashMap::new(),
            rebuild_gate: None,
            rebuilt: None,
            calls: Mutex::default(),
        }
    }
}

impl FakeSource {
    fn with_build(self, user: &str, lab: &str, result: FetchResult<LabBuildResult>) -> Self {
        self.builds
            .lock()
            .unwrap()
            .insert((user.into(), lab.into()), result);
        self
    }

    fn set_build(&self, user: &str, lab: &str, result: FetchResult<LabBuildResult>) {
        self.builds
            .lock()
            .unwrap()
            .insert((user.into(), lab.into()), result);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ResultSource for FakeSource {
    async fn lab_build_result(
        &self,
        course: &str,
        user: &str,
        lab: &str,
    ) -> FetchResult<LabBuildResult> {
        self.record(format!("ciresults {course} {user} {lab}"));
        if let Some(gate) = self.gates.get(lab) {
            gate.notified().await;
        }
        self.builds
            .lock()
            .unwrap()
            .get(&(user.to_string(), lab.to_string()))
            .cloned()
            .unwrap_or_else(|| Err(down()))
    }

    async fn build_summary(&self, course: &str, user: &str) -> FetchResult<BuildSummary> {
        self.record(format!("cisummary {course} {user}"));
        self.summary.clone()
    }

    async fn lab_plagiarism(
        &self,
        course: &str,
        user: &str,
        lab: &str,
    ) -> FetchResult<PlagiarismLabResult> {
        self.record(format!("aplabresults {course} {user} {lab}"));
        self.lab_plagiarism
            .get(&(user.to_string(), lab.to_string()))
            .cloned()
            .unwrap_or_else(|| Err(down()))
    }

    async fn user_plagiarism(
        &self,
        course: &str,
        user: &str,
    ) -> FetchResult<PlagiarismUserSummary> {
        self.record(format!("apuserresults {course} {user}"));
        self.user_plagiarism
            .get(user)
            .cloned()
            .unwrap_or_else(|| Err(down()))
    }

    async fn request_plagiarism_scan(&self, course: &str, scope: LabScope) -> FetchResult<()> {
        self.record(format!("manualtestplagiarism {course} {scope}"));
        self.command_result.clone()
    }

    async fn request_rebuild(&self, course: &str, user: &str, lab: &str) -> FetchResult<()> {
        self.record(format!("manualbuild {course} {user} {lab}"));
        if let Some(gate) = &self.rebuild_gate {
            gate.notified().await;
        }
        if let (Ok(()), Some(build)) = (&self.command_result, &self.rebuilt) {
            self.set_build(user, lab, Ok(build.clone()));
        }
        self.command_result.clone()
    }

    async fn approve_lab(&self, course: &str, user: &str, lab_number: u32) -> FetchResult<()> {
        self.record(format!("approvelab {course} {user} {lab_number}"));
        self.command_result.clone()
    }
}

fn presenter(
    source: FakeSource,
    surface: RecordingSurface,
) -> DashboardPresenter<FakeSource, RecordingSurface> {
    DashboardPresenter::new(source, surface, SelectionContext::new("dat320", "alice"))
        .with_stale_guard(true)
}

#[tokio::test]
async fn test_show_build_result_renders_payload() {
    let source = FakeSource::default().with_build("alice", "lab1", Ok(build(35.0, 0, &["ok"])));
    let p = presenter(source, RecordingSurface::new());

    p.show_build_result("alice", "lab1").await;

    let state = p.surface().snapshot();
    assert_eq!(state.fields[&Field::LabHeadline], "lab1");
    assert_eq!(state.fields[&Field::Passes], "Number of passed tests: 6");
    let progress = state.progress.unwrap();
    assert_eq!((progress.value, progress.label.as_str()), (35, "35%"));
    assert_eq!(progress.severity, BuildSeverity::Danger);
    assert_eq!(state.log, vec!["ok"]);
    assert_eq!(p.source().calls(), vec!["ciresults dat320 alice lab1"]);
}

#[tokio::test]
async fn test_show_build_result_failure_renders_fallback() {
    let p = presenter(FakeSource::default(), RecordingSurface::new());

    p.show_build_result("alice", "lab1").await;

    let state = p.surface().snapshot();
    assert_eq!(state.fields[&Field::Status], NOTHING_BUILT_STATUS);
    assert_eq!(state.fields[&Field::TotalScore], "0%");
    assert_eq!(state.log, vec![NO_BUILD_LOG_LINE]);
    assert!(state.table.is_empty());
    let progress = state.progress.unwrap();
    assert_eq!(progress.value, 6);
    assert_eq!(progress.label, "0%");
    assert_eq!(progress.severity, BuildSeverity::DangerFloor);
}

/// Rendering the same payload twice does not accumulate anything.
#[tokio::test]
async fn test_show_build_result_is_idempotent() {
    let source =
        FakeSource::default().with_build("alice", "lab1", Ok(build(64.0, 0, &["a", "b", "c"])));
    let p = presenter(source, RecordingSurface::new());

    p.show_build_result("alice", "lab1").await;
    let once = p.surface().snapshot();
    p.show_build_result("alice", "lab1").await;
    let twice = p.surface().snapshot();

    assert_eq!(once.fields, twice.fields);
    assert_eq!(once.log, twice.log);
    assert_eq!(twice.log.len(), 3);
    assert_eq!(once.table, twice.table);
    assert_eq!(once.progress, twice.progress);
}

#[tokio::test]
async fn test_build_failure_dominates() {
    let source = FakeSource::default().with_build("alice", "lab1", Ok(build(80.0, 2, &[])));
    let p = presenter(source, RecordingSurface::new());

    p.show_build_result("alice", "lab1").await;

    let progress = p.surface().progress().unwrap();
    assert_eq!(progress.value, 100);
    assert_eq!(progress.label, "Build Failure!");
    assert_eq!(progress.severity, BuildSeverity::BuildFailure);
}

#[tokio::test]
async fn test_lab_plagiarism_success_and_failure() {
    let mut source = FakeSource::default();
    source.lab_plagiarism.insert(
        ("alice".into(), "lab1".into()),
        Ok(PlagiarismLabResult::new(0.0, 12.5, 0.0)),
    );
    let p = presenter(source, RecordingSurface::new());

    p.show_lab_plagiarism("alice", "lab1").await;
    assert_eq!(p.surface().field(&Field::MossResult).as_deref(), Some("0%"));
    assert_eq!(p.surface().field(&Field::JplagResult).as_deref(), Some("12.5%"));
    assert_eq!(p.surface().field(&Field::DuplResult).as_deref(), Some("False"));

    p.show_lab_plagiarism("alice", "lab2").await;
    for field in [Field::MossResult, Field::JplagResult, Field::DuplResult] {
        assert_eq!(p.surface().field(&field).as_deref(), Some("-1% : Error"));
    }
}

#[tokio::test]
async fn test_overview_highlights_and_skips_sentinel() {
    let mut source = FakeSource::default();
    source.user_plagiarism.insert(
        "alice".into(),
        Ok([
            (String::new(), PlagiarismLabResult::new(9.0, 9.0, 9.0)),
            ("lab1".to_string(), PlagiarismLabResult::new(3.0, 0.0, 0.0)),
            ("lab2".to_string(), PlagiarismLabResult::new(3.0, 4.0, 1.0)),
            ("lab3".to_string(), PlagiarismLabResult::default()),
        ]
        .into_iter()
        .collect()),
    );
    let p = presenter(source, RecordingSurface::new());

    p.show_plagiarism_overview(&["alice".to_string(), "bob".to_string()])
        .await;

    let state = p.surface().snapshot();
    assert_eq!(state.highlights.len(), 2);
    assert_eq!(
        state.highlights[&CellId::new("alice", "lab1")],
        HighlightTier::Light
    );
    assert_eq!(
        state.highlights[&CellId::new("alice", "lab2")],
        HighlightTier::High
    );
    assert!(!state.highlights.contains_key(&CellId::new("alice", "")));
    // bob's fetch failed silently
    assert_eq!(state.render_calls, 2);
    assert!(state.notices.is_empty());
}

#[tokio::test]
async fn test_build_summary_labels() {
    let source = FakeSource {
        summary: Ok(BuildSummary {
            course: "dat320".into(),
            user: "alice".into(),
            labs: [("lab1".to_string(), build(42.0, 0, &[]))]
                .into_iter()
                .collect(),
        }),
        ..Default::default()
    };
    let p = presenter(source, RecordingSurface::new());

    p.show_build_summary("alice").await;

    assert_eq!(
        p.surface().field(&Field::LabSummary("lab1".into())).as_deref(),
        Some("42%")
    );
}

/// Empty lab keys in the summary never produce a summary field.
#[tokio::test]
async fn test_build_summary_skips_empty_lab_key() {
    let source = FakeSource {
        summary: Ok(BuildSummary {
            course: "dat320".into(),
            user: "alice".into(),
            labs: [
                (String::new(), build(10.0, 0, &[])),
                ("lab2".to_string(), build(65.0, 0, &[])),
            ]
            .into_iter()
            .collect(),
        }),
        ..Default::default()
    };
    let p = presenter(source, RecordingSurface::new());

    p.show_build_summary("alice").await;

    let state = p.surface().snapshot();
    assert_eq!(state.fields.len(), 1);
    assert!(!state.fields.contains_key(&Field::LabSummary(String::new())));
    assert_eq!(state.fields[&Field::LabSummary("lab2".into())], "65%");
}

#[tokio::test]
async fn test_manual_scan_notices() {
    let p = presenter(FakeSource::default(), RecordingSurface::new());
    p.trigger_manual_plagiarism_scan("dat320", LabScope::Group)
        .await;
    assert_eq!(
        p.surface().notices(),
        vec![(NoticeKind::Info, SCAN_ACCEPTED.to_string())]
    );
    assert_eq!(p.source().calls(), vec!["manualtestplagiarism dat320 group"]);

    let failing = FakeSource {
        command_result: Err(down()),
        ..Default::default()
    };
    let p = presenter(failing, RecordingSurface::new());
    p.trigger_manual_plagiarism_scan("dat320", LabScope::Individual)
        .await;
    assert_eq!(
        p.surface().notices(),
        vec![(NoticeKind::Error, SCAN_FAILED.to_string())]
    );
    // a scan never touches the result views
    assert!(p.surface().progress().is_none());
}

#[tokio::test]
async fn test_rebuild_reloads_result() {
    let source = FakeSource::default().with_build("alice", "lab1", Ok(build(90.0, 0, &["v2"])));
    let p = presenter(source, RecordingSurface::new());

    p.trigger_rebuild("dat320", "alice", "lab1").await;

    assert_eq!(
        p.surface().notices(),
        vec![
            (NoticeKind::Running, REBUILD_RUNNING.to_string()),
            (NoticeKind::Success, REBUILD_DONE.to_string()),
        ]
    );
    assert_eq!(
        p.source().calls(),
        vec!["manualbuild dat320 alice lab1", "ciresults dat320 alice lab1"]
    );
    assert_eq!(p.surface().snapshot().log, vec!["v2"]);
}

/// Re-selecting the same lab while a rebuild runs keeps the reload current.
#[tokio::test]
async fn test_rebuild_reload_survives_reselecting_same_lab() {
    let gate = Arc::new(Notify::new());
    let mut source =
        FakeSource::default().with_build("alice", "lab1", Ok(build(40.0, 0, &["old-build"])));
    source.rebuild_gate = Some(gate.clone());
    source.rebuilt = Some(build(95.0, 0, &["new-build"]));
    let p = presenter(source, RecordingSurface::new());

    p.select_lab("lab1", 1).await;
    assert_eq!(p.surface().snapshot().log, vec!["old-build"]);

    tokio::join!(p.trigger_rebuild("dat320", "alice", "lab1"), async {
        p.select_lab("lab1", 1).await;
        gate.notify_one();
    });

    let state = p.surface().snapshot();
    assert_eq!(
        state.notices,
        vec![
            (NoticeKind::Running, REBUILD_RUNNING.to_string()),
            (NoticeKind::Success, REBUILD_DONE.to_string()),
        ]
    );
    assert_eq!(state.log, vec!["new-build"]);
    assert_eq!(state.progress.unwrap().severity, BuildSeverity::Success);
}

/// Switching to another lab while a rebuild runs drops the reload.
#[tokio::test]
async fn test_rebuild_reload_dropped_after_switching_lab() {
    let gate = Arc::new(Notify::new());
    let mut source = FakeSource::default()
        .with_build("alice", "lab1", Ok(build(40.0, 0, &["lab1"])))
        .with_build("alice", "lab2", Ok(build(80.0, 0, &["lab2"])));
    source.rebuild_gate = Some(gate.clone());
    source.rebuilt = Some(build(95.0, 0, &["lab1-rebuilt"]));
    let p = presenter(source, RecordingSurface::new());

    p.select_lab("lab1", 1).await;
    tokio::join!(p.trigger_rebuild("dat320", "alice", "lab1"), async {
        p.select_lab("lab2", 2).await;
        gate.notify_one();
    });

    assert_eq!(p.surface().snapshot().log, vec!["lab2"]);
    assert_eq!(
        p.source().calls().last().map(String::as_str),
        Some("ciresults dat320 alice lab2")
    );
}

/// A failed rebuild only adds a notice; the displayed result stays.
#[tokio::test]
async fn test_rebuild_failure_keeps_display() {
    let source = FakeSource {
        command_result: Err(down()),
        ..Default::default()
    }
    .with_build("alice", "lab1", Ok(build(70.0, 0, &["v1"])));
    let p = presenter(source, RecordingSurface::new());

    p.show_build_result("alice", "lab1").await;
    let before = p.surface().snapshot();
    p.trigger_rebuild("dat320", "alice", "lab1").await;
    let after = p.surface().snapshot();

    assert_eq!(before.fields, after.fields);
    assert_eq!(before.progress, after.progress);
    assert_eq!(before.log, after.log);
    assert_eq!(
        after.notices,
        vec![
            (NoticeKind::Running, REBUILD_RUNNING.to_string()),
            (NoticeKind::Error, REBUILD_FAILED.to_string()),
        ]
    );
}

#[tokio::test]
async fn test_approve_declined_sends_nothing() {
    let p = presenter(FakeSource::default(), RecordingSurface::answering(false));

    p.approve_lab("dat320", "alice", "lab1", 1).await;

    assert!(p.source().calls().is_empty());
    assert_eq!(p.surface().snapshot().prompts, vec![APPROVE_PROMPT]);
}

#[tokio::test]
async fn test_approve_confirmed_reloads() {
    let source = FakeSource::default().with_build("alice", "lab3", Ok(build(100.0, 0, &[])));
    let p = presenter(source, RecordingSurface::answering(true));

    p.approve_lab("dat320", "alice", "lab3", 3).await;

    assert_eq!(
        p.source().calls(),
        vec!["approvelab dat320 alice 3", "ciresults dat320 alice lab3"]
    );
    assert_eq!(
        p.surface().progress().unwrap().severity,
        BuildSeverity::Success
    );
}

#[tokio::test]
async fn test_approve_failure_shows_notice() {
    let source = FakeSource {
        command_result: Err(down()),
        ..Default::default()
    };
    let p = presenter(source, RecordingSurface::answering(true));

    p.approve_lab("dat320", "alice", "lab3", 3).await;

    assert_eq!(
        p.surface().notices(),
        vec![(NoticeKind::Error, APPROVE_FAILED.to_string())]
    );
    assert!(p.surface().progress().is_none());
}

#[tokio::test]
async fn test_select_lab_updates_context_and_fetches() {
    let source = FakeSource::default().with_build("bob", "lab2", Ok(build(50.0, 0, &[])));
    let p = presenter(source, RecordingSurface::new());

    p.select_user("bob");
    p.select_lab("lab2", 2).await;

    let selection = p.selection();
    assert_eq!(selection.user, "bob");
    assert_eq!(selection.lab, "lab2");
    assert_eq!(selection.lab_number, Some(2));
    assert_eq!(
        p.surface().progress().unwrap().severity,
        BuildSeverity::Warning
    );
}

fn gated_source(gate: &Arc<Notify>) -> FakeSource {
    let mut source = FakeSource::default()
        .with_build("alice", "lab1", Ok(build(10.0, 0, &["lab1"])))
        .with_build("alice", "lab2", Ok(build(90.0, 0, &["lab2"])));
    source.gates.insert("lab1".into(), gate.clone());
    source
}

/// A slow response for an earlier selection does not overwrite the later one.
#[tokio::test]
async fn test_stale_response_is_discarded() {
    let gate = Arc::new(Notify::new());
    let p = presenter(gated_source(&gate), RecordingSurface::new());

    tokio::join!(p.select_lab("lab1", 1), async {
        p.select_lab("lab2", 2).await;
        gate.notify_one();
    });

    let state = p.surface().snapshot();
    assert_eq!(state.log, vec!["lab2"]);
    assert_eq!(state.progress.unwrap().value, 90);
}

/// With the guard off the last completion wins, as the original page did.
#[tokio::test]
async fn test_stale_response_applies_without_guard() {
    let gate = Arc::new(Notify::new());
    let p = presenter(gated_source(&gate), RecordingSurface::new()).with_stale_guard(false);

    tokio::join!(p.select_lab("lab1", 1), async {
        p.select_lab("lab2", 2).await;
        gate.notify_one();
    });

    assert_eq!(p.surface().snapshot().log, vec!["lab1"]);
}

/// Later payloads fully replace earlier ones.
#[tokio::test]
async fn test_new_snapshot_replaces_old() {
    let source = FakeSource::default().with_build("alice", "lab1", Ok(build(20.0, 0, &["a", "b"])));
    let p = presenter(source, RecordingSurface::new());
    p.show_build_result("alice", "lab1").await;

    p.source()
        .set_build("alice", "lab1", Ok(build(75.0, 0, &["c"])));
    p.show_build_result("alice", "lab1").await;

    let state = p.surface().snapshot();
    assert_eq!(state.log, vec!["c"]);
    assert_eq!(state.progress.unwrap().severity, BuildSeverity::Success);
}
