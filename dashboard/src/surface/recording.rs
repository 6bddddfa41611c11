//! In-memory surface that keeps the last value written to every target.

use super::{CellId, Field, NoticeKind, UiSurface};
use plagiarism::HighlightTier;
use scorer::{BuildSeverity, TestScoreRow};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressState {
    pub value: u32,
    pub label: String,
    pub severity: BuildSeverity,
}

/// Everything a [`RecordingSurface`] has been told, last write wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceState {
    pub fields: BTreeMap<Field, String>,
    pub highlights: BTreeMap<CellId, HighlightTier>,
    pub progress: Option<ProgressState>,
    pub log: Vec<String>,
    pub table: Vec<TestScoreRow>,
    /// Notices in the order they were shown.
    pub notices: Vec<(NoticeKind, String)>,
    pub prompts: Vec<String>,
    /// Total number of render calls received, `confirm` excluded.
    pub render_calls: usize,
}

/// Headless [`UiSurface`], used by tests and for scripted runs.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    state: Mutex<SurfaceState>,
    confirm_answer: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every confirmation prompt with `answer`.
    pub fn answering(answer: bool) -> Self {
        Self {
            state: Mutex::default(),
            confirm_answer: answer,
        }
    }

    fn lock(&self) -> MutexGuard<'_, SurfaceState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> SurfaceState {
        self.lock().clone()
    }

    pub fn field(&self, field: &Field) -> Option<String> {
        self.lock().fields.get(field).cloned()
    }

    pub fn highlight(&self, cell: &CellId) -> Option<HighlightTier> {
        self.lock().highlights.get(cell).copied()
    }

    pub fn progress(&self) -> Option<ProgressState> {
        self.lock().progress.clone()
    }

    pub fn notices(&self) -> Vec<(NoticeKind, String)> {
        self.lock().notices.clone()
    }

    pub fn render_calls(&self) -> usize {
        self.lock().render_calls
    }
}

impl UiSurface for RecordingSurface {
    fn set_field(&self, field: &Field, text: &str) {
        let mut state = self.lock();
        state.fields.insert(field.clone(), text.to_string());
        state.render_calls += 1;
    }

    fn set_highlight(&self, cell: &CellId, tier: HighlightTier) {
        let mut state = self.lock();
        state.highlights.insert(cell.clone(), tier);
        state.render_calls += 1;
    }

    fn set_progress(&self, value: u32, label: &str, severity: BuildSeverity) {
        let mut state = self.lock();
        state.progress = Some(ProgressState {
            value,
            label: label.to_string(),
            severity,
        });
        state.render_calls += 1;
    }

    fn set_log(&self, lines: &[String]) {
        let mut state = self.lock();
        state.log = lines.to_vec();
        state.render_calls += 1;
    }

    fn set_table(&self, rows: &[TestScoreRow]) {
        let mut state = self.lock();
        state.table = rows.to_vec();
        state.render_calls += 1;
    }

    fn show_notice(&self, kind: NoticeKind, text: &str) {
        let mut state = self.lock();
        state.notices.push((kind, text.to_string()));
        state.render_calls += 1;
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.lock().prompts.push(prompt.to_string());
        self.confirm_answer
    }
}
