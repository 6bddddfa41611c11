//! # Dashboard Presenter
//!
//! Sequences fetch → classify → render for every user action and owns the
//! fallback contract:
//!
//! - read paths (`show_*`) turn a [`FetchError`](result_client::FetchError)
//!   into a deterministic fallback render, or into nothing for the overview;
//! - write paths (`trigger_*`, `approve_lab`) turn it into a transient notice
//!   and leave the displayed results alone.
//!
//! ## Concurrency
//!
//! All methods take `&self`, so any number of views can be in flight at once
//! on a single task. Nothing is cancelled when superseded. When the stale
//! guard is on, each selection-bound read remembers the [`SelectionContext`]
//! it was issued under and its completion is dropped if the selection no
//! longer equals it. Re-selecting the same user or lab keeps it current.
//! With the guard off, the last completion to arrive wins.

use crate::render::{self, RenderOp};
use crate::surface::{NoticeKind, UiSurface};
use result_client::ResultSource;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use util::config::AppConfig;
use util::models::{LabScope, SelectionContext};

pub struct DashboardPresenter<R, U> {
    source: R,
    surface: U,
    selection: RwLock<SelectionContext>,
    discard_stale: bool,
}

impl<R: ResultSource, U: UiSurface> DashboardPresenter<R, U> {
    /// Creates a presenter with the stale guard taken from the global config.
    pub fn new(source: R, surface: U, selection: SelectionContext) -> Self {
        let discard_stale = AppConfig::global().discard_stale_results;
        Self {
            source,
            surface,
            selection: RwLock::new(selection),
            discard_stale,
        }
    }

    /// Overrides whether completions from a superseded selection are dropped.
    pub fn with_stale_guard(mut self, enabled: bool) -> Self {
        self.discard_stale = enabled;
        self
    }

    pub fn surface(&self) -> &U {
        &self.surface
    }

    pub fn source(&self) -> &R {
        &self.source
    }

    fn read_selection(&self) -> RwLockReadGuard<'_, SelectionContext> {
        self.selection.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write_selection(&self) -> RwLockWriteGuard<'_, SelectionContext> {
        self.selection.write().unwrap_or_else(|p| p.into_inner())
    }

    /// Copy of the current selection.
    pub fn selection(&self) -> SelectionContext {
        self.read_selection().clone()
    }

    fn course(&self) -> String {
        self.read_selection().course.clone()
    }

    fn is_current(&self, issued: &SelectionContext) -> bool {
        !self.discard_stale || *self.read_selection() == *issued
    }

    fn render(&self, ops: &[RenderOp]) {
        render::apply(ops, &self.surface);
    }

    fn notice(&self, kind: NoticeKind, text: &str) {
        self.render(&render::notice_plan(kind, text));
    }

    /// Switches the selected user. In-flight reads issued under another user
    /// become stale.
    pub fn select_user(&self, user: &str) {
        self.write_selection().user = user.to_string();
    }

    /// Switches the selected lab tab and shows its build result for the
    /// selected user.
    pub async fn select_lab(&self, lab: &str, lab_number: u32) {
        let user = {
            let mut selection = self.write_selection();
            selection.lab = lab.to_string();
            selection.lab_number = Some(lab_number);
            selection.user.clone()
        };
        self.show_build_result(&user, lab).await;
    }

    /// Fetches and renders the build result of (`user`, `lab`), falling back
    /// to the "nothing built yet" view on failure.
    pub async fn show_build_result(&self, user: &str, lab: &str) {
        let issued = self.selection();
        self.show_build_result_issued(user, lab, &issued).await;
    }

    async fn show_build_result_issued(&self, user: &str, lab: &str, issued: &SelectionContext) {
        if !self.is_current(issued) {
            tracing::debug!(user, lab, "selection changed before reload, skipping");
            return;
        }
        self.render(&render::headline_plan(lab));

        let result = self
            .source
            .lab_build_result(&issued.course, user, lab)
            .await;

        if !self.is_current(issued) {
            tracing::debug!(user, lab, "discarding stale build result");
            return;
        }

        let plan = match &result {
            Ok(build) => render::build_result_plan(Some(build)),
            Err(e) => {
                tracing::warn!(user, lab, error = %e, kind = ?e.kind(), "no build result, rendering fallback");
                render::build_result_plan(None)
            }
        };
        self.render(&plan);
    }

    /// Fetches and renders detector output for (`user`, `lab`). On failure all
    /// three fields show the error marker.
    pub async fn show_lab_plagiarism(&self, user: &str, lab: &str) {
        let issued = self.selection();
        let result = self.source.lab_plagiarism(&issued.course, user, lab).await;

        if !self.is_current(&issued) {
            tracing::debug!(user, lab, "discarding stale plagiarism result");
            return;
        }

        let plan = match &result {
            Ok(r) => render::lab_plagiarism_plan(Some(r)),
            Err(e) => {
                tracing::warn!(user, lab, error = %e, "plagiarism detail unavailable");
                render::lab_plagiarism_plan(None)
            }
        };
        self.render(&plan);
    }

    /// Highlights `user`'s overview cells by flagged-detector count. Failures
    /// render nothing.
    pub async fn show_user_plagiarism_overview(&self, user: &str) {
        let course = self.course();
        match self.source.user_plagiarism(&course, user).await {
            Ok(summary) => self.render(&render::user_overview_plan(user, &summary)),
            Err(e) => {
                tracing::debug!(user, error = %e, "plagiarism overview unavailable, leaving row as is");
            }
        }
    }

    /// Loads the overview row of every user in `users` concurrently.
    pub async fn show_plagiarism_overview(&self, users: &[String]) {
        futures::future::join_all(
            users
                .iter()
                .map(|user| self.show_user_plagiarism_overview(user)),
        )
        .await;
    }

    /// Writes one percent label per built lab of `user`. Failures render nothing.
    pub async fn show_build_summary(&self, user: &str) {
        let course = self.course();
        match self.source.build_summary(&course, user).await {
            Ok(summary) => self.render(&render::build_summary_plan(&summary)),
            Err(e) => {
                tracing::debug!(user, error = %e, "build summary unavailable");
            }
        }
    }

    /// Asks the server to scan `course`. Only a notice is shown; results have
    /// to be fetched again later.
    pub async fn trigger_manual_plagiarism_scan(&self, course: &str, scope: LabScope) {
        match self.source.request_plagiarism_scan(course, scope).await {
            Ok(()) => {
                tracing::info!(course, scope = %scope, "plagiarism scan requested");
                self.notice(NoticeKind::Info, render::SCAN_ACCEPTED);
            }
            Err(e) => {
                tracing::warn!(course, scope = %scope, error = %e, "plagiarism scan rejected");
                self.notice(NoticeKind::Error, render::SCAN_FAILED);
            }
        }
    }

    /// Rebuilds (`user`, `lab`) and, once the server answers, reloads its
    /// build result. A failed rebuild leaves the displayed result untouched.
    pub async fn trigger_rebuild(&self, course: &str, user: &str, lab: &str) {
        let issued = self.selection();
        self.notice(NoticeKind::Running, render::REBUILD_RUNNING);

        match self.source.request_rebuild(course, user, lab).await {
            Ok(()) => {
                tracing::info!(course, user, lab, "rebuild finished");
                self.notice(NoticeKind::Success, render::REBUILD_DONE);
                self.show_build_result_issued(user, lab, &issued).await;
            }
            Err(e) => {
                tracing::warn!(course, user, lab, error = %e, "rebuild failed");
                self.notice(NoticeKind::Error, render::REBUILD_FAILED);
            }
        }
    }

    /// Approves lab `lab_number` for `user` after the operator confirms, then
    /// reloads the build result of `lab`.
    pub async fn approve_lab(&self, course: &str, user: &str, lab: &str, lab_number: u32) {
        if !self.surface.confirm(render::APPROVE_PROMPT) {
            tracing::debug!(user, lab, "approval declined");
            return;
        }

        let issued = self.selection();
        match self.source.approve_lab(course, user, lab_number).await {
            Ok(()) => {
                tracing::info!(course, user, lab_number, "lab approved");
                self.show_build_result_issued(user, lab, &issued).await;
            }
            Err(e) => {
                tracing::warn!(course, user, lab_number, error = %e, "approval failed");
                self.notice(NoticeKind::Error, render::APPROVE_FAILED);
            }
        }
    }
}
