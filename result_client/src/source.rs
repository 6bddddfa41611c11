//! The [`ResultSource`] seam between the presenter and the transport.
//!
//! The presenter is generic over this trait so it can be driven by the HTTP
//! client in production and by an in-memory fake in tests.

use crate::client::HttpResultClient;
use crate::endpoints::Request;
use crate::error::FetchResult;
use crate::wire::{self, CiResultWire, CiSummaryWire, LabPlagiarismWire, UserPlagiarismWire};
use async_trait::async_trait;
use util::models::{
    BuildSummary, LabBuildResult, LabScope, PlagiarismLabResult, PlagiarismUserSummary,
};

/// Typed access to every endpoint the dashboard consumes.
#[async_trait]
pub trait ResultSource: Send + Sync {
    /// `ciresults`: latest build/test result for one (user, lab).
    async fn lab_build_result(
        &self,
        course: &str,
        user: &str,
        lab: &str,
    ) -> FetchResult<LabBuildResult>;

    /// `cisummary`: latest build result per lab for one user.
    async fn build_summary(&self, course: &str, user: &str) -> FetchResult<BuildSummary>;

    /// `aplabresults`: detector percentages for one (user, lab).
    async fn lab_plagiarism(
        &self,
        course: &str,
        user: &str,
        lab: &str,
    ) -> FetchResult<PlagiarismLabResult>;

    /// `apuserresults`: detector percentages for every lab of one user.
    async fn user_plagiarism(&self, course: &str, user: &str)
    -> FetchResult<PlagiarismUserSummary>;

    /// `manualtestplagiarism`: asks the server to start a course-wide scan.
    async fn request_plagiarism_scan(&self, course: &str, scope: LabScope) -> FetchResult<()>;

    /// `manualbuild`: asks the server to rebuild one (user, lab). Resolves once
    /// the server has answered.
    async fn request_rebuild(&self, course: &str, user: &str, lab: &str) -> FetchResult<()>;

    /// `approvelab`: marks lab `lab_number` approved for `user`.
    async fn approve_lab(&self, course: &str, user: &str, lab_number: u32) -> FetchResult<()>;
}

#[async_trait]
impl ResultSource for HttpResultClient {
    async fn lab_build_result(
        &self,
        course: &str,
        user: &str,
        lab: &str,
    ) -> FetchResult<LabBuildResult> {
        self.fetch::<CiResultWire, _>(&Request::ci_results(course, user, lab))
            .await
    }

    async fn build_summary(&self, course: &str, user: &str) -> FetchResult<BuildSummary> {
        self.fetch::<CiSummaryWire, _>(&Request::ci_summary(course, user))
            .await
    }

    async fn lab_plagiarism(
        &self,
        course: &str,
        user: &str,
        lab: &str,
    ) -> FetchResult<PlagiarismLabResult> {
        self.fetch::<LabPlagiarismWire, _>(&Request::ap_lab_results(course, user, lab))
            .await
    }

    async fn user_plagiarism(
        &self,
        course: &str,
        user: &str,
    ) -> FetchResult<PlagiarismUserSummary> {
        let rows = self
            .fetch_map::<UserPlagiarismWire>(&Request::ap_user_results(course, user))
            .await?;
        wire::user_summary_from_wire(rows)
    }

    async fn request_plagiarism_scan(&self, course: &str, scope: LabScope) -> FetchResult<()> {
        self.send(&Request::manual_test_plagiarism(course, scope))
            .await
    }

    async fn request_rebuild(&self, course: &str, user: &str, lab: &str) -> FetchResult<()> {
        self.send(&Request::manual_build(course, user, lab)).await
    }

    async fn approve_lab(&self, course: &str, user: &str, lab_number: u32) -> FetchResult<()> {
        self.send(&Request::approve_lab(course, user, lab_number))
            .await
    }
}
