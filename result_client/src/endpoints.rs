//! Named server endpoints and the parameters each one takes.
//!
//! Reads are `GET` with query parameters, commands are `POST` with a
//! form-encoded body. Parameter names are reproduced exactly as the server
//! reads them, including their inconsistent capitalization.

use util::models::LabScope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Build/test result for one (user, lab).
    CiResults,
    /// Latest build result per lab for one user.
    CiSummary,
    /// Detector percentages for one (user, lab).
    ApLabResults,
    /// Detector percentages for every lab of one user.
    ApUserResults,
    /// Starts a plagiarism scan over a whole course.
    ManualTestPlagiarism,
    /// Starts a rebuild of one (user, lab).
    ManualBuild,
    /// Marks a lab as approved for a user.
    ApproveLab,
}

impl Endpoint {
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::CiResults => "ciresults",
            Endpoint::CiSummary => "cisummary",
            Endpoint::ApLabResults => "aplabresults",
            Endpoint::ApUserResults => "apuserresults",
            Endpoint::ManualTestPlagiarism => "manualtestplagiarism",
            Endpoint::ManualBuild => "manualbuild",
            Endpoint::ApproveLab => "approvelab",
        }
    }

    /// Route as registered by the server.
    pub fn path(&self) -> &'static str {
        match self {
            // the server registers this route with the letters swapped
            Endpoint::CiResults => "/course/ciresutls",
            Endpoint::CiSummary => "/course/cisummary",
            Endpoint::ApLabResults => "/course/aplabresults",
            Endpoint::ApUserResults => "/course/apuserresults",
            Endpoint::ManualTestPlagiarism => "/event/manualtestplagiarism",
            Endpoint::ManualBuild => "/event/manualbuild",
            Endpoint::ApproveLab => "/course/approvelab",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Endpoint::CiResults
            | Endpoint::CiSummary
            | Endpoint::ApLabResults
            | Endpoint::ApUserResults => Method::Get,
            Endpoint::ManualTestPlagiarism | Endpoint::ManualBuild | Endpoint::ApproveLab => {
                Method::Post
            }
        }
    }

    pub fn is_command(&self) -> bool {
        self.method() == Method::Post
    }
}

/// A fully parameterized call against one [`Endpoint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub endpoint: Endpoint,
    pub params: Vec<(&'static str, String)>,
}

impl Request {
    fn new(endpoint: Endpoint, params: Vec<(&'static str, String)>) -> Self {
        Self { endpoint, params }
    }

    pub fn ci_results(course: &str, user: &str, lab: &str) -> Self {
        Self::new(
            Endpoint::CiResults,
            vec![
                ("Labname", lab.to_string()),
                ("Course", course.to_string()),
                ("Username", user.to_string()),
            ],
        )
    }

    pub fn ci_summary(course: &str, user: &str) -> Self {
        Self::new(
            Endpoint::CiSummary,
            vec![
                ("Course", course.to_string()),
                ("Username", user.to_string()),
            ],
        )
    }

    pub fn ap_lab_results(course: &str, user: &str, lab: &str) -> Self {
        Self::new(
            Endpoint::ApLabResults,
            vec![
                ("Labname", lab.to_string()),
                ("Course", course.to_string()),
                ("Username", user.to_string()),
            ],
        )
    }

    pub fn ap_user_results(course: &str, user: &str) -> Self {
        Self::new(
            Endpoint::ApUserResults,
            vec![
                ("Course", course.to_string()),
                ("Username", user.to_string()),
            ],
        )
    }

    pub fn manual_test_plagiarism(course: &str, scope: LabScope) -> Self {
        Self::new(
            Endpoint::ManualTestPlagiarism,
            vec![
                ("course", course.to_string()),
                ("labs", scope.as_str().to_string()),
            ],
        )
    }

    pub fn manual_build(course: &str, user: &str, lab: &str) -> Self {
        Self::new(
            Endpoint::ManualBuild,
            vec![
                ("course", course.to_string()),
                ("user", user.to_string()),
                ("lab", lab.to_string()),
            ],
        )
    }

    pub fn approve_lab(course: &str, user: &str, lab_number: u32) -> Self {
        Self::new(
            Endpoint::ApproveLab,
            vec![
                ("Course", course.to_string()),
                ("User", user.to_string()),
                ("Approve", "true".to_string()),
                ("Labnum", lab_number.to_string()),
            ],
        )
    }

    #[cfg(test)]
    pub(crate) fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}
