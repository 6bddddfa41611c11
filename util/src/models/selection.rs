//! The (course, user, lab) identity a dashboard is currently looking at.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which set of repositories a manual plagiarism scan covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabScope {
    Individual,
    Group,
}

impl LabScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabScope::Individual => "individual",
            LabScope::Group => "group",
        }
    }
}

impl fmt::Display for LabScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Currently active selection. Owned by the presenter and changed only by
/// explicit selection actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionContext {
    pub course: String,
    pub user: String,
    pub lab: String,
    pub lab_number: Option<u32>,
}

impl SelectionContext {
    pub fn new(course: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            course: course.into(),
            user: user.into(),
            ..Default::default()
        }
    }
}
