pub mod build_result;
pub mod plagiarism;
pub mod selection;

pub use build_result::{BuildSummary, LabBuildResult, TestScore};
pub use plagiarism::{PlagiarismLabResult, PlagiarismUserSummary};
pub use selection::{LabScope, SelectionContext};
