//! Per-lab detail strings.

use serde::Serialize;
use util::models::PlagiarismLabResult;

/// Shown in every detector field when the detail fetch failed.
pub const ERROR_MARKER: &str = "-1% : Error";

/// Display text for the three detector fields of one lab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabPlagiarismDisplay {
    pub moss: String,
    pub jplag: String,
    pub dupl: String,
}

impl LabPlagiarismDisplay {
    /// All three fields carry the error marker; no number is interpreted.
    pub fn error() -> Self {
        Self {
            moss: ERROR_MARKER.to_string(),
            jplag: ERROR_MARKER.to_string(),
            dupl: ERROR_MARKER.to_string(),
        }
    }
}

fn percentage_text(pct: f64) -> String {
    if pct == 0.0 {
        "0%".to_string()
    } else {
        format!("{pct}%")
    }
}

fn duplication_text(found: bool) -> String {
    if found { "True" } else { "False" }.to_string()
}

/// Maps one lab's detector output to display text, or to the error markers
/// when there is no result.
pub fn lab_display(result: Option<&PlagiarismLabResult>) -> LabPlagiarismDisplay {
    match result {
        Some(r) => LabPlagiarismDisplay {
            moss: percentage_text(r.moss_pct),
            jplag: percentage_text(r.jplag_pct),
            dupl: duplication_text(r.dupl_found()),
        },
        None => LabPlagiarismDisplay::error(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_detector_output() {
        let display = lab_display(Some(&PlagiarismLabResult::new(0.0, 12.5, 0.0)));
        assert_eq!(display.moss, "0%");
        assert_eq!(display.jplag, "12.5%");
        assert_eq!(display.dupl, "False");
    }

    #[test]
    fn test_all_detectors_positive() {
        let display = lab_display(Some(&PlagiarismLabResult::new(40.0, 3.25, 17.0)));
        assert_eq!(display.moss, "40%");
        assert_eq!(display.jplag, "3.25%");
        assert_eq!(display.dupl, "True");
    }

    /// Zero always reads `0%`/`False`, any positive value reads numerically/`True`.
    #[test]
    fn test_zero_vs_positive_over_range() {
        for tenth in 0..=1000u32 {
            let pct = tenth as f64 / 10.0;
            let display = lab_display(Some(&PlagiarismLabResult::new(pct, pct, pct)));
            if tenth == 0 {
                assert_eq!(display.moss, "0%");
                assert_eq!(display.dupl, "False");
            } else {
                assert_eq!(display.moss, format!("{pct}%"));
                assert_eq!(display.jplag, format!("{pct}%"));
                assert_eq!(display.dupl, "True");
            }
        }
    }

    #[test]
    fn test_missing_result_shows_error_markers() {
        let display = lab_display(None);
        assert_eq!(display, LabPlagiarismDisplay::error());
        assert_eq!(display.dupl, "-1% : Error");
    }
}
