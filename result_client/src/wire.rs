//! JSON shapes served by the results server and their normalization into
//! [`util::models`] types.
//!
//! The per-lab and per-user plagiarism endpoints spell the JPlag key
//! differently (`JplagPct` vs `JPlagPct`). Each shape gets its own struct with
//! the exact key it is served with, and both normalize into
//! [`PlagiarismLabResult`]. A payload with the other spelling is rejected.

use crate::error::FetchError;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::collections::BTreeMap;
use util::models::{
    BuildSummary, LabBuildResult, PlagiarismLabResult, PlagiarismUserSummary, TestScore,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestScoreWire {
    pub test_name: String,
    pub score: f64,
    pub max_score: f64,
    pub weight: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CiResultWire {
    pub status: String,
    pub num_passes: u32,
    pub num_fails: u32,
    pub log: Option<Vec<String>>,
    pub timestamp: DateTime<FixedOffset>,
    pub push_time: DateTime<FixedOffset>,
    pub num_build_failure: u32,
    pub total_score: f64,
    pub test_scores: Option<Vec<TestScoreWire>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CiSummaryWire {
    pub course: String,
    pub user: String,
    pub summary: Option<BTreeMap<String, CiResultWire>>,
}

/// Per-lab detail shape (`aplabresults`).
#[derive(Debug, Deserialize)]
pub struct LabPlagiarismWire {
    #[serde(rename = "MossPct")]
    pub moss_pct: f64,
    #[serde(rename = "JplagPct")]
    pub jplag_pct: f64,
    #[serde(rename = "DuplPct")]
    pub dupl_pct: f64,
}

/// Per-user overview row shape (`apuserresults`).
#[derive(Debug, Deserialize)]
pub struct UserPlagiarismWire {
    #[serde(rename = "MossPct")]
    pub moss_pct: f64,
    #[serde(rename = "JPlagPct")]
    pub jplag_pct: f64,
    #[serde(rename = "DuplPct")]
    pub dupl_pct: f64,
}

fn check_percentage(field: &str, value: f64, max: Option<f64>) -> Result<f64, FetchError> {
    let too_large = max.is_some_and(|m| value > m);
    if !value.is_finite() || value < 0.0 || too_large {
        return Err(FetchError::MalformedPayload(format!(
            "{field} out of range: {value}"
        )));
    }
    Ok(value)
}

fn plagiarism_result(moss: f64, jplag: f64, dupl: f64) -> Result<PlagiarismLabResult, FetchError> {
    Ok(PlagiarismLabResult::new(
        check_percentage("MossPct", moss, None)?,
        check_percentage("JplagPct", jplag, None)?,
        check_percentage("DuplPct", dupl, None)?,
    ))
}

impl TryFrom<CiResultWire> for LabBuildResult {
    type Error = FetchError;

    fn try_from(wire: CiResultWire) -> Result<Self, Self::Error> {
        // a failed build never displays its score; out-of-range values are zeroed
        let total_score = if wire.num_build_failure > 0 {
            check_percentage("TotalScore", wire.total_score, Some(100.0)).unwrap_or(0.0)
        } else {
            check_percentage("TotalScore", wire.total_score, Some(100.0))?
        };
        Ok(LabBuildResult {
            status: wire.status,
            num_passes: wire.num_passes,
            num_fails: wire.num_fails,
            log: wire.log.unwrap_or_default(),
            build_timestamp: wire.timestamp,
            push_timestamp: wire.push_time,
            num_build_failures: wire.num_build_failure,
            total_score,
            test_scores: wire
                .test_scores
                .unwrap_or_default()
                .into_iter()
                .map(|t| TestScore {
                    name: t.test_name,
                    score: t.score,
                    max_score: t.max_score,
                    weight: t.weight,
                })
                .collect(),
        })
    }
}

impl TryFrom<CiSummaryWire> for BuildSummary {
    type Error = FetchError;

    fn try_from(wire: CiSummaryWire) -> Result<Self, Self::Error> {
        let labs = wire
            .summary
            .unwrap_or_default()
            .into_iter()
            .map(|(lab, result)| Ok((lab, LabBuildResult::try_from(result)?)))
            .collect::<Result<_, FetchError>>()?;
        Ok(BuildSummary {
            course: wire.course,
            user: wire.user,
            labs,
        })
    }
}

impl TryFrom<LabPlagiarismWire> for PlagiarismLabResult {
    type Error = FetchError;

    fn try_from(wire: LabPlagiarismWire) -> Result<Self, Self::Error> {
        plagiarism_result(wire.moss_pct, wire.jplag_pct, wire.dupl_pct)
    }
}

impl TryFrom<UserPlagiarismWire> for PlagiarismLabResult {
    type Error = FetchError;

    fn try_from(wire: UserPlagiarismWire) -> Result<Self, Self::Error> {
        plagiarism_result(wire.moss_pct, wire.jplag_pct, wire.dupl_pct)
    }
}

/// Decodes an `apuserresults` body.
pub fn user_summary_from_wire(
    wire: BTreeMap<String, UserPlagiarismWire>,
) -> Result<PlagiarismUserSummary, FetchError> {
    wire.into_iter()
        .map(|(lab, row)| Ok((lab, PlagiarismLabResult::try_from(row)?)))
        .collect()
}

/// Deserializes `bytes` as `W` and normalizes it into `T`.
pub fn decode<W, T>(bytes: &[u8]) -> Result<T, FetchError>
where
    W: for<'de> Deserialize<'de>,
    T: TryFrom<W, Error = FetchError>,
{
    let wire: W = serde_json::from_slice(bytes)?;
    T::try_from(wire)
}
