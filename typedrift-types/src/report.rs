use crate::discrepancy::{ComparisonMode, Discrepancy};
use crate::model::PackageDescription;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comparison artifact written as `report.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub schema: String,
    pub tool: ToolInfo,

    #[serde(default)]
    pub run: RunInfo,

    pub mode: ComparisonMode,

    #[serde(default)]
    pub packages: Vec<PackageDescription>,

    pub verdict: Verdict,

    #[serde(default)]
    pub discrepancies: Vec<ReportedDiscrepancy>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub status: VerdictStatus,
    pub counts: Counts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictStatus {
    Pass,
    Fail,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub types_missing: u64,
    pub field_mismatches: u64,
    pub field_differences: u64,
}

/// A discrepancy plus a stable fingerprint for cross-run tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportedDiscrepancy {
    pub fingerprint: String,

    #[serde(flatten)]
    pub discrepancy: Discrepancy,
}
