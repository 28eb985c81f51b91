use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use typedrift_types::report::{
    ComparisonReport, Counts, ReportedDiscrepancy, RunInfo, ToolInfo, Verdict, VerdictStatus,
};
use typedrift_types::{ComparisonMode, Discrepancy, DiscrepancyReason, PackageDescription};

use crate::compare::Comparison;

/// Assemble the serializable report for one comparison run.
pub fn build_report(
    mode: ComparisonMode,
    packages: &[PackageDescription],
    comparison: &Comparison,
    tool: ToolInfo,
    started_at: DateTime<Utc>,
) -> ComparisonReport {
    let mut counts = Counts::default();
    for d in &comparison.discrepancies {
        match d.reason {
            DiscrepancyReason::TypeMissing => counts.types_missing += 1,
            DiscrepancyReason::FieldMismatch => counts.field_mismatches += 1,
        }
        counts.field_differences += d.field_diffs.len() as u64;
    }

    let status = if comparison.matched {
        VerdictStatus::Pass
    } else {
        VerdictStatus::Fail
    };

    ComparisonReport {
        schema: typedrift_types::schema::TYPEDRIFT_REPORT_V1.to_string(),
        tool,
        run: RunInfo {
            started_at: Some(started_at),
            ended_at: Some(Utc::now()),
        },
        mode,
        packages: packages.to_vec(),
        verdict: Verdict { status, counts },
        discrepancies: comparison
            .discrepancies
            .iter()
            .map(|d| ReportedDiscrepancy {
                fingerprint: fingerprint(d),
                discrepancy: d.clone(),
            })
            .collect(),
    }
}

/// Stable sha256 over the identifying parts of a discrepancy (not the observed values).
pub fn fingerprint(d: &Discrepancy) -> String {
    let mut key = format!("{}|{}|{}|{}", d.package_a, d.package_b, d.type_name, d.reason.as_str());
    for fd in &d.field_diffs {
        key.push_str(&format!("|{}:{}", fd.field_name, fd.property.as_str()));
    }

    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}
