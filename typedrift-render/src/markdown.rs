use typedrift_types::report::{ComparisonReport, VerdictStatus};
use typedrift_types::{DiscrepancyReason, PackageDescription};

pub fn render_comparison_md(report: &ComparisonReport) -> String {
    let mut out = String::new();
    out.push_str("# typedrift comparison\n\n");
    out.push_str(&format!("- Mode: `{}`\n", report.mode.as_str()));
    out.push_str(&format!(
        "- Verdict: `{}`\n",
        status_label(report.verdict.status)
    ));
    let counts = &report.verdict.counts;
    out.push_str(&format!(
        "- Types missing: {}\n- Field mismatches: {} ({} differences)\n",
        counts.types_missing, counts.field_mismatches, counts.field_differences
    ));
    out.push_str("- Packages:\n");
    for pd in &report.packages {
        out.push_str(&format!("  - `{}` at `{}`\n", pd.name, pd.path));
    }
    out.push('\n');

    out.push_str("## Discrepancies\n\n");
    if report.discrepancies.is_empty() {
        out.push_str("_No discrepancies._\n");
        return out;
    }

    for (i, rd) in report.discrepancies.iter().enumerate() {
        let d = &rd.discrepancy;
        out.push_str(&format!("### {}. {}\n\n", i + 1, d.type_name));
        out.push_str(&format!("- Reason: `{}`\n", d.reason.as_str()));
        out.push_str(&format!(
            "- Packages: `{}` vs `{}`\n",
            d.package_a, d.package_b
        ));
        out.push_str(&format!("- Fingerprint: `{}`\n", short(&rd.fingerprint)));

        if d.reason == DiscrepancyReason::FieldMismatch && !d.field_diffs.is_empty() {
            out.push_str("\n| Field | Property | ");
            out.push_str(&format!("{} | {} |\n", d.package_a, d.package_b));
            out.push_str("|---|---|---|---|\n");
            for fd in &d.field_diffs {
                out.push_str(&format!(
                    "| `{}` | {} | `{}` | `{}` |\n",
                    fd.field_name,
                    fd.property.as_str(),
                    escape_cell(&fd.package_a_value),
                    escape_cell(&fd.package_b_value)
                ));
            }
        }

        out.push('\n');
    }

    out
}

/// Markdown list of type names found in both packages.
pub fn render_pairs_md(
    left: &PackageDescription,
    right: &PackageDescription,
    names: &[&str],
) -> String {
    let mut out = String::new();
    out.push_str("# typedrift pairs\n\n");
    out.push_str(&format!(
        "- Left: `{}` at `{}`\n- Right: `{}` at `{}`\n- Pairs: {}\n\n",
        left.name,
        left.path,
        right.name,
        right.path,
        names.len()
    ));

    if names.is_empty() {
        out.push_str("_No matching types._\n");
        return out;
    }
    for name in names {
        out.push_str(&format!("- `{}`\n", name));
    }
    out
}

fn status_label(s: VerdictStatus) -> &'static str {
    match s {
        VerdictStatus::Pass => "pass",
        VerdictStatus::Fail => "fail",
    }
}

fn short(fingerprint: &str) -> &str {
    fingerprint.get(..12).unwrap_or(fingerprint)
}

fn escape_cell(v: &str) -> String {
    v.replace('|', "\\|")
}
