use pretty_assertions::assert_eq;
use typedrift_types::report::{
    ComparisonReport, Counts, ReportedDiscrepancy, RunInfo, ToolInfo, Verdict, VerdictStatus,
};
use typedrift_types::{
    ComparisonMode, Discrepancy, FieldDifference, FieldProperty, Package, PackageDescription,
    Struct, StructField,
};

#[test]
fn verdict_status_and_mode_serialize_snake_case() {
    let pass = serde_json::to_value(VerdictStatus::Pass).expect("serialize");
    let fail = serde_json::to_value(VerdictStatus::Fail).expect("serialize");
    assert_eq!(pass, serde_json::json!("pass"));
    assert_eq!(fail, serde_json::json!("fail"));

    let mode = serde_json::to_value(ComparisonMode::LeftInclusive).expect("serialize");
    assert_eq!(mode, serde_json::json!("left_inclusive"));
}

#[test]
fn report_flattens_discrepancy_next_to_fingerprint() {
    let report = ComparisonReport {
        schema: typedrift_types::schema::TYPEDRIFT_REPORT_V1.to_string(),
        tool: ToolInfo {
            name: "typedrift".to_string(),
            version: Some("0.1.0".to_string()),
        },
        run: RunInfo::default(),
        mode: ComparisonMode::LeftInclusive,
        packages: vec![
            PackageDescription::new("a", "models/a"),
            PackageDescription::new("b", "models/b"),
        ],
        verdict: Verdict {
            status: VerdictStatus::Fail,
            counts: Counts {
                types_missing: 0,
                field_mismatches: 1,
                field_differences: 1,
            },
        },
        discrepancies: vec![ReportedDiscrepancy {
            fingerprint: "abc".to_string(),
            discrepancy: Discrepancy::field_mismatch(
                "User",
                vec![FieldDifference::new(
                    "Age",
                    FieldProperty::Existence,
                    "exists",
                    "missing",
                )],
            ),
        }],
    };

    let value = serde_json::to_value(&report).expect("serialize report");
    assert!(value["run"].get("started_at").is_none());
    let d = &value["discrepancies"][0];
    assert_eq!(d["fingerprint"], "abc");
    assert_eq!(d["type_name"], "User");
    assert_eq!(d["reason"], "field_mismatch");
    assert_eq!(d["field_diffs"][0]["property"], "existence");

    let back: ComparisonReport = serde_json::from_value(value).expect("deserialize report");
    assert_eq!(back.discrepancies[0].discrepancy.type_name, "User");
    assert_eq!(back.verdict.counts.field_differences, 1);
}

#[test]
fn struct_field_uses_type_key_and_omits_defaults() {
    let s = Struct::new("User", Package::new("example.com/models", "models"))
        .with_field(StructField::basic("Name", "string").with_tag("json", "name"));

    let value = serde_json::to_value(&s).expect("serialize struct");
    let field = &value["fields"][0];
    assert_eq!(field["type"], "string");
    assert_eq!(field["basic_type"], true);
    assert!(field.get("type_package").is_none());
    assert_eq!(field["tags"]["json"], "name");
    assert!(value["package"].get("alias").is_none());
}
