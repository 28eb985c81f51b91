use serde::{Deserialize, Serialize};
use std::fmt;

/// How two or more packages are compared.
///
/// - identical: sorted type lists must match position by position
/// - left_inclusive: every left type must exist, field-compatible, on the right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMode {
    Identical,
    LeftInclusive,
}

impl ComparisonMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonMode::Identical => "identical",
            ComparisonMode::LeftInclusive => "left_inclusive",
        }
    }

    /// Accepts `identical`, `left_inclusive` and `left-inclusive`, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "identical" => Some(ComparisonMode::Identical),
            "left_inclusive" => Some(ComparisonMode::LeftInclusive),
            _ => None,
        }
    }
}

impl fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyReason {
    TypeMissing,
    FieldMismatch,
}

impl DiscrepancyReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DiscrepancyReason::TypeMissing => "type missing",
            DiscrepancyReason::FieldMismatch => "field mismatch",
        }
    }
}

impl fmt::Display for DiscrepancyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field property a [`FieldDifference`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldProperty {
    Existence,
    Type,
    TypePackage,
    TypePackagePath,
    BasicType,
    StdLib,
    Tags,
}

impl FieldProperty {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldProperty::Existence => "existence",
            FieldProperty::Type => "type",
            FieldProperty::TypePackage => "typePackage",
            FieldProperty::TypePackagePath => "typePackagePath",
            FieldProperty::BasicType => "basicType",
            FieldProperty::StdLib => "stdLib",
            FieldProperty::Tags => "tags",
        }
    }
}

impl fmt::Display for FieldProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values used by existence differences.
pub mod existence {
    pub const EXISTS: &str = "exists";
    pub const MISSING: &str = "missing";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDifference {
    pub field_name: String,
    pub property: FieldProperty,
    pub package_a_value: String,
    pub package_b_value: String,
}

impl FieldDifference {
    pub fn new(
        field_name: impl Into<String>,
        property: FieldProperty,
        package_a_value: impl Into<String>,
        package_b_value: impl Into<String>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            property,
            package_a_value: package_a_value.into(),
            package_b_value: package_b_value.into(),
        }
    }
}

/// A mismatch between two packages, consumed immediately by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discrepancy {
    pub type_name: String,
    pub reason: DiscrepancyReason,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub package_a: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub package_b: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_diffs: Vec<FieldDifference>,
}

impl Discrepancy {
    pub fn type_missing(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            reason: DiscrepancyReason::TypeMissing,
            package_a: String::new(),
            package_b: String::new(),
            field_diffs: vec![],
        }
    }

    pub fn field_mismatch(type_name: impl Into<String>, field_diffs: Vec<FieldDifference>) -> Self {
        Self {
            type_name: type_name.into(),
            reason: DiscrepancyReason::FieldMismatch,
            package_a: String::new(),
            package_b: String::new(),
            field_diffs,
        }
    }

    pub fn with_packages(mut self, package_a: impl Into<String>, package_b: impl Into<String>) -> Self {
        self.package_a = package_a.into();
        self.package_b = package_b.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parse_accepts_both_spellings() {
        assert_eq!(ComparisonMode::parse("identical"), Some(ComparisonMode::Identical));
        assert_eq!(
            ComparisonMode::parse("Left-Inclusive"),
            Some(ComparisonMode::LeftInclusive)
        );
        assert_eq!(
            ComparisonMode::parse("left_inclusive"),
            Some(ComparisonMode::LeftInclusive)
        );
        assert_eq!(ComparisonMode::parse("right_inclusive"), None);
    }

    #[test]
    fn reason_and_property_labels() {
        assert_eq!(DiscrepancyReason::TypeMissing.to_string(), "type missing");
        assert_eq!(DiscrepancyReason::FieldMismatch.to_string(), "field mismatch");
        assert_eq!(FieldProperty::TypePackagePath.as_str(), "typePackagePath");
        assert_eq!(FieldProperty::StdLib.to_string(), "stdLib");
    }

    #[test]
    fn property_serializes_as_label() {
        let json = serde_json::to_string(&FieldProperty::TypePackagePath).unwrap();
        assert_eq!(json, "\"typePackagePath\"");
        let json = serde_json::to_string(&FieldProperty::BasicType).unwrap();
        assert_eq!(json, "\"basicType\"");
    }

    #[test]
    fn discrepancy_skips_empty_optional_fields() {
        let d = Discrepancy::type_missing("Widget");
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["reason"], "type_missing");
        assert!(v.get("field_diffs").is_none());
        assert!(v.get("package_a").is_none());
    }
}
