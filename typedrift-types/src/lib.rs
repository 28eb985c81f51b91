//! Shared DTOs (schemas-as-code) for the typedrift workspace.
//!
//! # Design constraints
//! - Model values are immutable once produced by an extractor.
//! - Collections are backed by a single `Vec`; keyed views are derived on demand.
//! - Manifest and report types are serialized to disk; prefer adding optional fields.

pub mod descriptor;
pub mod discrepancy;
pub mod manifest;
pub mod model;
pub mod report;

pub use descriptor::TypeDescriptor;
pub use discrepancy::{ComparisonMode, Discrepancy, DiscrepancyReason, FieldDifference, FieldProperty};
pub use model::{Package, PackageDescription, Struct, StructField, keyed_by};

/// Schema identifiers.
pub mod schema {
    pub const TYPEDRIFT_TYPES_V1: &str = "typedrift.types.v1";
    pub const TYPEDRIFT_REPORT_V1: &str = "typedrift.report.v1";
}
