//! Domain logic: compare extracted packages and pair up their types.
//!
//! This crate owns *what* differs between two type hierarchies and which types correspond. It does
//! not own how types are found (`typedrift-extract`) or how conversions are written
//! (`typedrift-render`).

mod compare;
mod error;
mod filter;
mod matcher;
mod reconcile;
mod report;

pub use compare::{Comparator, Comparison, compare_package_types};
pub use error::{CompareError, CompareResult, parse_mode, parse_package_description};
pub use filter::TypeNameFilter;
pub use matcher::{TypePair, find_matching_type_pairs};
pub use reconcile::{compare_fields, reconcile_fields, render_tags};
pub use report::{build_report, fingerprint};

pub use typedrift_types::ComparisonMode;
