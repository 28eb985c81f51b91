//! Type extraction for typedrift.
//!
//! The comparison and generation logic never reads source files itself; it asks a
//! [`TypeExtractor`] for the fully materialized types of a package. Two implementations live here:
//! - [`InMemoryExtractor`] for tests and embedding hosts that already hold type descriptions.
//! - [`ManifestExtractor`] which reads `typedrift.types.v1` JSON manifests from a directory.
//!
//! Standard-library membership is decided by a [`StdLibTable`] handed to the extractor when it is
//! constructed; there is no process-wide table.

mod error;
mod manifest;
mod memory;
mod stdlib;

pub use error::ExtractError;
pub use manifest::{LoadedManifest, ManifestExtractor, load_manifests, normalize_field};
pub use memory::InMemoryExtractor;
pub use stdlib::{BUILTIN_STDLIB_PATHS, StdLibTable};

use std::collections::BTreeMap;
use typedrift_types::Struct;

/// Optional predicate over type names; types for which it returns `false` are skipped.
pub type NameFilter<'a> = &'a dyn Fn(&str) -> bool;

/// Source of extracted types.
pub trait TypeExtractor: Send + Sync {
    /// Every record-like type declared in the package named `package_name` at `package_path`
    /// that passes `filter`, keyed by type name.
    fn extract_types(
        &self,
        package_path: &str,
        package_name: &str,
        filter: Option<NameFilter<'_>>,
    ) -> Result<BTreeMap<String, Struct>, ExtractError>;
}

pub(crate) fn passes(filter: Option<NameFilter<'_>>, name: &str) -> bool {
    filter.is_none_or(|f| f(name))
}
