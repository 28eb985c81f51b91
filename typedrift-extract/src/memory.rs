use crate::{ExtractError, NameFilter, TypeExtractor, passes};
use std::collections::BTreeMap;
use typedrift_types::Struct;

/// Extractor over type descriptions already held in memory, keyed by package path.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExtractor {
    packages: BTreeMap<String, Vec<Struct>>,
}

impl InMemoryExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the types found at `path`. Only structs whose package name matches the requested
    /// name are returned by [`TypeExtractor::extract_types`].
    pub fn with_package(
        mut self,
        path: impl Into<String>,
        structs: impl IntoIterator<Item = Struct>,
    ) -> Self {
        self.packages
            .entry(path.into())
            .or_default()
            .extend(structs);
        self
    }
}

impl TypeExtractor for InMemoryExtractor {
    fn extract_types(
        &self,
        package_path: &str,
        package_name: &str,
        filter: Option<NameFilter<'_>>,
    ) -> Result<BTreeMap<String, Struct>, ExtractError> {
        let structs = self
            .packages
            .get(package_path)
            .ok_or_else(|| ExtractError::NoPackages {
                path: package_path.to_string(),
            })?;

        Ok(structs
            .iter()
            .filter(|s| s.package.name == package_name && passes(filter, &s.name))
            .map(|s| (s.name.clone(), s.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typedrift_types::{Package, StructField};

    fn extractor() -> InMemoryExtractor {
        let models = Package::new("example.com/models", "models");
        let other = Package::new("example.com/models/other", "other");
        InMemoryExtractor::new().with_package(
            "models",
            [
                Struct::new("User", models.clone()).with_field(StructField::basic("Name", "string")),
                Struct::new("Order", models),
                Struct::new("Ignored", other),
            ],
        )
    }

    #[test]
    fn filters_by_package_name() {
        let types = extractor().extract_types("models", "models", None).unwrap();
        assert_eq!(types.keys().collect::<Vec<_>>(), vec!["Order", "User"]);
    }

    #[test]
    fn applies_name_filter() {
        let only_user = |name: &str| name == "User";
        let types = extractor()
            .extract_types("models", "models", Some(&only_user))
            .unwrap();
        assert_eq!(types.len(), 1);
        assert!(types.contains_key("User"));
    }

    #[test]
    fn unknown_path_is_no_packages() {
        let err = extractor().extract_types("nowhere", "models", None).unwrap_err();
        assert_eq!(
            err,
            ExtractError::NoPackages {
                path: "nowhere".to_string()
            }
        );
    }

    #[test]
    fn known_path_with_other_name_is_empty() {
        let types = extractor().extract_types("models", "missing", None).unwrap();
        assert!(types.is_empty());
    }
}
