use crate::{ExtractError, NameFilter, StdLibTable, TypeExtractor, passes};
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use glob::{Pattern, glob};
use std::collections::BTreeMap;
use tracing::{debug, warn};
use typedrift_types::manifest::{ManifestField, TypesManifest};
use typedrift_types::{Struct, StructField};

#[derive(Debug, Clone)]
pub struct LoadedManifest {
    pub path: Utf8PathBuf,
    pub manifest: TypesManifest,
}

/// Extractor reading `*.json` type manifests found directly under the package directory.
#[derive(Debug, Clone, Default)]
pub struct ManifestExtractor {
    stdlib: StdLibTable,
}

impl ManifestExtractor {
    pub fn new(stdlib: StdLibTable) -> Self {
        Self { stdlib }
    }

    pub fn stdlib(&self) -> &StdLibTable {
        &self.stdlib
    }
}

impl TypeExtractor for ManifestExtractor {
    fn extract_types(
        &self,
        package_path: &str,
        package_name: &str,
        filter: Option<NameFilter<'_>>,
    ) -> Result<BTreeMap<String, Struct>, ExtractError> {
        let manifests = load_manifests(Utf8Path::new(package_path))?;
        if manifests.is_empty() {
            return Err(ExtractError::NoPackages {
                path: package_path.to_string(),
            });
        }

        let mut out = BTreeMap::new();
        for loaded in manifests {
            if loaded.manifest.package.name != package_name {
                debug!(
                    path = %loaded.path,
                    package = %loaded.manifest.package.name,
                    wanted = %package_name,
                    "skipping manifest for other package"
                );
                continue;
            }

            for ms in &loaded.manifest.structs {
                if ms.name.trim().is_empty() {
                    return Err(ExtractError::InvalidManifest {
                        path: loaded.path.to_string(),
                        message: "struct with empty name".to_string(),
                    });
                }
                if !passes(filter, &ms.name) {
                    continue;
                }

                let s = Struct::new(ms.name.clone(), loaded.manifest.package.clone()).with_fields(
                    ms.fields.iter().map(|f| normalize_field(f, &self.stdlib)),
                );
                if out.insert(s.name.clone(), s).is_some() {
                    debug!(path = %loaded.path, name = %ms.name, "type redeclared; later manifest wins");
                }
            }
        }

        debug!(path = %package_path, package = %package_name, types = out.len(), "extracted types");
        Ok(out)
    }
}

/// Read every `*.json` manifest directly under `dir`, sorted by path.
///
/// A missing directory yields an empty list.
pub fn load_manifests(dir: &Utf8Path) -> Result<Vec<LoadedManifest>, ExtractError> {
    let pattern = format!("{}/*.json", Pattern::escape(dir.as_str()));
    debug!(pattern = %pattern, "scanning for type manifests");

    let entries = glob(&pattern).map_err(|e| ExtractError::Io {
        path: dir.to_string(),
        message: e.to_string(),
    })?;

    let mut out = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ExtractError::Io {
            path: dir.to_string(),
            message: e.to_string(),
        })?;
        let path = Utf8PathBuf::from(path.to_string_lossy().to_string());

        let contents = fs::read_to_string(&path).map_err(|e| ExtractError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        let manifest =
            serde_json::from_str::<TypesManifest>(&contents).map_err(|e| ExtractError::Parse {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        if manifest.schema != typedrift_types::schema::TYPEDRIFT_TYPES_V1 {
            warn!(path = %path, schema = %manifest.schema, "unexpected manifest schema");
        }

        out.push(LoadedManifest { path, manifest });
    }

    // Deterministic order matters.
    out.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(out)
}

/// Flatten a manifest field's descriptor into the comparable [`StructField`] form.
pub fn normalize_field(field: &ManifestField, stdlib: &StdLibTable) -> StructField {
    let mut out = StructField {
        name: field.name.clone(),
        type_name: field.ty.render(),
        basic_type: field.ty.is_primitive(),
        tags: field.tags.clone(),
        ..Default::default()
    };

    if !out.basic_type
        && let Some(pkg) = field.ty.declaring_package()
    {
        out.type_package = pkg.name.clone();
        out.type_package_path = pkg.path.clone();
        out.from_standard_library = stdlib.contains(&pkg.path);
    }

    out
}
