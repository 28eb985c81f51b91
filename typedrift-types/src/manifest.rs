use crate::descriptor::TypeDescriptor;
use crate::model::Package;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// On-disk description of the types declared in one package.
///
/// Manifests are read tolerantly: unknown fields are ignored and optional fields may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypesManifest {
    /// Schema identifier, normally `typedrift.types.v1`.
    pub schema: String,

    pub package: Package,

    #[serde(default)]
    pub structs: Vec<ManifestStruct>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestStruct {
    pub name: String,

    #[serde(default)]
    pub fields: Vec<ManifestField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestField {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: TypeDescriptor,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}
