use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifies a collection of types to extract. Only used as a lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageDescription {
    pub name: String,
    pub path: String,
}

impl PackageDescription {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Declaring module of a type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Package {
    pub path: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub alias: String,

    pub name: String,
}

impl Package {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alias: String::new(),
            name: name.into(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    /// One line of an import block: `alias "path"` or `"path"`.
    pub fn import_line(&self) -> String {
        if self.alias.is_empty() {
            format!("\"{}\"", self.path)
        } else {
            format!("{} \"{}\"", self.alias, self.path)
        }
    }
}

/// A record-like type and its fields, in extraction order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Struct {
    pub name: String,
    pub package: Package,

    #[serde(default)]
    pub fields: Vec<StructField>,
}

impl Struct {
    pub fn new(name: impl Into<String>, package: Package) -> Self {
        Self {
            name: name.into(),
            package,
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: StructField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_fields(mut self, fields: impl IntoIterator<Item = StructField>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Name-keyed view over the fields. Later duplicates win.
    pub fn fields_by_name(&self) -> BTreeMap<&str, &StructField> {
        keyed_by(&self.fields, |f| f.name.as_str())
    }

    /// `package.Type` form used in generated code, e.g. `models.User`. Always the package name;
    /// an alias only appears on the import line.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package.name, self.name)
    }

    /// Positional structural equality: same number of fields and every field at the same index
    /// is field-equal. The type names themselves are not compared.
    pub fn struct_equal(&self, other: &Struct) -> bool {
        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(&other.fields)
                .all(|(x, y)| x.field_equal(y))
    }
}

/// A single field of a [`Struct`].
///
/// `basic_type == true` implies both package fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructField {
    pub name: String,

    /// Normalized textual type, e.g. `[]*Foo` or `map[string]Bar`.
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub type_package: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub type_package_path: String,

    #[serde(default)]
    pub basic_type: bool,

    #[serde(default)]
    pub from_standard_library: bool,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl StructField {
    /// A field of a primitive type such as `string` or `int`.
    pub fn basic(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            basic_type: true,
            ..Default::default()
        }
    }

    /// A field whose type is declared in another package.
    pub fn named(
        name: impl Into<String>,
        type_name: impl Into<String>,
        type_package: impl Into<String>,
        type_package_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            type_package: type_package.into(),
            type_package_path: type_package_path.into(),
            ..Default::default()
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn from_std_lib(mut self, from_standard_library: bool) -> Self {
        self.from_standard_library = from_standard_library;
        self
    }

    /// Exact equality on every property; tags compare as sets of key/value pairs.
    pub fn field_equal(&self, other: &StructField) -> bool {
        self.name == other.name
            && self.type_package_path == other.type_package_path
            && self.type_package == other.type_package
            && self.basic_type == other.basic_type
            && self.from_standard_library == other.from_standard_library
            && self.type_name == other.type_name
            && self.tags == other.tags
    }
}

/// Build a keyed view over a slice. When two items share a key the later one wins.
pub fn keyed_by<'a, T, K, F>(items: &'a [T], key: F) -> BTreeMap<K, &'a T>
where
    K: Ord,
    F: Fn(&'a T) -> K,
{
    items.iter().map(|item| (key(item), item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(fields: Vec<StructField>) -> Struct {
        Struct::new("Person", Package::new("example.com/models", "models")).with_fields(fields)
    }

    #[test]
    fn import_line_prefers_alias() {
        let plain = Package::new("internal/database/models", "models");
        assert_eq!(plain.import_line(), "\"internal/database/models\"");

        let aliased = plain.with_alias("dbmodels");
        assert_eq!(aliased.import_line(), "dbmodels \"internal/database/models\"");
    }

    #[test]
    fn field_equal_ignores_tag_insertion_order() {
        let a = StructField::basic("Name", "string")
            .with_tag("json", "name")
            .with_tag("db", "name");
        let b = StructField::basic("Name", "string")
            .with_tag("db", "name")
            .with_tag("json", "name");
        assert!(a.field_equal(&b));
    }

    #[test]
    fn field_equal_detects_each_property() {
        let base = StructField::named("Born", "Time", "time", "time").from_std_lib(true);

        let mut other = base.clone();
        other.type_name = "Duration".to_string();
        assert!(!base.field_equal(&other));

        let mut other = base.clone();
        other.type_package_path = "example.com/time".to_string();
        assert!(!base.field_equal(&other));

        let other = base.clone().from_std_lib(false);
        assert!(!base.field_equal(&other));

        let other = base.clone().with_tag("json", "born");
        assert!(!base.field_equal(&other));
    }

    #[test]
    fn keyed_view_last_duplicate_wins() {
        let s = person(vec![
            StructField::basic("Age", "int"),
            StructField::basic("Age", "int64"),
        ]);
        let view = s.fields_by_name();
        assert_eq!(view.len(), 1);
        assert_eq!(view["Age"].type_name, "int64");
    }

    #[test]
    fn struct_equal_is_positional() {
        let a = person(vec![
            StructField::basic("Name", "string"),
            StructField::basic("Age", "int"),
        ]);
        let b = person(vec![
            StructField::basic("Age", "int"),
            StructField::basic("Name", "string"),
        ]);
        assert!(a.struct_equal(&a.clone()));
        assert!(!a.struct_equal(&b));
        assert!(!a.struct_equal(&person(vec![StructField::basic("Name", "string")])));
    }

    #[test]
    fn qualified_name_uses_package_name_not_alias() {
        let s = Struct::new(
            "ThingOne",
            Package::new("internal/services/models", "models").with_alias("servicemodels"),
        );
        assert_eq!(s.qualified_name(), "models.ThingOne");
    }
}
