use crate::model::Package;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural description of a field type.
///
/// Renders recursively into the normalized textual form stored on
/// [`StructField::type_name`](crate::model::StructField): `*T`, `[]T`, `map[K]V`.
/// Named types render unqualified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDescriptor {
    Primitive {
        name: String,
    },
    Named {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        package: Option<Package>,
    },
    Pointer {
        elem: Box<TypeDescriptor>,
    },
    Slice {
        elem: Box<TypeDescriptor>,
    },
    Map {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    pub fn primitive(name: impl Into<String>) -> Self {
        TypeDescriptor::Primitive { name: name.into() }
    }

    pub fn named(name: impl Into<String>, package: Option<Package>) -> Self {
        TypeDescriptor::Named {
            name: name.into(),
            package,
        }
    }

    pub fn pointer(elem: TypeDescriptor) -> Self {
        TypeDescriptor::Pointer {
            elem: Box::new(elem),
        }
    }

    pub fn slice(elem: TypeDescriptor) -> Self {
        TypeDescriptor::Slice {
            elem: Box::new(elem),
        }
    }

    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        TypeDescriptor::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeDescriptor::Primitive { .. })
    }

    /// Package of the first named type reached depth-first (map keys before values).
    ///
    /// Resolution stops at this one level; the package's own types are never inspected.
    pub fn declaring_package(&self) -> Option<&Package> {
        match self {
            TypeDescriptor::Primitive { .. } => None,
            TypeDescriptor::Named { package, .. } => package.as_ref(),
            TypeDescriptor::Pointer { elem } | TypeDescriptor::Slice { elem } => {
                elem.declaring_package()
            }
            TypeDescriptor::Map { key, value } => {
                key.declaring_package().or_else(|| value.declaring_package())
            }
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Primitive { name } | TypeDescriptor::Named { name, .. } => {
                f.write_str(name)
            }
            TypeDescriptor::Pointer { elem } => write!(f, "*{elem}"),
            TypeDescriptor::Slice { elem } => write!(f, "[]{elem}"),
            TypeDescriptor::Map { key, value } => write!(f, "map[{key}]{value}"),
        }
    }
}
