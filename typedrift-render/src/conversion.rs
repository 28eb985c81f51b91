use serde::Serialize;
use tracing::debug;
use typedrift_types::Struct;

/// Generated source plus the field pairs that could not be copied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversion {
    pub function_name: String,
    pub file_name: String,
    pub source: String,
    pub dropped: Vec<DroppedField>,
}

/// A same-named field pair left out of the generated function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedField {
    pub name: String,
    pub a_type: String,
    pub b_type: String,
}

/// Source text of a function copying every compatible same-named field of `a` into a fresh `b`.
///
/// Fields whose types differ are silently omitted unless the pair is `float32`/`float64`, which
/// is copied through a cast to the destination type. Never fails; zero overlapping fields
/// produce a function returning the zero value.
pub fn generate_conversion(a: &Struct, b: &Struct) -> String {
    generate_conversion_report(a, b).source
}

/// Like [`generate_conversion`], additionally listing the dropped field pairs.
pub fn generate_conversion_report(a: &Struct, b: &Struct) -> Conversion {
    let function_name = format!("Convert{}To{}", a.name, b.name);
    let target = b.qualified_name();

    let mut out = String::new();
    out.push_str("import (\n");
    for pkg in [&a.package, &b.package] {
        out.push_str(&format!("\t{}\n", pkg.import_line()));
    }
    out.push_str(")\n\n");

    out.push_str(&format!(
        "func {}(input {}) {} {{\n",
        function_name,
        a.qualified_name(),
        target
    ));
    out.push_str(&format!("\tout := {}{{}}\n", target));

    let mut dropped = Vec::new();
    for fa in &a.fields {
        for fb in b.fields.iter().filter(|fb| fb.name == fa.name) {
            if fa.type_name == fb.type_name {
                out.push_str(&format!("\tout.{} = input.{}\n", fb.name, fa.name));
            } else if is_float_pair(&fa.type_name, &fb.type_name) {
                out.push_str(&format!(
                    "\tout.{} = {}(input.{})\n",
                    fb.name, fb.type_name, fa.name
                ));
            } else {
                debug!(field = %fa.name, a_type = %fa.type_name, b_type = %fb.type_name, "field not convertible");
                dropped.push(DroppedField {
                    name: fa.name.clone(),
                    a_type: fa.type_name.clone(),
                    b_type: fb.type_name.clone(),
                });
            }
        }
    }

    out.push_str("\treturn out\n");
    out.push_str("}\n");

    Conversion {
        function_name,
        file_name: conversion_file_name(a, b),
        source: out,
        dropped,
    }
}

/// File name used when writing a conversion to disk, e.g. `convert_User_to_User.go`.
///
/// Type names keep their case: `URL` and `Url` are distinct types and get distinct files.
pub fn conversion_file_name(a: &Struct, b: &Struct) -> String {
    format!("convert_{}_to_{}.go", a.name, b.name)
}

fn is_float_pair(a: &str, b: &str) -> bool {
    matches!((a, b), ("float32", "float64") | ("float64", "float32"))
}
