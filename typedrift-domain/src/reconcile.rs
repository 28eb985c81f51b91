use std::collections::BTreeMap;
use typedrift_types::discrepancy::existence::{EXISTS, MISSING};
use typedrift_types::{Discrepancy, FieldDifference, FieldProperty, Struct, StructField};

/// Field-level diff of two structs.
///
/// Fields are matched by name. Fields present on only one side produce an `existence`
/// difference; fields present on both sides but not field-equal produce one difference per
/// differing property. Returns `None` when nothing differs.
///
/// Output order is deterministic: fields of `a` by name, then fields only in `b` by name.
pub fn reconcile_fields(a: &Struct, b: &Struct) -> Option<Discrepancy> {
    let a_fields = a.fields_by_name();
    let b_fields = b.fields_by_name();

    let mut diffs = Vec::new();
    for (name, field_a) in &a_fields {
        match b_fields.get(name) {
            None => diffs.push(FieldDifference::new(
                *name,
                FieldProperty::Existence,
                EXISTS,
                MISSING,
            )),
            Some(field_b) if !field_a.field_equal(field_b) => {
                diffs.extend(compare_fields(field_a, field_b));
            }
            Some(_) => {}
        }
    }

    for name in b_fields.keys().filter(|n| !a_fields.contains_key(*n)) {
        diffs.push(FieldDifference::new(
            *name,
            FieldProperty::Existence,
            MISSING,
            EXISTS,
        ));
    }

    if diffs.is_empty() {
        None
    } else {
        Some(Discrepancy::field_mismatch(a.name.clone(), diffs))
    }
}

/// Per-property differences between two same-named fields.
///
/// Values are compared in their rendered text form, so only differences visible in that form
/// are reported. Tags are only compared when the two maps differ.
pub fn compare_fields(a: &StructField, b: &StructField) -> Vec<FieldDifference> {
    let mut diffs = Vec::new();
    let mut property = |prop: FieldProperty, a_val: String, b_val: String| {
        if a_val != b_val {
            diffs.push(FieldDifference::new(a.name.clone(), prop, a_val, b_val));
        }
    };

    property(FieldProperty::Type, a.type_name.clone(), b.type_name.clone());
    property(
        FieldProperty::TypePackage,
        a.type_package.clone(),
        b.type_package.clone(),
    );
    property(
        FieldProperty::TypePackagePath,
        a.type_package_path.clone(),
        b.type_package_path.clone(),
    );
    property(
        FieldProperty::BasicType,
        a.basic_type.to_string(),
        b.basic_type.to_string(),
    );
    property(
        FieldProperty::StdLib,
        a.from_standard_library.to_string(),
        b.from_standard_library.to_string(),
    );

    if a.tags != b.tags {
        property(FieldProperty::Tags, render_tags(&a.tags), render_tags(&b.tags));
    }

    diffs
}

/// Go `%v` map rendering: `map[db:id json:id]`, keys in sorted order, `map[]` when empty.
pub fn render_tags(tags: &BTreeMap<String, String>) -> String {
    let entries = tags
        .iter()
        .map(|(k, v)| format!("{k}:{v}"))
        .collect::<Vec<_>>()
        .join(" ");
    format!("map[{entries}]")
}
