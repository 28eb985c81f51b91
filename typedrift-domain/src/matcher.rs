use std::collections::BTreeMap;
use typedrift_types::Struct;

/// Two same-named types from different collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypePair<'a> {
    pub a: &'a Struct,
    pub b: &'a Struct,
}

/// One pair per type name present in both collections, in name order.
///
/// Names found on only one side are skipped without error.
pub fn find_matching_type_pairs<'a>(
    left: &'a BTreeMap<String, Struct>,
    right: &'a BTreeMap<String, Struct>,
) -> Vec<TypePair<'a>> {
    left.iter()
        .filter_map(|(name, a)| right.get(name).map(|b| TypePair { a, b }))
        .collect()
}
