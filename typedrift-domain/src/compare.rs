use crate::error::{CompareError, CompareResult};
use crate::reconcile::reconcile_fields;
use tracing::debug;
use typedrift_extract::{NameFilter, TypeExtractor};
use typedrift_types::{ComparisonMode, Discrepancy, PackageDescription, Struct, keyed_by};

/// Outcome of a comparison. `discrepancies` is only populated in left-inclusive mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comparison {
    pub matched: bool,
    pub discrepancies: Vec<Discrepancy>,
}

/// Compares packages obtained from a [`TypeExtractor`].
pub struct Comparator<'a> {
    extractor: &'a dyn TypeExtractor,
    filter: Option<NameFilter<'a>>,
}

impl<'a> Comparator<'a> {
    pub fn new(extractor: &'a dyn TypeExtractor) -> Self {
        Self {
            extractor,
            filter: None,
        }
    }

    /// Restrict extraction to type names accepted by `filter`.
    pub fn with_filter(mut self, filter: NameFilter<'a>) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn compare(
        &self,
        mode: ComparisonMode,
        packages: &[PackageDescription],
    ) -> CompareResult<Comparison> {
        if packages.len() < 2 {
            return Err(CompareError::invalid("must provide at least 2 packages"));
        }
        if mode == ComparisonMode::LeftInclusive && packages.len() != 2 {
            return Err(CompareError::invalid(
                "left inclusive mode only supports 2 packages",
            ));
        }

        let sorted = packages
            .iter()
            .map(|pd| self.sorted_types(pd))
            .collect::<CompareResult<Vec<_>>>()?;

        match mode {
            ComparisonMode::Identical => {
                if packages.len() > 2 {
                    debug!(
                        ignored = packages.len() - 2,
                        "identical mode compares the second package against the first only"
                    );
                }
                Ok(Comparison {
                    matched: identical(&sorted[1], &sorted[0]),
                    discrepancies: vec![],
                })
            }
            ComparisonMode::LeftInclusive => {
                let discrepancies =
                    left_inclusive(&sorted[0], &sorted[1], &packages[0].name, &packages[1].name);
                Ok(Comparison {
                    matched: discrepancies.is_empty(),
                    discrepancies,
                })
            }
        }
    }

    fn sorted_types(&self, pd: &PackageDescription) -> CompareResult<Vec<Struct>> {
        let types = self
            .extractor
            .extract_types(&pd.path, &pd.name, self.filter)?;
        debug!(package = %pd.name, path = %pd.path, types = types.len(), "extracted package");
        // BTreeMap iteration is already ascending by type name.
        Ok(types.into_values().collect())
    }
}

/// Shorthand for `Comparator::new(extractor).compare(mode, packages)`.
pub fn compare_package_types(
    extractor: &dyn TypeExtractor,
    mode: ComparisonMode,
    packages: &[PackageDescription],
) -> CompareResult<Comparison> {
    Comparator::new(extractor).compare(mode, packages)
}

fn identical(x: &[Struct], y: &[Struct]) -> bool {
    x.len() == y.len() && x.iter().zip(y).all(|(a, b)| a.struct_equal(b))
}

fn left_inclusive(
    left: &[Struct],
    right: &[Struct],
    left_name: &str,
    right_name: &str,
) -> Vec<Discrepancy> {
    let pkg_a = keyed_by(left, |s| s.name.as_str());
    let pkg_b = keyed_by(right, |s| s.name.as_str());

    let mut out = Vec::new();
    for (type_name, struct_a) in &pkg_a {
        let discrepancy = match pkg_b.get(type_name) {
            None => Some(Discrepancy::type_missing(*type_name)),
            Some(struct_b) => reconcile_fields(struct_a, struct_b),
        };
        if let Some(d) = discrepancy {
            out.push(d.with_packages(left_name, right_name));
        }
    }
    out
}
