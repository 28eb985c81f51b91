//! Error types for typedrift-domain.

use thiserror::Error;
use typedrift_extract::ExtractError;
use typedrift_types::{ComparisonMode, PackageDescription};

#[derive(Debug, Error)]
pub enum CompareError {
    /// Too few packages, wrong package count for the mode, unknown mode or malformed `NAME=PATH`.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Surfaced unchanged from the extractor.
    #[error(transparent)]
    Extraction(#[from] ExtractError),
}

impl CompareError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        CompareError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, CompareError::InvalidInput { .. })
    }
}

pub type CompareResult<T> = Result<T, CompareError>;

/// Parse a mode name, failing with `InvalidInput` for anything unrecognized.
pub fn parse_mode(s: &str) -> CompareResult<ComparisonMode> {
    ComparisonMode::parse(s).ok_or_else(|| CompareError::invalid(format!("unknown mode: {s}")))
}

/// Parse `NAME=PATH` into a [`PackageDescription`]. Both sides must be non-empty.
pub fn parse_package_description(s: &str) -> CompareResult<PackageDescription> {
    let (name, path) = s
        .split_once('=')
        .map(|(n, p)| (n.trim(), p.trim()))
        .filter(|(n, p)| !n.is_empty() && !p.is_empty())
        .ok_or_else(|| CompareError::invalid(format!("expected NAME=PATH, got '{s}'")))?;
    Ok(PackageDescription::new(name, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_mode_rejects_unknown() {
        assert_eq!(parse_mode("identical").unwrap(), ComparisonMode::Identical);
        let err = parse_mode("sideways").unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(err.to_string(), "invalid input: unknown mode: sideways");
    }

    #[test]
    fn extraction_error_is_transparent() {
        let err = CompareError::from(ExtractError::NoPackages {
            path: "models".to_string(),
        });
        assert!(!err.is_invalid_input());
        assert_eq!(err.to_string(), "no packages found at models");
    }

    #[test]
    fn package_description_from_name_and_path() {
        let pd = parse_package_description("dbmodels=./internal/database/models").unwrap();
        assert_eq!(pd.name, "dbmodels");
        assert_eq!(pd.path, "./internal/database/models");

        // Paths may themselves contain '='.
        let pd = parse_package_description("a=dir/x=y").unwrap();
        assert_eq!(pd.path, "dir/x=y");
    }

    #[test]
    fn package_description_rejects_malformed() {
        for bad in ["models", "=./models", "models=", " = "] {
            let err = parse_package_description(bad).unwrap_err();
            assert!(err.is_invalid_input(), "{bad}");
        }
    }
}
