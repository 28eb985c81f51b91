use thiserror::Error;

/// Extraction failures. The comparison engine surfaces these verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no packages found at {path}")]
    NoPackages { path: String },

    #[error("io error reading {path}: {message}")]
    Io { path: String, message: String },

    #[error("manifest parse error in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid manifest {path}: {message}")]
    InvalidManifest { path: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::ExtractError;

    #[test]
    fn display_includes_path() {
        let err = ExtractError::NoPackages {
            path: "models/a".to_string(),
        };
        assert_eq!(err.to_string(), "no packages found at models/a");

        let err = ExtractError::Parse {
            path: "models/a/types.json".to_string(),
            message: "expected value".to_string(),
        };
        assert!(err.to_string().contains("models/a/types.json"));
        assert!(err.to_string().contains("expected value"));
    }
}
