use crate::error::{CompareError, CompareResult};
use glob::Pattern;

/// Include/exclude glob patterns over type names.
///
/// Excludes win over includes; an empty include list accepts everything.
#[derive(Debug, Clone, Default)]
pub struct TypeNameFilter {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl TypeNameFilter {
    /// Compiles both pattern lists. A malformed pattern such as `[` is invalid input.
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> CompareResult<Self> {
        Ok(Self {
            include: compile(&include)?,
            exclude: compile(&exclude)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    pub fn matches(&self, name: &str) -> bool {
        if self.exclude.iter().any(|p| p.matches(name)) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|p| p.matches(name))
    }
}

fn compile(patterns: &[String]) -> CompareResult<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p)
                .map_err(|e| CompareError::invalid(format!("type pattern {p:?}: {e}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(include: &[&str], exclude: &[&str]) -> TypeNameFilter {
        TypeNameFilter::new(
            include.iter().map(|s| s.to_string()).collect(),
            exclude.iter().map(|s| s.to_string()).collect(),
        )
        .unwrap()
    }

    #[test]
    fn star_and_question_patterns() {
        let f = filter(&["User*"], &[]);
        assert!(f.matches("User"));
        assert!(f.matches("UserProfile"));
        assert!(!f.matches("Order"));

        let f = filter(&["User?"], &[]);
        assert!(!f.matches("User"));
        assert!(f.matches("Users"));

        let f = filter(&["*Request"], &[]);
        assert!(f.matches("CreateUserRequest"));
        assert!(!f.matches("CreateUserResponse"));
    }

    #[test]
    fn character_classes_are_supported() {
        let f = filter(&["[AB]*"], &[]);
        assert!(f.matches("Account"));
        assert!(f.matches("Balance"));
        assert!(!f.matches("Cart"));
    }

    #[test]
    fn exclude_wins_over_include() {
        let f = filter(&["User*"], &["*Test"]);
        assert!(f.matches("UserProfile"));
        assert!(!f.matches("UserTest"));
        assert!(!f.matches("Order"));
    }

    #[test]
    fn empty_filter_accepts_everything() {
        let f = TypeNameFilter::default();
        assert!(f.is_empty());
        assert!(f.matches("Anything"));
    }

    #[test]
    fn malformed_pattern_is_invalid_input() {
        let err = TypeNameFilter::new(vec!["[".to_string()], Vec::new()).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("\"[\""));

        let err = TypeNameFilter::new(Vec::new(), vec!["Good*".into(), "[".into()]).unwrap_err();
        assert!(err.is_invalid_input());
    }
}
