//! Aggregated validation outcome for a whole form

use super::Verdict;

/// Per-field verdicts collected by a full-form validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    fields: Vec<(String, Verdict)>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the verdict for a field
    pub fn record(&mut self, field_name: impl Into<String>, verdict: Verdict) {
        self.fields.push((field_name.into(), verdict));
    }

    /// Conjunction of every recorded field
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(|(_, v)| v.is_valid())
    }

    /// Names of the fields that did not pass, in form order
    pub fn invalid_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(_, v)| !v.is_valid())
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_result_is_valid() {
        assert!(ValidationResult::new().is_valid());
    }

    #[test]
    fn test_any_failure_invalidates() {
        let mut result = ValidationResult::new();
        result.record("username", Verdict::Fail);
        result.record("password", Verdict::Pass);
        assert!(!result.is_valid());
        assert_eq!(result.invalid_fields(), vec!["username"]);
    }

    #[test]
    fn test_unresolved_counts_as_invalid() {
        let mut result = ValidationResult::new();
        result.record("password2", Verdict::Unresolved);
        assert!(!result.is_valid());
        assert_eq!(result.invalid_fields(), vec!["password2"]);
    }
}
