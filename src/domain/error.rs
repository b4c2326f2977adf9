//! Domain errors for the templar validation engine.
//!
//! The validation engine itself is total — it reports problems inside
//! `ValidationResult` and never returns `Err`. These errors exist for the
//! gating and serialization surfaces wrapped around it.

use thiserror::Error;

use crate::domain::models::ValidationError;

/// Summarize blocking errors as `field: message; field: message`.
fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised by the template gating and serialization helpers.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template failed validation; carries the blocking errors.
    #[error("template is not executable: {}", format_errors(.0))]
    NotExecutable(Vec<ValidationError>),

    /// The template could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias for domain-level results.
pub type DomainResult<T> = Result<T, TemplateError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ValidationErrorKind;

    #[test]
    fn test_not_executable_display_names_fields() {
        let err = TemplateError::NotExecutable(vec![ValidationError {
            field: "agents".to_string(),
            message: "at least one agent is required".to_string(),
            kind: ValidationErrorKind::Required,
        }]);
        let text = err.to_string();
        assert!(text.contains("agents"));
        assert!(text.contains("at least one agent is required"));
    }
}
