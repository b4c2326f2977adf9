//! Validation result domain models.
//!
//! These are the engine's only outputs. Errors block persistence and
//! execution; warnings are advisory and never block. Result types serialize
//! camelCase with an explicit `isValid` field because the consuming editor
//! is a JS client that renders them inline next to fields.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Fixed taxonomy of blocking-error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationErrorKind {
    /// A mandatory field is missing or empty.
    Required,
    /// A text field exceeds its maximum length.
    MaxLength,
    /// A text field is below its minimum length.
    MinLength,
    /// A numeric field is outside its allowed range.
    Range,
    /// A value is not a member of its fixed set.
    Enum,
    /// A cross-field or structural rule is violated.
    Custom,
}

impl ValidationErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MaxLength => "maxLength",
            Self::MinLength => "minLength",
            Self::Range => "range",
            Self::Enum => "enum",
            Self::Custom => "custom",
        }
    }
}

/// One blocking error, attributed to a dotted field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Dotted path into the template, e.g. `agents[0].timeout_seconds`.
    pub field: String,
    /// Human-readable description of the violation.
    pub message: String,
    /// Which taxonomy bucket the violation falls into.
    #[serde(rename = "type")]
    pub kind: ValidationErrorKind,
}

/// Accumulated outcome of a whole-template validation pass.
///
/// A fresh value is created per engine call and owned by that call; the
/// engine never shares or reuses accumulators, which is what makes
/// validation idempotent and safe to run concurrently on snapshots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    /// Blocking errors in the order the validators emitted them.
    pub errors: Vec<ValidationError>,
    /// Advisory notes in emission order.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// An empty (valid) result.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no blocking errors were recorded.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record a blocking error.
    pub fn push_error(
        &mut self,
        field: impl Into<String>,
        kind: ValidationErrorKind,
        message: impl Into<String>,
    ) {
        self.errors.push(ValidationError {
            field: field.into(),
            message: message.into(),
            kind,
        });
    }

    /// Record an advisory warning.
    pub fn push_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Fold another result into this one, preserving order.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Whether any recorded error is attributed to the given field path or
    /// a sub-path of it.
    pub fn has_error_on(&self, field: &str) -> bool {
        self.errors
            .iter()
            .any(|e| e.field == field || e.field.starts_with(field))
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 3)?;
        state.serialize_field("isValid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.serialize_field("warnings", &self.warnings)?;
        state.end()
    }
}

/// One step of the template editor wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WizardStep {
    /// Template name and description.
    BasicInfo,
    /// The agent roster.
    Agents,
    /// Orchestration settings.
    Workflow,
    /// Final review before save/execute.
    Preview,
}

impl WizardStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BasicInfo => "basic-info",
            Self::Agents => "agents",
            Self::Workflow => "workflow",
            Self::Preview => "preview",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "basic-info" => Some(Self::BasicInfo),
            "agents" => Some(Self::Agents),
            "workflow" => Some(Self::Workflow),
            "preview" => Some(Self::Preview),
            _ => None,
        }
    }
}

/// Outcome of validating a single wizard step.
///
/// On top of the step-scoped errors and warnings this carries the progress
/// signals the wizard renders: a completion percentage, free-text
/// suggestions that never affect validity, and whether the user may advance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepValidationResult {
    /// Blocking errors from the step-scoped validators.
    pub errors: Vec<ValidationError>,
    /// Advisory notes from the step-scoped validators.
    pub warnings: Vec<String>,
    /// Non-blocking improvement nudges.
    pub suggestions: Vec<String>,
    /// How filled-in the step is, 0 to 100.
    pub completion_percentage: u8,
    /// Whether the wizard may advance past this step.
    pub can_proceed: bool,
}

impl StepValidationResult {
    /// True when no blocking errors were recorded for the step.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Serialize for StepValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("StepValidationResult", 6)?;
        state.serialize_field("isValid", &self.is_valid())?;
        state.serialize_field("canProceed", &self.can_proceed)?;
        state.serialize_field("errors", &self.errors)?;
        state.serialize_field("warnings", &self.warnings)?;
        state.serialize_field("suggestions", &self.suggestions)?;
        state.serialize_field("completionPercentage", &self.completion_percentage)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_is_valid() {
        let result = ValidationResult::new();
        assert!(result.is_valid());
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_push_error_invalidates() {
        let mut result = ValidationResult::new();
        result.push_error("name", ValidationErrorKind::Required, "name is required");
        assert!(!result.is_valid());
        assert_eq!(result.errors[0].field, "name");
        assert_eq!(result.errors[0].kind, ValidationErrorKind::Required);
    }

    #[test]
    fn test_warnings_do_not_invalidate() {
        let mut result = ValidationResult::new();
        result.push_warning("something advisory");
        assert!(result.is_valid());
    }

    #[test]
    fn test_merge_preserves_order() {
        let mut a = ValidationResult::new();
        a.push_error("x", ValidationErrorKind::Range, "first");
        let mut b = ValidationResult::new();
        b.push_error("y", ValidationErrorKind::Custom, "second");
        a.merge(b);
        assert_eq!(a.errors[0].message, "first");
        assert_eq!(a.errors[1].message, "second");
    }

    #[test]
    fn test_has_error_on_matches_subpaths() {
        let mut result = ValidationResult::new();
        result.push_error(
            "agents[0].timeout_seconds",
            ValidationErrorKind::Range,
            "out of range",
        );
        assert!(result.has_error_on("agents[0].timeout_seconds"));
        assert!(result.has_error_on("agents[0]"));
        assert!(!result.has_error_on("workflow"));
    }

    #[test]
    fn test_result_serializes_is_valid() {
        let mut result = ValidationResult::new();
        result.push_error("name", ValidationErrorKind::MinLength, "too short");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["isValid"], false);
        assert_eq!(json["errors"][0]["type"], "minLength");
    }

    #[test]
    fn test_error_kind_wire_names() {
        assert_eq!(
            serde_json::to_value(ValidationErrorKind::MaxLength).unwrap(),
            "maxLength"
        );
        assert_eq!(
            serde_json::to_value(ValidationErrorKind::Required).unwrap(),
            "required"
        );
    }

    #[test]
    fn test_wizard_step_roundtrip() {
        for step in [
            WizardStep::BasicInfo,
            WizardStep::Agents,
            WizardStep::Workflow,
            WizardStep::Preview,
        ] {
            assert_eq!(WizardStep::from_str(step.as_str()), Some(step));
        }
        assert_eq!(
            serde_json::to_value(WizardStep::BasicInfo).unwrap(),
            "basic-info"
        );
    }

    #[test]
    fn test_step_result_serializes_camel_case() {
        let result = StepValidationResult {
            completion_percentage: 40,
            can_proceed: true,
            ..StepValidationResult::default()
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["isValid"], true);
        assert_eq!(json["canProceed"], true);
        assert_eq!(json["completionPercentage"], 40);
    }
}
