//! Whole-template validation entry points.
//!
//! `validate_template` runs every validator unconditionally and folds the
//! outcome into one `ValidationResult`; it is the gate behind both "save"
//! and "execute". The function is pure: it owns a fresh accumulator per
//! call, never mutates the template, and never fails — malformed input
//! degrades to more errors, not to a panic or an `Err`.

use crate::domain::error::{DomainResult, TemplateError};
use crate::domain::models::{Template, ValidationErrorKind, ValidationResult, WorkflowMode};
use crate::services::agent_validator::validate_agents;
use crate::services::cross_validator::validate_cross_fields;
use crate::services::dependency_checker::{
    check_conditional_reachability, check_dependency_cycles,
};
use crate::services::mode_validator::validate_mode;
use crate::services::rules::{check_length, require_text};

/// Maximum number of agents a template may hold.
pub const MAX_AGENTS: usize = 5;

/// Validate the template name and description.
pub(crate) fn validate_basic_info(template: &Template, out: &mut ValidationResult) {
    if require_text(out, "name", &template.name, "template name") {
        check_length(out, "name", &template.name, "template name", 1, 200);
    }
    if require_text(out, "description", &template.description, "template description") {
        check_length(
            out,
            "description",
            &template.description,
            "template description",
            1,
            1000,
        );
    }
}

/// Validate the roster size and contents, including dependency analysis.
pub(crate) fn validate_roster(template: &Template, out: &mut ValidationResult) {
    if template.agents.is_empty() {
        out.push_error(
            "agents",
            ValidationErrorKind::Required,
            "at least one agent is required",
        );
        return;
    }
    if template.agents.len() > MAX_AGENTS {
        out.push_error(
            "agents",
            ValidationErrorKind::Custom,
            format!(
                "a template may contain at most {MAX_AGENTS} agents, got {}",
                template.agents.len()
            ),
        );
    }

    validate_agents(&template.agents, out);
    check_dependency_cycles(&template.agents, out);
    if template.workflow.mode == WorkflowMode::Conditional {
        check_conditional_reachability(&template.agents, out);
    }
}

/// Run the full rule set against a template.
pub fn validate_template(template: &Template) -> ValidationResult {
    let mut out = ValidationResult::new();

    validate_basic_info(template, &mut out);
    validate_roster(template, &mut out);
    validate_mode(&template.workflow, &template.agents, &mut out);
    validate_cross_fields(&template.workflow, &template.agents, &mut out);

    tracing::debug!(
        template = %template.name,
        errors = out.errors.len(),
        warnings = out.warnings.len(),
        "template validation finished"
    );

    out
}

/// Whether the template may be submitted to the execution service.
///
/// Callers must gate on the *latest* snapshot: results from before an edit
/// must not be trusted across that edit.
pub fn is_template_executable(template: &Template) -> bool {
    validate_template(template).is_valid()
}

/// Gate that turns a failed validation into a domain error, for call sites
/// that want `?` instead of inspecting a result.
pub fn ensure_executable(template: &Template) -> DomainResult<()> {
    let result = validate_template(template);
    if result.is_valid() {
        Ok(())
    } else {
        Err(TemplateError::NotExecutable(result.errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Agent, AgentType, WorkflowConfig};

    fn agent(name: &str) -> Agent {
        Agent::new(name, AgentType::Research).with_prompts(
            "You are a research agent gathering data.",
            "Research the topic at hand.",
        )
    }

    fn sequential_template(agents: Vec<Agent>) -> Template {
        let sequence: Vec<String> = agents.iter().filter_map(|a| a.id.clone()).collect();
        let mut template = Template::new("Market research", "Researches a market segment");
        template.agents = agents;
        template.workflow = WorkflowConfig {
            sequence: Some(sequence),
            ..WorkflowConfig::default()
        };
        template
    }

    #[test]
    fn test_zero_agents_exactly_one_required_error() {
        let template = Template::new("Market research", "Researches a market segment");
        let result = validate_template(&template);
        assert!(!result.is_valid());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, "agents");
        assert_eq!(result.errors[0].kind, ValidationErrorKind::Required);
    }

    #[test]
    fn test_valid_sequential_template_has_no_errors() {
        let template = sequential_template(vec![agent("a"), agent("b"), agent("c")]);
        let result = validate_template(&template);
        assert!(result.is_valid(), "unexpected errors: {:?}", result.errors);
    }

    #[test]
    fn test_too_many_agents() {
        let agents = (0..6).map(|i| agent(&format!("agent-{i}"))).collect();
        let template = sequential_template(agents);
        let result = validate_template(&template);
        assert!(result
            .errors
            .iter()
            .any(|e| e.field == "agents" && e.message.contains("at most")));
    }

    #[test]
    fn test_name_too_long() {
        let mut template = sequential_template(vec![agent("a")]);
        template.name = "x".repeat(201);
        let result = validate_template(&template);
        let err = result.errors.iter().find(|e| e.field == "name").unwrap();
        assert_eq!(err.kind, ValidationErrorKind::MaxLength);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let mut template = sequential_template(vec![agent("a"), agent("b")]);
        template.workflow.max_concurrent_agents = 9; // exceeds roster
        let first = validate_template(&template);
        let second = validate_template(&template);
        assert_eq!(first, second);
    }

    #[test]
    fn test_is_template_executable() {
        let template = sequential_template(vec![agent("a")]);
        assert!(is_template_executable(&template));

        let empty = Template::new("t", "d");
        assert!(!is_template_executable(&empty));
    }

    #[test]
    fn test_ensure_executable_carries_errors() {
        let empty = Template::new("t", "d");
        let err = ensure_executable(&empty).unwrap_err();
        match err {
            TemplateError::NotExecutable(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "agents");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_never_mutates_input() {
        let template = sequential_template(vec![agent("a")]);
        let before = template.clone();
        let _ = validate_template(&template);
        assert_eq!(template, before);
    }
}
