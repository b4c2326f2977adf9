//! Wizard-step validation and progress estimation.
//!
//! The template editor walks four steps (basic info, agents, workflow,
//! preview). For each step this module runs only the validators that step
//! owns and derives the progress signals the wizard renders: a completion
//! percentage over a fixed per-step checklist, advisory suggestions that
//! never affect validity, and a `can_proceed` flag gating the next-step
//! button.

use crate::domain::models::{
    Agent, CompletionStrategy, StepValidationResult, Template, ValidationResult, WizardStep,
    WorkflowMode, VALID_MODELS,
};
use crate::services::cross_validator::validate_cross_fields;
use crate::services::mode_validator::validate_mode;
use crate::services::template_validator::{
    validate_basic_info, validate_roster, validate_template,
};

/// Validate a single wizard step and compute its progress signals.
pub fn validate_step(template: &Template, step: WizardStep) -> StepValidationResult {
    let mut out = ValidationResult::new();
    let mut suggestions = Vec::new();

    let (completion_percentage, can_proceed) = match step {
        WizardStep::BasicInfo => {
            validate_basic_info(template, &mut out);
            suggest_basic_info(template, &mut suggestions);
            let can_proceed = out.is_valid() && !template.name.trim().is_empty();
            (basic_info_completion(template), can_proceed)
        }
        WizardStep::Agents => {
            validate_roster(template, &mut out);
            suggest_agents(template, &mut suggestions);
            let can_proceed = !template.agents.is_empty() && out.is_valid();
            (agents_completion(template), can_proceed)
        }
        WizardStep::Workflow => {
            validate_mode(&template.workflow, &template.agents, &mut out);
            validate_cross_fields(&template.workflow, &template.agents, &mut out);
            suggest_workflow(template, &mut suggestions);
            let can_proceed = out.is_valid();
            (workflow_completion(template), can_proceed)
        }
        WizardStep::Preview => {
            out = validate_template(template);
            if !out.warnings.is_empty() {
                suggestions.push(format!(
                    "review {} warning(s) before executing",
                    out.warnings.len()
                ));
            }
            let can_proceed = out.is_valid();
            (preview_completion(template), can_proceed)
        }
    };

    tracing::debug!(
        step = step.as_str(),
        errors = out.errors.len(),
        completion = completion_percentage,
        "step validation finished"
    );

    StepValidationResult {
        errors: out.errors,
        warnings: out.warnings,
        suggestions,
        completion_percentage,
        can_proceed,
    }
}

/// Percentage of `filled` checklist items out of `total`.
#[allow(clippy::cast_possible_truncation)]
fn percentage(filled: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (filled * 100 / total) as u8
}

fn basic_info_completion(template: &Template) -> u8 {
    let name = template.name.trim();
    let description = template.description.trim();
    let checks = [
        !name.is_empty(),
        name.chars().count() >= 8,
        !description.is_empty(),
        description.chars().count() >= 20,
    ];
    percentage(checks.iter().filter(|&&c| c).count(), checks.len())
}

fn agents_completion(template: &Template) -> u8 {
    if template.agents.is_empty() {
        return 0;
    }
    let mut filled = 0;
    let mut total = 0;
    for agent in &template.agents {
        let checks = [
            !agent.name.trim().is_empty(),
            agent.system_prompt.chars().count() >= 10,
            agent.user_prompt.chars().count() >= 10,
            VALID_MODELS.contains(&agent.llm_config.model.as_str()),
            agent.tavily_config.any_api_enabled(),
            (30..=3600).contains(&agent.timeout_seconds),
            agent.hitl_config.is_some(),
        ];
        filled += checks.iter().filter(|&&c| c).count();
        total += checks.len();
    }
    percentage(filled, total)
}

fn workflow_completion(template: &Template) -> u8 {
    let workflow = &template.workflow;
    let payload_present = match workflow.mode {
        WorkflowMode::Sequential => workflow
            .sequence
            .as_ref()
            .is_some_and(|s| !s.is_empty()),
        WorkflowMode::Parallel => workflow
            .parallel_groups
            .as_ref()
            .is_some_and(|g| !g.is_empty()),
        WorkflowMode::Conditional => workflow
            .conditions
            .as_ref()
            .is_some_and(|c| !c.is_empty()),
        WorkflowMode::Graph => workflow
            .graph_structure
            .as_ref()
            .is_some_and(|g| !g.nodes.is_empty()),
    };
    let strategy_complete = match workflow.completion_strategy {
        CompletionStrategy::Threshold => workflow.required_completions.is_some(),
        _ => true,
    };
    let checks = [
        (60..=7200).contains(&workflow.timeout_seconds),
        (1..=10).contains(&workflow.max_concurrent_agents)
            && (template.agents.is_empty()
                || workflow.max_concurrent_agents as usize <= template.agents.len()),
        strategy_complete,
        payload_present,
    ];
    percentage(checks.iter().filter(|&&c| c).count(), checks.len())
}

fn preview_completion(template: &Template) -> u8 {
    let parts = [
        basic_info_completion(template) as usize,
        agents_completion(template) as usize,
        workflow_completion(template) as usize,
    ];
    percentage(parts.iter().sum(), parts.len() * 100)
}

fn suggest_basic_info(template: &Template, suggestions: &mut Vec<String>) {
    let name = template.name.trim();
    if !name.is_empty() && name.chars().count() < 8 {
        suggestions.push("consider a more descriptive template name".to_string());
    }
    let description = template.description.trim();
    if !description.is_empty() && description.chars().count() < 20 {
        suggestions.push("add more detail to the template description".to_string());
    }
}

fn suggest_agents(template: &Template, suggestions: &mut Vec<String>) {
    if template.agents.len() > 1 && !template.agents.iter().any(Agent::hitl_enabled) {
        suggestions.push(
            "consider enabling human-in-the-loop review for multi-agent workflows".to_string(),
        );
    }
    for (index, agent) in template.agents.iter().enumerate() {
        let len = agent.system_prompt.trim().chars().count();
        if len >= 10 && len < 50 {
            suggestions.push(format!(
                "expand the system prompt for agent '{}' to give the model more guidance",
                agent.label(index)
            ));
        }
    }
}

fn suggest_workflow(template: &Template, suggestions: &mut Vec<String>) {
    let workflow = &template.workflow;
    if workflow.mode == WorkflowMode::Parallel && template.agents.len() == 1 {
        suggestions
            .push("parallel mode with a single agent behaves like sequential mode".to_string());
    }
    if workflow.mode == WorkflowMode::Sequential {
        if let Some(sequence) = &workflow.sequence {
            let missing = template
                .agents
                .iter()
                .filter_map(|a| a.id.as_deref())
                .filter(|id| !sequence.iter().any(|s| s == id))
                .count();
            if missing > 0 {
                suggestions.push(format!(
                    "{missing} agent(s) are not included in the sequence and will not run"
                ));
            }
        }
    }
}
