//! Cross-field checks between workflow-level, agent-level, and HITL-level
//! settings.
//!
//! These rules are mode-independent (with two exceptions called out below):
//! concurrency and completion arithmetic against the roster size, and the
//! timeout ordering between agents, HITL configs, and the workflow. The
//! agent-vs-workflow timeout boundary is strict `<`; the sequential
//! sum-of-timeouts case is deliberately only a warning because the workflow
//! may still finish early.

use crate::domain::models::{
    Agent, CompletionStrategy, ValidationErrorKind, ValidationResult, WorkflowConfig, WorkflowMode,
};
use crate::services::rules::check_range;

/// Run all cross-field checks.
pub fn validate_cross_fields(
    workflow: &WorkflowConfig,
    agents: &[Agent],
    out: &mut ValidationResult,
) {
    check_range(
        out,
        "workflow.timeout_seconds",
        "workflow timeout",
        workflow.timeout_seconds,
        60,
        7200,
    );
    check_range(
        out,
        "workflow.max_concurrent_agents",
        "max concurrent agents",
        workflow.max_concurrent_agents,
        1,
        10,
    );
    if !agents.is_empty() && workflow.max_concurrent_agents as usize > agents.len() {
        out.push_error(
            "workflow.max_concurrent_agents",
            ValidationErrorKind::Custom,
            format!(
                "max concurrent agents ({}) exceeds the number of agents ({})",
                workflow.max_concurrent_agents,
                agents.len()
            ),
        );
    }

    validate_completion_strategy(workflow, agents, out);
    validate_failure_threshold(workflow, agents, out);
    validate_timeouts(workflow, agents, out);
    validate_hitl(workflow, agents, out);
}

fn validate_completion_strategy(
    workflow: &WorkflowConfig,
    agents: &[Agent],
    out: &mut ValidationResult,
) {
    match workflow.completion_strategy {
        CompletionStrategy::Threshold => match workflow.required_completions {
            None => {
                out.push_error(
                    "workflow.required_completions",
                    ValidationErrorKind::Required,
                    "required completions must be set when the completion strategy is 'threshold'",
                );
            }
            Some(n) => {
                if n < 1 {
                    out.push_error(
                        "workflow.required_completions",
                        ValidationErrorKind::Custom,
                        "required completions must be at least 1",
                    );
                } else if !agents.is_empty() && n as usize > agents.len() {
                    out.push_error(
                        "workflow.required_completions",
                        ValidationErrorKind::Custom,
                        format!(
                            "required completions ({n}) exceeds the number of agents ({})",
                            agents.len()
                        ),
                    );
                }
            }
        },
        CompletionStrategy::FirstSuccess => {
            if workflow.mode != WorkflowMode::Parallel {
                out.push_error(
                    "workflow.completion_strategy",
                    ValidationErrorKind::Custom,
                    format!(
                        "completion strategy 'first_success' is only valid in parallel mode, \
                         not {} mode",
                        workflow.mode.as_str()
                    ),
                );
            }
        }
        _ => {}
    }

    if workflow.completion_strategy != CompletionStrategy::Threshold
        && workflow.required_completions.is_some()
    {
        out.push_warning(
            "required_completions is ignored unless the completion strategy is 'threshold'",
        );
    }
}

fn validate_failure_threshold(
    workflow: &WorkflowConfig,
    agents: &[Agent],
    out: &mut ValidationResult,
) {
    if let Some(threshold) = workflow.failure_threshold {
        if threshold < 1 {
            out.push_error(
                "workflow.failure_threshold",
                ValidationErrorKind::Custom,
                "failure threshold must be at least 1",
            );
        } else if !agents.is_empty() && threshold as usize > agents.len() {
            out.push_error(
                "workflow.failure_threshold",
                ValidationErrorKind::Custom,
                format!(
                    "failure threshold ({threshold}) exceeds the number of agents ({})",
                    agents.len()
                ),
            );
        }
    }
}

fn validate_timeouts(workflow: &WorkflowConfig, agents: &[Agent], out: &mut ValidationResult) {
    for (index, agent) in agents.iter().enumerate() {
        if agent.timeout_seconds >= workflow.timeout_seconds {
            out.push_error(
                format!("agents[{index}].timeout_seconds"),
                ValidationErrorKind::Custom,
                format!(
                    "agent '{}' timeout ({}s) must be strictly less than the workflow \
                     timeout ({}s)",
                    agent.label(index),
                    agent.timeout_seconds,
                    workflow.timeout_seconds
                ),
            );
        }
    }

    // Sequenced agents run back to back, so their summed timeouts can blow
    // the workflow budget even though each one individually fits. The
    // workflow may still finish early, so this stays advisory.
    if workflow.mode == WorkflowMode::Sequential {
        if let Some(sequence) = &workflow.sequence {
            let total: u64 = sequence
                .iter()
                .filter_map(|id| {
                    agents
                        .iter()
                        .find(|a| a.id.as_deref() == Some(id.as_str()))
                        .map(|a| a.timeout_seconds)
                })
                .sum();
            if total > workflow.timeout_seconds {
                out.push_warning(format!(
                    "combined timeout of sequenced agents ({total}s) exceeds the workflow \
                     timeout ({}s)",
                    workflow.timeout_seconds
                ));
            }
        }
    }
}

fn validate_hitl(workflow: &WorkflowConfig, agents: &[Agent], out: &mut ValidationResult) {
    let mut any_hitl = false;

    for (index, agent) in agents.iter().enumerate() {
        let Some(hitl) = agent.hitl_config.as_ref().filter(|h| h.enabled) else {
            continue;
        };
        any_hitl = true;

        if hitl.timeout_seconds >= workflow.timeout_seconds {
            out.push_error(
                format!("agents[{index}].hitl_config.timeout_seconds"),
                ValidationErrorKind::Custom,
                format!(
                    "agent '{}' HITL timeout ({}s) must be strictly less than the workflow \
                     timeout ({}s)",
                    agent.label(index),
                    hitl.timeout_seconds,
                    workflow.timeout_seconds
                ),
            );
        }

        if hitl.intervention_points.is_empty() {
            out.push_warning(format!(
                "agent '{}' has HITL enabled but no intervention points",
                agent.label(index)
            ));
        }

        if hitl
            .intervention_points
            .contains(&crate::domain::models::InterventionPoint::Conditional)
            && hitl.intervention_type != crate::domain::models::InterventionType::Decision
        {
            out.push_warning(format!(
                "agent '{}' pairs the 'conditional' intervention point with the '{}' \
                 intervention type; 'decision' is expected there",
                agent.label(index),
                hitl.intervention_type.as_str()
            ));
        }
    }

    if any_hitl && workflow.completion_strategy == CompletionStrategy::FirstSuccess {
        out.push_warning(
            "human-in-the-loop interventions may never be reached under the \
             'first_success' completion strategy",
        );
    }
}
