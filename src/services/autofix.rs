//! Auto-fix derivation for validation failures.
//!
//! Fixes are a parallel, optional output: `derive_fixes` is a pure function
//! of a template plus a prior `ValidationResult`, invoked by the caller
//! whenever it wants suggestions, and each fix is applied only on explicit
//! user action via `AutoFix::apply`. The validation engine itself never
//! corrects input.

use serde::{Deserialize, Serialize};

use crate::domain::models::{
    CompletionStrategy, Template, ValidationResult, WorkflowMode,
};

/// A concrete, machine-applicable correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FixAction {
    /// Lower `max_concurrent_agents` to the roster size.
    ClampMaxConcurrentAgents { value: u32 },
    /// Set `required_completions` to a value the roster can satisfy.
    SetRequiredCompletions { value: u32 },
    /// Remove an agent's dependency on itself.
    RemoveSelfDependency { agent_index: usize },
    /// Drop dependency entries that reference no existing agent.
    DropUnknownDependencies { agent_index: usize },
    /// Fill the sequential-mode sequence with the roster in editor order.
    PopulateSequence { sequence: Vec<String> },
    /// Lower an agent's timeout below the workflow timeout.
    ClampAgentTimeout { agent_index: usize, value: u64 },
}

/// One suggested fix, tied to the field whose error it addresses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoFix {
    /// The field path the fix targets.
    pub field: String,
    /// Human-readable description shown next to the "apply" control.
    pub description: String,
    /// The correction to perform when the user accepts.
    pub action: FixAction,
}

impl AutoFix {
    /// Apply this fix to a template. Callers pass a clone when they want to
    /// preview the outcome before committing.
    #[allow(clippy::cast_possible_truncation)]
    pub fn apply(&self, template: &mut Template) {
        match &self.action {
            FixAction::ClampMaxConcurrentAgents { value } => {
                template.workflow.max_concurrent_agents = *value;
            }
            FixAction::SetRequiredCompletions { value } => {
                template.workflow.required_completions = Some(*value);
            }
            FixAction::RemoveSelfDependency { agent_index } => {
                if let Some(agent) = template.agents.get_mut(*agent_index) {
                    let own_id = agent.id.clone();
                    if let Some(deps) = agent.depends_on.as_mut() {
                        deps.retain(|dep| own_id.as_deref() != Some(dep.as_str()));
                    }
                }
            }
            FixAction::DropUnknownDependencies { agent_index } => {
                let known: Vec<String> = template
                    .agents
                    .iter()
                    .filter_map(|a| a.id.clone())
                    .collect();
                if let Some(agent) = template.agents.get_mut(*agent_index) {
                    if let Some(deps) = agent.depends_on.as_mut() {
                        deps.retain(|dep| known.contains(dep));
                    }
                }
            }
            FixAction::PopulateSequence { sequence } => {
                template.workflow.sequence = Some(sequence.clone());
            }
            FixAction::ClampAgentTimeout { agent_index, value } => {
                if let Some(agent) = template.agents.get_mut(*agent_index) {
                    agent.timeout_seconds = *value;
                }
            }
        }
        template.touch();
    }
}

/// Derive applicable fixes for the problems a validation pass reported.
///
/// Only conditions with a matching reported error produce a fix, so callers
/// can hand the result straight to the UI next to the error list.
#[allow(clippy::cast_possible_truncation)]
pub fn derive_fixes(template: &Template, result: &ValidationResult) -> Vec<AutoFix> {
    let mut fixes = Vec::new();
    if result.is_valid() {
        return fixes;
    }

    let roster_len = template.agents.len();
    let workflow = &template.workflow;

    if result.has_error_on("workflow.max_concurrent_agents")
        && roster_len > 0
        && workflow.max_concurrent_agents as usize > roster_len
    {
        fixes.push(AutoFix {
            field: "workflow.max_concurrent_agents".to_string(),
            description: format!("lower max concurrent agents to {roster_len}"),
            action: FixAction::ClampMaxConcurrentAgents {
                value: roster_len as u32,
            },
        });
    }

    if result.has_error_on("workflow.required_completions")
        && workflow.completion_strategy == CompletionStrategy::Threshold
        && roster_len > 0
    {
        fixes.push(AutoFix {
            field: "workflow.required_completions".to_string(),
            description: format!("set required completions to {roster_len}"),
            action: FixAction::SetRequiredCompletions {
                value: roster_len as u32,
            },
        });
    }

    if result.has_error_on("workflow.sequence")
        && workflow.mode == WorkflowMode::Sequential
        && workflow
            .sequence
            .as_ref()
            .is_none_or(|s| s.is_empty())
        && roster_len > 0
    {
        let sequence: Vec<String> = template.agent_ids().map(str::to_string).collect();
        if !sequence.is_empty() {
            fixes.push(AutoFix {
                field: "workflow.sequence".to_string(),
                description: "fill the sequence with all agents in roster order".to_string(),
                action: FixAction::PopulateSequence { sequence },
            });
        }
    }

    for (index, agent) in template.agents.iter().enumerate() {
        let dep_field = format!("agents[{index}].depends_on");
        if result.has_error_on(&dep_field) {
            let own_id = agent.id.as_deref();
            if agent.dependencies().iter().any(|d| own_id == Some(d.as_str())) {
                fixes.push(AutoFix {
                    field: dep_field.clone(),
                    description: format!(
                        "remove the self-dependency from agent '{}'",
                        agent.label(index)
                    ),
                    action: FixAction::RemoveSelfDependency { agent_index: index },
                });
            }
            let known = super::agent_validator::known_agent_ids(&template.agents);
            if agent
                .dependencies()
                .iter()
                .any(|d| own_id != Some(d.as_str()) && !known.contains(d.as_str()))
            {
                fixes.push(AutoFix {
                    field: dep_field,
                    description: format!(
                        "drop unknown dependencies from agent '{}'",
                        agent.label(index)
                    ),
                    action: FixAction::DropUnknownDependencies { agent_index: index },
                });
            }
        }

        let timeout_field = format!("agents[{index}].timeout_seconds");
        if result.has_error_on(&timeout_field)
            && agent.timeout_seconds >= workflow.timeout_seconds
        {
            let value = workflow.timeout_seconds.saturating_sub(60).max(30);
            fixes.push(AutoFix {
                field: timeout_field,
                description: format!(
                    "lower the timeout of agent '{}' to {value}s",
                    agent.label(index)
                ),
                action: FixAction::ClampAgentTimeout {
                    agent_index: index,
                    value,
                },
            });
        }
    }

    fixes
}
