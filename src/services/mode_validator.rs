//! Mode-specific workflow validation.
//!
//! A state machine over `WorkflowConfig::mode`: the payload the selected
//! mode needs must be present and well-formed, while payloads left over
//! from other modes are tolerated as advisory warnings — the editor holds
//! transitional state and the execution engine ignores those fields anyway.
//!
//! Payload requirements only apply to a non-empty roster; the zero-agent
//! case is owned by the single `agents` required error in the template
//! validator.

use std::collections::HashMap;

use crate::domain::models::{
    Agent, ValidationErrorKind, ValidationResult, WorkflowConfig, WorkflowMode,
};
use crate::services::agent_validator::known_agent_ids;
use crate::services::graph_validator::validate_graph;

/// Validate the mode-specific payload and warn about stale cross-mode
/// fields.
pub fn validate_mode(workflow: &WorkflowConfig, agents: &[Agent], out: &mut ValidationResult) {
    match workflow.mode {
        WorkflowMode::Sequential => validate_sequential(workflow, agents, out),
        WorkflowMode::Parallel => validate_parallel(workflow, agents, out),
        WorkflowMode::Conditional => validate_conditional(workflow, agents, out),
        WorkflowMode::Graph => validate_graph_mode(workflow, agents, out),
    }
    warn_stale_payloads(workflow, out);
}

fn validate_sequential(workflow: &WorkflowConfig, agents: &[Agent], out: &mut ValidationResult) {
    if agents.is_empty() {
        return;
    }

    let Some(sequence) = workflow.sequence.as_ref().filter(|s| !s.is_empty()) else {
        out.push_error(
            "workflow.sequence",
            ValidationErrorKind::Required,
            "sequential mode requires a non-empty agent sequence",
        );
        return;
    };

    let ids = known_agent_ids(agents);
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (position, id) in sequence.iter().enumerate() {
        if !ids.contains(id.as_str()) {
            out.push_error(
                "workflow.sequence",
                ValidationErrorKind::Custom,
                format!("sequence references unknown agent '{id}'"),
            );
        }
        if let Some(first) = seen.get(id.as_str()) {
            out.push_error(
                "workflow.sequence",
                ValidationErrorKind::Custom,
                format!(
                    "agent '{id}' appears in the sequence more than once (positions {} and {})",
                    first + 1,
                    position + 1
                ),
            );
        } else {
            seen.insert(id.as_str(), position);
        }
    }
}

fn validate_parallel(workflow: &WorkflowConfig, agents: &[Agent], out: &mut ValidationResult) {
    if agents.is_empty() {
        return;
    }

    let Some(groups) = workflow.parallel_groups.as_ref().filter(|g| !g.is_empty()) else {
        out.push_error(
            "workflow.parallel_groups",
            ValidationErrorKind::Required,
            "parallel mode requires at least one parallel group",
        );
        return;
    };

    let ids = known_agent_ids(agents);
    let mut assigned: HashMap<&str, usize> = HashMap::new();
    for (group_index, group) in groups.iter().enumerate() {
        let field = format!("workflow.parallel_groups[{group_index}]");
        if group.is_empty() {
            out.push_error(
                field,
                ValidationErrorKind::Custom,
                format!("parallel group {} is empty", group_index + 1),
            );
            continue;
        }
        for id in group {
            if !ids.contains(id.as_str()) {
                out.push_error(
                    field.clone(),
                    ValidationErrorKind::Custom,
                    format!("parallel group references unknown agent '{id}'"),
                );
            }
            if let Some(first) = assigned.get(id.as_str()) {
                out.push_error(
                    "workflow.parallel_groups",
                    ValidationErrorKind::Custom,
                    format!(
                        "agent '{id}' is assigned to more than one parallel group \
                         (groups {} and {})",
                        first + 1,
                        group_index + 1
                    ),
                );
            } else {
                assigned.insert(id.as_str(), group_index);
            }
        }
    }
}

fn validate_conditional(workflow: &WorkflowConfig, agents: &[Agent], out: &mut ValidationResult) {
    if agents.is_empty() {
        return;
    }

    // Routing conditions are advisory: without them agents run in plain
    // dependency order.
    match workflow.conditions.as_ref() {
        None => {
            out.push_warning(
                "conditional mode has no routing conditions; agents will run in dependency order",
            );
        }
        Some(conditions) if conditions.is_empty() => {
            out.push_warning(
                "conditional mode has no routing conditions; agents will run in dependency order",
            );
        }
        Some(conditions) => {
            let ids = known_agent_ids(agents);
            for (expression, target) in conditions {
                if !ids.contains(target.as_str()) {
                    out.push_warning(format!(
                        "routing condition '{expression}' targets unknown agent '{target}'"
                    ));
                }
            }
        }
    }
}

fn validate_graph_mode(workflow: &WorkflowConfig, agents: &[Agent], out: &mut ValidationResult) {
    if agents.is_empty() {
        return;
    }

    match workflow
        .graph_structure
        .as_ref()
        .filter(|g| !g.nodes.is_empty())
    {
        Some(structure) => validate_graph(structure, agents, out),
        None => {
            out.push_error(
                "workflow.graph_structure",
                ValidationErrorKind::Required,
                "graph mode requires a graph structure with at least one node",
            );
        }
    }
}

/// Warn once per populated payload that belongs to a different mode.
fn warn_stale_payloads(workflow: &WorkflowConfig, out: &mut ValidationResult) {
    let mode = workflow.mode;
    if mode != WorkflowMode::Sequential && workflow.sequence.is_some() {
        out.push_warning(format!("{} mode ignores the sequence field", mode.as_str()));
    }
    if mode != WorkflowMode::Parallel && workflow.parallel_groups.is_some() {
        out.push_warning(format!(
            "{} mode ignores the parallel_groups field",
            mode.as_str()
        ));
    }
    if mode != WorkflowMode::Conditional && workflow.conditions.is_some() {
        out.push_warning(format!(
            "{} mode ignores the conditions field",
            mode.as_str()
        ));
    }
    if mode != WorkflowMode::Graph && workflow.graph_structure.is_some() {
        out.push_warning(format!(
            "{} mode ignores the graph_structure field",
            mode.as_str()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::AgentType;
    use std::collections::BTreeMap;

    fn agent(name: &str) -> Agent {
        Agent::new(name, AgentType::Research).with_prompts(
            "You are a research agent gathering data.",
            "Research the topic at hand.",
        )
    }

    fn id_of(a: &Agent) -> String {
        a.id.clone().unwrap()
    }

    #[test]
    fn test_sequential_empty_sequence_is_required_error() {
        let agents = vec![agent("a"), agent("b")];
        let workflow = WorkflowConfig {
            sequence: Some(Vec::new()),
            ..WorkflowConfig::default()
        };
        let mut out = ValidationResult::new();
        validate_mode(&workflow, &agents, &mut out);
        let err = out
            .errors
            .iter()
            .find(|e| e.field == "workflow.sequence")
            .unwrap();
        assert_eq!(err.kind, ValidationErrorKind::Required);
    }

    #[test]
    fn test_sequential_valid_sequence() {
        let agents = vec![agent("a"), agent("b")];
        let workflow = WorkflowConfig {
            sequence: Some(vec![id_of(&agents[0]), id_of(&agents[1])]),
            ..WorkflowConfig::default()
        };
        let mut out = ValidationResult::new();
        validate_mode(&workflow, &agents, &mut out);
        assert!(out.is_valid(), "unexpected errors: {:?}", out.errors);
    }

    #[test]
    fn test_sequential_unknown_and_repeated_ids() {
        let agents = vec![agent("a")];
        let id = id_of(&agents[0]);
        let workflow = WorkflowConfig {
            sequence: Some(vec![id.clone(), "ghost".to_string(), id]),
            ..WorkflowConfig::default()
        };
        let mut out = ValidationResult::new();
        validate_mode(&workflow, &agents, &mut out);
        assert!(out.errors.iter().any(|e| e.message.contains("ghost")));
        assert!(out
            .errors
            .iter()
            .any(|e| e.message.contains("more than once")));
    }

    #[test]
    fn test_parallel_missing_groups_is_required_error() {
        let agents = vec![agent("a")];
        let workflow = WorkflowConfig {
            mode: WorkflowMode::Parallel,
            ..WorkflowConfig::default()
        };
        let mut out = ValidationResult::new();
        validate_mode(&workflow, &agents, &mut out);
        assert!(out.has_error_on("workflow.parallel_groups"));
    }

    #[test]
    fn test_parallel_agent_in_two_groups_is_custom_error() {
        let agents = vec![agent("a")];
        let id = id_of(&agents[0]);
        let workflow = WorkflowConfig {
            mode: WorkflowMode::Parallel,
            parallel_groups: Some(vec![vec![id.clone()], vec![id.clone()]]),
            ..WorkflowConfig::default()
        };
        let mut out = ValidationResult::new();
        validate_mode(&workflow, &agents, &mut out);
        let err = out
            .errors
            .iter()
            .find(|e| e.message.contains("more than one parallel group"))
            .unwrap();
        assert_eq!(err.kind, ValidationErrorKind::Custom);
        assert!(err.message.contains(&id));
    }

    #[test]
    fn test_parallel_empty_group_is_error() {
        let agents = vec![agent("a")];
        let workflow = WorkflowConfig {
            mode: WorkflowMode::Parallel,
            parallel_groups: Some(vec![vec![], vec![id_of(&agents[0])]]),
            ..WorkflowConfig::default()
        };
        let mut out = ValidationResult::new();
        validate_mode(&workflow, &agents, &mut out);
        assert!(out.errors.iter().any(|e| e.message.contains("empty")));
    }

    #[test]
    fn test_conditional_without_conditions_is_warning_only() {
        let agents = vec![agent("a")];
        let workflow = WorkflowConfig {
            mode: WorkflowMode::Conditional,
            ..WorkflowConfig::default()
        };
        let mut out = ValidationResult::new();
        validate_mode(&workflow, &agents, &mut out);
        assert!(out.is_valid());
        assert!(out
            .warnings
            .iter()
            .any(|w| w.contains("no routing conditions")));
    }

    #[test]
    fn test_conditional_unknown_target_is_warning() {
        let agents = vec![agent("a")];
        let mut conditions = BTreeMap::new();
        conditions.insert("score > 0.5".to_string(), "ghost".to_string());
        let workflow = WorkflowConfig {
            mode: WorkflowMode::Conditional,
            conditions: Some(conditions),
            ..WorkflowConfig::default()
        };
        let mut out = ValidationResult::new();
        validate_mode(&workflow, &agents, &mut out);
        assert!(out.is_valid());
        assert!(out.warnings.iter().any(|w| w.contains("ghost")));
    }

    #[test]
    fn test_graph_mode_without_structure_is_required_error() {
        let agents = vec![agent("a")];
        let workflow = WorkflowConfig {
            mode: WorkflowMode::Graph,
            ..WorkflowConfig::default()
        };
        let mut out = ValidationResult::new();
        validate_mode(&workflow, &agents, &mut out);
        let err = out
            .errors
            .iter()
            .find(|e| e.field == "workflow.graph_structure")
            .unwrap();
        assert_eq!(err.kind, ValidationErrorKind::Required);
    }

    #[test]
    fn test_stale_payload_is_warning_not_error() {
        let agents = vec![agent("a")];
        let workflow = WorkflowConfig {
            sequence: Some(vec![id_of(&agents[0])]),
            parallel_groups: Some(vec![vec![id_of(&agents[0])]]),
            ..WorkflowConfig::default()
        };
        let mut out = ValidationResult::new();
        validate_mode(&workflow, &agents, &mut out);
        assert!(out.is_valid(), "unexpected errors: {:?}", out.errors);
        assert!(out
            .warnings
            .iter()
            .any(|w| w.contains("ignores the parallel_groups field")));
    }

    #[test]
    fn test_empty_roster_skips_payload_requirements() {
        let workflow = WorkflowConfig {
            mode: WorkflowMode::Parallel,
            ..WorkflowConfig::default()
        };
        let mut out = ValidationResult::new();
        validate_mode(&workflow, &[], &mut out);
        assert!(out.is_valid());
    }
}
