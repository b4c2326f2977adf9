//! Explicit graph validation for graph-mode workflows.
//!
//! Checks the entry point, node-agent correspondence (allowing the virtual
//! scaffolding convention), edge endpoints and conditions, edge cycles, and
//! forward reachability from the entry point. The node universe here is the
//! graph's own — agent ids plus virtual nodes — which is why this cycle
//! detector is separate from the one over agent dependencies.

use std::collections::{HashMap, HashSet};

use crate::domain::models::{
    Agent, EdgeConditionType, GraphStructure, ValidationErrorKind, ValidationResult,
};
use crate::services::agent_validator::known_agent_ids;
use crate::services::rules::check_range;

const FIELD: &str = "workflow.graph_structure";

/// Validate an explicit workflow graph against the agent roster.
pub fn validate_graph(structure: &GraphStructure, agents: &[Agent], out: &mut ValidationResult) {
    let node_set: HashSet<&str> = structure.nodes.iter().map(String::as_str).collect();

    validate_entry_point(structure, &node_set, out);
    validate_nodes(structure, agents, out);
    validate_edges(structure, &node_set, out);
    check_edge_cycles(structure, &node_set, out);
    check_reachability(structure, &node_set, out);
}

fn validate_entry_point(
    structure: &GraphStructure,
    node_set: &HashSet<&str>,
    out: &mut ValidationResult,
) {
    match structure.entry_point.as_deref() {
        None => {
            out.push_error(
                format!("{FIELD}.entry_point"),
                ValidationErrorKind::Required,
                "graph workflow requires an entry point",
            );
        }
        Some(entry) if !node_set.contains(entry) => {
            out.push_error(
                format!("{FIELD}.entry_point"),
                ValidationErrorKind::Custom,
                format!("entry point '{entry}' is not a node in the graph"),
            );
        }
        Some(_) => {}
    }
}

fn validate_nodes(structure: &GraphStructure, agents: &[Agent], out: &mut ValidationResult) {
    let agent_ids = known_agent_ids(agents);
    let mut seen: HashSet<&str> = HashSet::new();
    for node in &structure.nodes {
        if !seen.insert(node.as_str()) {
            out.push_error(
                format!("{FIELD}.nodes"),
                ValidationErrorKind::Custom,
                format!("duplicate node '{node}'"),
            );
            continue;
        }
        if !agent_ids.contains(node.as_str()) && !GraphStructure::is_virtual_node(node) {
            out.push_error(
                format!("{FIELD}.nodes"),
                ValidationErrorKind::Custom,
                format!("node '{node}' does not correspond to any agent"),
            );
        }
    }
}

fn validate_edges(
    structure: &GraphStructure,
    node_set: &HashSet<&str>,
    out: &mut ValidationResult,
) {
    for (index, edge) in structure.edges.iter().enumerate() {
        let field = format!("{FIELD}.edges[{index}]");
        for endpoint in [&edge.from_node, &edge.to_node] {
            if !node_set.contains(endpoint.as_str()) {
                out.push_error(
                    field.clone(),
                    ValidationErrorKind::Custom,
                    format!("edge references unknown node '{endpoint}'"),
                );
            }
        }
        if edge.condition_type == EdgeConditionType::Custom
            && edge
                .condition
                .as_deref()
                .is_none_or(|c| c.trim().is_empty())
        {
            out.push_error(
                format!("{field}.condition"),
                ValidationErrorKind::Required,
                "a custom edge condition requires condition text",
            );
        }
        if let Some(weight) = edge.weight {
            check_range(out, &format!("{field}.weight"), "edge weight", weight, 0.0, 10.0);
        }
    }
}

/// Cycle detection over the edge relation, rooted from every unvisited node.
/// One error for the whole graph; cycles in an explicit execution graph risk
/// infinite loops.
fn check_edge_cycles(
    structure: &GraphStructure,
    node_set: &HashSet<&str>,
    out: &mut ValidationResult,
) {
    let mut graph: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in &structure.edges {
        let (from, to) = (edge.from_node.as_str(), edge.to_node.as_str());
        if node_set.contains(from) && node_set.contains(to) {
            graph.entry(from).or_default().push(to);
        }
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut visiting: HashSet<&str> = HashSet::new();
    let mut path: Vec<&str> = Vec::new();

    for node in &structure.nodes {
        if !visited.contains(node.as_str())
            && visit(node.as_str(), &graph, &mut visited, &mut visiting, &mut path)
        {
            let mut cycle: Vec<&str> = path.clone();
            if let Some(&first) = path.first() {
                cycle.push(first);
            }
            out.push_error(
                FIELD,
                ValidationErrorKind::Custom,
                format!("graph contains a cycle: {}", cycle.join(" -> ")),
            );
            return;
        }
    }
}

fn visit<'a>(
    node: &'a str,
    graph: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    visiting: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
) -> bool {
    visited.insert(node);
    visiting.insert(node);
    path.push(node);

    if let Some(neighbors) = graph.get(node) {
        for &neighbor in neighbors {
            if !visited.contains(neighbor) {
                if visit(neighbor, graph, visited, visiting, path) {
                    return true;
                }
            } else if visiting.contains(neighbor) {
                if let Some(cycle_start) = path.iter().position(|&n| n == neighbor) {
                    path.drain(0..cycle_start);
                }
                return true;
            }
        }
    }

    visiting.remove(node);
    path.pop();
    false
}

/// Forward reachability from the entry point. Unreached nodes are advisory:
/// some nodes may be conditionally dead by design.
fn check_reachability(
    structure: &GraphStructure,
    node_set: &HashSet<&str>,
    out: &mut ValidationResult,
) {
    let Some(entry) = structure
        .entry_point
        .as_deref()
        .filter(|e| node_set.contains(e))
    else {
        return;
    };

    let mut graph: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in &structure.edges {
        graph
            .entry(edge.from_node.as_str())
            .or_default()
            .push(edge.to_node.as_str());
    }

    let mut reached: HashSet<&str> = HashSet::new();
    let mut stack = vec![entry];
    while let Some(node) = stack.pop() {
        if !reached.insert(node) {
            continue;
        }
        if let Some(neighbors) = graph.get(node) {
            for &neighbor in neighbors {
                if !reached.contains(neighbor) {
                    stack.push(neighbor);
                }
            }
        }
    }

    for node in &structure.nodes {
        if !reached.contains(node.as_str()) {
            out.push_warning(format!(
                "node '{node}' is not reachable from the entry point"
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{AgentType, GraphEdge};

    fn agent(name: &str) -> Agent {
        Agent::new(name, AgentType::Research).with_prompts(
            "You are a research agent gathering data.",
            "Research the topic at hand.",
        )
    }

    fn id_of(a: &Agent) -> String {
        a.id.clone().unwrap()
    }

    fn linear_graph(agents: &[Agent]) -> GraphStructure {
        let ids: Vec<String> = agents.iter().map(id_of).collect();
        GraphStructure {
            nodes: ids.clone(),
            edges: ids
                .windows(2)
                .map(|pair| GraphEdge::new(pair[0].clone(), pair[1].clone()))
                .collect(),
            entry_point: ids.first().cloned(),
            exit_points: ids.last().cloned().into_iter().collect(),
        }
    }

    #[test]
    fn test_valid_linear_graph() {
        let agents = vec![agent("a"), agent("b"), agent("c")];
        let structure = linear_graph(&agents);
        let mut out = ValidationResult::new();
        validate_graph(&structure, &agents, &mut out);
        assert!(out.is_valid(), "unexpected errors: {:?}", out.errors);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_missing_entry_point_is_required_error() {
        let agents = vec![agent("a")];
        let mut structure = linear_graph(&agents);
        structure.entry_point = None;
        let mut out = ValidationResult::new();
        validate_graph(&structure, &agents, &mut out);
        let err = out
            .errors
            .iter()
            .find(|e| e.field.ends_with("entry_point"))
            .unwrap();
        assert_eq!(err.kind, ValidationErrorKind::Required);
    }

    #[test]
    fn test_entry_point_must_be_a_node() {
        let agents = vec![agent("a")];
        let mut structure = linear_graph(&agents);
        structure.entry_point = Some("elsewhere".to_string());
        let mut out = ValidationResult::new();
        validate_graph(&structure, &agents, &mut out);
        assert!(out
            .errors
            .iter()
            .any(|e| e.message.contains("'elsewhere'")));
    }

    #[test]
    fn test_orphan_node_is_error_but_virtual_nodes_pass() {
        let agents = vec![agent("a")];
        let id = id_of(&agents[0]);
        let structure = GraphStructure {
            nodes: vec![
                "start".to_string(),
                id.clone(),
                "parallel-fanout".to_string(),
                "orphan".to_string(),
            ],
            edges: vec![GraphEdge::new("start", id)],
            entry_point: Some("start".to_string()),
            exit_points: Vec::new(),
        };
        let mut out = ValidationResult::new();
        validate_graph(&structure, &agents, &mut out);
        let orphan_errors: Vec<_> = out
            .errors
            .iter()
            .filter(|e| e.message.contains("does not correspond"))
            .collect();
        assert_eq!(orphan_errors.len(), 1);
        assert!(orphan_errors[0].message.contains("'orphan'"));
    }

    #[test]
    fn test_edge_with_unknown_endpoint() {
        let agents = vec![agent("a")];
        let mut structure = linear_graph(&agents);
        structure
            .edges
            .push(GraphEdge::new(id_of(&agents[0]), "nowhere"));
        let mut out = ValidationResult::new();
        validate_graph(&structure, &agents, &mut out);
        assert!(out.errors.iter().any(|e| e.message.contains("'nowhere'")));
    }

    #[test]
    fn test_custom_condition_requires_text() {
        let agents = vec![agent("a"), agent("b")];
        let mut structure = linear_graph(&agents);
        structure.edges[0].condition_type = EdgeConditionType::Custom;
        structure.edges[0].condition = Some("   ".to_string());
        let mut out = ValidationResult::new();
        validate_graph(&structure, &agents, &mut out);
        let err = out
            .errors
            .iter()
            .find(|e| e.field.ends_with(".condition"))
            .unwrap();
        assert_eq!(err.kind, ValidationErrorKind::Required);
    }

    #[test]
    fn test_edge_weight_out_of_range() {
        let agents = vec![agent("a"), agent("b")];
        let mut structure = linear_graph(&agents);
        structure.edges[0].weight = Some(11.0);
        let mut out = ValidationResult::new();
        validate_graph(&structure, &agents, &mut out);
        let err = out
            .errors
            .iter()
            .find(|e| e.field.ends_with(".weight"))
            .unwrap();
        assert_eq!(err.kind, ValidationErrorKind::Range);
    }

    #[test]
    fn test_edge_cycle_is_single_custom_error() {
        let agents = vec![agent("x"), agent("y")];
        let (x, y) = (id_of(&agents[0]), id_of(&agents[1]));
        let structure = GraphStructure {
            nodes: vec![x.clone(), y.clone()],
            edges: vec![
                GraphEdge::new(x.clone(), y.clone()),
                GraphEdge::new(y, x.clone()),
            ],
            entry_point: Some(x),
            exit_points: Vec::new(),
        };
        let mut out = ValidationResult::new();
        validate_graph(&structure, &agents, &mut out);
        let cycle_errors: Vec<_> = out
            .errors
            .iter()
            .filter(|e| e.message.contains("cycle"))
            .collect();
        assert_eq!(cycle_errors.len(), 1);
        assert_eq!(cycle_errors[0].field, FIELD);
        assert_eq!(cycle_errors[0].kind, ValidationErrorKind::Custom);
    }

    #[test]
    fn test_unreachable_node_is_warning_naming_it() {
        let agents = vec![agent("x"), agent("y"), agent("z")];
        let (x, y, z) = (id_of(&agents[0]), id_of(&agents[1]), id_of(&agents[2]));
        let structure = GraphStructure {
            nodes: vec![x.clone(), y.clone(), z.clone()],
            edges: vec![GraphEdge::new(x.clone(), y)],
            entry_point: Some(x),
            exit_points: Vec::new(),
        };
        let mut out = ValidationResult::new();
        validate_graph(&structure, &agents, &mut out);
        assert!(out.is_valid(), "unexpected errors: {:?}", out.errors);
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains(&z));
    }

    #[test]
    fn test_duplicate_node_is_error() {
        let agents = vec![agent("a")];
        let id = id_of(&agents[0]);
        let structure = GraphStructure {
            nodes: vec![id.clone(), id.clone()],
            edges: Vec::new(),
            entry_point: Some(id),
            exit_points: Vec::new(),
        };
        let mut out = ValidationResult::new();
        validate_graph(&structure, &agents, &mut out);
        assert!(out.errors.iter().any(|e| e.message.contains("duplicate")));
    }
}
