//! Dependency graph checks over the agent `depends_on` relation.
//!
//! Two independent analyses: cycle detection (always run) and forward
//! reachability (conditional mode only). Self-edges are excluded from the
//! cycle graph — the agent validator reports self-dependency on its own so
//! it surfaces even for a single isolated agent.

use std::collections::{HashMap, HashSet};

use crate::domain::models::{Agent, ValidationErrorKind, ValidationResult};

/// Format a cycle path as `a -> b -> a`.
fn format_cycle_path(path: &[&str]) -> String {
    let mut parts: Vec<&str> = path.to_vec();
    if let Some(&first) = path.first() {
        parts.push(first);
    }
    parts.join(" -> ")
}

/// DFS with a visiting stack; returns true when a back-edge is found and
/// leaves `path` holding the cycle.
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
                if let Some(cycle_start) = path.iter().position(|&id| id == neighbor) {
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

/// Detect cycles in the `depends_on` relation.
///
/// Reports at most one `agents`-scoped error for the whole graph: the check
/// short-circuits the first time a back-edge is found, so two mutually
/// dependent agents produce exactly one cycle error regardless of roster
/// order.
pub fn check_dependency_cycles(agents: &[Agent], out: &mut ValidationResult) {
    let ids = super::agent_validator::known_agent_ids(agents);

    // Adjacency over resolvable, non-self dependency edges.
    let mut graph: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for agent in agents {
        let Some(id) = agent.id.as_deref() else {
            continue;
        };
        order.push(id);
        let deps = agent
            .dependencies()
            .iter()
            .map(String::as_str)
            .filter(|dep| *dep != id && ids.contains(dep))
            .collect();
        graph.insert(id, deps);
    }

    let mut visited = HashSet::new();
    let mut visiting = HashSet::new();
    let mut path = Vec::new();

    for id in order {
        if !visited.contains(id) && visit(id, &graph, &mut visited, &mut visiting, &mut path) {
            out.push_error(
                "agents",
                ValidationErrorKind::Custom,
                format!(
                    "circular dependency detected: {}",
                    format_cycle_path(&path)
                ),
            );
            return;
        }
    }
}

/// Reachability analysis for conditional-mode workflows.
///
/// Entry agents are those with no dependencies. Reachability propagates
/// forward: an agent becomes reachable once every one of its dependencies
/// is reachable. Unreached agents are warnings; a non-empty roster with no
/// entry agent at all is a hard error because the workflow cannot start.
pub fn check_conditional_reachability(agents: &[Agent], out: &mut ValidationResult) {
    if agents.is_empty() {
        return;
    }

    let mut reachable: Vec<bool> = agents
        .iter()
        .map(|a| a.dependencies().is_empty())
        .collect();

    if !reachable.contains(&true) {
        out.push_error(
            "agents",
            ValidationErrorKind::Custom,
            "conditional workflow cannot start: every agent has dependencies",
        );
        return;
    }

    // Map id -> roster index for dependency resolution. Dependencies that do
    // not resolve keep their dependents unreachable; the dangling reference
    // itself is reported by the agent validator.
    let index_of: HashMap<&str, usize> = agents
        .iter()
        .enumerate()
        .filter_map(|(i, a)| a.id.as_deref().map(|id| (id, i)))
        .collect();

    loop {
        let mut changed = false;
        for (i, agent) in agents.iter().enumerate() {
            if reachable[i] {
                continue;
            }
            let all_deps_reachable = agent.dependencies().iter().all(|dep| {
                index_of
                    .get(dep.as_str())
                    .is_some_and(|&j| reachable[j])
            });
            if all_deps_reachable {
                reachable[i] = true;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    for (i, agent) in agents.iter().enumerate() {
        if !reachable[i] {
            out.push_warning(format!(
                "agent '{}' is unreachable in conditional mode",
                agent.label(i)
            ));
        }
    }
}
