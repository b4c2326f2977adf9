//! Per-agent validation.
//!
//! Validates one agent record and its nested LLM / search-tool / HITL
//! sub-records, plus the roster-wide duplicate-name check. Dependency
//! *cycles* are out of scope here (see `dependency_checker`); this module
//! only checks that each `depends_on` entry resolves and is not the agent
//! itself — self-dependency is always reported from here, independent of
//! cycle detection, so it surfaces even on a single isolated agent.

use std::collections::{HashMap, HashSet};

use crate::domain::models::{Agent, TavilyConfig, ValidationErrorKind, ValidationResult, VALID_MODELS};
use crate::services::rules::{check_length, check_membership, check_range, require_text};

/// Ids of agents that have one, as a lookup set.
pub(crate) fn known_agent_ids(agents: &[Agent]) -> HashSet<&str> {
    agents.iter().filter_map(|a| a.id.as_deref()).collect()
}

/// Validate the whole roster: duplicate names once across all agents, then
/// each agent individually.
pub fn validate_agents(agents: &[Agent], out: &mut ValidationResult) {
    let mut seen_names: HashMap<String, usize> = HashMap::new();
    for (index, agent) in agents.iter().enumerate() {
        let name = agent.name.trim();
        if name.is_empty() {
            continue;
        }
        if let Some(first) = seen_names.get(name) {
            out.push_error(
                format!("agents[{index}].name"),
                ValidationErrorKind::Custom,
                format!(
                    "agent name '{name}' is already used by agent #{}",
                    first + 1
                ),
            );
        } else {
            seen_names.insert(name.to_string(), index);
        }
    }

    for (index, agent) in agents.iter().enumerate() {
        validate_agent(agent, index, agents, out);
    }
}

/// Validate a single agent record against the full roster.
pub fn validate_agent(
    agent: &Agent,
    index: usize,
    agents: &[Agent],
    out: &mut ValidationResult,
) {
    let prefix = format!("agents[{index}]");

    let field = format!("{prefix}.name");
    if require_text(out, &field, &agent.name, "agent name") {
        check_length(out, &field, &agent.name, "agent name", 1, 100);
    }

    let field = format!("{prefix}.system_prompt");
    if require_text(out, &field, &agent.system_prompt, "system prompt") {
        check_length(out, &field, &agent.system_prompt, "system prompt", 10, 2000);
    }

    let field = format!("{prefix}.user_prompt");
    if require_text(out, &field, &agent.user_prompt, "user prompt") {
        check_length(out, &field, &agent.user_prompt, "user prompt", 10, 1000);
    }

    let ids = known_agent_ids(agents);
    for dep in agent.dependencies() {
        if agent.id.as_deref() == Some(dep.as_str()) {
            out.push_error(
                format!("{prefix}.depends_on"),
                ValidationErrorKind::Custom,
                format!("agent '{}' cannot depend on itself", agent.label(index)),
            );
        } else if !ids.contains(dep.as_str()) {
            out.push_error(
                format!("{prefix}.depends_on"),
                ValidationErrorKind::Custom,
                format!("dependency '{dep}' does not reference an existing agent"),
            );
        }
    }

    check_range(
        out,
        &format!("{prefix}.timeout_seconds"),
        "agent timeout",
        agent.timeout_seconds,
        30,
        3600,
    );
    check_range(
        out,
        &format!("{prefix}.retry_count"),
        "retry count",
        agent.retry_count,
        0,
        3,
    );
    check_range(
        out,
        &format!("{prefix}.priority"),
        "priority",
        agent.priority,
        1,
        10,
    );

    check_membership(
        out,
        &format!("{prefix}.llm_config.model"),
        "model",
        &agent.llm_config.model,
        VALID_MODELS,
    );
    check_range(
        out,
        &format!("{prefix}.llm_config.temperature"),
        "temperature",
        agent.llm_config.temperature,
        0.0,
        2.0,
    );
    check_range(
        out,
        &format!("{prefix}.llm_config.max_tokens"),
        "max tokens",
        agent.llm_config.max_tokens,
        100,
        4000,
    );

    validate_tavily(
        &agent.tavily_config,
        &prefix,
        &agent.label(index),
        out,
    );

    if let Some(hitl) = &agent.hitl_config {
        if hitl.enabled {
            check_range(
                out,
                &format!("{prefix}.hitl_config.timeout_seconds"),
                "HITL timeout",
                hitl.timeout_seconds,
                30,
                3600,
            );
        }
    }
}

fn validate_tavily(
    config: &TavilyConfig,
    prefix: &str,
    label: &str,
    out: &mut ValidationResult,
) {
    check_range(
        out,
        &format!("{prefix}.tavily_config.search_max_results"),
        "search max results",
        config.search_max_results,
        1,
        20,
    );
    check_range(
        out,
        &format!("{prefix}.tavily_config.crawl_max_depth"),
        "crawl max depth",
        config.crawl_max_depth,
        1,
        3,
    );
    check_range(
        out,
        &format!("{prefix}.tavily_config.crawl_limit"),
        "crawl limit",
        config.crawl_limit,
        1,
        50,
    );
    check_range(
        out,
        &format!("{prefix}.tavily_config.map_max_depth"),
        "map max depth",
        config.map_max_depth,
        1,
        3,
    );

    if !config.any_api_enabled() {
        out.push_warning(format!(
            "agent '{label}' has no search API enabled and will rely on model knowledge only"
        ));
    }
    if config.beta_api_enabled() {
        out.push_warning(format!(
            "agent '{label}' enables beta search APIs (crawl/map); behavior may change"
        ));
    }
}
