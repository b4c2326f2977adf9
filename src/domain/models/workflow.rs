//! Workflow configuration domain models.
//!
//! A `WorkflowConfig` describes how a template's agents are orchestrated:
//! the execution mode, completion strategy, timeouts, and the mode-specific
//! payload (sequence, parallel groups, routing conditions, or an explicit
//! graph). All payload fields are optional so the editor can hold
//! transitional state from a previously selected mode; the validation engine
//! tolerates stale payloads as warnings, never errors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How agents in a template are orchestrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowMode {
    /// Agents run one after another in an explicit order.
    Sequential,
    /// Agents run concurrently in groups.
    Parallel,
    /// Agents run as their dependencies complete, guided by routing
    /// conditions.
    Conditional,
    /// Agents run along an explicit node/edge graph.
    Graph,
}

impl Default for WorkflowMode {
    fn default() -> Self {
        Self::Sequential
    }
}

impl WorkflowMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Parallel => "parallel",
            Self::Conditional => "conditional",
            Self::Graph => "graph",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sequential" => Some(Self::Sequential),
            "parallel" => Some(Self::Parallel),
            "conditional" => Some(Self::Conditional),
            "graph" => Some(Self::Graph),
            _ => None,
        }
    }
}

/// When the workflow as a whole counts as finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStrategy {
    /// Every agent must complete.
    All,
    /// More than half of the agents must complete.
    Majority,
    /// Any single agent completing finishes the workflow.
    Any,
    /// A configured number of agents (`required_completions`) must complete.
    Threshold,
    /// The first successful agent finishes the workflow; parallel mode only.
    FirstSuccess,
}

impl Default for CompletionStrategy {
    fn default() -> Self {
        Self::All
    }
}

impl CompletionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Majority => "majority",
            Self::Any => "any",
            Self::Threshold => "threshold",
            Self::FirstSuccess => "first_success",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(Self::All),
            "majority" => Some(Self::Majority),
            "any" => Some(Self::Any),
            "threshold" => Some(Self::Threshold),
            "first_success" => Some(Self::FirstSuccess),
            _ => None,
        }
    }
}

/// When an edge in an explicit graph is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeConditionType {
    /// The edge is always taken.
    Always,
    /// Taken when the source node succeeded.
    OnSuccess,
    /// Taken when the source node failed.
    OnFailure,
    /// Taken when the edge's `condition` expression evaluates true.
    Custom,
}

impl Default for EdgeConditionType {
    fn default() -> Self {
        Self::Always
    }
}

/// A directed edge in an explicit workflow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Source node id; must be a member of the graph's nodes.
    pub from_node: String,
    /// Target node id; must be a member of the graph's nodes.
    pub to_node: String,
    /// When the edge is taken.
    #[serde(default)]
    pub condition_type: EdgeConditionType,
    /// Expression text; required when `condition_type` is `custom`.
    #[serde(default)]
    pub condition: Option<String>,
    /// Optional routing weight, 0 to 10.
    #[serde(default)]
    pub weight: Option<f64>,
}

impl GraphEdge {
    /// Create an unconditional edge between two nodes.
    pub fn new(from_node: impl Into<String>, to_node: impl Into<String>) -> Self {
        Self {
            from_node: from_node.into(),
            to_node: to_node.into(),
            condition_type: EdgeConditionType::Always,
            condition: None,
            weight: None,
        }
    }
}

/// An explicit node/edge graph for graph-mode workflows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphStructure {
    /// Node ids: agent ids plus recognized virtual scaffolding nodes.
    pub nodes: Vec<String>,
    /// Directed edges between nodes.
    pub edges: Vec<GraphEdge>,
    /// Node execution starts from; must be a member of `nodes`.
    #[serde(default)]
    pub entry_point: Option<String>,
    /// Nodes at which execution may terminate.
    #[serde(default)]
    pub exit_points: Vec<String>,
}

impl GraphStructure {
    /// Whether a node id is virtual scaffolding rather than an agent.
    ///
    /// The execution engine recognizes `start` / `end` markers and synthetic
    /// fan-out/fan-in nodes prefixed `parallel-` / `merge-`.
    pub fn is_virtual_node(id: &str) -> bool {
        id == "start" || id == "end" || id.starts_with("parallel-") || id.starts_with("merge-")
    }
}

/// Orchestration settings for a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Execution mode selecting which payload below is authoritative.
    #[serde(default)]
    pub mode: WorkflowMode,
    /// Whole-workflow timeout, 60 to 7200 seconds.
    pub timeout_seconds: u64,
    /// Concurrency cap, 1 to 10 and at most the number of agents.
    pub max_concurrent_agents: u32,
    /// When the workflow counts as finished.
    #[serde(default)]
    pub completion_strategy: CompletionStrategy,
    /// Completions needed under the `threshold` strategy; 1 to the number of
    /// agents. Ignored under other strategies.
    #[serde(default)]
    pub required_completions: Option<u32>,
    /// Failures after which the workflow aborts; 1 to the number of agents.
    #[serde(default)]
    pub failure_threshold: Option<u32>,
    /// Whether remaining agents keep running after a failure.
    #[serde(default)]
    pub continue_on_failure: bool,
    /// Whether failed agents are re-queued up to their retry budget.
    #[serde(default)]
    pub retry_failed_agents: bool,
    /// Sequential-mode payload: ordered agent ids.
    #[serde(default)]
    pub sequence: Option<Vec<String>>,
    /// Parallel-mode payload: disjoint groups of agent ids.
    #[serde(default)]
    pub parallel_groups: Option<Vec<Vec<String>>>,
    /// Conditional-mode payload: routing expression to target agent id.
    #[serde(default)]
    pub conditions: Option<BTreeMap<String, String>>,
    /// Graph-mode payload.
    #[serde(default)]
    pub graph_structure: Option<GraphStructure>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            mode: WorkflowMode::Sequential,
            timeout_seconds: 3600,
            max_concurrent_agents: 1,
            completion_strategy: CompletionStrategy::All,
            required_completions: None,
            failure_threshold: None,
            continue_on_failure: false,
            retry_failed_agents: false,
            sequence: None,
            parallel_groups: None,
            conditions: None,
            graph_structure: None,
        }
    }
}
