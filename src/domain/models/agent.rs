//! Agent domain model.
//!
//! An agent is one worker slot inside a template: a role, a pair of prompts,
//! an LLM configuration, a search-tool configuration, and optional
//! human-in-the-loop settings. Agents reference each other by id through
//! `depends_on`, which the validation engine checks for resolution, cycles,
//! and reachability.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Model names the execution engine accepts for `LlmConfig::model`.
pub const VALID_MODELS: &[&str] = &[
    "gpt-4o",
    "gpt-4o-mini",
    "gpt-4.1",
    "gpt-4.1-mini",
    "o3-mini",
];

/// The role an agent plays in a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentType {
    /// Gathers raw material via the search APIs.
    Research,
    /// Interprets gathered material and draws conclusions.
    Analysis,
    /// Combines upstream outputs into a final artifact.
    Synthesis,
    /// Checks upstream outputs against acceptance criteria.
    Validation,
}

impl Default for AgentType {
    fn default() -> Self {
        Self::Research
    }
}

impl AgentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Research => "research",
            Self::Analysis => "analysis",
            Self::Synthesis => "synthesis",
            Self::Validation => "validation",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "research" => Some(Self::Research),
            "analysis" => Some(Self::Analysis),
            "synthesis" => Some(Self::Synthesis),
            "validation" => Some(Self::Validation),
            _ => None,
        }
    }
}

/// LLM invocation settings for a single agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model name; must be one of [`VALID_MODELS`].
    pub model: String,
    /// Sampling temperature, 0.0 to 2.0.
    pub temperature: f64,
    /// Completion token cap, 100 to 4000.
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

/// Depth setting shared by the search and extract APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchDepth {
    Basic,
    Advanced,
}

impl Default for SearchDepth {
    fn default() -> Self {
        Self::Basic
    }
}

/// Tavily search-tool settings for a single agent.
///
/// Crawl and map are beta APIs; enabling them is legal but the validation
/// engine surfaces an advisory warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TavilyConfig {
    /// Whether the search API is available to the agent.
    pub search_enabled: bool,
    /// Whether the extract API is available to the agent.
    pub extract_enabled: bool,
    /// Whether the crawl API (beta) is available to the agent.
    pub crawl_enabled: bool,
    /// Whether the map API (beta) is available to the agent.
    pub map_enabled: bool,
    /// Result cap per search call, 1 to 20.
    pub search_max_results: u32,
    /// Depth for search calls.
    pub search_depth: SearchDepth,
    /// Depth for extract calls.
    pub extract_depth: SearchDepth,
    /// Link-following depth for crawl calls, 1 to 3.
    pub crawl_max_depth: u32,
    /// Page cap per crawl call, 1 to 50.
    pub crawl_limit: u32,
    /// Link-following depth for map calls, 1 to 3.
    pub map_max_depth: u32,
}

impl Default for TavilyConfig {
    fn default() -> Self {
        Self {
            search_enabled: true,
            extract_enabled: false,
            crawl_enabled: false,
            map_enabled: false,
            search_max_results: 5,
            search_depth: SearchDepth::Basic,
            extract_depth: SearchDepth::Basic,
            crawl_max_depth: 1,
            crawl_limit: 10,
            map_max_depth: 1,
        }
    }
}

impl TavilyConfig {
    /// Whether any search API is enabled at all.
    pub fn any_api_enabled(&self) -> bool {
        self.search_enabled || self.extract_enabled || self.crawl_enabled || self.map_enabled
    }

    /// Whether any beta API (crawl or map) is enabled.
    pub fn beta_api_enabled(&self) -> bool {
        self.crawl_enabled || self.map_enabled
    }
}

/// Where in an agent's lifecycle a human may be pulled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionPoint {
    /// Before the agent's first LLM call.
    BeforeExecution,
    /// After the agent produced its output.
    AfterExecution,
    /// When the agent's execution fails.
    OnError,
    /// At runtime-evaluated routing points; pairs with the `decision` type.
    Conditional,
}

impl InterventionPoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BeforeExecution => "before_execution",
            Self::AfterExecution => "after_execution",
            Self::OnError => "on_error",
            Self::Conditional => "conditional",
        }
    }
}

/// What the human is asked to do at an intervention point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionType {
    /// Approve or reject the agent's output as-is.
    Approval,
    /// Free-form review with optional edits.
    Review,
    /// Provide additional input the agent is missing.
    Input,
    /// Pick one of several routing branches.
    Decision,
    /// Informational only; execution continues regardless.
    Notification,
}

impl Default for InterventionType {
    fn default() -> Self {
        Self::Approval
    }
}

impl InterventionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approval => "approval",
            Self::Review => "review",
            Self::Input => "input",
            Self::Decision => "decision",
            Self::Notification => "notification",
        }
    }
}

/// Human-in-the-loop settings for a single agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitlConfig {
    /// Master switch; when false the rest of the config is inert.
    pub enabled: bool,
    /// Lifecycle points at which the human is consulted.
    #[serde(default)]
    pub intervention_points: Vec<InterventionPoint>,
    /// What the human is asked to do.
    #[serde(default)]
    pub intervention_type: InterventionType,
    /// How long to wait for the human, 30 to 3600 seconds. Must be strictly
    /// below the owning workflow's timeout.
    pub timeout_seconds: u64,
    /// Whether to proceed as approved when the timeout elapses.
    #[serde(default)]
    pub auto_approve_after_timeout: bool,
    /// Form fields the human must fill before the intervention resolves.
    #[serde(default)]
    pub required_fields: Vec<String>,
    /// Optional prompt shown to the human instead of the generated one.
    #[serde(default)]
    pub custom_prompt: Option<String>,
}

impl Default for HitlConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            intervention_points: Vec::new(),
            intervention_type: InterventionType::Approval,
            timeout_seconds: 300,
            auto_approve_after_timeout: false,
            required_fields: Vec::new(),
            custom_prompt: None,
        }
    }
}

/// A single agent slot within a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Stable identifier other agents reference via `depends_on`.
    /// Absent only for rows the editor has not materialized yet.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name, 1 to 100 characters, unique within a template.
    pub name: String,
    /// The role this agent plays.
    #[serde(rename = "type")]
    pub agent_type: AgentType,
    /// System prompt, 10 to 2000 characters.
    pub system_prompt: String,
    /// User prompt, 10 to 1000 characters.
    pub user_prompt: String,
    /// Ids of agents whose output this agent consumes.
    #[serde(default)]
    pub depends_on: Option<Vec<String>>,
    /// Per-agent execution timeout, 30 to 3600 seconds. Must be strictly
    /// below the workflow timeout.
    pub timeout_seconds: u64,
    /// Retry budget on failure, 0 to 3.
    pub retry_count: u32,
    /// Scheduling priority, 1 to 10.
    pub priority: u8,
    /// LLM invocation settings.
    #[serde(default)]
    pub llm_config: LlmConfig,
    /// Search-tool settings.
    #[serde(default)]
    pub tavily_config: TavilyConfig,
    /// Optional human-in-the-loop settings.
    #[serde(default)]
    pub hitl_config: Option<HitlConfig>,
}

impl Agent {
    /// Create an agent with a fresh id and editor defaults.
    pub fn new(name: impl Into<String>, agent_type: AgentType) -> Self {
        Self {
            id: Some(Uuid::new_v4().to_string()),
            name: name.into(),
            agent_type,
            system_prompt: String::new(),
            user_prompt: String::new(),
            depends_on: None,
            timeout_seconds: 300,
            retry_count: 1,
            priority: 5,
            llm_config: LlmConfig::default(),
            tavily_config: TavilyConfig::default(),
            hitl_config: None,
        }
    }

    /// Set both prompts.
    pub fn with_prompts(
        mut self,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
    ) -> Self {
        self.system_prompt = system_prompt.into();
        self.user_prompt = user_prompt.into();
        self
    }

    /// Add a dependency on another agent's id.
    pub fn with_dependency(mut self, agent_id: impl Into<String>) -> Self {
        self.depends_on
            .get_or_insert_with(Vec::new)
            .push(agent_id.into());
        self
    }

    /// Attach a human-in-the-loop configuration.
    pub fn with_hitl(mut self, hitl: HitlConfig) -> Self {
        self.hitl_config = Some(hitl);
        self
    }

    /// Dependency ids, empty when none are declared.
    pub fn dependencies(&self) -> &[String] {
        self.depends_on.as_deref().unwrap_or_default()
    }

    /// Whether human-in-the-loop is switched on for this agent.
    pub fn hitl_enabled(&self) -> bool {
        self.hitl_config.as_ref().is_some_and(|h| h.enabled)
    }

    /// Label used in diagnostics: the name when present, else the id, else
    /// the positional slot.
    pub fn label(&self, index: usize) -> String {
        if !self.name.trim().is_empty() {
            self.name.clone()
        } else if let Some(id) = &self.id {
            id.clone()
        } else {
            format!("agent #{}", index + 1)
        }
    }
}
