//! Template domain model.
//!
//! A template bundles an agent roster with a workflow configuration. It is
//! built incrementally in a multi-step editor, validated on every edit, and
//! persisted only once valid — so any field here may transiently hold an
//! out-of-bounds value and the model itself enforces nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::agent::Agent;
use super::workflow::WorkflowConfig;

/// A multi-agent workflow template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Stable identifier, assigned when the template is first materialized.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name, 1 to 200 characters.
    pub name: String,
    /// What the template is for, 1 to 1000 characters.
    pub description: String,
    /// Agent roster, 1 to 5 entries, in editor order.
    #[serde(default)]
    pub agents: Vec<Agent>,
    /// Orchestration settings.
    pub workflow: WorkflowConfig,
    /// When the template was first created.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// When the template was last edited.
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Template {
    /// Create an empty template with a fresh id and a default sequential
    /// workflow.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Some(Uuid::new_v4().to_string()),
            name: name.into(),
            description: description.into(),
            agents: Vec::new(),
            workflow: WorkflowConfig::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append an agent to the roster.
    pub fn with_agent(mut self, agent: Agent) -> Self {
        self.agents.push(agent);
        self
    }

    /// Replace the workflow configuration.
    pub fn with_workflow(mut self, workflow: WorkflowConfig) -> Self {
        self.workflow = workflow;
        self
    }

    /// Refresh `updated_at`; callers invoke this after mutating the
    /// template (the validation engine itself never does).
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Ids of agents that have one, in roster order.
    pub fn agent_ids(&self) -> impl Iterator<Item = &str> {
        self.agents.iter().filter_map(|a| a.id.as_deref())
    }

    /// Look up an agent by id.
    pub fn agent_by_id(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id.as_deref() == Some(id))
    }
}
