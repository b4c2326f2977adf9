//! Domain models for templates, agents, workflows, and validation results.

pub mod agent;
pub mod template;
pub mod validation;
pub mod workflow;

pub use agent::{
    Agent, AgentType, HitlConfig, InterventionPoint, InterventionType, LlmConfig, SearchDepth,
    TavilyConfig, VALID_MODELS,
};
pub use template::Template;
pub use validation::{
    StepValidationResult, ValidationError, ValidationErrorKind, ValidationResult, WizardStep,
};
pub use workflow::{
    CompletionStrategy, EdgeConditionType, GraphEdge, GraphStructure, WorkflowConfig, WorkflowMode,
};
