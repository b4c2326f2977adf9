//! Templar - Template Validation Engine
//!
//! Templar validates multi-agent workflow templates before they are allowed
//! to persist or execute: agent records and their nested LLM / search-tool /
//! human-in-the-loop configuration, dependency cycles and reachability,
//! mode-specific workflow structure (sequential, parallel, conditional, or
//! an explicit graph), and the cross-field arithmetic between completion
//! strategies, timeouts, and the agent roster.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): Pure domain models and domain errors
//! - **Service Layer** (`services`): The validation engine itself
//!
//! The engine is a pure function of a template snapshot: it performs no
//! I/O, holds no shared state, and returns a fresh [`ValidationResult`] per
//! call, so it is safe to invoke on every keystroke of an editing UI and
//! from any number of threads at once. Execution, persistence, and
//! rendering belong to external collaborators.
//!
//! # Example
//!
//! ```
//! use templar::{Agent, AgentType, Template, WorkflowConfig};
//! use templar::{is_template_executable, validate_template};
//!
//! let researcher = Agent::new("researcher", AgentType::Research)
//!     .with_prompts(
//!         "You are a research agent gathering market data.",
//!         "Research the given market segment.",
//!     );
//! let sequence = vec![researcher.id.clone().unwrap()];
//!
//! let template = Template::new("Market research", "Researches a market segment")
//!     .with_agent(researcher)
//!     .with_workflow(WorkflowConfig {
//!         sequence: Some(sequence),
//!         ..WorkflowConfig::default()
//!     });
//!
//! let result = validate_template(&template);
//! assert!(result.is_valid());
//! assert!(is_template_executable(&template));
//! ```

pub mod domain;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::error::{DomainResult, TemplateError};
pub use domain::models::{
    Agent, AgentType, CompletionStrategy, EdgeConditionType, GraphEdge, GraphStructure,
    HitlConfig, InterventionPoint, InterventionType, LlmConfig, SearchDepth,
    StepValidationResult, TavilyConfig, Template, ValidationError, ValidationErrorKind,
    ValidationResult, WizardStep, WorkflowConfig, WorkflowMode, VALID_MODELS,
};
pub use services::{
    derive_fixes, ensure_executable, is_template_executable, validate_step, validate_template,
    AutoFix, FixAction, MAX_AGENTS,
};
