//! Leave Agent Core
//!
//! A conversational agent that answers questions about employee leave by
//! letting a language model call the tools of a leave management service.
//!
//! ## Orchestration
//!
//! The `agent` module ties the pieces together:
//! - Discover tools and resources from a `ToolBackend` (MCP or in-process)
//! - Normalise tool schemas into function-calling specs
//! - Keep a bounded transcript with the system prompt pinned at index 0
//! - Execute at most one tool call per input, then ask the model again
//!   without tools
//!
//! ```rust,ignore
//! use leave_agent_core::agent::{Agent, AgentOptions};
//! use leave_agent_core::providers::{create_provider, CompletionClient, ModelSettings};
//! use leave_agent_core::tools::McpToolBackend;
//!
//! let backend = Arc::new(McpToolBackend::new("http://127.0.0.1:9000/mcp/", logger.clone()));
//! let completion = CompletionClient::new(
//!     create_provider("mistral", logger.clone()),
//!     ModelSettings::new("mistral-large-latest"),
//!     logger.clone(),
//! );
//! let mut agent = Agent::start(backend, completion, AgentOptions::default(), logger).await?;
//! let outcome = agent.handle_input("What is the leave balance of 1001?").await?;
//! ```

pub mod agent;
pub mod config;
pub mod conversation;
pub mod leave;
pub mod logging;
pub mod mcp;
pub mod providers;
pub mod tools;
pub mod types;

// Re-export commonly used types
pub use types::{
    AssistantTurn, MessageRole, ModelToolSpec, ToolCall, ToolCallId, ToolDescriptor,
    ToolInvocationResult, ToolStatus, Turn,
};

pub use agent::{Agent, AgentError, AgentOptions, AgentResult, TurnOutcome};

pub use config::{AgentConfig, BackendKind, ConfigError, FileConfigProvider};

pub use conversation::Transcript;

pub use leave::{InMemoryLeaveRepository, LeaveRepository, LeaveService};

pub use logging::{ConsoleLogger, LogLevel, Logger, MemoryLogger, NoOpLogger, SharedLogger};

pub use providers::{CompletionClient, CompletionResult, ModelSettings, Provider, ProviderError};

pub use tools::{LocalToolBackend, McpToolBackend, ToolBackend, ToolRegistry};

pub use mcp::{McpClient, McpError, McpResult};
