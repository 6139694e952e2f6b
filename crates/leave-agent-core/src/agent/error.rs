//! Agent error types

use thiserror::Error;

use crate::mcp::McpError;
use crate::providers::ProviderError;

/// Errors raised by the agent.
///
/// `Discovery` and `SystemPrompt` only occur at startup and are fatal; the
/// others abort the current user input and the loop carries on.
#[derive(Error, Debug)]
pub enum AgentError {
    /// Tools and resources could not be listed
    #[error("Tool discovery failed: {0}")]
    Discovery(#[source] McpError),

    /// The system prompt resource could not be read
    #[error("Cannot read system prompt {uri}: {source}")]
    SystemPrompt {
        uri: String,
        #[source]
        source: McpError,
    },

    /// The model provider failed
    #[error("Model request failed: {0}")]
    ModelProvider(#[from] ProviderError),

    /// The model sent tool arguments that are not a JSON object
    #[error("Invalid arguments for tool {tool}: {source}")]
    ArgumentDecode {
        tool: String,
        #[source]
        source: serde_json::Error,
    },

    /// Operator terminal I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AgentError {
    /// Whether the error ends the session rather than a single turn
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AgentError::Discovery(_) | AgentError::SystemPrompt { .. } | AgentError::Io(_)
        )
    }
}

pub type AgentResult<T> = Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatality() {
        let refused = McpError::Connect {
            url: "http://127.0.0.1:9000/mcp/".into(),
            message: "refused".into(),
        };
        assert!(AgentError::Discovery(refused).is_fatal());
        assert!(!AgentError::ModelProvider(ProviderError::Other("down".into())).is_fatal());

        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = AgentError::ArgumentDecode {
            tool: "get_employee_leave_balance".into(),
            source: decode,
        };
        assert!(!err.is_fatal());
        assert!(err.to_string().contains("get_employee_leave_balance"));
    }
}
