//! The per-input orchestration loop
//!
//! One user input runs to completion before the next is read:
//!
//! ```text
//! input ──► prune ──► append user ──► model (with tools)
//!                                        │
//!                     ┌──── reply ◄──────┤
//!                     │                  │ tool call
//!                     │                  ▼
//!                     │      append call ──► invoke tool ──► append result
//!                     │                                        │
//!                     │                  model (no tools) ◄────┘
//!                     │                        │
//!                     └──► append reply ◄──────┘
//! ```

use std::sync::Arc;

use serde_json::Value;

use super::error::{AgentError, AgentResult};
use crate::config::AgentConfig;
use crate::conversation::{Transcript, DEFAULT_HISTORY_LIMIT};
use crate::logging::Logger;
use crate::providers::{CompletionClient, CompletionResult};
use crate::tools::{ToolBackend, ToolRegistry, SYSTEM_PROMPT_URI};
use crate::types::{ToolCall, Turn};
use crate::{log_debug, log_info, log_warn};

/// Word that ends the session
pub const QUIT_COMMAND: &str = "quit";

/// Startup settings for an [`Agent`]
#[derive(Debug, Clone)]
pub struct AgentOptions {
    /// Resource holding the system prompt
    pub system_prompt_uri: String,
    /// Transcript length at which history is cleared
    pub history_limit: usize,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            system_prompt_uri: SYSTEM_PROMPT_URI.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl From<&AgentConfig> for AgentOptions {
    fn from(config: &AgentConfig) -> Self {
        Self {
            system_prompt_uri: config.system_prompt_uri.clone(),
            history_limit: config.history_limit,
        }
    }
}

/// What handling one input produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Text to show the operator
    Reply(String),
    /// The operator asked to stop
    Quit,
}

/// Leave management agent
///
/// Owns the transcript; the registry's tool specs are shared read-only with
/// every model request.
pub struct Agent {
    backend: Arc<dyn ToolBackend>,
    registry: ToolRegistry,
    completion: CompletionClient,
    transcript: Transcript,
    logger: Arc<dyn Logger>,
}

impl Agent {
    /// Discover tools, read the system prompt and start with a fresh transcript
    pub async fn start(
        backend: Arc<dyn ToolBackend>,
        completion: CompletionClient,
        options: AgentOptions,
        logger: Arc<dyn Logger>,
    ) -> AgentResult<Self> {
        let registry = ToolRegistry::discover(backend.as_ref(), Arc::clone(&logger))
            .await
            .map_err(AgentError::Discovery)?;

        let body = backend
            .read_resource(&options.system_prompt_uri)
            .await
            .map_err(|source| AgentError::SystemPrompt {
                uri: options.system_prompt_uri.clone(),
                source,
            })?;
        let system_prompt = system_prompt_content(&body, logger.as_ref());
        log_debug!(logger, "[Agent] System prompt: {}", system_prompt);

        log_info!(
            logger,
            "[Agent] Ready with {} tools, model {}",
            registry.tool_count(),
            completion.model()
        );

        Ok(Self {
            backend,
            registry,
            completion,
            transcript: Transcript::with_limit(system_prompt, options.history_limit),
            logger,
        })
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub(crate) fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }

    /// Handle one line of operator input.
    ///
    /// On error the turns appended so far stay in the transcript.
    pub async fn handle_input(&mut self, input: &str) -> AgentResult<TurnOutcome> {
        if input.trim().eq_ignore_ascii_case(QUIT_COMMAND) {
            return Ok(TurnOutcome::Quit);
        }

        if self.transcript.prune_if_needed() {
            log_info!(self.logger, "[Agent] Clearing message history");
        }
        self.transcript.append(Turn::user(input));
        log_debug!(self.logger, "[Agent] Prompt: {}", input);

        let first = self
            .completion
            .complete(self.transcript.turns(), Some(self.registry.model_specs()))
            .await?;

        let call = match first {
            CompletionResult::PlainReply { text } => return Ok(self.reply(text)),
            CompletionResult::ToolCallRequest { call, .. } => call,
        };

        self.transcript.append(Turn::assistant_tool_call(call.clone()));
        self.run_tool(&call).await?;

        let second = self.completion.complete(self.transcript.turns(), None).await?;
        let text = match second {
            CompletionResult::PlainReply { text } => text,
            CompletionResult::ToolCallRequest { call: extra, text } => {
                log_warn!(
                    self.logger,
                    "[Agent] Not executing tool call {} ({}) requested after a tool result",
                    extra.name,
                    extra.id
                );
                text
            }
        };
        Ok(self.reply(text))
    }

    /// Invoke the requested tool and record its result under the same id
    async fn run_tool(&mut self, call: &ToolCall) -> AgentResult<()> {
        let arguments = call
            .decode_arguments()
            .map_err(|source| AgentError::ArgumentDecode {
                tool: call.name.clone(),
                source,
            })?;

        log_debug!(
            self.logger,
            "[Agent] Calling tool {} ({}) with {}",
            call.name,
            call.id,
            Value::Object(arguments.clone())
        );

        let result = self.backend.call_tool(&call.name, arguments).await;
        let content = result.content_text();
        if result.is_error() {
            log_warn!(self.logger, "[Agent] Tool {} failed: {}", call.name, content);
        } else {
            log_debug!(self.logger, "[Agent] Tool {} returned: {}", call.name, content);
        }

        self.transcript
            .append(Turn::tool_result(&call.name, call.id.clone(), content));
        Ok(())
    }

    fn reply(&mut self, text: String) -> TurnOutcome {
        log_debug!(self.logger, "[Agent] Reply: {}", text);
        self.transcript.append(Turn::assistant(text.clone()));
        TurnOutcome::Reply(text)
    }
}

/// Extract the prompt text from the system-prompt resource body.
///
/// The server answers `{"status": ..., "content": "<prompt>"}`; anything
/// else is used verbatim.
pub fn system_prompt_content(body: &str, logger: &dyn Logger) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("content") {
            Some(Value::String(content)) => content.clone(),
            _ => {
                log_warn!(logger, "[Agent] System prompt resource has no content field");
                body.to_string()
            }
        },
        _ => {
            log_warn!(logger, "[Agent] System prompt resource is not JSON; using it verbatim");
            body.to_string()
        }
    }
}
