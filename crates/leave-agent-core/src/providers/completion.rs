//! Single-shot completions over a streaming provider
//!
//! The agent never shows partial output, so the stream is folded into one
//! [`CompletionResult`] before the loop sees it.

use std::sync::Arc;

use futures::StreamExt;

use crate::logging::Logger;
use crate::types::{ModelToolSpec, ToolCall, Turn};
use crate::{log_debug, log_warn};

use super::error::ProviderResult;
use super::traits::{ModelSettings, Provider, RequestOptions, StreamChunk};

/// What the model produced for one request
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionResult {
    /// The model answered in text
    PlainReply { text: String },
    /// The model asked for a tool; only the first requested call is kept,
    /// along with any text sent next to it
    ToolCallRequest { call: ToolCall, text: String },
}

impl CompletionResult {
    pub fn as_tool_call(&self) -> Option<&ToolCall> {
        match self {
            CompletionResult::ToolCallRequest { call, .. } => Some(call),
            CompletionResult::PlainReply { .. } => None,
        }
    }
}

/// Requests completions from a provider for a fixed model
pub struct CompletionClient {
    provider: Arc<dyn Provider>,
    model: ModelSettings,
    logger: Arc<dyn Logger>,
}

impl CompletionClient {
    pub fn new(
        provider: Arc<dyn Provider>,
        model: ModelSettings,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            provider,
            model,
            logger,
        }
    }

    pub fn model(&self) -> &str {
        &self.model.model
    }

    /// Send the transcript, offering `tools` with automatic tool choice when given.
    ///
    /// A tool call is reported even when no tools were offered; the caller
    /// decides what to do with it.
    pub async fn complete(
        &self,
        turns: &[Turn],
        tools: Option<&[ModelToolSpec]>,
    ) -> ProviderResult<CompletionResult> {
        let options = match tools {
            Some(tools) => RequestOptions::offering(tools),
            None => RequestOptions::without_tools(),
        };

        let mut stream = self
            .provider
            .stream_chat(turns.to_vec(), self.model.clone(), options)
            .await?;

        let mut text = String::new();
        let mut tool_calls = Vec::new();
        while let Some(chunk) = stream.next().await {
            match chunk? {
                StreamChunk::Text { text: delta } => text.push_str(&delta),
                StreamChunk::ToolCall { tool_call } => tool_calls.push(tool_call),
            }
        }

        log_debug!(self.logger, "[CompletionClient] Response text: {:?}", text);
        for call in &tool_calls {
            log_debug!(
                self.logger,
                "[CompletionClient] Response tool call {} ({}): {}",
                call.name,
                call.id,
                call.arguments
            );
        }

        let mut calls = tool_calls.into_iter();
        match calls.next() {
            Some(first) => {
                for extra in calls {
                    log_warn!(
                        self.logger,
                        "[CompletionClient] Dropping extra tool call {} ({})",
                        extra.name,
                        extra.id
                    );
                }
                Ok(CompletionResult::ToolCallRequest { call: first, text })
            }
            None => Ok(CompletionResult::PlainReply { text }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogLevel, MemoryLogger, NoOpLogger};
    use crate::providers::{MockProvider, MockResponse};

    fn client(provider: Arc<MockProvider>) -> CompletionClient {
        CompletionClient::new(provider, ModelSettings::new("mock-model"), NoOpLogger::shared())
    }

    fn tools() -> Vec<ModelToolSpec> {
        vec![ModelToolSpec::function(
            "get_employee_leave_balance",
            "Gets the leave balance",
            serde_json::json!({"type": "object", "properties": {}, "required": []}),
        )]
    }

    #[tokio::test]
    async fn test_plain_reply_is_joined() {
        let provider = Arc::new(
            MockProvider::scripted(
                vec![MockResponse::text("Alice has 15 days left.")],
                NoOpLogger::shared(),
            )
            .with_chunk_size(4),
        );
        let result = client(Arc::clone(&provider))
            .complete(&[Turn::user("hi")], Some(&tools()))
            .await
            .unwrap();

        assert_eq!(
            result,
            CompletionResult::PlainReply {
                text: "Alice has 15 days left.".to_string()
            }
        );
        let request = &provider.requests()[0];
        assert_eq!(request.tools.as_ref().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_only_first_tool_call_is_kept() {
        let provider = Arc::new(MockProvider::scripted(
            vec![MockResponse::ToolCalls(vec![
                ToolCall::new("c1", "get_employee_leave_balance", r#"{"employee_id":"1001"}"#),
                ToolCall::new("c2", "get_employee_leaves_taken", r#"{"employee_id":"1001"}"#),
            ])],
            NoOpLogger::shared(),
        ));
        let logger = MemoryLogger::shared();
        let client = CompletionClient::new(provider, ModelSettings::new("mock-model"), logger.clone());
        let result = client
            .complete(&[Turn::user("hi")], Some(&tools()))
            .await
            .unwrap();

        let call = result.as_tool_call().unwrap();
        assert_eq!(call.id.as_str(), "c1");
        assert_eq!(call.name, "get_employee_leave_balance");

        let warnings = logger.messages(LogLevel::Warn);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("c2"));
    }

    #[tokio::test]
    async fn test_no_tools_offered() {
        let provider = Arc::new(MockProvider::scripted(
            vec![MockResponse::text("Done.")],
            NoOpLogger::shared(),
        ));
        let result = client(Arc::clone(&provider))
            .complete(&[Turn::user("hi")], None)
            .await
            .unwrap();

        assert_eq!(
            result,
            CompletionResult::PlainReply {
                text: "Done.".to_string()
            }
        );
        assert!(provider.requests()[0].tools.is_none());
    }

    #[tokio::test]
    async fn test_tool_call_without_tools_is_reported() {
        let provider = Arc::new(MockProvider::scripted(
            vec![MockResponse::tool_call("c1", "get_employee_leave_balance", "{}")],
            NoOpLogger::shared(),
        ));
        let result = client(provider)
            .complete(&[Turn::user("hi")], None)
            .await
            .unwrap();

        assert_eq!(result.as_tool_call().map(|call| call.id.as_str()), Some("c1"));
    }

    #[tokio::test]
    async fn test_text_next_to_tool_call_is_kept() {
        let provider = Arc::new(MockProvider::scripted(
            vec![MockResponse::TextWithToolCalls {
                text: "Let me check.".to_string(),
                calls: vec![ToolCall::new("c1", "get_employee_leave_balance", "{}")],
            }],
            NoOpLogger::shared(),
        ));
        let result = client(provider)
            .complete(&[Turn::user("hi")], Some(&tools()))
            .await
            .unwrap();

        match result {
            CompletionResult::ToolCallRequest { call, text } => {
                assert_eq!(call.id.as_str(), "c1");
                assert_eq!(text, "Let me check.");
            }
            other => panic!("expected a tool call, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_response_is_traced_at_debug() {
        let provider = Arc::new(MockProvider::scripted(
            vec![MockResponse::tool_call(
                "c7",
                "get_employee_leaves_taken",
                r#"{"employee_id":"1003"}"#,
            )],
            NoOpLogger::shared(),
        ));
        let logger = MemoryLogger::shared();
        let client = CompletionClient::new(provider, ModelSettings::new("mock-model"), logger.clone());
        client
            .complete(&[Turn::user("hi")], Some(&tools()))
            .await
            .unwrap();

        let traced = logger.messages(LogLevel::Debug);
        assert!(traced
            .iter()
            .any(|m| m.contains("get_employee_leaves_taken") && m.contains("1003")));
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let provider = Arc::new(MockProvider::scripted(
            vec![MockResponse::Error("unavailable".into())],
            NoOpLogger::shared(),
        ));
        assert!(client(provider)
            .complete(&[Turn::user("hi")], None)
            .await
            .is_err());
    }
}
