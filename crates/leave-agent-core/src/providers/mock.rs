//! Mock provider for testing
//!
//! Plays back a script of responses without network dependencies, recording
//! every request it receives so tests can inspect what the agent sent.

use async_trait::async_trait;
use futures::stream;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

use super::error::{ProviderError, ProviderResult};
use super::traits::{ChunkStream, ModelSettings, Provider, RequestOptions, StreamChunk};
use crate::log_debug;
use crate::logging::Logger;
use crate::types::{ModelToolSpec, ToolCall, Turn};

/// One scripted model response
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Reply with text
    Text(String),
    /// Request one or more tool calls
    ToolCalls(Vec<ToolCall>),
    /// Stream some text, then request tool calls
    TextWithToolCalls { text: String, calls: Vec<ToolCall> },
    /// Fail the request
    Error(String),
}

impl MockResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// A single tool call
    pub fn tool_call(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self::ToolCalls(vec![ToolCall::new(id, name, arguments)])
    }
}

/// A request as seen by the mock provider
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub turns: Vec<Turn>,
    pub tools: Option<Vec<ModelToolSpec>>,
}

/// Mock LLM provider for testing
///
/// Once the script is exhausted it echoes the last user message.
pub struct MockProvider {
    script: Mutex<VecDeque<MockResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
    chunk_size: usize,
    logger: Arc<dyn Logger>,
}

impl MockProvider {
    /// Create a provider playing back the given responses in order
    pub fn scripted(responses: Vec<MockResponse>, logger: Arc<dyn Logger>) -> Self {
        Self {
            script: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
            chunk_size: 10,
            logger,
        }
    }

    /// Create an echo provider (echoes back user message)
    pub fn echo(logger: Arc<dyn Logger>) -> Self {
        Self::scripted(Vec::new(), logger)
    }

    /// Set chunk size for splitting text responses
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    fn last_user_message(turns: &[Turn]) -> String {
        turns
            .iter()
            .rev()
            .find_map(|turn| match turn {
                Turn::User { content } if !content.is_empty() => Some(content.clone()),
                _ => None,
            })
            .unwrap_or_else(|| "Hello from MockProvider!".to_string())
    }

    fn split_into_chunks(&self, text: &str) -> Vec<String> {
        if self.chunk_size == 0 || text.is_empty() {
            return vec![text.to_string()];
        }

        text.chars()
            .collect::<Vec<_>>()
            .chunks(self.chunk_size)
            .map(|c| c.iter().collect())
            .collect()
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn stream_chat(
        &self,
        turns: Vec<Turn>,
        _model: ModelSettings,
        options: RequestOptions,
    ) -> ProviderResult<ChunkStream> {
        let response = self.script.lock().pop_front();
        let echo = Self::last_user_message(&turns);

        self.requests.lock().push(RecordedRequest {
            turns,
            tools: options.tools,
        });

        let chunks: Vec<ProviderResult<StreamChunk>> = match response {
            Some(MockResponse::Text(text)) => self
                .split_into_chunks(&text)
                .into_iter()
                .map(|text| Ok(StreamChunk::text(text)))
                .collect(),
            Some(MockResponse::ToolCalls(calls)) => calls
                .into_iter()
                .map(|call| Ok(StreamChunk::tool_call(call)))
                .collect(),
            Some(MockResponse::TextWithToolCalls { text, calls }) => self
                .split_into_chunks(&text)
                .into_iter()
                .map(StreamChunk::text)
                .chain(calls.into_iter().map(StreamChunk::tool_call))
                .map(Ok)
                .collect(),
            Some(MockResponse::Error(message)) => {
                log_debug!(self.logger, "[MockProvider] Failing request: {}", message);
                return Err(ProviderError::Other(format!("Mock error: {}", message)));
            }
            None => {
                log_debug!(self.logger, "[MockProvider] Echoing: {}", echo);
                self.split_into_chunks(&format!("Echo: {}", echo))
                    .into_iter()
                    .map(|text| Ok(StreamChunk::text(text)))
                    .collect()
            }
        };

        Ok(Box::pin(stream::iter(chunks)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use futures::StreamExt;

    async fn collect(provider: &MockProvider, content: &str) -> ProviderResult<Vec<StreamChunk>> {
        let mut stream = provider
            .stream_chat(
                vec![Turn::user(content)],
                ModelSettings::new("mock-echo"),
                RequestOptions::without_tools(),
            )
            .await?;

        let mut chunks = Vec::new();
        while let Some(chunk) = stream.next().await {
            chunks.push(chunk?);
        }
        Ok(chunks)
    }

    #[tokio::test]
    async fn test_echo_mode() {
        let provider = MockProvider::echo(NoOpLogger::shared());
        let text: String = collect(&provider, "Hello, world!")
            .await
            .unwrap()
            .iter()
            .filter_map(|c| c.as_text())
            .collect();

        assert_eq!(text, "Echo: Hello, world!");
    }

    #[tokio::test]
    async fn test_script_plays_in_order() {
        let provider = MockProvider::scripted(
            vec![
                MockResponse::tool_call("c1", "get_employee_leave_balance", "{}"),
                MockResponse::text("done"),
            ],
            NoOpLogger::shared(),
        );

        let first = collect(&provider, "a").await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].as_tool_call().unwrap().id.as_str(), "c1");

        let second = collect(&provider, "b").await.unwrap();
        assert_eq!(second[0].as_text(), Some("done"));
        assert_eq!(provider.request_count(), 2);
    }

    #[tokio::test]
    async fn test_error_response() {
        let provider =
            MockProvider::scripted(vec![MockResponse::Error("boom".into())], NoOpLogger::shared());
        assert!(collect(&provider, "a").await.is_err());
        assert_eq!(provider.request_count(), 1);
    }

    #[test]
    fn test_chunk_splitting() {
        let provider = MockProvider::echo(NoOpLogger::shared()).with_chunk_size(5);
        let chunks = provider.split_into_chunks("Hello, world!");

        assert_eq!(chunks, vec!["Hello", ", wor", "ld!"]);
    }
}
