//! Provider trait and the types that cross it

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};

use super::error::ProviderResult;
use crate::types::{ModelToolSpec, ToolCall, Turn};

/// Which model to ask, and how to authenticate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSettings {
    /// Model identifier, optionally `provider/`-prefixed
    pub model: String,
    /// Explicit API key; providers fall back to their usual env vars
    pub api_key: Option<String>,
    /// Endpoint override
    pub api_base: Option<String>,
}

impl ModelSettings {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_key: None,
            api_base: None,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }
}

/// Per-request options
///
/// When tools are offered the model picks freely between answering and
/// calling one (`tool_choice: auto`); without tools it can only answer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub tools: Option<Vec<ModelToolSpec>>,
}

impl RequestOptions {
    /// Offer these tools with automatic tool choice
    pub fn offering(tools: &[ModelToolSpec]) -> Self {
        Self {
            tools: Some(tools.to_vec()),
        }
    }

    /// Offer no tools at all
    pub fn without_tools() -> Self {
        Self::default()
    }
}

/// A piece of a streamed model response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamChunk {
    /// Reply text delta
    Text { text: String },
    /// A fully assembled tool call
    ToolCall {
        #[serde(rename = "toolCall")]
        tool_call: ToolCall,
    },
}

impl StreamChunk {
    pub fn text(text: impl Into<String>) -> Self {
        StreamChunk::Text { text: text.into() }
    }

    pub fn tool_call(tool_call: ToolCall) -> Self {
        StreamChunk::ToolCall { tool_call }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StreamChunk::Text { text } => Some(text),
            StreamChunk::ToolCall { .. } => None,
        }
    }

    pub fn as_tool_call(&self) -> Option<&ToolCall> {
        match self {
            StreamChunk::ToolCall { tool_call } => Some(tool_call),
            StreamChunk::Text { .. } => None,
        }
    }
}

/// Stream of response chunks, in the order the provider produced them
pub type ChunkStream = Pin<Box<dyn Stream<Item = ProviderResult<StreamChunk>> + Send>>;

/// A language model provider
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider id (e.g. "mistral", "openai", "mock")
    fn name(&self) -> &str;

    /// Send the whole transcript and stream back the response
    async fn stream_chat(
        &self,
        turns: Vec<Turn>,
        model: ModelSettings,
        options: RequestOptions,
    ) -> ProviderResult<ChunkStream>;
}
