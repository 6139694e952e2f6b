//! Model provider backed by the genai crate
//!
//! Covers the genai-native APIs plus the OpenAI-compatible ones (Mistral,
//! Azure, OpenRouter) that are routed through a service target resolver.

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use genai::chat::{ChatRequest, ChatStreamEvent};

use super::error::{ProviderError, ProviderResult};
use super::genai_adapter::{
    create_client, from_genai_error, from_genai_event, genai_options, is_genai_supported,
    is_keyless, provider_env_vars, resolve_api_key, to_genai_messages, to_genai_tools,
    ProviderConfig,
};
use super::traits::{ChunkStream, ModelSettings, Provider, RequestOptions};
use crate::logging::Logger;
use crate::types::Turn;
use crate::{log_debug, log_error};

pub struct GenaiProvider {
    provider_id: String,
    logger: Arc<dyn Logger>,
}

impl GenaiProvider {
    pub fn new(provider_id: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self {
            provider_id: provider_id.into(),
            logger,
        }
    }

    pub fn supports(provider_id: &str) -> bool {
        is_genai_supported(provider_id)
    }

    /// Drop a leading `provider/` from a model string
    pub fn extract_model_name(model: &str) -> &str {
        match model.split_once('/') {
            Some((_, name)) => name,
            None => model,
        }
    }

    fn endpoint(&self, settings: &ModelSettings) -> ProviderResult<ProviderConfig> {
        let endpoint = ProviderConfig {
            provider: self.provider_id.clone(),
            api_key: settings.api_key.clone(),
            api_base: settings.api_base.clone(),
        };
        let keyed = is_keyless(&self.provider_id) || resolve_api_key(&endpoint).is_some();
        if !keyed {
            return Err(ProviderError::missing_api_key(
                &self.provider_id,
                provider_env_vars(&self.provider_id),
            ));
        }
        Ok(endpoint)
    }

    /// Trace every turn about to be sent, in its wire shape
    fn trace_turns(&self, turns: &[Turn]) {
        for (index, turn) in turns.iter().enumerate() {
            log_debug!(
                self.logger,
                "[GenaiProvider] > [{}] {}",
                index,
                serde_json::to_value(turn).unwrap_or_default()
            );
        }
    }

    fn build_request(turns: Vec<Turn>, options: RequestOptions) -> ProviderResult<ChatRequest> {
        let request = ChatRequest::new(to_genai_messages(turns)?);
        Ok(match options.tools {
            Some(tools) => request.with_tools(to_genai_tools(tools)),
            None => request,
        })
    }
}

#[async_trait]
impl Provider for GenaiProvider {
    fn name(&self) -> &str {
        &self.provider_id
    }

    async fn stream_chat(
        &self,
        turns: Vec<Turn>,
        settings: ModelSettings,
        options: RequestOptions,
    ) -> ProviderResult<ChunkStream> {
        let endpoint = self.endpoint(&settings)?;
        let model = Self::extract_model_name(&settings.model);
        let offered = options.tools.as_ref().map_or(0, Vec::len);

        log_debug!(
            self.logger,
            "[GenaiProvider] {} / {}: sending {} message(s), {} tool(s) offered",
            self.provider_id,
            model,
            turns.len(),
            offered
        );
        self.trace_turns(&turns);
        let request = Self::build_request(turns, options)?;

        let response = create_client(&endpoint)
            .exec_chat_stream(model, request, Some(&genai_options()))
            .await
            .map_err(|e| {
                log_error!(
                    self.logger,
                    "[GenaiProvider] {} rejected the request: {}",
                    self.provider_id,
                    e
                );
                from_genai_error(&self.provider_id, e)
            })?;

        let logger = Arc::clone(&self.logger);
        let provider_id = self.provider_id.clone();
        let chunks = response
            .stream
            .map(move |event| match event {
                Ok(event @ ChatStreamEvent::End(_)) => {
                    log_debug!(logger, "[GenaiProvider] {} finished streaming", provider_id);
                    from_genai_event(event)
                }
                Ok(event) => from_genai_event(event),
                Err(e) => {
                    log_error!(logger, "[GenaiProvider] {} stream broke: {}", provider_id, e);
                    vec![Err(from_genai_error(&provider_id, e))]
                }
            })
            .flat_map(futures::stream::iter);

        Ok(Box::pin(chunks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogLevel, MemoryLogger, NoOpLogger};

    #[test]
    fn test_model_name_prefix_is_dropped() {
        assert_eq!(
            GenaiProvider::extract_model_name("mistral/mistral-large-latest"),
            "mistral-large-latest"
        );
        assert_eq!(
            GenaiProvider::extract_model_name("mistral-large-latest"),
            "mistral-large-latest"
        );
    }

    #[test]
    fn test_supported_ids() {
        assert!(GenaiProvider::supports("mistral"));
        assert!(GenaiProvider::supports("openai"));
        assert!(!GenaiProvider::supports("unknown_provider"));
    }

    #[test]
    fn test_turns_are_traced_at_debug() {
        let logger = MemoryLogger::shared();
        let provider = GenaiProvider::new("mistral", logger.clone());
        provider.trace_turns(&[
            Turn::system("You are a leave assistant."),
            Turn::user("Balance of 1001?"),
        ]);

        let traced = logger.messages(LogLevel::Debug);
        assert_eq!(traced.len(), 2);
        assert!(traced[0].contains("[0]"));
        assert!(traced[0].contains("You are a leave assistant."));
        assert!(traced[1].contains(r#""role":"user""#));
        assert!(traced[1].contains("Balance of 1001?"));
    }

    #[test]
    fn test_turn_tracing_respects_level() {
        let logger = Arc::new(MemoryLogger::with_level(LogLevel::Info));
        let provider = GenaiProvider::new("mistral", logger.clone());
        provider.trace_turns(&[Turn::user("hi")]);

        assert!(logger.records().is_empty());
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_request() {
        let provider = GenaiProvider::new("no-such-provider", NoOpLogger::shared());
        let result = provider
            .stream_chat(
                vec![Turn::user("hi")],
                ModelSettings::new("some-model"),
                RequestOptions::without_tools(),
            )
            .await;

        assert!(matches!(result, Err(ProviderError::MissingApiKey { .. })));
    }
}
