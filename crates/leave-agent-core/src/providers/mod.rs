//! LLM Provider implementations
//!
//! Real providers go through the `genai` crate, which handles streaming,
//! provider-specific protocols and tool calling. Providers not natively in
//! genai (Mistral, Azure, OpenRouter) are routed via genai's
//! `ServiceTargetResolver` using OpenAI-compatible protocols.
//!
//! The `MockProvider` plays back scripted responses for tests and offline runs.

mod completion;
mod error;
mod genai_adapter;
mod genai_provider;
mod mock;
mod traits;

pub use completion::{CompletionClient, CompletionResult};
pub use error::{ProviderError, ProviderResult};
pub use traits::{ChunkStream, ModelSettings, Provider, RequestOptions, StreamChunk};

pub use genai_adapter::{is_genai_native, is_genai_supported, ProviderConfig};
pub use genai_provider::GenaiProvider;

pub use mock::{MockProvider, MockResponse, RecordedRequest};

use crate::logging::Logger;
use std::sync::Arc;

/// Create a provider for the given provider ID
///
/// `mock` yields an echoing [`MockProvider`]; anything else goes through
/// [`GenaiProvider`], which treats unknown IDs as OpenAI-compatible endpoints.
pub fn create_provider(provider_id: &str, logger: Arc<dyn Logger>) -> Arc<dyn Provider> {
    match provider_id.to_lowercase().as_str() {
        "mock" => Arc::new(MockProvider::echo(logger)),
        _ => Arc::new(GenaiProvider::new(provider_id, logger)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;

    #[test]
    fn test_create_provider() {
        assert_eq!(create_provider("mock", NoOpLogger::shared()).name(), "mock");
        assert_eq!(
            create_provider("mistral", NoOpLogger::shared()).name(),
            "mistral"
        );
    }
}
