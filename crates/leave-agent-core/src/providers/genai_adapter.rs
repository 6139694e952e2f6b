//! Adapter between leave-agent types and genai types
//!
//! Conversion functions between our transcript/tool types and genai's types,
//! so genai handles streaming and provider protocols for us.
//!
//! Auth flows through the configured API key first, then the provider's
//! usual environment variables; genai's own lookup is never consulted.

use std::future::Future;
use std::pin::Pin;

use genai::chat::{
    ChatMessage as GenaiMessage, ChatOptions as GenaiOptions, ChatStreamEvent,
    Tool as GenaiTool, ToolCall as GenaiToolCall, ToolResponse as GenaiToolResponse,
};
use genai::resolver::{AuthData, AuthResolver, Endpoint, ServiceTargetResolver};
use genai::{adapter::AdapterKind, Client, ModelIden, ServiceTarget};
use serde_json::{json, Value};

use crate::types::{AssistantTurn, ModelToolSpec, ToolCall, Turn};

use super::error::{ProviderError, ProviderResult};
use super::traits::StreamChunk;

// ============================================================================
// Message Conversion: leave-agent -> genai
// ============================================================================

/// Rebuild the provider's tool call so it can be echoed back verbatim
pub fn to_genai_tool_call(call: &ToolCall) -> ProviderResult<GenaiToolCall> {
    let arguments = serde_json::from_str::<Value>(&call.arguments)
        .unwrap_or_else(|_| Value::String(call.arguments.clone()));

    let tool_call = serde_json::from_value(json!({
        "call_id": call.id.as_str(),
        "fn_name": call.name,
        "fn_arguments": arguments,
    }))?;
    Ok(tool_call)
}

/// Convert a transcript turn to a genai ChatMessage
pub fn to_genai_message(turn: Turn) -> ProviderResult<GenaiMessage> {
    let message = match turn {
        Turn::System { content } => GenaiMessage::system(content),
        Turn::User { content } => GenaiMessage::user(content),
        Turn::Assistant(AssistantTurn::Reply { text }) => GenaiMessage::assistant(text),
        Turn::Assistant(AssistantTurn::ToolCall { tool_call }) => {
            GenaiMessage::from(vec![to_genai_tool_call(&tool_call)?])
        }
        Turn::Tool(tool) => GenaiMessage::from(GenaiToolResponse::new(
            tool.call_id.as_str().to_string(),
            tool.content,
        )),
    };
    Ok(message)
}

/// Convert a whole transcript to genai messages
pub fn to_genai_messages(turns: Vec<Turn>) -> ProviderResult<Vec<GenaiMessage>> {
    turns.into_iter().map(to_genai_message).collect()
}

// ============================================================================
// Tool Conversion: leave-agent -> genai
// ============================================================================

/// Convert a function tool spec to a genai Tool
pub fn to_genai_tool(spec: ModelToolSpec) -> GenaiTool {
    GenaiTool::new(&spec.function.name)
        .with_description(&spec.function.description)
        .with_schema(spec.function.parameters)
}

/// Convert tool specs to genai tools
pub fn to_genai_tools(specs: Vec<ModelToolSpec>) -> Vec<GenaiTool> {
    specs.into_iter().map(to_genai_tool).collect()
}

// ============================================================================
// Options
// ============================================================================

/// Chat options for every request: tool calls are captured whole at the end
/// of the stream so we never have to stitch deltas together
pub fn genai_options() -> GenaiOptions {
    GenaiOptions::default().with_capture_tool_calls(true)
}

// ============================================================================
// Response Conversion: genai -> leave-agent
// ============================================================================

/// Convert genai ToolCall to our ToolCall, keeping the arguments as JSON text
pub fn from_genai_tool_call(tc: &GenaiToolCall) -> ToolCall {
    let arguments = match &tc.fn_arguments {
        Value::String(raw) => raw.clone(),
        other => other.to_string(),
    };

    ToolCall::new(tc.call_id.clone(), tc.fn_name.clone(), arguments)
}

/// Convert a genai stream event to zero or more StreamChunks
///
/// Every captured tool call is forwarded; picking which one to act on is the
/// completion client's job.
pub fn from_genai_event(event: ChatStreamEvent) -> Vec<ProviderResult<StreamChunk>> {
    match event {
        ChatStreamEvent::Chunk(chunk) => vec![Ok(StreamChunk::Text {
            text: chunk.content,
        })],
        ChatStreamEvent::End(end) => match end.captured_tool_calls() {
            Some(tool_calls) => tool_calls
                .into_iter()
                .map(|tc| Ok(StreamChunk::tool_call(from_genai_tool_call(tc))))
                .collect(),
            None => Vec::new(),
        },
        // Tool call deltas are reassembled by genai and captured at End
        ChatStreamEvent::ToolCallChunk(_) => Vec::new(),
        ChatStreamEvent::Start => Vec::new(),
        ChatStreamEvent::ReasoningChunk(_) => Vec::new(),
        ChatStreamEvent::ThoughtSignatureChunk(_) => Vec::new(),
    }
}

/// Map a genai error onto our error taxonomy
pub fn from_genai_error(provider: &str, error: genai::Error) -> ProviderError {
    ProviderError::classify(provider, error.to_string())
}

// ============================================================================
// Provider Resolution
// ============================================================================

/// Provider configuration for routing
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Provider identifier (e.g., "mistral", "openai", "azure")
    pub provider: String,
    /// API key for authentication
    pub api_key: Option<String>,
    /// Custom API base URL
    pub api_base: Option<String>,
}

/// Environment variables conventionally holding a provider's API key
pub fn provider_env_vars(provider: &str) -> &'static [&'static str] {
    match provider.to_lowercase().as_str() {
        "openai" => &["OPENAI_API_KEY"],
        "anthropic" => &["ANTHROPIC_API_KEY"],
        "gemini" | "google" => &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
        "mistral" => &["MISTRAL_API_KEY", "M_API_KEY"],
        "groq" => &["GROQ_API_KEY"],
        "xai" => &["XAI_API_KEY"],
        "deepseek" => &["DEEPSEEK_API_KEY"],
        "cohere" => &["COHERE_API_KEY"],
        "azure" => &["AZURE_API_KEY", "AZURE_OPENAI_API_KEY"],
        "openrouter" => &["OPENROUTER_API_KEY"],
        _ => &[],
    }
}

/// Whether the provider can run without an API key
pub fn is_keyless(provider: &str) -> bool {
    matches!(provider.to_lowercase().as_str(), "ollama" | "mock")
}

/// Resolve the API key: explicit value first, then environment variables
pub fn resolve_api_key(config: &ProviderConfig) -> Option<String> {
    if let Some(key) = config.api_key.as_ref().filter(|k| !k.is_empty()) {
        return Some(key.clone());
    }

    provider_env_vars(&config.provider)
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty())
}

// ============================================================================
// Client Creation with Custom Auth
// ============================================================================

/// Create a genai Client with custom auth and endpoint resolution
pub fn create_client(config: &ProviderConfig) -> Client {
    let provider = config.provider.clone();
    let api_base = config.api_base.clone();

    let auth_key = resolve_api_key(config);

    let auth_resolver = AuthResolver::from_resolver_async_fn(
        move |_model_iden: ModelIden| -> Pin<Box<dyn Future<Output = genai::resolver::Result<Option<AuthData>>> + Send>> {
            let key = auth_key.clone();
            // Return None when there is no key - genai handles the "no auth" case (e.g. Ollama)
            Box::pin(async move { Ok(key.map(AuthData::from_single)) })
        }
    );

    // Create service target resolver for custom endpoints
    let target_provider = provider.clone();
    let target_api_base = api_base.clone();

    let target_resolver = ServiceTargetResolver::from_resolver_fn(
        move |target: ServiceTarget| -> Result<ServiceTarget, genai::resolver::Error> {
            let ServiceTarget { ref model, .. } = target;

            // OpenAI-compatible providers not native to genai
            let endpoint = match target_provider.as_str() {
                "azure" => target_api_base
                    .as_ref()
                    .map(|u| Endpoint::from_owned(u.clone()))
                    .unwrap_or_else(|| {
                        Endpoint::from_static("https://your-resource.openai.azure.com/")
                    }),
                "openrouter" => Endpoint::from_static("https://openrouter.ai/api/v1/"),
                "mistral" => target_api_base
                    .as_ref()
                    .map(|u| Endpoint::from_owned(u.clone()))
                    .unwrap_or_else(|| Endpoint::from_static("https://api.mistral.ai/v1/")),
                // Native genai providers - honour a custom base, else resolve normally
                _ => match &target_api_base {
                    Some(base) => Endpoint::from_owned(base.clone()),
                    None => return Ok(target),
                },
            };

            let adapter_kind = match target_provider.as_str() {
                "azure" | "openrouter" | "mistral" => AdapterKind::OpenAI,
                _ => model.adapter_kind,
            };
            let resolved_model = ModelIden::new(adapter_kind, model.model_name.clone());

            Ok(ServiceTarget {
                endpoint,
                auth: target.auth, // Auth is handled by AuthResolver
                model: resolved_model,
            })
        },
    );

    Client::builder()
        .with_auth_resolver(auth_resolver)
        .with_service_target_resolver(target_resolver)
        .build()
}

/// Check if a provider is natively supported by genai
pub fn is_genai_native(provider: &str) -> bool {
    matches!(
        provider.to_lowercase().as_str(),
        "openai"
            | "anthropic"
            | "gemini"
            | "ollama"
            | "groq"
            | "xai"
            | "deepseek"
            | "cohere"
            | "fireworks"
            | "together"
    )
}

/// Check if a provider can be handled by genai (native or via OpenAI-compat)
pub fn is_genai_supported(provider: &str) -> bool {
    is_genai_native(provider)
        || matches!(
            provider.to_lowercase().as_str(),
            "azure" | "openrouter" | "mistral"
        )
}
