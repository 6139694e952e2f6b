//! Provider error types

use thiserror::Error;

/// Why a model request failed
///
/// Every variant ends the current user input; the agent never retries.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// No API key was configured or found in the environment
    #[error("no API key for {provider} (set {hint})")]
    MissingApiKey { provider: String, hint: String },

    /// The provider rejected the credentials
    #[error("{provider} rejected the API key: {message}")]
    Unauthorized { provider: String, message: String },

    /// The provider is throttling us
    #[error("{provider} rate limited the request: {message}")]
    RateLimited { provider: String, message: String },

    /// Any other failure reported by the provider or its transport
    #[error("{provider} request failed: {message}")]
    Request { provider: String, message: String },

    /// A message could not be encoded for the provider
    #[error("cannot encode request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    pub fn missing_api_key(provider: impl Into<String>, env_vars: &[&str]) -> Self {
        let hint = if env_vars.is_empty() {
            "api_key_env in the config".to_string()
        } else {
            env_vars.join(" or ")
        };
        Self::MissingApiKey {
            provider: provider.into(),
            hint,
        }
    }

    pub fn request(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Request {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Classify a provider's error message by the status it mentions
    pub fn classify(provider: impl Into<String>, message: impl Into<String>) -> Self {
        let provider = provider.into();
        let message = message.into();
        let lower = message.to_lowercase();

        if lower.contains("429") || lower.contains("rate limit") || lower.contains("too many requests") {
            Self::RateLimited { provider, message }
        } else if lower.contains("401") || lower.contains("unauthorized") || lower.contains("invalid api key") {
            Self::Unauthorized { provider, message }
        } else {
            Self::Request { provider, message }
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert!(matches!(
            ProviderError::classify("mistral", "HTTP 429 Too Many Requests"),
            ProviderError::RateLimited { .. }
        ));
        assert!(matches!(
            ProviderError::classify("mistral", "status 401: Unauthorized"),
            ProviderError::Unauthorized { .. }
        ));
        assert!(matches!(
            ProviderError::classify("mistral", "connection reset"),
            ProviderError::Request { .. }
        ));
    }

    #[test]
    fn test_missing_key_hint() {
        let err = ProviderError::missing_api_key("mistral", &["MISTRAL_API_KEY", "M_API_KEY"]);
        assert_eq!(
            err.to_string(),
            "no API key for mistral (set MISTRAL_API_KEY or M_API_KEY)"
        );

        let err = ProviderError::missing_api_key("custom", &[]);
        assert!(err.to_string().contains("api_key_env"));
    }
}
