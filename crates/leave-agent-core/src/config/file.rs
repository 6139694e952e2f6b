//! File-based configuration provider (YAML)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use crate::logging::LogLevel;

/// Environment variable pointing at an explicit config file
pub const CONFIG_PATH_ENV: &str = "LEAVE_AGENT_CONFIG";

/// Where the agent gets its tools from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Remote MCP server over Streamable HTTP
    #[default]
    Mcp,
    /// In-process leave data service
    Local,
}

impl std::str::FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mcp" | "http" => Ok(BackendKind::Mcp),
            "local" => Ok(BackendKind::Local),
            other => Err(ConfigError::invalid_value(
                "backend",
                format!("expected 'mcp' or 'local', got '{}'", other),
            )),
        }
    }
}

/// Agent settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// MCP endpoint serving the leave tools
    pub server_url: String,
    /// Resource holding the system prompt
    pub system_prompt_uri: String,
    /// Tool backend to use
    pub backend: BackendKind,
    /// System prompt file served by the local backend
    pub system_prompt_path: PathBuf,
    /// LLM provider id (mistral, openai, anthropic, ollama, ...)
    pub provider: String,
    /// Model name as used by the provider's API
    pub model: String,
    /// Environment variable holding the provider API key
    pub api_key_env: String,
    /// Custom API base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Transcript length at which history is cleared
    pub history_limit: usize,
    /// Minimum console log level
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:9000/mcp/".to_string(),
            system_prompt_uri: "resource://get_system_prompt".to_string(),
            backend: BackendKind::Mcp,
            system_prompt_path: PathBuf::from("./documents/system_prompt.txt"),
            provider: "mistral".to_string(),
            model: "mistral-large-latest".to_string(),
            api_key_env: "M_API_KEY".to_string(),
            api_base: None,
            history_limit: 11,
            log_level: "info".to_string(),
        }
    }
}

impl AgentConfig {
    /// Apply `LEAVE_AGENT_*` overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (empty values are ignored)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("LEAVE_AGENT_SERVER_URL") {
            self.server_url = url;
        }
        if let Some(provider) = get("LEAVE_AGENT_PROVIDER") {
            self.provider = provider;
        }
        if let Some(model) = get("LEAVE_AGENT_MODEL") {
            self.model = model;
        }
        if let Some(level) = get("LEAVE_AGENT_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(backend) = get("LEAVE_AGENT_BACKEND") {
            self.backend = backend.parse()?;
        }
        Ok(())
    }

    /// Check values that would otherwise fail later at runtime
    pub fn validate(&self) -> ConfigResult<()> {
        if self.history_limit < 2 {
            return Err(ConfigError::invalid_value(
                "history_limit",
                "must leave room for the system prompt and one user message",
            ));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::invalid_value("model", "must not be empty"));
        }
        if self.backend == BackendKind::Mcp && self.server_url.trim().is_empty() {
            return Err(ConfigError::invalid_value("server_url", "must not be empty"));
        }
        self.log_level()?;
        Ok(())
    }

    /// Parsed console log level
    pub fn log_level(&self) -> ConfigResult<LogLevel> {
        self.log_level
            .parse()
            .map_err(|e: String| ConfigError::invalid_value("log_level", e))
    }

    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|v| !v.is_empty())
    }
}

/// File-based configuration provider
///
/// # Example
///
/// ```no_run
/// use leave_agent_core::config::FileConfigProvider;
///
/// let provider = FileConfigProvider::user();
/// let config = provider.load().expect("readable config");
/// println!("tools from {}", config.server_url);
/// ```
pub struct FileConfigProvider {
    path: PathBuf,
}

impl FileConfigProvider {
    /// Create a new file config provider for a specific path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a user-level config provider (~/.config/leave-agent/config.yaml)
    pub fn user() -> Self {
        let config_dir = dirs::config_dir().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
        });
        Self::new(config_dir.join("leave-agent").join("config.yaml"))
    }

    /// Config named by `LEAVE_AGENT_CONFIG`, else the user-level one
    pub fn from_env() -> Self {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::new(path),
            _ => Self::user(),
        }
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the config file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load config from file, falling back to defaults when it is absent
    pub fn load(&self) -> ConfigResult<AgentConfig> {
        if !self.path.exists() {
            return Ok(AgentConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(AgentConfig::default());
        }

        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Save config to file
    pub fn save(&self, config: &AgentConfig) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(config).map_err(ConfigError::Serialize)?;

        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl std::fmt::Debug for FileConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileConfigProvider")
            .field("path", &self.path)
            .field("exists", &self.exists())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let provider = FileConfigProvider::new(dir.path().join("config.yaml"));

        assert!(!provider.exists());
        let config = provider.load().unwrap();
        assert_eq!(config, AgentConfig::default());
        assert_eq!(config.history_limit, 11);
        assert_eq!(config.system_prompt_uri, "resource://get_system_prompt");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "server_url: http://10.0.0.5:80/mcp/\nbackend: local\n").unwrap();

        let config = FileConfigProvider::new(&path).load().unwrap();
        assert_eq!(config.server_url, "http://10.0.0.5:80/mcp/");
        assert_eq!(config.backend, BackendKind::Local);
        assert_eq!(config.model, "mistral-large-latest");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let provider = FileConfigProvider::new(&path);

        let config = AgentConfig {
            model: "open-mistral-nemo".to_string(),
            ..AgentConfig::default()
        };
        provider.save(&config).unwrap();

        assert!(provider.exists());
        assert_eq!(provider.load().unwrap(), config);
    }

    #[test]
    fn test_invalid_yaml_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "history_limit: [not, a, number]").unwrap();

        let err = FileConfigProvider::new(&path).load().unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("invalid config file"));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("LEAVE_AGENT_SERVER_URL", "http://localhost:8000/mcp/"),
            ("LEAVE_AGENT_MODEL", "mistral-small-latest"),
            ("LEAVE_AGENT_BACKEND", "local"),
            ("LEAVE_AGENT_PROVIDER", ""),
        ]
        .into_iter()
        .collect();

        let mut config = AgentConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server_url, "http://localhost:8000/mcp/");
        assert_eq!(config.model, "mistral-small-latest");
        assert_eq!(config.backend, BackendKind::Local);
        assert_eq!(config.provider, "mistral");
    }

    #[test]
    fn test_bad_backend_override() {
        let mut config = AgentConfig::default();
        let result = config.apply_overrides(|key| {
            (key == "LEAVE_AGENT_BACKEND").then(|| "carrier-pigeon".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_validate() {
        assert!(AgentConfig::default().validate().is_ok());

        let tiny = AgentConfig {
            history_limit: 1,
            ..AgentConfig::default()
        };
        assert!(tiny.validate().is_err());

        let noisy = AgentConfig {
            log_level: "shouty".to_string(),
            ..AgentConfig::default()
        };
        assert!(noisy.validate().is_err());
    }
}
