//! Agent configuration
//!
//! Settings come from a YAML file (`~/.config/leave-agent/config.yaml` by
//! default) with environment variable overrides on top. A missing file is
//! not an error: every field has a default.

mod error;
mod file;

pub use error::{ConfigError, ConfigResult};
pub use file::{AgentConfig, BackendKind, FileConfigProvider, CONFIG_PATH_ENV};
