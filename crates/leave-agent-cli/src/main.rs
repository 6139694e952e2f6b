//! CLI entrypoint for the leave management agent
//!
//! Loads configuration, wires the tool backend and model provider into an
//! [`Agent`] and hands the terminal over to its console loop.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use leave_agent_core::agent::{Agent, AgentOptions};
use leave_agent_core::config::{AgentConfig, BackendKind, FileConfigProvider};
use leave_agent_core::logging::{ConsoleLogger, Logger};
use leave_agent_core::providers::{create_provider, CompletionClient, ModelSettings};
use leave_agent_core::tools::{LocalToolBackend, McpToolBackend, ToolBackend};
use leave_agent_core::log_info;

/// Chat with the leave management agent
#[derive(Parser, Debug)]
#[command(name = "leave-agent", version, about)]
struct Cli {
    /// Config file (defaults to $LEAVE_AGENT_CONFIG or the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tool backend: mcp or local
    #[arg(long)]
    backend: Option<BackendKind>,

    /// MCP server URL
    #[arg(long)]
    server_url: Option<String>,

    /// LLM provider id
    #[arg(long)]
    provider: Option<String>,

    /// Model name
    #[arg(short, long)]
    model: Option<String>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn load_config(&self) -> Result<AgentConfig> {
        let source = match &self.config {
            Some(path) => FileConfigProvider::new(path),
            None => FileConfigProvider::from_env(),
        };
        let mut config = source
            .load()
            .with_context(|| format!("loading {}", source.path().display()))?;
        config.apply_env_overrides()?;

        if let Some(backend) = self.backend {
            config.backend = backend;
        }
        if let Some(url) = &self.server_url {
            config.server_url = url.clone();
        }
        if let Some(provider) = &self.provider {
            config.provider = provider.clone();
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if self.verbose {
            config.log_level = "debug".to_string();
        }

        config.validate()?;
        Ok(config)
    }
}

fn tool_backend(config: &AgentConfig, logger: Arc<dyn Logger>) -> Arc<dyn ToolBackend> {
    match config.backend {
        BackendKind::Mcp => Arc::new(McpToolBackend::new(config.server_url.clone(), logger)),
        BackendKind::Local => Arc::new(
            LocalToolBackend::demo(logger).with_system_prompt_file(&config.system_prompt_path),
        ),
    }
}

fn completion_client(config: &AgentConfig, logger: Arc<dyn Logger>) -> CompletionClient {
    let mut model = ModelSettings::new(config.model.clone());
    if let Some(key) = config.api_key() {
        model = model.with_api_key(key);
    }
    if let Some(base) = &config.api_base {
        model = model.with_api_base(base.clone());
    }

    let provider = create_provider(&config.provider, Arc::clone(&logger));
    CompletionClient::new(provider, model, logger)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    let logger: Arc<dyn Logger> = Arc::new(ConsoleLogger::new().with_level(config.log_level()?));
    log_info!(
        logger,
        "[Main] Starting with {:?} backend, {} model {}",
        config.backend, config.provider, config.model
    );

    let backend = tool_backend(&config, Arc::clone(&logger));
    let completion = completion_client(&config, Arc::clone(&logger));

    let mut agent = Agent::start(
        backend,
        completion,
        AgentOptions::from(&config),
        Arc::clone(&logger),
    )
    .await
    .context("starting agent")?;

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    agent.run(stdin, tokio::io::stdout()).await?;

    Ok(())
}
