//! In-process tool backend serving the leave service
//!
//! Mirrors what the leave management MCP server advertises: the two leave
//! lookups and the system-prompt resource.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use super::backend::{Discovery, ToolBackend};
use crate::leave::{InMemoryLeaveRepository, LeaveRepository, LeaveService};
use crate::logging::Logger;
use crate::mcp::{McpError, McpResult};
use crate::types::{ResourceDescriptor, ToolInvocationResult};
use crate::{log_debug, log_warn};

/// Resource holding the agent's system prompt
pub const SYSTEM_PROMPT_URI: &str = "resource://get_system_prompt";

/// Prompt served when no prompt file is available
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a leave management assistant for a small company. \
Answer questions about employee leave balances and the dates on which employees took leave. \
Always use the available tools to look up leave data; never guess. \
Employee ids are four digit numbers such as 1001. Use \"all\" to query every employee. \
If a tool reports that an employee was not found, tell the user so plainly. \
Leave balances are expressed in days.";

/// Tool backend that answers from an in-process [`LeaveService`]
pub struct LocalToolBackend {
    service: LeaveService,
    system_prompt_path: Option<PathBuf>,
    logger: Arc<dyn Logger>,
}

impl LocalToolBackend {
    pub fn new(repository: Arc<dyn LeaveRepository>, logger: Arc<dyn Logger>) -> Self {
        Self {
            service: LeaveService::new(repository),
            system_prompt_path: None,
            logger,
        }
    }

    /// Backend over the demo employee table
    pub fn demo(logger: Arc<dyn Logger>) -> Self {
        Self::new(Arc::new(InMemoryLeaveRepository::demo()), logger)
    }

    /// Serve the system prompt from a file
    pub fn with_system_prompt_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.system_prompt_path = Some(path.into());
        self
    }

    async fn system_prompt(&self) -> String {
        let Some(path) = &self.system_prompt_path else {
            return DEFAULT_SYSTEM_PROMPT.to_string();
        };

        match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(e) => {
                log_warn!(
                    self.logger,
                    "[LocalToolBackend] Cannot read {}: {}; using built-in prompt",
                    path.display(),
                    e
                );
                DEFAULT_SYSTEM_PROMPT.to_string()
            }
        }
    }
}

#[async_trait]
impl ToolBackend for LocalToolBackend {
    fn name(&self) -> &str {
        "local"
    }

    async fn discover(&self) -> McpResult<Discovery> {
        Ok(Discovery {
            tools: LeaveService::tool_descriptors(),
            resources: vec![ResourceDescriptor {
                uri: SYSTEM_PROMPT_URI.to_string(),
                name: "get_system_prompt".to_string(),
                description: Some("Reads the contents of the file for the system prompt".to_string()),
                mime_type: Some("application/json".to_string()),
            }],
            resource_templates: Vec::new(),
        })
    }

    async fn read_resource(&self, uri: &str) -> McpResult<String> {
        if uri != SYSTEM_PROMPT_URI {
            return Err(McpError::UnknownResource {
                uri: uri.to_string(),
            });
        }
        let content = self.system_prompt().await;
        Ok(json!({ "status": "success", "content": content }).to_string())
    }

    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> ToolInvocationResult {
        log_debug!(
            self.logger,
            "[LocalToolBackend] Calling tool: {}({})",
            name,
            Value::Object(arguments.clone())
        );

        match self.service.call(name, &arguments) {
            Some(payload) => ToolInvocationResult::success(payload),
            None => ToolInvocationResult::error(format!("Error: Unknown tool: {}", name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;

    #[tokio::test]
    async fn test_read_system_prompt_resource() {
        let backend = LocalToolBackend::demo(NoOpLogger::shared());
        let text = backend.read_resource(SYSTEM_PROMPT_URI).await.unwrap();
        let body: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(body["status"], "success");
        assert_eq!(body["content"], DEFAULT_SYSTEM_PROMPT);
    }

    #[tokio::test]
    async fn test_system_prompt_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system_prompt.txt");
        std::fs::write(&path, "Only talk about leave.").unwrap();

        let backend = LocalToolBackend::demo(NoOpLogger::shared()).with_system_prompt_file(&path);
        let body: Value =
            serde_json::from_str(&backend.read_resource(SYSTEM_PROMPT_URI).await.unwrap()).unwrap();
        assert_eq!(body["content"], "Only talk about leave.");
    }

    #[tokio::test]
    async fn test_unknown_resource() {
        let backend = LocalToolBackend::demo(NoOpLogger::shared());
        assert!(backend.read_resource("resource://nope").await.is_err());
    }

    #[tokio::test]
    async fn test_call_tools() {
        let backend = LocalToolBackend::demo(NoOpLogger::shared());
        let mut args = Map::new();
        args.insert("employee_id".to_string(), json!("1001"));

        let result = backend.call_tool("get_employee_leave_balance", args.clone()).await;
        assert!(!result.is_error());
        assert_eq!(result.payload["leave_balance"], 15);

        let unknown = backend.call_tool("fire_employee", args).await;
        assert!(unknown.is_error());
    }
}
