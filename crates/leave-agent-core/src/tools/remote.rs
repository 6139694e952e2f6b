//! Tool backend over a remote MCP server
//!
//! Every request opens its own connection and closes it before returning,
//! on success and on error alike.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::backend::{Discovery, ToolBackend};
use crate::logging::Logger;
use crate::mcp::{
    tool_result_text, McpClient, McpResource, McpResourceTemplate, McpResult, McpTool,
};
use crate::types::{
    ResourceDescriptor, ResourceTemplateDescriptor, ToolDescriptor, ToolInvocationResult,
};
use crate::{log_debug, log_error, log_warn};

impl From<McpTool> for ToolDescriptor {
    fn from(tool: McpTool) -> Self {
        Self {
            name: tool.name.to_string(),
            description: tool.description.map(|s| s.to_string()).unwrap_or_default(),
            // input_schema is Arc<JsonObject>, convert to Value
            parameter_schema: Some(Value::Object(tool.input_schema.as_ref().clone())),
        }
    }
}

impl From<McpResource> for ResourceDescriptor {
    fn from(resource: McpResource) -> Self {
        let raw = resource.raw;
        Self {
            uri: raw.uri,
            name: raw.name,
            description: raw.description,
            mime_type: raw.mime_type,
        }
    }
}

impl From<McpResourceTemplate> for ResourceTemplateDescriptor {
    fn from(template: McpResourceTemplate) -> Self {
        let raw = template.raw;
        Self {
            uri_template: raw.uri_template,
            name: raw.name,
            description: raw.description,
            mime_type: raw.mime_type,
        }
    }
}

/// Tool backend talking to an MCP server over Streamable HTTP
pub struct McpToolBackend {
    url: String,
    logger: Arc<dyn Logger>,
}

impl McpToolBackend {
    pub fn new(url: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self {
            url: url.into(),
            logger,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn connect(&self) -> McpResult<McpClient> {
        McpClient::connect_http(&self.url, Arc::clone(&self.logger)).await
    }

    /// Close the connection, keeping the request's own outcome
    async fn finish<T>(&self, client: McpClient, result: McpResult<T>) -> McpResult<T> {
        if let Err(e) = client.close().await {
            log_warn!(
                self.logger,
                "[McpToolBackend] Failed to close connection to {}: {}",
                self.url, e
            );
        }
        result
    }

    async fn list_all(client: &McpClient) -> McpResult<Discovery> {
        let tools = client.list_tools().await?;
        let resources = client.list_resources().await?;
        let resource_templates = client.list_resource_templates().await?;

        Ok(Discovery {
            tools: tools.into_iter().map(ToolDescriptor::from).collect(),
            resources: resources.into_iter().map(ResourceDescriptor::from).collect(),
            resource_templates: resource_templates
                .into_iter()
                .map(ResourceTemplateDescriptor::from)
                .collect(),
        })
    }
}

#[async_trait]
impl ToolBackend for McpToolBackend {
    fn name(&self) -> &str {
        &self.url
    }

    async fn discover(&self) -> McpResult<Discovery> {
        let client = self.connect().await?;
        if let Some(info) = client.server_info() {
            log_debug!(
                self.logger,
                "[McpToolBackend] Server: {} {}",
                info.name, info.version
            );
        }
        let result = Self::list_all(&client).await;
        self.finish(client, result).await
    }

    async fn read_resource(&self, uri: &str) -> McpResult<String> {
        let client = self.connect().await?;
        let result = client.read_resource(uri).await;
        self.finish(client, result).await
    }

    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> ToolInvocationResult {
        let client = match self.connect().await {
            Ok(client) => client,
            Err(e) => {
                log_error!(
                    self.logger,
                    "[McpToolBackend] Cannot reach {} for tool {}: {}",
                    self.url, name, e
                );
                return ToolInvocationResult::error(format!("Error: {}", e));
            }
        };

        let result = client.call_tool(name, Value::Object(arguments)).await;
        let result = self.finish(client, result).await;

        match result {
            Ok(result) => {
                let mut text = tool_result_text(&result);
                if text.is_empty() {
                    if let Some(structured) = &result.structured_content {
                        text = structured.to_string();
                    }
                }
                log_debug!(
                    self.logger,
                    "[McpToolBackend] Received response from tool {}: {}",
                    name, text
                );

                let payload = serde_json::from_str(&text).unwrap_or(Value::String(text));
                if result.is_error.unwrap_or(false) {
                    ToolInvocationResult::error_payload(payload)
                } else {
                    ToolInvocationResult::success(payload)
                }
            }
            Err(e) => {
                log_error!(self.logger, "[McpToolBackend] Tool {} failed: {}", name, e);
                ToolInvocationResult::error(format!("Error: {}", e))
            }
        }
    }
}
