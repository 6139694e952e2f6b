//! Tool backend abstraction

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::mcp::McpResult;
use crate::types::{
    ResourceDescriptor, ResourceTemplateDescriptor, ToolDescriptor, ToolInvocationResult,
};

/// Everything a backend advertises
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub tools: Vec<ToolDescriptor>,
    pub resources: Vec<ResourceDescriptor>,
    pub resource_templates: Vec<ResourceTemplateDescriptor>,
}

/// Source of tools and resources for the agent
///
/// Implementations:
/// - `McpToolBackend`: remote MCP server, one connection per request
/// - `LocalToolBackend`: the leave service running in-process
#[async_trait]
pub trait ToolBackend: Send + Sync {
    /// Backend name for log messages
    fn name(&self) -> &str;

    /// List tools, resources and resource templates
    async fn discover(&self) -> McpResult<Discovery>;

    /// Read a resource as text
    async fn read_resource(&self, uri: &str) -> McpResult<String>;

    /// Call a tool with already-decoded arguments.
    ///
    /// Failures are reported in the returned result, never as `Err`.
    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> ToolInvocationResult;
}
