//! MCP (Model Context Protocol) client module
//!
//! Uses the official rmcp SDK to talk to the leave management server over
//! Streamable HTTP.
//!
//! # Example
//!
//! ```rust,ignore
//! use leave_agent_core::mcp::McpClient;
//!
//! let client = McpClient::connect_http("http://127.0.0.1:9000/mcp/", logger).await?;
//! let tools = client.list_tools().await?;
//! let result = client.call_tool("get_employee_leave_balance", json!({
//!     "employee_id": "1001"
//! })).await?;
//! client.close().await?;
//! ```

mod client;

pub use client::{McpClient, McpError, McpResult, tool_result_text};

// Discovery types converted by the remote tool backend
pub use rmcp::model::{
    Resource as McpResource, ResourceTemplate as McpResourceTemplate, Tool as McpTool,
};
