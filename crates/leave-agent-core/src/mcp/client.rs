//! MCP client over Streamable HTTP, built on the rmcp SDK
//!
//! A client lives for a single request: connect, do one thing, close.

use std::sync::Arc;

use rmcp::{
    model::{
        CallToolRequestParams, CallToolResult, ClientCapabilities, ClientInfo, Implementation,
        RawContent, ReadResourceRequestParams, Resource, ResourceContents, ResourceTemplate, Tool,
    },
    service::RunningService,
    transport::StreamableHttpClientTransport,
    RoleClient, ServiceExt,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::logging::Logger;
use crate::{log_debug, log_warn};

/// MCP client errors
#[derive(Error, Debug)]
pub enum McpError {
    /// The server could not be reached or the MCP handshake failed
    #[error("cannot connect to {url}: {message}")]
    Connect { url: String, message: String },

    /// A request on an open session failed
    #[error("{operation} failed: {message}")]
    Request {
        operation: &'static str,
        message: String,
    },

    /// The resource exists but has nothing we can read as text
    #[error("resource {uri} has no text contents")]
    EmptyResource { uri: String },

    /// The backend does not serve this resource
    #[error("unknown resource {uri}")]
    UnknownResource { uri: String },
}

impl McpError {
    fn request(operation: &'static str, error: impl std::fmt::Display) -> Self {
        Self::Request {
            operation,
            message: error.to_string(),
        }
    }
}

pub type McpResult<T> = Result<T, McpError>;

/// Connected MCP session
pub struct McpClient {
    service: RunningService<RoleClient, ClientInfo>,
    url: String,
    logger: Arc<dyn Logger>,
}

impl McpClient {
    /// How this client introduces itself during the handshake
    fn client_info() -> ClientInfo {
        ClientInfo {
            meta: None,
            protocol_version: Default::default(),
            capabilities: ClientCapabilities::default(),
            client_info: Implementation {
                name: "leave-agent".to_string(),
                title: Some("Leave Management Agent".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                website_url: None,
                icons: None,
            },
        }
    }

    /// Open a session with the server at `url`
    pub async fn connect_http(url: &str, logger: Arc<dyn Logger>) -> McpResult<Self> {
        log_debug!(logger, "[McpClient] Connecting to {}", url);

        let transport = StreamableHttpClientTransport::from_uri(url.to_string());
        let service = Self::client_info()
            .serve(transport)
            .await
            .map_err(|e| McpError::Connect {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            service,
            url: url.to_string(),
            logger,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn list_tools(&self) -> McpResult<Vec<Tool>> {
        let result = self
            .service
            .list_tools(Default::default())
            .await
            .map_err(|e| McpError::request("tools/list", e))?;
        Ok(result.tools)
    }

    pub async fn list_resources(&self) -> McpResult<Vec<Resource>> {
        let result = self
            .service
            .list_resources(Default::default())
            .await
            .map_err(|e| McpError::request("resources/list", e))?;
        Ok(result.resources)
    }

    pub async fn list_resource_templates(&self) -> McpResult<Vec<ResourceTemplate>> {
        let result = self
            .service
            .list_resource_templates(Default::default())
            .await
            .map_err(|e| McpError::request("resources/templates/list", e))?;
        Ok(result.resource_templates)
    }

    /// Read a resource; multiple text parts are joined with newlines
    pub async fn read_resource(&self, uri: &str) -> McpResult<String> {
        log_debug!(self.logger, "[McpClient] Reading resource {}", uri);

        let params: ReadResourceRequestParams = serde_json::from_value(json!({ "uri": uri }))
            .map_err(|e| McpError::request("resources/read", e))?;
        let result = self
            .service
            .read_resource(params)
            .await
            .map_err(|e| McpError::request("resources/read", e))?;

        let mut skipped = 0;
        let mut texts = Vec::new();
        for contents in result.contents {
            match contents {
                ResourceContents::TextResourceContents { text, .. } => texts.push(text),
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            log_warn!(
                self.logger,
                "[McpClient] Ignoring {} binary part(s) of {}",
                skipped,
                uri
            );
        }

        if texts.is_empty() {
            return Err(McpError::EmptyResource {
                uri: uri.to_string(),
            });
        }
        Ok(texts.join("\n"))
    }

    /// Call a tool; arguments must be a JSON object or null
    pub async fn call_tool(&self, name: &str, arguments: Value) -> McpResult<CallToolResult> {
        log_debug!(self.logger, "[McpClient] Calling tool {} with {}", name, arguments);

        let params = CallToolRequestParams {
            meta: None,
            name: name.to_owned().into(),
            arguments: arguments.as_object().cloned(),
            task: None,
        };

        self.service
            .call_tool(params)
            .await
            .map_err(|e| McpError::request("tools/call", e))
    }

    /// Name and version the server reported during the handshake
    pub fn server_info(&self) -> Option<&Implementation> {
        self.service.peer_info().map(|info| &info.server_info)
    }

    /// End the session
    pub async fn close(self) -> McpResult<()> {
        log_debug!(self.logger, "[McpClient] Closing session with {}", self.url);
        self.service
            .cancel()
            .await
            .map_err(|e| McpError::request("close", e))?;
        Ok(())
    }
}

/// Text blocks of a tool result, newline separated
pub fn tool_result_text(result: &CallToolResult) -> String {
    result
        .content
        .iter()
        .filter_map(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}
