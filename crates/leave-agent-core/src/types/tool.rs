//! Tool/function calling types

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Tool as advertised by the tool backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Tool name (function name)
    pub name: String,
    /// Description of what the tool does
    pub description: String,
    /// JSON Schema for the input parameters
    #[serde(rename = "inputSchema", skip_serializing_if = "Option::is_none")]
    pub parameter_schema: Option<Value>,
}

impl ToolDescriptor {
    /// Create a new tool descriptor
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameter_schema: None,
        }
    }

    /// Set the input schema
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.parameter_schema = Some(schema);
        self
    }
}

/// Static resource advertised by the tool backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    pub uri: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Parameterised resource advertised by the tool backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceTemplateDescriptor {
    #[serde(rename = "uriTemplate")]
    pub uri_template: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Function definition inside a [`ModelToolSpec`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSpec {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Tool encoded in the function-calling format the model expects
///
/// `{"type": "function", "function": {"name", "description", "parameters"}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelToolSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub function: FunctionSpec,
}

impl ModelToolSpec {
    /// Create a function tool spec
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        Self {
            kind: "function".to_string(),
            function: FunctionSpec {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }

    /// Function name
    pub fn name(&self) -> &str {
        &self.function.name
    }
}

/// Identifier the provider assigned to a tool call.
///
/// Only stored and replayed; never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolCallId(String);

impl ToolCallId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ToolCallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tool call from the LLM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for this tool call
    pub id: ToolCallId,
    /// Name of the tool being called
    pub name: String,
    /// Arguments exactly as the provider sent them (JSON text)
    pub arguments: String,
}

impl ToolCall {
    /// Create a new tool call
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: ToolCallId::new(id),
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    /// Decode the arguments into a JSON object
    pub fn decode_arguments(&self) -> Result<serde_json::Map<String, Value>, serde_json::Error> {
        if self.arguments.trim().is_empty() {
            return Ok(serde_json::Map::new());
        }
        serde_json::from_str(&self.arguments)
    }
}

/// Outcome status of a tool invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    Success,
    Error,
}

/// Result of a single tool invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocationResult {
    pub status: ToolStatus,
    pub payload: Value,
}

impl ToolInvocationResult {
    /// Create a successful result
    pub fn success(payload: Value) -> Self {
        Self {
            status: ToolStatus::Success,
            payload,
        }
    }

    /// Create an error result carrying a description
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            status: ToolStatus::Error,
            payload: Value::String(description.into()),
        }
    }

    /// Create an error result with a structured payload
    pub fn error_payload(payload: Value) -> Self {
        Self {
            status: ToolStatus::Error,
            payload,
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == ToolStatus::Error
    }

    /// Text handed to the model in the tool turn
    pub fn content_text(&self) -> String {
        match &self.payload {
            Value::String(text) => text.clone(),
            Value::Null => json!({ "status": self.status }).to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_descriptor_creation() {
        let tool = ToolDescriptor::new("get_employee_leave_balance", "Gets the leave balance")
            .with_schema(json!({
                "type": "object",
                "properties": {
                    "employee_id": { "type": "string" }
                },
                "required": ["employee_id"]
            }));

        assert_eq!(tool.name, "get_employee_leave_balance");
        assert!(tool.parameter_schema.is_some());
    }

    #[test]
    fn test_model_tool_spec_serialization() {
        let spec = ModelToolSpec::function("f", "does f", json!({"type": "object"}));
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["type"], "function");
        assert_eq!(value["function"]["name"], "f");
        assert_eq!(value["function"]["parameters"]["type"], "object");
    }

    #[test]
    fn test_decode_arguments() {
        let call = ToolCall::new("call_1", "get_employee_leave_balance", r#"{"employee_id":"1001"}"#);
        let args = call.decode_arguments().unwrap();
        assert_eq!(args.get("employee_id"), Some(&json!("1001")));

        let empty = ToolCall::new("call_2", "noop", "");
        assert!(empty.decode_arguments().unwrap().is_empty());

        let broken = ToolCall::new("call_3", "noop", "{employee_id:");
        assert!(broken.decode_arguments().is_err());

        let not_object = ToolCall::new("call_4", "noop", "[1, 2]");
        assert!(not_object.decode_arguments().is_err());
    }

    #[test]
    fn test_tool_result_content() {
        let success = ToolInvocationResult::success(json!({"status": "success", "leave_balance": 15}));
        assert!(!success.is_error());
        assert!(success.content_text().contains("\"leave_balance\":15"));

        let error = ToolInvocationResult::error("Error: connection refused");
        assert!(error.is_error());
        assert_eq!(error.content_text(), "Error: connection refused");
    }
}
