//! Tool registry for LLM tool calling
//!
//! The ToolRegistry is responsible for:
//! - Discovering available tools and resources from a backend, once
//! - Converting tools to the function-calling format the model expects

use std::sync::Arc;

use serde_json::{json, Map, Value};

use super::backend::{Discovery, ToolBackend};
use crate::logging::Logger;
use crate::mcp::McpResult;
use crate::types::{
    ModelToolSpec, ResourceDescriptor, ResourceTemplateDescriptor, ToolDescriptor,
};
use crate::{log_debug, log_error, log_info};

/// Fill in the structure model providers insist on.
///
/// The result always has `"type"`, `"properties"` and `"required"`; values
/// already present are kept as they are.
pub fn normalize_parameters(schema: Option<&Value>) -> Value {
    let mut params = match schema {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    };

    params
        .entry("type")
        .or_insert_with(|| Value::String("object".to_string()));
    params
        .entry("properties")
        .or_insert_with(|| Value::Object(Map::new()));
    params
        .entry("required")
        .or_insert_with(|| Value::Array(Vec::new()));

    Value::Object(params)
}

/// Convert a discovered tool into a function-calling tool spec
pub fn to_model_spec(tool: &ToolDescriptor) -> ModelToolSpec {
    ModelToolSpec::function(
        tool.name.clone(),
        tool.description.clone(),
        normalize_parameters(tool.parameter_schema.as_ref()),
    )
}

/// Tools and resources discovered at startup.
///
/// Immutable once built; shared read-only with the completion client.
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
    resources: Vec<ResourceDescriptor>,
    resource_templates: Vec<ResourceTemplateDescriptor>,
    specs: Vec<ModelToolSpec>,
}

impl ToolRegistry {
    /// Build a registry from a discovery result
    pub fn new(discovery: Discovery) -> Self {
        let specs = discovery.tools.iter().map(to_model_spec).collect();
        Self {
            tools: discovery.tools,
            resources: discovery.resources,
            resource_templates: discovery.resource_templates,
            specs,
        }
    }

    /// Discover tools from a backend and build the registry
    pub async fn discover(backend: &dyn ToolBackend, logger: Arc<dyn Logger>) -> McpResult<Self> {
        let discovery = match backend.discover().await {
            Ok(discovery) => discovery,
            Err(e) => {
                log_error!(
                    logger,
                    "[ToolRegistry] Failed to discover tools from {}: {}",
                    backend.name(),
                    e
                );
                return Err(e);
            }
        };

        log_info!(
            logger,
            "[ToolRegistry] Discovered {} tools, {} resources, {} resource templates from {}",
            discovery.tools.len(),
            discovery.resources.len(),
            discovery.resource_templates.len(),
            backend.name()
        );

        for tool in &discovery.tools {
            log_debug!(
                logger,
                "[ToolRegistry] Tool: {}",
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "inputSchema": tool.parameter_schema,
                })
            );
        }
        for resource in &discovery.resources {
            log_debug!(
                logger,
                "[ToolRegistry] Resource: {} ({})",
                resource.uri, resource.name
            );
        }
        for template in &discovery.resource_templates {
            log_debug!(
                logger,
                "[ToolRegistry] Resource template: {} ({})",
                template.uri_template, template.name
            );
        }

        Ok(Self::new(discovery))
    }

    /// Discovered tools
    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Discovered resources
    pub fn resources(&self) -> &[ResourceDescriptor] {
        &self.resources
    }

    /// Discovered resource templates
    pub fn resource_templates(&self) -> &[ResourceTemplateDescriptor] {
        &self.resource_templates
    }

    /// Tools in the format sent to the model
    pub fn model_specs(&self) -> &[ModelToolSpec] {
        &self.specs
    }

    /// Whether a tool with this name was discovered
    pub fn contains(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t.name == name)
    }

    /// Get count of available tools
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::LocalToolBackend;
    use crate::logging::NoOpLogger;

    #[test]
    fn test_normalize_fills_missing_structure() {
        let cases = [
            None,
            Some(json!({})),
            Some(json!({"properties": {"x": {"type": "string"}}})),
            Some(json!({"type": "object", "required": ["x"]})),
            Some(json!("not a schema")),
        ];

        for schema in cases {
            let params = normalize_parameters(schema.as_ref());
            assert_eq!(params["type"], "object", "schema: {:?}", schema);
            assert!(params["properties"].is_object(), "schema: {:?}", schema);
            assert!(params["required"].is_array(), "schema: {:?}", schema);
        }
    }

    #[test]
    fn test_normalize_keeps_existing_values() {
        let schema = json!({
            "type": "object",
            "properties": {"employee_id": {"type": "string"}},
            "required": ["employee_id"],
            "additionalProperties": false
        });
        assert_eq!(normalize_parameters(Some(&schema)), schema);
    }

    #[test]
    fn test_to_model_spec() {
        let tool = ToolDescriptor::new("get_employee_leave_balance", "Gets the leave balance");
        let spec = to_model_spec(&tool);

        assert_eq!(spec.kind, "function");
        assert_eq!(spec.name(), "get_employee_leave_balance");
        assert_eq!(spec.function.description, "Gets the leave balance");
        assert_eq!(
            spec.function.parameters,
            json!({"type": "object", "properties": {}, "required": []})
        );
    }

    #[test]
    fn test_registry_maps_every_tool() {
        let registry = ToolRegistry::new(Discovery {
            tools: vec![
                ToolDescriptor::new("a", "first"),
                ToolDescriptor::new("b", "second").with_schema(json!({"type": "object"})),
            ],
            ..Default::default()
        });

        assert_eq!(registry.tool_count(), 2);
        assert_eq!(registry.model_specs().len(), 2);
        assert!(registry.contains("b"));
        assert!(!registry.contains("c"));
    }

    #[tokio::test]
    async fn test_discover_from_local_backend() {
        let backend = LocalToolBackend::demo(NoOpLogger::shared());
        let registry = ToolRegistry::discover(&backend, NoOpLogger::shared())
            .await
            .unwrap();

        assert_eq!(registry.tool_count(), 2);
        assert_eq!(registry.resources().len(), 1);
        assert!(registry.resource_templates().is_empty());
    }
}
