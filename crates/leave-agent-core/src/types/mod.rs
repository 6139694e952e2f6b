//! Core types for agent interactions
//!
//! This module contains the shared types passed between the registry,
//! the tool backends, the providers and the agent loop.

mod message;
mod tool;

pub use message::{AssistantTurn, MessageRole, ToolTurn, Turn};
pub use tool::{
    FunctionSpec, ModelToolSpec, ResourceDescriptor, ResourceTemplateDescriptor, ToolCall,
    ToolCallId, ToolDescriptor, ToolInvocationResult, ToolStatus,
};
