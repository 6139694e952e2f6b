//! Conversation turn types

use serde::{Deserialize, Serialize};

use super::tool::{ToolCall, ToolCallId};

/// Message role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    Tool,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
            MessageRole::Tool => write!(f, "tool"),
        }
    }
}

/// What the assistant said on its turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssistantTurn {
    /// Natural-language reply
    Reply { text: String },
    /// Tool call request, replayed verbatim to the provider on the next request
    ToolCall {
        #[serde(rename = "toolCall")]
        tool_call: ToolCall,
    },
}

/// Result of a tool call, answering the assistant turn that requested it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolTurn {
    /// Name of the tool that produced the result
    #[serde(rename = "toolName")]
    pub tool_name: String,
    /// Id of the assistant tool call this result answers
    #[serde(rename = "toolCallId")]
    pub call_id: ToolCallId,
    /// Result text handed to the model
    pub content: String,
}

/// A single entry of the conversation transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Turn {
    System { content: String },
    User { content: String },
    Assistant(AssistantTurn),
    Tool(ToolTurn),
}

impl Turn {
    /// Create a system turn
    pub fn system(content: impl Into<String>) -> Self {
        Turn::System {
            content: content.into(),
        }
    }

    /// Create a user turn
    pub fn user(content: impl Into<String>) -> Self {
        Turn::User {
            content: content.into(),
        }
    }

    /// Create an assistant reply turn
    pub fn assistant(text: impl Into<String>) -> Self {
        Turn::Assistant(AssistantTurn::Reply { text: text.into() })
    }

    /// Create an assistant turn requesting a tool call
    pub fn assistant_tool_call(tool_call: ToolCall) -> Self {
        Turn::Assistant(AssistantTurn::ToolCall { tool_call })
    }

    /// Create a tool result turn
    pub fn tool_result(
        tool_name: impl Into<String>,
        call_id: ToolCallId,
        content: impl Into<String>,
    ) -> Self {
        Turn::Tool(ToolTurn {
            tool_name: tool_name.into(),
            call_id,
            content: content.into(),
        })
    }

    /// Role of the turn
    pub fn role(&self) -> MessageRole {
        match self {
            Turn::System { .. } => MessageRole::System,
            Turn::User { .. } => MessageRole::User,
            Turn::Assistant(_) => MessageRole::Assistant,
            Turn::Tool(_) => MessageRole::Tool,
        }
    }

    /// Get the text content, if the turn carries plain text
    pub fn text(&self) -> Option<&str> {
        match self {
            Turn::System { content } | Turn::User { content } => Some(content),
            Turn::Assistant(AssistantTurn::Reply { text }) => Some(text),
            Turn::Assistant(AssistantTurn::ToolCall { .. }) => None,
            Turn::Tool(tool) => Some(&tool.content),
        }
    }

    /// Get the tool call if this is an assistant tool-call turn
    pub fn as_tool_call(&self) -> Option<&ToolCall> {
        match self {
            Turn::Assistant(AssistantTurn::ToolCall { tool_call }) => Some(tool_call),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_creation() {
        let sys = Turn::system("You are helpful");
        assert_eq!(sys.role(), MessageRole::System);
        assert_eq!(sys.text(), Some("You are helpful"));

        let user = Turn::user("Hello");
        assert_eq!(user.role(), MessageRole::User);

        let asst = Turn::assistant("Hi there!");
        assert_eq!(asst.role(), MessageRole::Assistant);
        assert_eq!(asst.text(), Some("Hi there!"));
    }

    #[test]
    fn test_tool_call_turn_has_no_text() {
        let call = ToolCall::new("call_1", "get_employee_leave_balance", r#"{"employee_id":"1001"}"#);
        let turn = Turn::assistant_tool_call(call);
        assert_eq!(turn.role(), MessageRole::Assistant);
        assert!(turn.text().is_none());
        assert_eq!(turn.as_tool_call().map(|c| c.id.as_str()), Some("call_1"));
    }

    #[test]
    fn test_turn_serialization() {
        let json = serde_json::to_string(&Turn::user("Hello")).unwrap();
        assert!(json.contains("\"role\":\"user\""));
        assert!(json.contains("\"content\":\"Hello\""));

        let tool = Turn::tool_result("get_employee_leaves_taken", ToolCallId::new("c9"), "{}");
        let json = serde_json::to_string(&tool).unwrap();
        assert!(json.contains("\"role\":\"tool\""));
        assert!(json.contains("\"toolCallId\":\"c9\""));
    }
}
