// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Reliability Sentinel Trace Model
// ─────────────────────────────────────────────────────────────────────
//! Immutable value objects describing one recorded agent execution.
//!
//! Message order is chronological order. All derived views are
//! recomputed on every call and never cached.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{SentinelError, SentinelResult};

/// Decode an absent or `null` JSON object as an empty map.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Map<String, Value>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Message author role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
    Tool,
}

/// A single tool invocation requested by the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub tool_name: String,
    /// `null` decodes as empty, which the misuse signal counts as a
    /// malformed call.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub arguments: Map<String, Value>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub call_id: Option<String>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments,
            timestamp: None,
            call_id: None,
        }
    }

    pub fn with_call_id(mut self, call_id: impl Into<String>) -> Self {
        self.call_id = Some(call_id.into());
        self
    }
}

/// Outcome of a tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    #[serde(default)]
    pub call_id: Option<String>,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl ToolResult {
    pub fn new(call_id: Option<&str>, success: bool) -> Self {
        Self {
            call_id: call_id.map(str::to_string),
            success,
            result: None,
            error: None,
            timestamp: None,
        }
    }
}

/// One conversational turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
    #[serde(default)]
    pub tool_results: Vec<ToolResult>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_results: Vec::new(),
            timestamp: None,
        }
    }

    pub fn with_tool_calls(mut self, tool_calls: Vec<ToolCall>) -> Self {
        self.tool_calls = tool_calls;
        self
    }

    pub fn with_tool_results(mut self, tool_results: Vec<ToolResult>) -> Self {
        self.tool_results = tool_results;
        self
    }
}

/// Token accounting. `total_tokens` is authoritative on its own and is
/// never reconciled against prompt + completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u64, completion_tokens: u64, total_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens,
        }
    }
}

fn default_token_usage() -> Option<TokenUsage> {
    Some(TokenUsage::default())
}

/// Complete execution trace of one agent run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionTrace {
    /// Absent ids decode as empty and are rejected at evaluation time.
    #[serde(default)]
    pub trace_id: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    /// A missing `token_usage` object decodes as zero usage; an explicit
    /// `null` means no usage data at all.
    #[serde(default = "default_token_usage")]
    pub token_usage: Option<TokenUsage>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub metadata: Map<String, Value>,
}

impl ExecutionTrace {
    pub fn new(
        trace_id: impl Into<String>,
        messages: Vec<Message>,
        token_usage: Option<TokenUsage>,
    ) -> Self {
        Self {
            trace_id: trace_id.into(),
            messages,
            token_usage,
            metadata: Map::new(),
        }
    }

    /// All tool calls across messages, in order.
    pub fn tool_calls(&self) -> impl Iterator<Item = &ToolCall> {
        self.messages.iter().flat_map(|m| m.tool_calls.iter())
    }

    /// All tool results across messages, in order.
    pub fn tool_results(&self) -> impl Iterator<Item = &ToolResult> {
        self.messages.iter().flat_map(|m| m.tool_results.iter())
    }

    /// Assistant-role messages, in order.
    pub fn assistant_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.role == Role::Assistant)
    }

    pub fn total_messages(&self) -> usize {
        self.messages.len()
    }

    pub fn total_tool_calls(&self) -> usize {
        self.tool_calls().count()
    }

    /// Total tokens, 0 when no usage was recorded.
    pub fn total_tokens(&self) -> u64 {
        self.token_usage.map_or(0, |u| u.total_tokens)
    }
}

/// Decode a trace document.
///
/// Empty input and a bare JSON `null` are reported as a missing trace
/// rather than a parse failure.
pub fn parse_trace(json: &str) -> SentinelResult<ExecutionTrace> {
    let value: Value = if json.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(json).map_err(|e| SentinelError::Parse(format!("{e}")))?
    };
    if value.is_null() {
        return Err(SentinelError::MissingTrace);
    }
    serde_json::from_value(value).map_err(|e| SentinelError::Parse(format!("{e}")))
}
