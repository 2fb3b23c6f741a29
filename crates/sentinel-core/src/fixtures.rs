// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Test Fixtures
// ─────────────────────────────────────────────────────────────────────

use serde_json::{Map, Value};

use sentinel_types::{ExecutionTrace, Message, Role, TokenUsage, ToolCall, ToolResult};

pub(crate) fn args(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

pub(crate) fn call(name: &str, arguments: Map<String, Value>, id: Option<&str>) -> ToolCall {
    let call = ToolCall::new(name, arguments);
    match id {
        Some(id) => call.with_call_id(id),
        None => call,
    }
}

pub(crate) fn ok(id: &str) -> ToolResult {
    ToolResult::new(Some(id), true)
}

pub(crate) fn failed(id: &str) -> ToolResult {
    let mut result = ToolResult::new(Some(id), false);
    result.error = Some("tool failed".into());
    result
}

pub(crate) fn user(content: &str) -> Message {
    Message::new(Role::User, content)
}

pub(crate) fn assistant(content: &str) -> Message {
    Message::new(Role::Assistant, content)
}

pub(crate) fn tool(results: Vec<ToolResult>) -> Message {
    Message::new(Role::Tool, "result").with_tool_results(results)
}

pub(crate) fn trace(messages: Vec<Message>) -> ExecutionTrace {
    ExecutionTrace::new("trace-test", messages, Some(TokenUsage::new(100, 50, 150)))
}

pub(crate) fn trace_with_usage(messages: Vec<Message>, usage: TokenUsage) -> ExecutionTrace {
    ExecutionTrace::new("trace-test", messages, Some(usage))
}
