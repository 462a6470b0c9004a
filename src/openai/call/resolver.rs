use serde_json::Value;
use tracing::{debug, warn};

use crate::openai::tools::ToolDefinition;

use super::types::{ToolCallDecision, ToolResolution};

/// Find the requested tool by name, parse its JSON arguments and run it.
/// Never panics; every failure is a [`ToolResolution`] variant.
pub fn resolve_and_execute_tool_call(
    decision: ToolCallDecision,
    tools: &[ToolDefinition],
) -> ToolResolution {
    match decision {
        ToolCallDecision::Text(t) => ToolResolution::ModelText(t),
        ToolCallDecision::ToolCall { name, arguments, .. } => {
            let tool = match tools.iter().find(|d| d.name == name) {
                Some(t) => t,
                None => return ToolResolution::ToolNotFound { requested: name },
            };
            // Models occasionally send "" for a no-argument call.
            let raw = if arguments.trim().is_empty() { "{}" } else { arguments.as_str() };
            let parsed: Value = match serde_json::from_str(raw) {
                Ok(v) => v,
                Err(e) => {
                    return ToolResolution::ArgumentsParseError {
                        name: tool.name.to_string(),
                        raw: arguments,
                        error: e.to_string(),
                    };
                }
            };
            match tool.execute(&parsed) {
                Ok(v) => {
                    debug!(target: "openai", tool = tool.name, "tool_executed");
                    ToolResolution::Executed { name: tool.name.to_string(), result: v }
                }
                Err(e) => {
                    warn!(target: "openai", tool = tool.name, error = %e, "tool_failed");
                    ToolResolution::ExecutionError { name: tool.name.to_string(), error: e.to_string() }
                }
            }
        }
    }
}
