use serde_json::Value;
use std::fmt::{self, Display};

/// What the model answered: plain text, or a request to run one tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCallDecision {
    Text(String),
    ToolCall { id: String, name: String, arguments: String },
}

/// Outcome of dispatching a [`ToolCallDecision`] against the known tools.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResolution {
    ModelText(String),
    Executed { name: String, result: Value },
    ToolNotFound { requested: String },
    ArgumentsParseError { name: String, raw: String, error: String },
    ExecutionError { name: String, error: String },
}

impl ToolResolution {
    /// Text handed back to the model as the tool message content.
    pub fn as_tool_message(&self) -> String {
        match self {
            ToolResolution::Executed { result, .. } => result.to_string(),
            ToolResolution::ModelText(t) => t.clone(),
            ToolResolution::ToolNotFound { requested } => {
                serde_json::json!({ "error": format!("unknown tool {requested}") }).to_string()
            }
            ToolResolution::ArgumentsParseError { error, .. } => {
                serde_json::json!({ "error": format!("arguments are not valid JSON: {error}") }).to_string()
            }
            ToolResolution::ExecutionError { error, .. } => {
                serde_json::json!({ "error": error }).to_string()
            }
        }
    }
}

// Display keeps raw newlines so `%decision` in logs stays readable.
impl Display for ToolCallDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolCallDecision::Text(t) => write!(f, "Text(len={}):\n{}", t.len(), t),
            ToolCallDecision::ToolCall { id, name, arguments } => {
                write!(f, "ToolCall id={} name={} args={}", id, name, arguments)
            }
        }
    }
}

impl Display for ToolResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolResolution::ModelText(t) => write!(f, "ModelText(len={}):\n{}", t.len(), t),
            ToolResolution::Executed { name, result } => {
                write!(f, "Executed name={} result_len={}", name, result.to_string().len())
            }
            ToolResolution::ToolNotFound { requested } => write!(f, "ToolNotFound requested={}", requested),
            ToolResolution::ArgumentsParseError { name, raw, error } => {
                write!(f, "ArgumentsParseError name={} error={} raw={}", name, error, raw)
            }
            ToolResolution::ExecutionError { name, error } => {
                write!(f, "ExecutionError name={} error={}", name, error)
            }
        }
    }
}

/// Final text plus every tool step taken to get there.
#[derive(Debug, Clone)]
pub struct MultiStepAnswer {
    pub final_answer: String,
    pub steps: Vec<ToolResolution>,
    pub iterations: usize,
    /// Loop limit reached before the model answered in text
    pub truncated: bool,
}

#[derive(Debug, Clone)]
pub enum MultiStepLogEvent {
    IterationStart { iteration: usize },
    Proposed { iteration: usize, decision: ToolCallDecision },
    Resolved { iteration: usize, resolution: ToolResolution },
    FinalText { iteration: usize, text: String },
    Truncated { max_loops: usize },
}

impl Display for MultiStepLogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MultiStepLogEvent::IterationStart { iteration } => write!(f, "IterationStart #{}", iteration),
            MultiStepLogEvent::Proposed { iteration, decision } => write!(f, "Proposed @{} => {}", iteration, decision),
            MultiStepLogEvent::Resolved { iteration, resolution } => write!(f, "Resolved @{} => {}", iteration, resolution),
            MultiStepLogEvent::FinalText { iteration, text } => write!(f, "FinalText @{} len={}", iteration, text.len()),
            MultiStepLogEvent::Truncated { max_loops } => write!(f, "Truncated after {} loops", max_loops),
        }
    }
}
