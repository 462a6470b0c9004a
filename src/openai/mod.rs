//! Agent-facing surface: tool definitions and the OpenAI tool-calling loop.

pub mod call;
pub mod history;
pub mod tools;

pub use call::{
    multi_step_tool_answer_blocking,
    multi_step_tool_answer_with_logger,
    propose_tool_call,
    resolve_and_execute_tool_call,
    MultiStepAnswer,
    MultiStepLogEvent,
    ToolCallDecision,
    ToolResolution,
};
pub use history::ConversationHistory;
pub use tools::{
    RealtorToolSpec,
    ToolDefinition,
    ToolHandler,
    ToolParameters,
    ToolParametersBuilder,
};
