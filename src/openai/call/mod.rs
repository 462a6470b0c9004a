// Tool-calling: decision types, proposer, resolver and the multi-step loop.

pub mod types;
pub mod proposer;
pub mod resolver;
pub mod multi_step;

pub use types::{ToolCallDecision, ToolResolution, MultiStepAnswer, MultiStepLogEvent};
pub use proposer::propose_tool_call;
pub use resolver::resolve_and_execute_tool_call;
pub use multi_step::{multi_step_tool_answer_blocking, multi_step_tool_answer_with_logger};
