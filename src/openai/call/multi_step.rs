use crate::config::Config;
use crate::openai::tools::ToolDefinition;
use crate::openai::ConversationHistory;
use color_eyre::Result;
use tokio::runtime::Runtime;
use tracing::{debug, info, instrument};

use super::proposer::propose_tool_call;
use super::resolver::resolve_and_execute_tool_call;
use super::types::{MultiStepAnswer, MultiStepLogEvent, ToolCallDecision, ToolResolution};

/// Propose → execute → feed back, until the model answers in text or
/// `config.max_loops` rounds have run.
///
/// Only the OpenAI call runs on the Tokio runtime; tools execute on the calling
/// thread, since the realtor client is blocking.
#[instrument(name = "multi_step_tool_answer_blocking", skip(tools, config))]
pub fn multi_step_tool_answer_blocking(
    question: &str,
    tools: &[ToolDefinition],
    config: &Config,
) -> Result<MultiStepAnswer> {
    multi_step_tool_answer_with_logger(question, tools, config, |_| {})
}

#[instrument(name = "multi_step_tool_answer_with_logger", skip(tools, config, logger))]
pub fn multi_step_tool_answer_with_logger(
    question: &str,
    tools: &[ToolDefinition],
    config: &Config,
    mut logger: impl FnMut(&MultiStepLogEvent),
) -> Result<MultiStepAnswer> {
    let mut emit = |ev: MultiStepLogEvent| {
        debug!(target: "openai", event = %ev, "multi_step_event");
        logger(&ev);
    };

    let rt = Runtime::new()?;
    let max_loops = config.max_loops.max(1);
    let mut history = ConversationHistory::with_default_system()?;
    history.add_user(question)?;
    let mut steps: Vec<ToolResolution> = Vec::new();

    info!(target: "openai", model = %config.model, max_loops, tools = tools.len(), "multi_step_start");
    for iteration in 1..=max_loops {
        emit(MultiStepLogEvent::IterationStart { iteration });
        let decision = rt.block_on(propose_tool_call(&history, tools, config))?;
        emit(MultiStepLogEvent::Proposed { iteration, decision: decision.clone() });

        match decision {
            ToolCallDecision::Text(text) => {
                emit(MultiStepLogEvent::FinalText { iteration, text: text.clone() });
                info!(target: "openai", iterations = iteration, steps = steps.len(), "multi_step_done");
                return Ok(MultiStepAnswer { final_answer: text, steps, iterations: iteration, truncated: false });
            }
            ToolCallDecision::ToolCall { id, name, arguments } => {
                let resolution = resolve_and_execute_tool_call(
                    ToolCallDecision::ToolCall { id: id.clone(), name: name.clone(), arguments: arguments.clone() },
                    tools,
                );
                emit(MultiStepLogEvent::Resolved { iteration, resolution: resolution.clone() });
                // Failures go back to the model too, so it can retry with other arguments.
                history.add_tool_exchange(&id, &name, &arguments, &resolution.as_tool_message())?;
                steps.push(resolution);
            }
        }
    }

    emit(MultiStepLogEvent::Truncated { max_loops });
    let final_answer = format!(
        "Stopped after {max_loops} tool rounds without a final answer. Tool results so far:\n{}",
        steps.iter().enumerate().map(|(i, s)| format!("[{}] {}", i + 1, s)).collect::<Vec<_>>().join("\n")
    );
    Ok(MultiStepAnswer { final_answer, steps, iterations: max_loops, truncated: true })
}
