use crate::config::Config;
use crate::openai::tools::ToolDefinition;
use crate::openai::ConversationHistory;
use async_openai::types::CreateChatCompletionRequestArgs;
use async_openai::Client;
use color_eyre::Result;
use tracing::{debug, info, instrument};

use super::types::ToolCallDecision;

/// Ask the model for its next move given `history`. Tools are offered but not run.
#[instrument(name = "propose_tool_call", skip_all, fields(history_len = history.len(), tools = tools.len()))]
pub async fn propose_tool_call(
    history: &ConversationHistory,
    tools: &[ToolDefinition],
    config: &Config,
) -> Result<ToolCallDecision> {
    let client = Client::new();

    let mut builder = CreateChatCompletionRequestArgs::default();
    builder
        .model(&config.model)
        .messages(history.as_slice_with_system())
        .max_tokens(config.max_tokens);
    if !tools.is_empty() {
        let tools_for_api: Vec<_> = tools.iter().map(|t| t.as_chat_tool()).collect();
        builder.tools(tools_for_api).tool_choice("auto");
    }
    let req = builder.build()?;

    info!(target: "openai", model = %config.model, max_tokens = config.max_tokens, "propose_tool_call_request");
    let resp = client.chat().create(req).await?;
    debug!(target: "openai", choices = resp.choices.len(), "propose_tool_call_response");

    let Some(choice) = resp.choices.first() else {
        return Ok(ToolCallDecision::Text("(no response)".to_string()));
    };

    if let Some(first) = choice.message.tool_calls.as_ref().and_then(|calls| calls.first()) {
        return Ok(ToolCallDecision::ToolCall {
            id: first.id.clone(),
            name: first.function.name.clone(),
            arguments: first.function.arguments.clone(),
        });
    }

    let text = choice
        .message
        .content
        .clone()
        .unwrap_or_else(|| "(empty response)".to_string());
    Ok(ToolCallDecision::Text(text))
}
