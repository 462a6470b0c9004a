use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionToolType, FunctionCall,
};
use color_eyre::Result;

/// Default system prompt for the realtor assistant.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a concise real-estate assistant. \
Use the available tools to look up listings; resolve an address to a property id before calling \
property-id tools. Answer from tool results only.";

/// Ordered chat history sent with every proposal.
///
/// Invariant: the system message, when set, is always first; push order is send order.
#[derive(Debug, Default, Clone)]
pub struct ConversationHistory {
    system: Option<ChatCompletionRequestMessage>,
    messages: Vec<ChatCompletionRequestMessage>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system<S: AsRef<str>>(prompt: S) -> Result<Self> {
        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(prompt.as_ref())
            .build()?;
        Ok(Self { system: Some(system.into()), messages: Vec::new() })
    }

    pub fn with_default_system() -> Result<Self> {
        Self::with_system(DEFAULT_SYSTEM_PROMPT)
    }

    /// Number of non-system messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// System message (if any) followed by the history, ready for a request.
    pub fn as_slice_with_system(&self) -> Vec<ChatCompletionRequestMessage> {
        self.system.iter().cloned().chain(self.messages.iter().cloned()).collect()
    }

    pub fn add_user<S: AsRef<str>>(&mut self, content: S) -> Result<&mut Self> {
        let msg = ChatCompletionRequestUserMessageArgs::default()
            .content(content.as_ref())
            .build()?;
        self.messages.push(msg.into());
        Ok(self)
    }

    pub fn add_assistant<S: AsRef<str>>(&mut self, content: S) -> Result<&mut Self> {
        let msg = ChatCompletionRequestAssistantMessageArgs::default()
            .content(content.as_ref())
            .build()?;
        self.messages.push(msg.into());
        Ok(self)
    }

    /// Record the assistant's tool call and the tool's JSON result as a pair.
    pub fn add_tool_exchange(
        &mut self,
        call_id: &str,
        name: &str,
        arguments: &str,
        result: &str,
    ) -> Result<&mut Self> {
        let call = ChatCompletionMessageToolCall {
            id: call_id.to_string(),
            r#type: ChatCompletionToolType::Function,
            function: FunctionCall { name: name.to_string(), arguments: arguments.to_string() },
        };
        let assistant = ChatCompletionRequestAssistantMessageArgs::default()
            .tool_calls(vec![call])
            .build()?;
        let tool = ChatCompletionRequestToolMessageArgs::default()
            .tool_call_id(call_id)
            .content(result)
            .build()?;
        self.messages.push(assistant.into());
        self.messages.push(tool.into());
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_and_length() -> Result<()> {
        let mut h = ConversationHistory::new();
        assert!(h.is_empty());
        h.add_user("hello")?.add_assistant("hi")?;
        assert_eq!(h.len(), 2);
        assert_eq!(h.as_slice_with_system().len(), 2);
        Ok(())
    }

    #[test]
    fn system_comes_first_and_tool_exchange_is_paired() -> Result<()> {
        let mut h = ConversationHistory::with_default_system()?;
        h.add_user("homes in 78701?")?;
        h.add_tool_exchange("call_1", "get_listings_by_postal_code", r#"{"postal_code":"78701"}"#, "[]")?;
        let all = h.as_slice_with_system();
        assert_eq!(all.len(), 4);
        assert!(matches!(all[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(all[1], ChatCompletionRequestMessage::User(_)));
        assert!(matches!(all[2], ChatCompletionRequestMessage::Assistant(_)));
        assert!(matches!(all[3], ChatCompletionRequestMessage::Tool(_)));
        Ok(())
    }
}
