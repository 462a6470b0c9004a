use std::sync::Arc;

use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};
use color_eyre::Result;
use serde_json::{json, Map, Value};

/// Handler run when a tool is invoked: JSON arguments in, JSON result out.
pub type ToolHandler = Arc<dyn Fn(&Value) -> Result<Value> + Send + Sync + 'static>;

/// JSON Schema describing a tool's arguments (always an `object` schema).
#[derive(Debug, Clone, PartialEq)]
pub struct ToolParameters(Value);

impl ToolParameters {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Names listed under `required`, in declaration order.
    pub fn required(&self) -> Vec<&str> {
        self.0["required"]
            .as_array()
            .map(|a| a.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Property names in declaration order.
    pub fn property_names(&self) -> Vec<&str> {
        self.0["properties"]
            .as_object()
            .map(|o| o.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// Builder for [`ToolParameters`].
#[derive(Debug, Default)]
pub struct ToolParametersBuilder {
    properties: Map<String, Value>,
    required: Vec<String>,
    additional_properties: Option<bool>,
}

impl ToolParametersBuilder {
    pub fn new_object() -> Self {
        Self::default()
    }

    pub fn add_string(mut self, name: &str, description: Option<&str>) -> Self {
        let mut prop = json!({ "type": "string" });
        if let Some(d) = description {
            prop["description"] = json!(d);
        }
        self.properties.insert(name.to_string(), prop);
        self
    }

    pub fn required(mut self, name: &str) -> Self {
        if !self.required.iter().any(|r| r == name) {
            self.required.push(name.to_string());
        }
        self
    }

    pub fn additional_properties(mut self, allowed: bool) -> Self {
        self.additional_properties = Some(allowed);
        self
    }

    pub fn build(self) -> ToolParameters {
        let mut schema = json!({
            "type": "object",
            "properties": Value::Object(self.properties),
            "required": self.required,
        });
        if let Some(allowed) = self.additional_properties {
            schema["additionalProperties"] = json!(allowed);
        }
        ToolParameters(schema)
    }
}

/// Metadata handed to OpenAI function calling plus the handler that runs it.
#[derive(Clone)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: ToolParameters,
    pub strict: bool,
    handler: ToolHandler,
}

impl std::fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .field("strict", &self.strict)
            .finish()
    }
}

impl ToolDefinition {
    pub fn new(
        name: &'static str,
        description: &'static str,
        parameters: ToolParameters,
        handler: ToolHandler,
    ) -> Self {
        Self { name, description, parameters, strict: false, handler }
    }

    /// Set the OpenAI strict function-calling flag.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn function_object(&self) -> FunctionObject {
        FunctionObject {
            name: self.name.to_string(),
            description: Some(self.description.to_string()),
            parameters: Some(self.parameters.as_value().clone()),
            strict: Some(self.strict),
        }
    }

    /// `ChatCompletionTool` form for the `tools` field of a chat request.
    pub fn as_chat_tool(&self) -> ChatCompletionTool {
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: self.function_object(),
        }
    }

    pub fn execute(&self, args: &Value) -> Result<Value> {
        (self.handler)(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_definition_executes_closure() -> Result<()> {
        let params = ToolParametersBuilder::new_object()
            .add_string("word", Some("Word to measure"))
            .required("word")
            .build();
        let tool = ToolDefinition::new(
            "word_len",
            "Return the length of a word",
            params,
            Arc::new(|v| {
                let w = v
                    .get("word")
                    .and_then(Value::as_str)
                    .ok_or_else(|| color_eyre::eyre::eyre!("missing word"))?;
                Ok(json!({ "len": w.len() }))
            }),
        );

        let out = tool.execute(&json!({"word": "house"}))?;
        assert_eq!(out["len"], 5);
        assert!(tool.execute(&json!({})).is_err());

        let chat_tool = tool.with_strict(true).as_chat_tool();
        assert_eq!(chat_tool.function.name, "word_len");
        assert_eq!(chat_tool.function.strict, Some(true));
        Ok(())
    }

    #[test]
    fn builder_keeps_declaration_order_and_dedups_required() {
        let params = ToolParametersBuilder::new_object()
            .add_string("property_id", None)
            .add_string("destination_address", Some("Where to"))
            .required("property_id")
            .required("destination_address")
            .required("property_id")
            .additional_properties(false)
            .build();
        assert_eq!(params.property_names(), ["property_id", "destination_address"]);
        assert_eq!(params.required(), ["property_id", "destination_address"]);
        let v = params.as_value();
        assert_eq!(v["type"], "object");
        assert_eq!(v["additionalProperties"], false);
        assert_eq!(v["properties"]["destination_address"]["description"], "Where to");
        assert!(v["properties"]["property_id"].get("description").is_none());
    }
}
