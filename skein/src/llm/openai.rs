//! OpenAI Chat Completions client implementing `LlmClient` (ChatOpenAI).
//!
//! Requires `OPENAI_API_KEY` (or explicit config; `OPENAI_BASE_URL` /
//! `OPENAI_API_BASE` select a compatible endpoint). The request's tool schemas
//! are sent as function tools; when present, the API may return tool calls in
//! the reply. All transport and API failures surface as `LlmError` and are
//! recovered by the calling agent node.
//!
//! **Interaction**: implements `LlmClient`; used by `AgentNode` like `MockLlm`.
//! Depends on `async_openai`.

use async_trait::async_trait;
use tracing::{debug, trace, warn};

use crate::message::{Message, ToolCall};

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionMessageToolCalls, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessage, ChatCompletionRequestUserMessage, ChatCompletionTool,
        ChatCompletionTools, CreateChatCompletionRequestArgs, FunctionObject,
    },
    Client,
};

use super::{AgentReply, ChatRequest, LlmClient, LlmError};

/// OpenAI Chat Completions client.
///
/// Uses `OPENAI_API_KEY` from the environment by default; or provide config
/// via `ChatOpenAI::with_config`. Tool schemas come from each `ChatRequest`,
/// so one client serves agent nodes with different capability lists.
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: Option<f32>,
}

impl ChatOpenAI {
    /// Client with default config (API key from `OPENAI_API_KEY`).
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            model: model.into(),
            temperature: None,
        }
    }

    /// Client with custom config (e.g. explicit API key or base URL).
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(config),
            model: model.into(),
            temperature: None,
        }
    }

    /// Set temperature (0–2). Lower values are more deterministic.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Convert the request (system + history) to OpenAI chat messages.
    ///
    /// Tool results are rendered as user-visible text, the same shape the
    /// model would see from a manual transcript.
    fn messages_to_request(request: &ChatRequest<'_>) -> Vec<ChatCompletionRequestMessage> {
        let mut out = Vec::with_capacity(request.history.len() + 1);
        out.push(ChatCompletionRequestMessage::System(
            ChatCompletionRequestSystemMessage::from(request.system),
        ));
        for message in request.history {
            out.push(match message {
                Message::Human(s) => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(s.as_str()),
                ),
                Message::Agent { content, .. } => {
                    ChatCompletionRequestMessage::Assistant((content.as_str()).into())
                }
                Message::ToolResult { name, content } => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(
                        format!("Tool {} result: {}", name, content).as_str(),
                    ),
                ),
            });
        }
        out
    }

    /// Parse a tool-call argument string to a JSON mapping; malformed
    /// arguments degrade to an empty object with a warning.
    fn parse_arguments(raw: &str) -> serde_json::Value {
        if raw.trim().is_empty() {
            return serde_json::json!({});
        }
        match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, arguments = %raw, "tool arguments JSON parse failed, using empty object");
                serde_json::json!({})
            }
        }
    }
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn complete(&self, request: ChatRequest<'_>) -> Result<AgentReply, LlmError> {
        let openai_messages = Self::messages_to_request(&request);
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone());
        args.messages(openai_messages);

        if !request.tools.is_empty() {
            let chat_tools: Vec<ChatCompletionTools> = request
                .tools
                .iter()
                .map(|t| {
                    ChatCompletionTools::Function(ChatCompletionTool {
                        function: FunctionObject {
                            name: t.name.clone(),
                            description: t.description.clone(),
                            parameters: Some(t.input_schema.clone()),
                            ..Default::default()
                        },
                    })
                })
                .collect();
            args.tools(chat_tools);
        }

        if let Some(t) = self.temperature {
            args.temperature(t);
        }

        let api_request = args
            .build()
            .map_err(|e| LlmError::Request(format!("OpenAI request build failed: {}", e)))?;

        debug!(
            model = %self.model,
            message_count = request.history.len(),
            tools_count = request.tools.len(),
            "OpenAI chat create"
        );
        if let Ok(js) = serde_json::to_string(&api_request) {
            trace!(request = %js, "OpenAI request body");
        }

        let response = self
            .client
            .chat()
            .create(api_request)
            .await
            .map_err(|e| LlmError::Api(format!("OpenAI API error: {}", e)))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::EmptyResponse("OpenAI returned no choices".to_string()))?;

        let msg = choice.message;
        let content = msg.content.unwrap_or_default();
        let tool_calls: Vec<ToolCall> = msg
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .filter_map(|tc| {
                if let ChatCompletionMessageToolCalls::Function(f) = tc {
                    Some(ToolCall {
                        name: f.function.name,
                        arguments: Self::parse_arguments(&f.function.arguments),
                        id: Some(f.id),
                    })
                } else {
                    None
                }
            })
            .collect();

        Ok(AgentReply {
            content,
            tool_calls,
            routing: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: System instruction leads, tool results render as user text.
    #[test]
    fn messages_to_request_maps_all_variants() {
        let history = vec![
            Message::human("what time is it?"),
            Message::agent("checking"),
            Message::tool_result("current_datetime", "2026-08-05 10:00:00"),
        ];
        let request = ChatRequest {
            system: "you are helpful",
            history: &history,
            tools: &[],
        };
        let mapped = ChatOpenAI::messages_to_request(&request);
        assert_eq!(mapped.len(), 4, "system + three history messages");
        assert!(matches!(
            mapped[0],
            ChatCompletionRequestMessage::System(_)
        ));
        assert!(matches!(mapped[1], ChatCompletionRequestMessage::User(_)));
        assert!(matches!(
            mapped[2],
            ChatCompletionRequestMessage::Assistant(_)
        ));
        assert!(matches!(mapped[3], ChatCompletionRequestMessage::User(_)));
    }

    /// **Scenario**: Malformed argument strings degrade to an empty object.
    #[test]
    fn parse_arguments_degrades_to_empty_object() {
        assert_eq!(
            ChatOpenAI::parse_arguments("{\"a\": 1}"),
            serde_json::json!({"a": 1})
        );
        assert_eq!(ChatOpenAI::parse_arguments(""), serde_json::json!({}));
        assert_eq!(
            ChatOpenAI::parse_arguments("not json"),
            serde_json::json!({})
        );
    }
}
