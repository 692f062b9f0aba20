use serde::{Deserialize, Serialize};

/// Message role on the chat-completions wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single prompt message. Prompts are ordered sequences of these, and the
/// first message is always [`Role::System`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Request body for the `/chat/completions` endpoint.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatRequest {
    /// ID of the model to use. Rewritten in place when the fallback attempt
    /// runs.
    pub(crate) model: String,

    pub(crate) temperature: f32,

    pub(crate) messages: Vec<ChatMessage>,

    /// If set, partial message deltas are sent as data-only server-sent
    /// events, terminated by a `data: [DONE]` message.
    pub(crate) stream: bool,

    /// Hint that the reply must be a single JSON object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) response_format: Option<ResponseFormat>,

    /// Positive values nudge the model toward new topics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) presence_penalty: Option<f32>,

    /// Positive values discourage repeating lines verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) frequency_penalty: Option<f32>,
}

impl ChatRequest {
    pub(crate) fn new(model: String, temperature: f32, messages: Vec<ChatMessage>) -> Self {
        Self {
            model,
            temperature,
            messages,
            stream: false,
            response_format: None,
            presence_penalty: None,
            frequency_penalty: None,
        }
    }

    pub(crate) fn json_mode(model: String, temperature: f32, messages: Vec<ChatMessage>) -> Self {
        Self {
            response_format: Some(ResponseFormat::json_object()),
            ..Self::new(model, temperature, messages)
        }
    }

    pub(crate) fn streaming(model: String, temperature: f32, messages: Vec<ChatMessage>) -> Self {
        Self {
            stream: true,
            ..Self::new(model, temperature, messages)
        }
    }

    pub(crate) fn with_penalties(mut self, presence: f32, frequency: f32) -> Self {
        self.presence_penalty = Some(presence);
        self.frequency_penalty = Some(frequency);
        self
    }
}

/// The `response_format` request field.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

impl ResponseFormat {
    fn json_object() -> Self {
        Self { kind: "json_object" }
    }
}

/// Non-streaming response body. Only the first choice is consumed.
#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    pub(crate) choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub(crate) message: ChatMessage,
}

impl ChatResponse {
    pub(crate) fn into_text(self) -> String {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default()
    }
}

/// One streamed SSE event payload.
#[derive(Debug, Deserialize)]
pub(crate) struct StreamChunk {
    #[serde(default)]
    pub(crate) choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChunkChoice {
    #[serde(default)]
    pub(crate) delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ChunkDelta {
    #[serde(default)]
    pub(crate) content: Option<String>,
}

impl StreamChunk {
    /// The text fragment carried by this chunk, if any.
    pub(crate) fn into_content(self) -> Option<String> {
        self.choices.into_iter().next().and_then(|choice| choice.delta.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_documented_wire_shape() {
        let request = ChatRequest::json_mode(
            "4o-nano".to_string(),
            0.7,
            vec![ChatMessage::system("sys"), ChatMessage::user("usr")],
        )
        .with_penalties(0.3, 0.3);

        let value: serde_json::Value = serde_json::from_str(&serde_json::to_string(&request).unwrap()).unwrap();

        assert_eq!(value["model"], "4o-nano");
        assert_eq!(value["stream"], false);
        assert_eq!(value["response_format"]["type"], "json_object");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["presence_penalty"], 0.3);
    }

    #[test]
    fn optional_fields_are_omitted_when_unset() {
        let request = ChatRequest::new("4o-nano".to_string(), 0.6, vec![ChatMessage::system("sys")]);
        let body = serde_json::to_string(&request).unwrap();

        assert!(!body.contains("response_format"));
        assert!(!body.contains("presence_penalty"));
        assert!(!body.contains("frequency_penalty"));
    }

    #[test]
    fn response_text_takes_first_choice() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"first"}},{"message":{"role":"assistant","content":"second"}}]}"#,
        )
        .unwrap();

        assert_eq!(response.into_text(), "first");
    }

    #[test]
    fn empty_choice_list_yields_empty_text() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(response.into_text(), "");
    }

    #[test]
    fn chunk_without_content_yields_none() {
        let chunk: StreamChunk = serde_json::from_str(r#"{"choices":[{"delta":{}}]}"#).unwrap();
        assert!(chunk.into_content().is_none());
    }
}
