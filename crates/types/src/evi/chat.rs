//! Chat socket protocol.
//!
//! Every frame is a JSON object tagged by `type`. The server sends
//! [`ServerEvent`]s and the client sends [`ClientEvent`]s. Frames with a
//! `type` this client does not know decode to the `Unknown` arm and can be
//! logged or forwarded unchanged.

use super::audio::{decode_pcm16, encode_pcm16};
use super::tool::ToolType;
use crate::emotion::EmotionScoreMap;
use crate::error::DataError;
use empath_core::{AdditionalProperties, string_enum, tagged_union};
use serde::{Deserialize, Serialize};
use serde_json::Value;

string_enum! {
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub enum Role {
        User = "user",
        Assistant = "assistant",
        System = "system",
        Tool = "tool",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Prosody scores attached to a transcribed or generated message.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProsodyInference {
    pub scores: EmotionScoreMap,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Inference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prosody: Option<ProsodyInference>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MillisecondInterval {
    pub begin: u64,
    pub end: u64,
}

// --- Server Events ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub message: ChatMessage,
    pub models: Inference,
    /// True when the text came from an `assistant_input` rather than the model.
    pub from_text: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_session_id: Option<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// The assistant finished its turn.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssistantEnd {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_session_id: Option<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// A chunk of synthesized speech.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioOutput {
    /// Id of the assistant message this audio belongs to.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    /// Base64 encoded audio.
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_session_id: Option<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl AudioOutput {
    pub fn pcm16(&self) -> Result<Vec<i16>, DataError> {
        decode_pcm16(&self.data)
    }
}

/// First frame of every chat, identifying it for later resumption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMetadata {
    pub chat_group_id: String,
    pub chat_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_session_id: Option<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSocketError {
    pub code: String,
    pub slug: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_session_id: Option<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// The assistant wants a tool run. Arguments arrive as a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallMessage {
    pub name: String,
    pub parameters: String,
    pub tool_call_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_type: Option<ToolType>,
    pub response_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_session_id: Option<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl ToolCallMessage {
    pub fn arguments(&self) -> Result<Value, DataError> {
        serde_json::from_str(&self.parameters).map_err(|source| DataError::EmbeddedJson {
            field: "parameters",
            source,
        })
    }

    /// A successful reply to this call.
    pub fn respond(&self, content: impl Into<String>) -> ToolResponseMessage {
        ToolResponseMessage {
            tool_call_id: self.tool_call_id.clone(),
            content: content.into(),
            tool_name: Some(self.name.clone()),
            tool_type: self.tool_type.clone(),
            custom_session_id: None,
            additional_properties: AdditionalProperties::new(),
        }
    }

    /// A failed reply to this call.
    pub fn fail(&self, error: impl Into<String>) -> ToolErrorMessage {
        ToolErrorMessage {
            tool_call_id: self.tool_call_id.clone(),
            error: error.into(),
            content: None,
            code: None,
            level: None,
            tool_type: self.tool_type.clone(),
            custom_session_id: None,
            additional_properties: AdditionalProperties::new(),
        }
    }
}

/// Tool output. Sent by the client, and echoed back by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResponseMessage {
    pub tool_call_id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_type: Option<ToolType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_session_id: Option<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolErrorMessage {
    pub tool_call_id: String,
    pub error: String,
    /// Text the assistant speaks in place of the tool output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_type: Option<ToolType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_session_id: Option<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// The user spoke over the assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInterruption {
    /// Milliseconds since the start of the chat.
    pub time: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_session_id: Option<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// A transcribed user turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMessage {
    pub message: ChatMessage,
    pub models: Inference,
    pub time: MillisecondInterval,
    pub from_text: bool,
    /// Whether the transcript may still be revised.
    pub interim: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_session_id: Option<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

tagged_union! {
    /// A frame received from the chat socket.
    #[derive(Debug, Clone, PartialEq)]
    pub enum ServerEvent: "type" {
        AssistantMessage(AssistantMessage) = "assistant_message"
            => (is_assistant_message, as_assistant_message, into_assistant_message),
        AssistantEnd(AssistantEnd) = "assistant_end"
            => (is_assistant_end, as_assistant_end, into_assistant_end),
        AudioOutput(AudioOutput) = "audio_output"
            => (is_audio_output, as_audio_output, into_audio_output),
        ChatMetadata(ChatMetadata) = "chat_metadata"
            => (is_chat_metadata, as_chat_metadata, into_chat_metadata),
        Error(WebSocketError) = "error" => (is_error, as_error, into_error),
        ToolCall(ToolCallMessage) = "tool_call" => (is_tool_call, as_tool_call, into_tool_call),
        ToolResponse(ToolResponseMessage) = "tool_response"
            => (is_tool_response, as_tool_response, into_tool_response),
        ToolError(ToolErrorMessage) = "tool_error"
            => (is_tool_error, as_tool_error, into_tool_error),
        UserInterruption(UserInterruption) = "user_interruption"
            => (is_user_interruption, as_user_interruption, into_user_interruption),
        UserMessage(UserMessage) = "user_message"
            => (is_user_message, as_user_message, into_user_message),
    }
}

impl ServerEvent {
    pub fn custom_session_id(&self) -> Option<&str> {
        match self {
            ServerEvent::AssistantMessage(event) => event.custom_session_id.as_deref(),
            ServerEvent::AssistantEnd(event) => event.custom_session_id.as_deref(),
            ServerEvent::AudioOutput(event) => event.custom_session_id.as_deref(),
            ServerEvent::ChatMetadata(event) => event.custom_session_id.as_deref(),
            ServerEvent::Error(event) => event.custom_session_id.as_deref(),
            ServerEvent::ToolCall(event) => event.custom_session_id.as_deref(),
            ServerEvent::ToolResponse(event) => event.custom_session_id.as_deref(),
            ServerEvent::ToolError(event) => event.custom_session_id.as_deref(),
            ServerEvent::UserInterruption(event) => event.custom_session_id.as_deref(),
            ServerEvent::UserMessage(event) => event.custom_session_id.as_deref(),
            ServerEvent::Unknown(unknown) => {
                unknown.get("custom_session_id").and_then(Value::as_str)
            }
        }
    }

    /// Prosody scores carried by a user or assistant message.
    pub fn emotion_scores(&self) -> Option<&EmotionScoreMap> {
        let models = match self {
            ServerEvent::AssistantMessage(event) => &event.models,
            ServerEvent::UserMessage(event) => &event.models,
            _ => return None,
        };
        models.prosody.as_ref().map(|prosody| &prosody.scores)
    }
}

// --- Client Events ---

/// A chunk of microphone audio, base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioInput {
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_session_id: Option<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl AudioInput {
    pub fn from_pcm16(samples: &[i16]) -> Self {
        Self {
            data: encode_pcm16(samples),
            custom_session_id: None,
            additional_properties: AdditionalProperties::new(),
        }
    }
}

string_enum! {
    /// How long injected context stays in effect.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub enum ContextType {
        Editable = "editable",
        Persistent = "persistent",
        Temporary = "temporary",
    }
}

/// Extra text appended to the conversation for the language model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub text: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub context_type: Option<ContextType>,
}

string_enum! {
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub enum AudioEncoding {
        Linear16 = "linear16",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioConfiguration {
    pub encoding: AudioEncoding,
    pub sample_rate: u32,
    pub channels: u16,
}

/// Updates the session without reconnecting.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_model_api_key: Option<String>,
    /// Values substituted into `{{name}}` placeholders of the system prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<AdditionalProperties>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Text the user typed, treated like a transcribed turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInput {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_session_id: Option<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Text the assistant should speak verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantInput {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_session_id: Option<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PauseAssistantMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_session_id: Option<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResumeAssistantMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_session_id: Option<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

tagged_union! {
    /// A frame sent to the chat socket.
    #[derive(Debug, Clone, PartialEq)]
    pub enum ClientEvent: "type" {
        AudioInput(AudioInput) = "audio_input" => (is_audio_input, as_audio_input, into_audio_input),
        SessionSettings(SessionSettings) = "session_settings"
            => (is_session_settings, as_session_settings, into_session_settings),
        UserInput(UserInput) = "user_input" => (is_user_input, as_user_input, into_user_input),
        AssistantInput(AssistantInput) = "assistant_input"
            => (is_assistant_input, as_assistant_input, into_assistant_input),
        ToolResponse(ToolResponseMessage) = "tool_response"
            => (is_tool_response, as_tool_response, into_tool_response),
        ToolError(ToolErrorMessage) = "tool_error"
            => (is_tool_error, as_tool_error, into_tool_error),
        PauseAssistantMessage(PauseAssistantMessage) = "pause_assistant_message"
            => (is_pause_assistant_message, as_pause_assistant_message, into_pause_assistant_message),
        ResumeAssistantMessage(ResumeAssistantMessage) = "resume_assistant_message"
            => (is_resume_assistant_message, as_resume_assistant_message, into_resume_assistant_message),
    }
}

impl ClientEvent {
    pub fn user_input(text: impl Into<String>) -> Self {
        ClientEvent::UserInput(UserInput {
            text: text.into(),
            custom_session_id: None,
            additional_properties: AdditionalProperties::new(),
        })
    }

    pub fn pause() -> Self {
        ClientEvent::PauseAssistantMessage(PauseAssistantMessage::default())
    }

    pub fn resume() -> Self {
        ClientEvent::ResumeAssistantMessage(ResumeAssistantMessage::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use empath_core::UnionError;
    use serde_json::json;

    #[test]
    fn test_decode_user_message_with_prosody() {
        let input = json!({
            "type": "user_message",
            "message": {"role": "user", "content": "Hello?"},
            "models": {"prosody": {"scores": {"Interest": 0.52, "Confusion": 0.31}}},
            "time": {"begin": 120, "end": 940},
            "from_text": false,
            "interim": false
        });
        let event = ServerEvent::from_json(input.clone()).unwrap();

        let message = event.as_user_message().unwrap();
        assert_eq!(message.message.role, Role::User);
        assert_eq!(message.time.end - message.time.begin, 820);

        let scores = event.emotion_scores().unwrap();
        assert_eq!(scores.top(1)[0].0, "Interest");
        assert_relative_eq!(scores.score("Confusion").unwrap(), 0.31);

        assert_eq!(event.to_json().unwrap(), input);
    }

    #[test]
    fn test_tool_call_reply() {
        let event = ServerEvent::from_json(json!({
            "type": "tool_call",
            "name": "get_weather",
            "parameters": "{\"city\":\"Lisbon\"}",
            "tool_call_id": "call-9",
            "tool_type": "FUNCTION",
            "response_required": true
        }))
        .unwrap();

        let call = event.as_tool_call().unwrap();
        assert_eq!(call.arguments().unwrap()["city"], json!("Lisbon"));
        assert_eq!(call.tool_type, Some(ToolType::Function));

        let reply = ClientEvent::from(call.respond("22C, sunny"));
        assert_eq!(
            reply.to_json().unwrap(),
            json!({
                "type": "tool_response",
                "tool_call_id": "call-9",
                "content": "22C, sunny",
                "tool_name": "get_weather",
                "tool_type": "FUNCTION"
            })
        );

        let failure = ClientEvent::from(call.fail("upstream timeout"));
        assert!(failure.is_tool_error());
        assert_eq!(failure.discriminant(), "tool_error");
    }

    #[test]
    fn test_audio_output_pcm() {
        let data = encode_pcm16(&[1, -1, 300]);
        let event = ServerEvent::from_json(json!({
            "type": "audio_output",
            "id": "msg-1",
            "index": 0,
            "data": data
        }))
        .unwrap();
        assert_eq!(event.as_audio_output().unwrap().pcm16().unwrap(), vec![1, -1, 300]);
    }

    #[test]
    fn test_unknown_server_event_is_kept() {
        let input = json!({
            "type": "assistant_prosody",
            "id": "msg-2",
            "custom_session_id": "sess-1"
        });
        let event = ServerEvent::from_json(input.clone()).unwrap();
        assert!(event.is_unknown());
        assert_eq!(event.discriminant(), "assistant_prosody");
        assert_eq!(event.custom_session_id(), Some("sess-1"));
        assert!(event.emotion_scores().is_none());
        assert_eq!(event.to_json().unwrap(), input);
    }

    #[test]
    fn test_extra_event_fields_are_kept() {
        let input = json!({
            "type": "assistant_end",
            "custom_session_id": "sess-1",
            "reason": "turn_complete"
        });
        let event = ServerEvent::from_json(input.clone()).unwrap();
        let end = event.as_assistant_end().unwrap();
        assert_eq!(end.additional_properties.get("reason"), Some(&json!("turn_complete")));
        assert!(!end.additional_properties.contains_key("type"));
        assert_eq!(event.to_json().unwrap(), input);
    }

    #[test]
    fn test_server_error_event() {
        let event = ServerEvent::from_json(json!({
            "type": "error",
            "code": "I0100",
            "slug": "unknown_config",
            "message": "Config not found"
        }))
        .unwrap();
        assert_eq!(event.as_error().unwrap().slug, "unknown_config");

        let err = event.as_user_message().unwrap_err();
        assert!(matches!(
            err,
            UnionError::WrongVariant {
                union: "ServerEvent",
                expected: "user_message",
                ..
            }
        ));
    }

    #[test]
    fn test_session_settings_encoding() {
        let settings = ClientEvent::SessionSettings(SessionSettings {
            context: Some(Context {
                text: "The caller is a returning customer.".to_string(),
                context_type: Some(ContextType::Persistent),
            }),
            audio: Some(AudioConfiguration {
                encoding: AudioEncoding::Linear16,
                sample_rate: 16_000,
                channels: 1,
            }),
            ..Default::default()
        });

        let value = settings.to_json().unwrap();
        assert_eq!(value["type"], json!("session_settings"));
        assert_eq!(value["context"]["type"], json!("persistent"));
        assert_eq!(value["audio"]["sample_rate"], json!(16_000));
        assert_eq!(ClientEvent::from_json(value).unwrap(), settings);
    }

    #[test]
    fn test_simple_client_events() {
        assert_eq!(ClientEvent::pause().to_json().unwrap(), json!({"type": "pause_assistant_message"}));
        assert_eq!(ClientEvent::resume().to_json().unwrap(), json!({"type": "resume_assistant_message"}));
        assert_eq!(
            ClientEvent::user_input("hi").to_json().unwrap(),
            json!({"type": "user_input", "text": "hi"})
        );

        let audio = ClientEvent::from(AudioInput::from_pcm16(&[0, 1]));
        assert_eq!(decode_pcm16(&audio.as_audio_input().unwrap().data).unwrap(), vec![0, 1]);
    }
}
