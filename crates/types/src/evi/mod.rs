//! Empathic voice interface: configuration resources served over REST and
//! the event protocol spoken on the chat socket.
//!
//! Resource records (`Return*`) keep every field this client does not model in
//! `additional_properties`, so re-serializing a fetched record never drops data.

use chrono::{DateTime, Utc};
use empath_core::string_enum;
use serde::{Deserialize, Serialize};

/// Declares a page of a listing endpoint.
macro_rules! paged_record {
    ($(#[$meta:meta])* $name:ident { $field:ident: $item:ty }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $name {
            /// Zero-based index of this page.
            pub page_number: u32,
            pub page_size: u32,
            pub total_pages: u32,
            #[serde(default)]
            pub $field: Vec<$item>,
            #[serde(flatten)]
            pub additional_properties: ::empath_core::AdditionalProperties,
        }

        impl $name {
            pub fn items(&self) -> &[$item] {
                &self.$field
            }

            pub fn is_last_page(&self) -> bool {
                self.page_number.saturating_add(1) >= self.total_pages
            }
        }
    };
}

mod audio;
mod chat;
mod chat_group;
mod config;
mod prompt;
mod tool;
mod voice;

pub use audio::{PCM16_SAMPLE_RATE, decode_pcm16, encode_pcm16, f32_to_pcm16, pcm16_to_f32};
pub use chat::{
    AssistantEnd, AssistantInput, AssistantMessage, AudioConfiguration, AudioEncoding,
    AudioInput, AudioOutput, ChatMessage, ChatMetadata, ClientEvent, Context, ContextType,
    Inference, MillisecondInterval, PauseAssistantMessage, ProsodyInference,
    ResumeAssistantMessage, Role, ServerEvent, SessionSettings, ToolCallMessage,
    ToolErrorMessage, ToolResponseMessage, UserInput, UserInterruption, UserMessage,
    WebSocketError,
};
pub use chat_group::{
    ChatEventRole, ChatEventType, ChatStatus, ReturnChat, ReturnChatEvent, ReturnChatGroup,
    ReturnChatPagedEvents, ReturnPagedChatGroups, ReturnPagedChats,
};
pub use config::{
    EventMessageSpec, EventMessageSpecs, LanguageModel, ModelProvider, PostedConfig,
    ReturnConfig, ReturnPagedConfigs, TimeoutSpec, TimeoutSpecs, VoiceSpec,
};
pub use prompt::{PostedPrompt, ReturnPagedPrompts, ReturnPrompt};
pub use tool::{
    BuiltinTool, BuiltinToolConfig, PostedUserDefinedTool, ReturnPagedUserDefinedTools,
    ReturnUserDefinedTool, ToolType,
};
pub use voice::{
    BaseVoice, PostedCustomVoice, ReturnCustomVoice, ReturnPagedCustomVoices, VoiceParameters,
    VoiceProvider,
};

string_enum! {
    /// Whether a versioned resource is pinned or tracks its newest version.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub enum VersionType {
        Fixed = "FIXED",
        Latest = "LATEST",
    }
}

/// Points at a versioned resource. `version: None` means the latest one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
}

impl VersionRef {
    pub fn latest(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: None,
        }
    }

    pub fn pinned(id: impl Into<String>, version: u32) -> Self {
        Self {
            id: id.into(),
            version: Some(version),
        }
    }
}

/// Converts a millisecond Unix timestamp as sent by the API.
pub(crate) fn millis_to_utc(timestamp_ms: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
}
