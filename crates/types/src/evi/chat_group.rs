use super::{VersionRef, millis_to_utc};
use crate::emotion::EmotionScoreMap;
use crate::error::DataError;
use chrono::{DateTime, Utc};
use empath_core::{AdditionalProperties, string_enum};
use serde::{Deserialize, Serialize};

string_enum! {
    /// Why a chat ended, or `ACTIVE` while it is still running.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub enum ChatStatus {
        Active = "ACTIVE",
        UserEnded = "USER_ENDED",
        UserTimeout = "USER_TIMEOUT",
        MaxDurationTimeout = "MAX_DURATION_TIMEOUT",
        InactivityTimeout = "INACTIVITY_TIMEOUT",
        Error = "ERROR",
    }
}

string_enum! {
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub enum ChatEventType {
        SystemPrompt = "SYSTEM_PROMPT",
        UserMessage = "USER_MESSAGE",
        UserInterruption = "USER_INTERRUPTION",
        AgentMessage = "AGENT_MESSAGE",
        FunctionCall = "FUNCTION_CALL",
        FunctionCallResponse = "FUNCTION_CALL_RESPONSE",
    }
}

string_enum! {
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub enum ChatEventRole {
        User = "USER",
        Agent = "AGENT",
        System = "SYSTEM",
        Tool = "TOOL",
    }
}

/// One chat session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnChat {
    pub id: String,
    pub chat_group_id: String,
    pub status: ChatStatus,
    pub start_timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<VersionRef>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl ReturnChat {
    pub fn is_active(&self) -> bool {
        self.status == ChatStatus::Active
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.start_timestamp)
    }

    /// Length of a finished chat.
    pub fn duration_ms(&self) -> Option<i64> {
        self.end_timestamp?.checked_sub(self.start_timestamp)
    }
}

/// A series of resumed chats sharing one conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnChatGroup {
    pub id: String,
    pub first_start_timestamp: i64,
    pub most_recent_start_timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_recent_chat_id: Option<String>,
    pub num_chats: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// One recorded event of a chat transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnChatEvent {
    pub id: String,
    pub chat_id: String,
    pub timestamp: i64,
    pub role: ChatEventRole,
    #[serde(rename = "type")]
    pub event_type: ChatEventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_text: Option<String>,
    /// Emotion scores of the message, serialized as a JSON object string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion_features: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl ReturnChatEvent {
    /// Parses [`Self::emotion_features`], if present.
    pub fn emotion_scores(&self) -> Result<Option<EmotionScoreMap>, DataError> {
        self.emotion_features
            .as_deref()
            .map(serde_json::from_str::<EmotionScoreMap>)
            .transpose()
            .map_err(|source| DataError::EmbeddedJson {
                field: "emotion_features",
                source,
            })
    }
}

paged_record! {
    ReturnPagedChats { chats_page: ReturnChat }
}

paged_record! {
    ReturnPagedChatGroups { chat_groups_page: ReturnChatGroup }
}

paged_record! {
    /// A page of one chat's transcript.
    ReturnChatPagedEvents { events_page: ReturnChatEvent }
}
