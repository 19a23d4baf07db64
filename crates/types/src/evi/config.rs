use super::prompt::ReturnPrompt;
use super::tool::{BuiltinToolConfig, ReturnUserDefinedTool};
use super::voice::{ReturnCustomVoice, VoiceProvider};
use super::{VersionRef, millis_to_utc};
use chrono::{DateTime, Utc};
use empath_core::{AdditionalProperties, string_enum};
use serde::{Deserialize, Serialize};

string_enum! {
    /// Hosts of the supplemental language model.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub enum ModelProvider {
        OpenAi = "OPEN_AI",
        Anthropic = "ANTHROPIC",
        Fireworks = "FIREWORKS",
        Groq = "GROQ",
        Google = "GOOGLE",
        CustomLanguageModel = "CUSTOM_LANGUAGE_MODEL",
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LanguageModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_provider: Option<ModelProvider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_resource: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// The voice a config speaks with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSpec {
    pub provider: VoiceProvider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_voice: Option<ReturnCustomVoice>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl VoiceSpec {
    pub fn named(provider: VoiceProvider, name: impl Into<String>) -> Self {
        Self {
            provider,
            name: Some(name.into()),
            custom_voice: None,
            additional_properties: AdditionalProperties::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventMessageSpec {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Messages the assistant speaks on session events.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventMessageSpecs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_new_chat: Option<EventMessageSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_inactivity_timeout: Option<EventMessageSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_max_duration_timeout: Option<EventMessageSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeoutSpec {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeoutSpecs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inactivity: Option<TimeoutSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_duration: Option<TimeoutSpec>,
}

/// A stored config version with its prompt, voice and tools resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnConfig {
    pub id: String,
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_description: Option<String>,
    pub name: String,
    pub created_on: i64,
    pub modified_on: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evi_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<ReturnPrompt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<VoiceSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_model: Option<LanguageModel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ReturnUserDefinedTool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub builtin_tools: Vec<BuiltinToolConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_messages: Option<EventMessageSpecs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeouts: Option<TimeoutSpecs>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl ReturnConfig {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.created_on)
    }

    /// A reference pinned to this exact version.
    pub fn version_ref(&self) -> VersionRef {
        VersionRef::pinned(self.id.clone(), self.version)
    }

    pub fn tool(&self, name: &str) -> Option<&ReturnUserDefinedTool> {
        self.tools.iter().find(|tool| tool.name == name)
    }
}

/// Body for creating a config or a new version of one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PostedConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evi_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<VersionRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<VoiceSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_model: Option<LanguageModel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<VersionRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub builtin_tools: Vec<BuiltinToolConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_messages: Option<EventMessageSpecs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeouts: Option<TimeoutSpecs>,
}

paged_record! {
    ReturnPagedConfigs { configs_page: ReturnConfig }
}
