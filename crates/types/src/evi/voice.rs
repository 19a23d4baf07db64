use super::millis_to_utc;
use crate::error::DataError;
use chrono::{DateTime, Utc};
use empath_core::{AdditionalProperties, string_enum};
use serde::{Deserialize, Serialize};

string_enum! {
    /// Where a config's voice comes from.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub enum VoiceProvider {
        Standard = "STANDARD",
        CustomVoice = "CUSTOM_VOICE",
    }
}

string_enum! {
    /// Base voices a custom voice can be derived from.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub enum BaseVoice {
        Ito = "ITO",
        Kora = "KORA",
        Dacher = "DACHER",
        Aura = "AURA",
        Finn = "FINN",
        Stella = "STELLA",
        Whimsy = "WHIMSY",
    }
}

/// Offsets applied to a base voice. Each one ranges over `-100..=100`, with
/// zero meaning "unchanged".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoiceParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assertiveness: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buoyancy: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enthusiasm: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nasality: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relaxedness: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoothness: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tepidity: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tightness: Option<i32>,
}

impl VoiceParameters {
    pub const RANGE: std::ops::RangeInclusive<i32> = -100..=100;

    /// Checks every set parameter against [`Self::RANGE`].
    pub fn validate(&self) -> Result<(), DataError> {
        let named = [
            ("gender", self.gender),
            ("assertiveness", self.assertiveness),
            ("buoyancy", self.buoyancy),
            ("confidence", self.confidence),
            ("enthusiasm", self.enthusiasm),
            ("nasality", self.nasality),
            ("relaxedness", self.relaxedness),
            ("smoothness", self.smoothness),
            ("tepidity", self.tepidity),
            ("tightness", self.tightness),
        ];
        for (name, value) in named {
            if let Some(value) = value.filter(|v| !Self::RANGE.contains(v)) {
                return Err(DataError::ParameterOutOfRange { name, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnCustomVoice {
    pub id: String,
    pub version: u32,
    pub name: String,
    pub created_on: i64,
    pub modified_on: i64,
    pub base_voice: BaseVoice,
    /// Identifier of the model the parameters are interpreted by.
    pub parameter_model: String,
    #[serde(default)]
    pub parameters: VoiceParameters,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl ReturnCustomVoice {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.created_on)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedCustomVoice {
    pub name: String,
    pub base_voice: BaseVoice,
    #[serde(default)]
    pub parameters: VoiceParameters,
}

impl PostedCustomVoice {
    /// Builds the request body, rejecting out-of-range parameters.
    pub fn new(
        name: impl Into<String>,
        base_voice: BaseVoice,
        parameters: VoiceParameters,
    ) -> Result<Self, DataError> {
        parameters.validate()?;
        Ok(Self {
            name: name.into(),
            base_voice,
            parameters,
        })
    }
}

paged_record! {
    ReturnPagedCustomVoices { custom_voices_page: ReturnCustomVoice }
}
