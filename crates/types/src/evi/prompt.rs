use super::{VersionType, millis_to_utc};
use chrono::{DateTime, Utc};
use empath_core::AdditionalProperties;
use serde::{Deserialize, Serialize};

/// A system prompt version as stored by the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnPrompt {
    pub id: String,
    pub version: u32,
    pub version_type: VersionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_description: Option<String>,
    pub name: String,
    pub created_on: i64,
    pub modified_on: i64,
    pub text: String,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl ReturnPrompt {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.created_on)
    }

    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.modified_on)
    }
}

/// Body for creating a prompt or a new version of one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedPrompt {
    pub name: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_description: Option<String>,
}

paged_record! {
    ReturnPagedPrompts { prompts_page: ReturnPrompt }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn prompt_json() -> serde_json::Value {
        json!({
            "id": "prm-1",
            "version": 2,
            "version_type": "FIXED",
            "name": "Concierge",
            "created_on": 1_715_000_000_000i64,
            "modified_on": 1_715_000_500_000i64,
            "text": "<role>You are a concierge.</role>",
            "owner": "team-a"
        })
    }

    #[test]
    fn test_prompt_keeps_unmodelled_fields() {
        let prompt: ReturnPrompt = serde_json::from_value(prompt_json()).unwrap();
        assert_eq!(prompt.version_type, VersionType::Fixed);
        assert_eq!(prompt.additional_properties["owner"], json!("team-a"));
        assert_eq!(serde_json::to_value(&prompt).unwrap(), prompt_json());
    }

    #[test]
    fn test_prompt_timestamps() {
        let prompt: ReturnPrompt = serde_json::from_value(prompt_json()).unwrap();
        let created = prompt.created_at().unwrap();
        let modified = prompt.modified_at().unwrap();
        assert_eq!((modified - created).num_seconds(), 500);
    }

    #[test]
    fn test_paged_prompts() {
        let page: ReturnPagedPrompts = serde_json::from_value(json!({
            "page_number": 0,
            "page_size": 10,
            "total_pages": 1,
            "prompts_page": [prompt_json()]
        }))
        .unwrap();
        assert_eq!(page.items().len(), 1);
        assert!(page.is_last_page());
    }

    #[test]
    fn test_posted_prompt_omits_empty_description() {
        let body = PostedPrompt {
            name: "Concierge".to_string(),
            text: "Be brief.".to_string(),
            version_description: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"name": "Concierge", "text": "Be brief."})
        );
    }
}
