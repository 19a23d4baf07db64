use super::VersionType;
use crate::error::DataError;
use empath_core::{AdditionalProperties, string_enum};
use serde::{Deserialize, Serialize};
use serde_json::Value;

string_enum! {
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub enum ToolType {
        Builtin = "BUILTIN",
        Function = "FUNCTION",
    }
}

string_enum! {
    /// Tools the platform runs itself.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub enum BuiltinTool {
        WebSearch = "web_search",
        HangUp = "hang_up",
    }
}

/// A built-in tool enabled on a config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltinToolConfig {
    pub name: BuiltinTool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_content: Option<String>,
}

/// A function tool defined by the account owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnUserDefinedTool {
    pub tool_type: ToolType,
    pub id: String,
    pub version: u32,
    pub version_type: VersionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_description: Option<String>,
    pub name: String,
    pub created_on: i64,
    pub modified_on: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_content: Option<String>,
    /// JSON schema of the tool's arguments, serialized as a string.
    pub parameters: String,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl ReturnUserDefinedTool {
    /// Parses the embedded parameter schema.
    pub fn parameters_schema(&self) -> Result<Value, DataError> {
        serde_json::from_str(&self.parameters).map_err(|source| DataError::EmbeddedJson {
            field: "parameters",
            source,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedUserDefinedTool {
    pub name: String,
    pub parameters: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_description: Option<String>,
}

impl PostedUserDefinedTool {
    /// Builds a tool body from a JSON schema value.
    pub fn new(name: impl Into<String>, schema: &Value) -> Self {
        Self {
            name: name.into(),
            parameters: schema.to_string(),
            description: None,
            fallback_content: None,
            version_description: None,
        }
    }
}

paged_record! {
    ReturnPagedUserDefinedTools { tools_page: ReturnUserDefinedTool }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn weather_tool() -> ReturnUserDefinedTool {
        serde_json::from_value(json!({
            "tool_type": "FUNCTION",
            "id": "tool-1",
            "version": 0,
            "version_type": "LATEST",
            "name": "get_weather",
            "created_on": 1,
            "modified_on": 1,
            "parameters": "{\"type\":\"object\",\"properties\":{\"city\":{\"type\":\"string\"}}}"
        }))
        .unwrap()
    }

    #[test]
    fn test_parameters_schema() {
        let tool = weather_tool();
        assert_eq!(tool.tool_type, ToolType::Function);
        let schema = tool.parameters_schema().unwrap();
        assert_eq!(schema["properties"]["city"]["type"], json!("string"));
    }

    #[test]
    fn test_invalid_parameters_schema() {
        let mut tool = weather_tool();
        tool.parameters = "{not json".to_string();
        assert!(matches!(
            tool.parameters_schema(),
            Err(DataError::EmbeddedJson {
                field: "parameters",
                ..
            })
        ));
    }

    #[test]
    fn test_posted_tool_from_schema() {
        let schema = json!({"type": "object"});
        let body = PostedUserDefinedTool::new("noop", &schema);
        assert_eq!(body.parameters, r#"{"type":"object"}"#);
    }

    #[test]
    fn test_builtin_tool_names() {
        let config: BuiltinToolConfig =
            serde_json::from_value(json!({"name": "hang_up"})).unwrap();
        assert_eq!(config.name, BuiltinTool::HangUp);
        assert_eq!(BuiltinTool::KNOWN, &["web_search", "hang_up"]);
    }
}
