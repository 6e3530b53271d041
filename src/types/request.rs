//! Inbound generation requests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::LettricsError;

use super::ToolKind;

/// A tool invocation collected from a form: the tool, its topic, and a bag
/// of tool-specific fields.
///
/// Field values are kept as raw JSON so numeric or boolean form values are
/// accepted; [`GenerationRequest::field`] exposes them as trimmed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub tool: ToolKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(flatten)]
    pub params: BTreeMap<String, Value>,
}

impl GenerationRequest {
    pub fn new(tool: ToolKind) -> Self {
        Self {
            tool,
            topic: None,
            params: BTreeMap::new(),
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), Value::String(value.into()));
        self
    }

    /// Build a request from an untyped JSON body.
    ///
    /// `tool` may be omitted when `default_tool` is given (single-tool
    /// endpoints). A missing tool is a validation error; an unknown one is
    /// [`LettricsError::UnsupportedTool`].
    pub fn from_json(body: Value, default_tool: Option<ToolKind>) -> Result<Self, LettricsError> {
        let Value::Object(mut map) = body else {
            return Err(LettricsError::InvalidRequest(
                "request body must be a JSON object".into(),
            ));
        };

        let tool = match map.remove("tool").as_ref().and_then(scalar_text) {
            Some(raw) => {
                ToolKind::parse(&raw).ok_or_else(|| LettricsError::UnsupportedTool(raw.clone()))?
            }
            None => default_tool.ok_or_else(|| LettricsError::missing(["tool"]))?,
        };
        let topic = map.remove("topic").as_ref().and_then(scalar_text);

        Ok(Self {
            tool,
            topic,
            params: map.into_iter().collect(),
        })
    }

    /// Trimmed, non-blank topic.
    pub fn topic(&self) -> Option<&str> {
        self.topic
            .as_deref()
            .map(str::trim)
            .filter(|topic| !topic.is_empty())
    }

    /// Trimmed, non-blank text value of a field. `"topic"` reads the topic.
    ///
    /// Missing, null, blank and non-scalar values are all absent.
    pub fn field(&self, name: &str) -> Option<String> {
        if name == "topic" {
            return self.topic().map(str::to_string);
        }
        self.params.get(name).and_then(scalar_text)
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_and_null_fields_are_absent() {
        let request = GenerationRequest::from_json(
            json!({"tool": "application", "name": "  ", "reason": null, "receiver": "Sir"}),
            None,
        )
        .unwrap();
        assert_eq!(request.field("name"), None);
        assert_eq!(request.field("reason"), None);
        assert_eq!(request.field("receiver").as_deref(), Some("Sir"));
    }

    #[test]
    fn numeric_fields_are_accepted_as_text() {
        let request =
            GenerationRequest::from_json(json!({"tool": "report", "date": 2024}), None).unwrap();
        assert_eq!(request.field("date").as_deref(), Some("2024"));
    }

    #[test]
    fn default_tool_applies_when_tool_missing() {
        let request = GenerationRequest::from_json(
            json!({"topic": "Flood", "context": "x"}),
            Some(ToolKind::Report),
        )
        .unwrap();
        assert_eq!(request.tool, ToolKind::Report);
        assert_eq!(request.topic(), Some("Flood"));
        assert!(!request.params.contains_key("topic"));
    }

    #[test]
    fn missing_tool_without_default_is_validation_error() {
        let err = GenerationRequest::from_json(json!({"topic": "x"}), None).unwrap_err();
        assert_eq!(err.missing_fields(), ["tool".to_string()]);
    }

    #[test]
    fn unknown_tool_is_rejected() {
        let err = GenerationRequest::from_json(json!({"tool": "notice"}), None).unwrap_err();
        assert!(matches!(err, LettricsError::UnsupportedTool(tool) if tool == "notice"));
    }

    #[test]
    fn serializes_params_inline() {
        let request = GenerationRequest::new(ToolKind::Poem)
            .with_topic("autumn")
            .with_param("style", "Haiku");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"tool": "poem", "topic": "autumn", "style": "Haiku"}));
    }
}
