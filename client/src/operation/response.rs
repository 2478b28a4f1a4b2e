use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::HttpError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failed,
    Cancelled,
}

/// Typed view over the response envelope returned by `ManagementClient::execute`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModelResponse {
    pub outcome: Outcome,
    pub result: Option<Value>,
    pub failure_description: Option<Value>,
    pub rolled_back: Option<bool>,
    pub response_headers: Option<Value>,
}

impl ModelResponse {
    pub fn from_value(value: &Value) -> Result<Self, HttpError> {
        Self::deserialize(value).map_err(|e| HttpError::InvalidResponse {
            reason: format!("not a management response envelope: {}", e),
        })
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }

    /// Failure description rendered as text; composite failures arrive as objects
    pub fn failure_message(&self) -> Option<String> {
        self.failure_description.as_ref().map(|description| match description {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
    }

    pub fn requires_reload(&self) -> bool {
        let Some(headers) = &self.response_headers else {
            return false;
        };

        headers
            .get("operation-requires-reload")
            .and_then(Value::as_bool)
            .unwrap_or(false)
            || headers.get("process-state").and_then(Value::as_str) == Some("reload-required")
    }
}
