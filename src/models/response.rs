//! Response envelope
//!
//! Every MyFoodRepo response wraps its payload in `data` next to server
//! metadata; failures carry an `error` object instead.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Server environment reported in response metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Staging,
    Production,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Metadata attached to every response, empty for bodiless replies
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    pub api_version: String,
    pub env: Environment,
    pub server_time: String,
    pub locale: String,
}

/// Informational message returned alongside data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Successful API response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(default)]
    pub meta: Meta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<Info>,
    pub status: u16,
}

/// One validation problem reported for a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub count: Option<u32>,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldIssues {
    #[serde(default)]
    pub issues: Vec<Issue>,
}

/// Error object returned by the service on failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceError {
    #[serde(rename = "type")]
    pub kind: String,
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub details: Option<HashMap<String, FieldIssues>>,
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.code, self.kind, self.message)
    }
}

/// Body of an error response
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: ServiceError,
}

// ============================================================================
// Payloads
// ============================================================================

/// Session token returned by login and logout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub session_token: String,
}

/// Catch-all payload for endpoints whose data the client does not inspect
pub type RawData = serde_json::Value;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response_envelope() {
        let json = r#"{
            "data": {"session_token": "abc"},
            "meta": {"api_version": "1", "env": "staging", "server_time": "2020-01-01T00:00:00Z", "locale": "en"},
            "status": 200
        }"#;
        let response: ApiResponse<SessionData> = serde_json::from_str(json).unwrap();
        assert_eq!(response.data.session_token, "abc");
        assert_eq!(response.meta.env, Environment::Staging);
        assert!(response.info.is_none());
    }

    #[test]
    fn test_unknown_environment() {
        let env: Environment = serde_json::from_str("\"development\"").unwrap();
        assert_eq!(env, Environment::Unknown);
    }

    #[test]
    fn test_parse_error_body() {
        let json = r#"{"error": {
            "type": "validation", "code": "invalid_user", "message": "User is invalid",
            "reason": "bad input",
            "details": {"password": {"issues": [{"count": 8, "code": "too_short", "message": "is too short"}]}}
        }}"#;
        let body: ErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.error.code, "invalid_user");
        let details = body.error.details.unwrap();
        assert_eq!(details["password"].issues[0].count, Some(8));
    }
}
