//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::SessionSnapshot;

/// Body of `POST /sessions`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartSessionRequest {
    /// Duration attribute for the exam page. Strings and numbers are both
    /// accepted and passed through as raw configuration data.
    #[serde(default)]
    pub duration_seconds: Option<Value>,
}

impl StartSessionRequest {
    /// Raw duration attribute, `None` when absent or null
    pub fn raw_duration(&self) -> Option<String> {
        match &self.duration_seconds {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}

/// API response structure for session endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub session: SessionSnapshot,
}

impl ApiResponse {
    pub fn new(status: String, message: String, session: SessionSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            session,
        }
    }

    /// Response for a session with a running guard
    pub fn active(message: String, session: SessionSnapshot) -> Self {
        Self::new("active".to_string(), message, session)
    }

    /// Response for a session whose guard is inert or finished
    pub fn inactive(message: String, session: SessionSnapshot) -> Self {
        Self::new("inactive".to_string(), message, session)
    }

    /// Pick `active` or `inactive` from the snapshot
    pub fn for_session(message: String, session: SessionSnapshot) -> Self {
        if session.guard_active {
            Self::active(message, session)
        } else {
            Self::inactive(message, session)
        }
    }
}

/// Server status with session counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub exam_duration_minutes: u64,
    pub active_sessions: usize,
    pub total_sessions: usize,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: &str) -> StartSessionRequest {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn raw_duration_accepts_strings_and_numbers() {
        assert_eq!(request(r#"{"duration_seconds":"601"}"#).raw_duration().as_deref(), Some("601"));
        assert_eq!(request(r#"{"duration_seconds":90}"#).raw_duration().as_deref(), Some("90"));
        assert_eq!(request(r#"{"duration_seconds":-5}"#).raw_duration().as_deref(), Some("-5"));
    }

    #[test]
    fn raw_duration_absent_or_null() {
        assert_eq!(request("{}").raw_duration(), None);
        assert_eq!(request(r#"{"duration_seconds":null}"#).raw_duration(), None);
    }
}
