/// Wire payload types for the producer and status APIs
use serde::{Deserialize, Serialize};

/// Body of `POST /send-notification`.
///
/// Required fields are `Option` so presence is validated by the relay (with a
/// stable error body) instead of failing JSON deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationRequest {
    #[serde(rename = "type")]
    pub notification_type: Option<String>,
    pub title: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub extra_data: Option<String>,
}

/// Response of `POST /send-notification`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clients: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<String>,
}

impl SendNotificationResponse {
    pub fn sent(clients: usize, notification: String) -> Self {
        Self {
            success: true,
            message: "Notification sent".to_string(),
            clients: Some(clients),
            notification: Some(notification),
        }
    }

    pub fn filtered() -> Self {
        Self {
            success: false,
            message: "Notification filtered as system message".to_string(),
            clients: None,
            notification: None,
        }
    }
}

/// Response of `GET /status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: String,
    pub clients: usize,
    /// Seconds since process start.
    pub uptime: u64,
    pub total_messages: usize,
    pub real_notifications: usize,
    /// ISO 8601 timestamp of the status snapshot.
    pub timestamp: String,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}
