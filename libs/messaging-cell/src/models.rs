use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::ids::DoctorId;

pub type MessageId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageDirection {
    Sent,
    Received,
    System,
}

/// Progress of a sent message. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    Delivered,
    Read,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: MessageId,
    pub direction: MessageDirection,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DeliveryStatus>,
}

impl ConversationMessage {
    pub fn system(id: MessageId, text: impl Into<String>) -> Self {
        Self {
            id,
            direction: MessageDirection::System,
            text: text.into(),
            timestamp: Utc::now(),
            status: None,
        }
    }

    pub fn sent(id: MessageId, text: impl Into<String>) -> Self {
        Self {
            id,
            direction: MessageDirection::Sent,
            text: text.into(),
            timestamp: Utc::now(),
            status: Some(DeliveryStatus::Sent),
        }
    }

    pub fn received(id: MessageId, text: impl Into<String>) -> Self {
        Self {
            id,
            direction: MessageDirection::Received,
            text: text.into(),
            timestamp: Utc::now(),
            status: None,
        }
    }
}

/// Mutation applied by a scheduled task once its delay elapses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduledEffect {
    MarkDelivered,
    Reply(String),
    MarkRead,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversationSnapshot {
    pub session_id: Uuid,
    pub doctor_id: DoctorId,
    pub doctor_name: String,
    pub appointment_id: Option<String>,
    pub messages: Vec<ConversationMessage>,
    pub is_typing: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SendOutcome {
    Sent { message: ConversationMessage },
    /// Blank input; nothing was appended or scheduled.
    Ignored,
}

impl SendOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, SendOutcome::Sent { .. })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenConversationRequest {
    pub doctor_id: DoctorId,
    pub appointment_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

/// Canned shortcut that prefills the message draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickAction {
    pub label: &'static str,
    pub draft: String,
}

impl QuickAction {
    pub const LABELS: [&'static str; 4] = ["Reschedule", "Directions", "Call Office", "Parking Info"];

    pub fn for_label(label: &'static str) -> Self {
        let draft = if label == "Call Office" {
            "I need to speak with someone".to_string()
        } else {
            format!("Tell me about {}", label.to_lowercase())
        };
        Self { label, draft }
    }

    pub fn all() -> Vec<Self> {
        Self::LABELS.into_iter().map(Self::for_label).collect()
    }
}
