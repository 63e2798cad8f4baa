//! Highlight clips detected from live-stream activity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::lifecycle::{Identified, Lifecycle};

/// A detected stream highlight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clip {
    /// Unique identifier, assigned at detection
    pub id: String,

    /// Admission score that triggered detection
    pub score: u32,

    /// Indicator tags that contributed to the score
    pub indicators: Vec<String>,

    /// The chat messages present at detection time
    pub chat_snapshot: Vec<ChatMessage>,

    /// Viewer count at detection time
    pub viewer_count: u32,

    /// Current status
    pub status: ClipStatus,

    /// When the clip was detected
    pub detected_at: DateTime<Utc>,

    /// When the clip was approved (if ever)
    pub approved_at: Option<DateTime<Utc>>,
}

impl Clip {
    /// Create a freshly detected clip from a live snapshot
    pub fn detected(score: u32, indicators: Vec<String>, state: &LiveState) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            score,
            indicators,
            chat_snapshot: state.chat_messages.clone(),
            viewer_count: state.viewer_count,
            status: ClipStatus::Detected,
            detected_at: Utc::now(),
            approved_at: None,
        }
    }
}

/// Status of a clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipStatus {
    /// Automatically detected, awaiting review
    Detected,

    /// Approved for downstream processing (terminal here)
    Approved,
}

impl std::fmt::Display for ClipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Detected => "detected",
            Self::Approved => "approved",
        };
        write!(f, "{}", s)
    }
}

/// One recent chat message from the live-state endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Sender display name
    pub user: String,

    /// Message text
    pub text: String,

    /// When the message was sent
    pub timestamp: DateTime<Utc>,
}

/// Snapshot of current live-stream activity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LiveState {
    /// Recent chat messages (endpoint-bounded window)
    #[serde(default)]
    pub chat_messages: Vec<ChatMessage>,

    /// Current viewer count
    #[serde(default)]
    pub viewer_count: u32,
}

impl Identified for Clip {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Lifecycle for Clip {
    type Status = ClipStatus;

    const TRANSITIONS: &'static [(ClipStatus, ClipStatus)] =
        &[(ClipStatus::Detected, ClipStatus::Approved)];

    fn status(&self) -> ClipStatus {
        self.status
    }

    fn apply(&mut self, status: ClipStatus, at: DateTime<Utc>) {
        self.status = status;
        match status {
            ClipStatus::Detected => self.detected_at = at,
            ClipStatus::Approved => self.approved_at = Some(at),
        }
    }
}
