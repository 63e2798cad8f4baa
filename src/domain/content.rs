//! Content items: generated post ideas moving through moderation.
//!
//! Items live in the active queue store until posted, at which point they
//! move to the posted archive (a cross-store move, never a deletion).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::lifecycle::{Identified, Lifecycle};
use crate::generator::templates::TemplateFamily;

/// A generated post idea awaiting moderation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    /// Unique identifier, assigned at creation
    pub id: String,

    /// Generated post text
    pub text: String,

    /// Template family the text was generated from
    pub template_family: TemplateFamily,

    /// Heuristic ranking priority (higher = offered first)
    pub priority: i32,

    /// Snapshot of the signal that produced this idea
    pub source: SignalSnapshot,

    /// Current moderation status
    pub status: ContentStatus,

    /// When the idea entered the queue
    pub created_at: DateTime<Utc>,

    /// When the item was approved (if ever)
    pub approved_at: Option<DateTime<Utc>>,

    /// When the item was posted (if ever)
    pub posted_at: Option<DateTime<Utc>>,

    /// When the item was rejected (if ever)
    pub rejected_at: Option<DateTime<Utc>>,

    /// Identifier returned by the publisher on a successful post
    pub post_ref: Option<String>,
}

impl ContentItem {
    /// Create a new pending item
    pub fn new(
        text: impl Into<String>,
        template_family: TemplateFamily,
        priority: i32,
        source: SignalSnapshot,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            template_family,
            priority,
            source,
            status: ContentStatus::Pending,
            created_at: Utc::now(),
            approved_at: None,
            posted_at: None,
            rejected_at: None,
            post_ref: None,
        }
    }
}

/// Moderation status of a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    /// Waiting for review
    Pending,

    /// Cleared for posting
    Approved,

    /// Published externally (terminal)
    Posted,

    /// Declined by review (terminal)
    Rejected,
}

impl std::fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Posted => "posted",
            Self::Rejected => "rejected",
        };
        write!(f, "{}", s)
    }
}

/// Where an idea came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalSnapshot {
    /// Kind of upstream signal
    pub kind: SignalKind,

    /// Human-readable reference (commit hash, log date, ...)
    pub reference: String,

    /// When the signal was captured
    pub captured_at: DateTime<Utc>,
}

impl SignalSnapshot {
    pub fn new(kind: SignalKind, reference: impl Into<String>) -> Self {
        Self {
            kind,
            reference: reference.into(),
            captured_at: Utc::now(),
        }
    }
}

/// Upstream signal sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// Version-control commit history
    Commit,

    /// Daily memory-log text
    MemoryLog,

    /// Manually entered
    Manual,
}

impl Identified for ContentItem {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Lifecycle for ContentItem {
    type Status = ContentStatus;

    const TRANSITIONS: &'static [(ContentStatus, ContentStatus)] = &[
        (ContentStatus::Pending, ContentStatus::Approved),
        (ContentStatus::Pending, ContentStatus::Rejected),
        (ContentStatus::Approved, ContentStatus::Posted),
    ];

    fn status(&self) -> ContentStatus {
        self.status
    }

    fn apply(&mut self, status: ContentStatus, at: DateTime<Utc>) {
        self.status = status;
        match status {
            ContentStatus::Pending => self.created_at = at,
            ContentStatus::Approved => self.approved_at = Some(at),
            ContentStatus::Posted => self.posted_at = Some(at),
            ContentStatus::Rejected => self.rejected_at = Some(at),
        }
    }
}
