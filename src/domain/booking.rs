//! Paid consultation bookings.
//!
//! The paid flag is independent of status: payment can land any time after
//! approval without forcing a transition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::lifecycle::{Identified, Lifecycle};

/// A consultation booking request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier, assigned at creation
    pub id: String,

    /// Who asked for the session (pre-validated identity)
    pub requester: String,

    /// Linked external resource (profile URL, payment link, ...)
    pub reference: String,

    /// What the session is about
    pub topic: String,

    /// Fixed session price
    pub price: u32,

    /// Whether payment has been recorded
    pub paid: bool,

    /// When payment was recorded
    pub paid_at: Option<DateTime<Utc>>,

    /// Scheduled session time, written at approval
    pub scheduled_for: Option<DateTime<Utc>>,

    /// Current status
    pub status: BookingStatus,

    /// When the request was submitted
    pub created_at: DateTime<Utc>,

    /// When the request was approved (if ever)
    pub approved_at: Option<DateTime<Utc>>,

    /// When the session was completed (if ever)
    pub completed_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// Create a new pending booking request
    pub fn new(
        requester: impl Into<String>,
        reference: impl Into<String>,
        topic: impl Into<String>,
        price: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            requester: requester.into(),
            reference: reference.into(),
            topic: topic.into(),
            price,
            paid: false,
            paid_at: None,
            scheduled_for: None,
            status: BookingStatus::Pending,
            created_at: Utc::now(),
            approved_at: None,
            completed_at: None,
        }
    }

    /// Record payment. Independent of the status machine.
    pub fn mark_paid(&mut self) {
        self.paid = true;
        self.paid_at = Some(Utc::now());
    }
}

/// Status of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Submitted, awaiting review. Rejection is by omission: a pending
    /// request that is never approved simply stays pending.
    Pending,

    /// Accepted and scheduled
    Approved,

    /// Session held (terminal)
    Completed,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Completed => "completed",
        };
        write!(f, "{}", s)
    }
}

impl Identified for Booking {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Lifecycle for Booking {
    type Status = BookingStatus;

    const TRANSITIONS: &'static [(BookingStatus, BookingStatus)] = &[
        (BookingStatus::Pending, BookingStatus::Approved),
        (BookingStatus::Approved, BookingStatus::Completed),
    ];

    fn status(&self) -> BookingStatus {
        self.status
    }

    fn apply(&mut self, status: BookingStatus, at: DateTime<Utc>) {
        self.status = status;
        match status {
            BookingStatus::Pending => self.created_at = at,
            BookingStatus::Approved => self.approved_at = Some(at),
            BookingStatus::Completed => self.completed_at = Some(at),
        }
    }
}
