//! Generic status transition engine shared by all record kinds.
//!
//! Each kind supplies a transition table instead of re-implementing
//! transition logic. Re-applying a record's current status is allowed and
//! simply restamps its timestamp; callers that need exactly-once semantics
//! must check the current status first.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Attempted an edge the kind's transition table does not define
#[derive(Debug, Error)]
#[error("transition {from:?} -> {to:?} is not allowed")]
pub struct TransitionError<S: std::fmt::Debug> {
    pub from: S,
    pub to: S,
}

/// A record with a status governed by a fixed transition table
pub trait Lifecycle {
    type Status: Copy + PartialEq + std::fmt::Debug + 'static;

    /// Allowed forward edges (from, to)
    const TRANSITIONS: &'static [(Self::Status, Self::Status)];

    /// Current status
    fn status(&self) -> Self::Status;

    /// Set the status and stamp the timestamp field that status owns
    fn apply(&mut self, status: Self::Status, at: DateTime<Utc>);
}

/// Advance a record to `target`, checking the kind's transition table.
///
/// `target == current` restamps rather than failing (see module docs).
pub fn advance<T: Lifecycle>(
    record: &mut T,
    target: T::Status,
) -> Result<(), TransitionError<T::Status>> {
    let from = record.status();

    let allowed = from == target
        || T::TRANSITIONS
            .iter()
            .any(|&(f, t)| f == from && t == target);

    if !allowed {
        return Err(TransitionError { from, to: target });
    }

    record.apply(target, Utc::now());
    Ok(())
}

/// A record addressable by its opaque id
pub trait Identified {
    fn id(&self) -> &str;
}

/// Find a record by id prefix. A miss is a visible `None`, never a panic.
pub fn find<'a, T: Identified>(records: &'a [T], id: &str) -> Option<&'a T> {
    records.iter().find(|r| r.id().starts_with(id))
}

/// Mutable variant of [`find`]
pub fn find_mut<'a, T: Identified>(records: &'a mut [T], id: &str) -> Option<&'a mut T> {
    records.iter_mut().find(|r| r.id().starts_with(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Booking, BookingStatus, ContentItem, ContentStatus, SignalKind, SignalSnapshot};
    use crate::generator::templates::TemplateFamily;

    fn item() -> ContentItem {
        ContentItem::new(
            "hello world",
            TemplateFamily::BuildUpdate,
            5,
            SignalSnapshot::new(SignalKind::Manual, "test"),
        )
    }

    #[test]
    fn test_valid_transition_sets_status_and_timestamp() {
        let mut it = item();
        assert!(it.approved_at.is_none());

        advance(&mut it, ContentStatus::Approved).unwrap();

        assert_eq!(it.status, ContentStatus::Approved);
        assert!(it.approved_at.is_some());
        // Only the target's timestamp was written
        assert!(it.posted_at.is_none());
        assert!(it.rejected_at.is_none());
    }

    #[test]
    fn test_undefined_edge_is_rejected() {
        let mut it = item();

        // pending -> posted skips approval
        let err = advance(&mut it, ContentStatus::Posted).unwrap_err();
        assert_eq!(err.from, ContentStatus::Pending);
        assert_eq!(err.to, ContentStatus::Posted);
        assert_eq!(it.status, ContentStatus::Pending);
    }

    #[test]
    fn test_no_edge_out_of_terminal_status() {
        let mut it = item();
        advance(&mut it, ContentStatus::Rejected).unwrap();

        assert!(advance(&mut it, ContentStatus::Approved).is_err());
        assert!(advance(&mut it, ContentStatus::Pending).is_err());
    }

    #[test]
    fn test_reapply_restamps() {
        let mut it = item();
        advance(&mut it, ContentStatus::Approved).unwrap();
        let first = it.approved_at.unwrap();

        advance(&mut it, ContentStatus::Approved).unwrap();
        let second = it.approved_at.unwrap();

        assert!(second >= first);
        assert_eq!(it.status, ContentStatus::Approved);
    }

    #[test]
    fn test_booking_chain() {
        let mut b = Booking::new("alice", "ref", "topic", 150);

        advance(&mut b, BookingStatus::Approved).unwrap();
        advance(&mut b, BookingStatus::Completed).unwrap();

        assert_eq!(b.status, BookingStatus::Completed);
        assert!(b.approved_at.is_some());
        assert!(b.completed_at.is_some());

        // pending -> completed directly is not an edge
        let mut b2 = Booking::new("bob", "ref", "topic", 150);
        assert!(advance(&mut b2, BookingStatus::Completed).is_err());
    }

    #[test]
    fn test_find_by_prefix() {
        let items = vec![item(), item()];
        let full_id = items[0].id.clone();

        assert!(find(&items, &full_id[..8]).is_some());
        assert!(find(&items, "not-an-id").is_none());
    }
}
