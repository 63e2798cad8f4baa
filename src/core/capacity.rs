//! Booking capacity gates.
//!
//! Two admission checks run before a booking persists: a rolling
//! calendar-week quota, and at most one outstanding pending request per
//! requester.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use thiserror::Error;

use crate::domain::{Booking, BookingStatus};

/// Rejection from the capacity gates
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CapacityError {
    #[error("weekly booking capacity of {0} reached")]
    CapacityExceeded(usize),

    #[error("requester '{0}' already has a pending booking")]
    DuplicateRequest(String),
}

/// Start of the current calendar week: most recent Monday, 00:00 UTC
pub fn week_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let days_back = now.weekday().num_days_from_monday() as i64;
    let monday = now.date_naive() - Duration::days(days_back);
    monday.and_time(NaiveTime::MIN).and_utc()
}

/// Count bookings submitted in the current calendar week
pub fn bookings_this_week(bookings: &[Booking], now: DateTime<Utc>) -> usize {
    let start = week_start(now);
    bookings
        .iter()
        .filter(|b| b.created_at >= start && b.created_at <= now)
        .count()
}

/// Reject a new submission once the weekly count reaches `weekly_max`
pub fn check_weekly_capacity(
    bookings: &[Booking],
    now: DateTime<Utc>,
    weekly_max: usize,
) -> Result<(), CapacityError> {
    if bookings_this_week(bookings, now) >= weekly_max {
        return Err(CapacityError::CapacityExceeded(weekly_max));
    }
    Ok(())
}

/// Reject a submission whose requester already has a pending booking
pub fn check_outstanding_request(
    bookings: &[Booking],
    requester: &str,
) -> Result<(), CapacityError> {
    let outstanding = bookings
        .iter()
        .any(|b| b.status == BookingStatus::Pending && b.requester == requester);

    if outstanding {
        return Err(CapacityError::DuplicateRequest(requester.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn booking_at(requester: &str, created_at: DateTime<Utc>) -> Booking {
        let mut b = Booking::new(requester, "ref", "topic", 150);
        b.created_at = created_at;
        b
    }

    #[test]
    fn test_week_start_is_most_recent_monday_midnight() {
        // Wednesday 2026-08-26 15:30 UTC
        let now = Utc.with_ymd_and_hms(2026, 8, 26, 15, 30, 0).unwrap();
        let start = week_start(now);

        assert_eq!(start, Utc.with_ymd_and_hms(2026, 8, 24, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_week_start_on_monday_is_same_day() {
        let now = Utc.with_ymd_and_hms(2026, 8, 24, 9, 0, 0).unwrap();
        assert_eq!(
            week_start(now),
            Utc.with_ymd_and_hms(2026, 8, 24, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_weekly_capacity_counts_only_current_week() {
        let now = Utc.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap();
        let bookings = vec![
            // This week
            booking_at("a", Utc.with_ymd_and_hms(2026, 8, 24, 10, 0, 0).unwrap()),
            booking_at("b", Utc.with_ymd_and_hms(2026, 8, 25, 10, 0, 0).unwrap()),
            // Last week, does not count
            booking_at("c", Utc.with_ymd_and_hms(2026, 8, 20, 10, 0, 0).unwrap()),
        ];

        assert_eq!(bookings_this_week(&bookings, now), 2);
        assert!(check_weekly_capacity(&bookings, now, 3).is_ok());
        assert_eq!(
            check_weekly_capacity(&bookings, now, 2),
            Err(CapacityError::CapacityExceeded(2))
        );
    }

    #[test]
    fn test_duplicate_pending_requester_rejected() {
        let now = Utc::now();
        let bookings = vec![booking_at("alice", now)];

        assert_eq!(
            check_outstanding_request(&bookings, "alice"),
            Err(CapacityError::DuplicateRequest("alice".to_string()))
        );
        assert!(check_outstanding_request(&bookings, "bob").is_ok());
    }

    #[test]
    fn test_non_pending_requester_may_book_again() {
        let mut b = booking_at("alice", Utc::now());
        b.status = BookingStatus::Completed;

        assert!(check_outstanding_request(&[b], "alice").is_ok());
    }
}
