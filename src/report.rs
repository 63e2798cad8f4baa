//! Read-side aggregation: pure folds over record collections.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};

use crate::domain::{
    Booking, BookingStatus, ContentItem, ContentStatus, Outcome, Prediction, PredictionStatus,
};

/// Per-category resolution counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryStats {
    pub total: usize,
    pub correct: usize,
}

/// Derived prediction statistics
#[derive(Debug, Clone)]
pub struct PredictionStats {
    pub total: usize,
    pub active: usize,
    pub resolved: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub partial: usize,

    /// Percent of resolved predictions that were correct. Zero resolutions
    /// report a defined 0, never NaN.
    pub accuracy: f64,

    pub by_category: BTreeMap<String, CategoryStats>,
}

/// Fold prediction records into stats in a single pass
pub fn prediction_stats(predictions: &[Prediction]) -> PredictionStats {
    let mut stats = PredictionStats {
        total: predictions.len(),
        active: 0,
        resolved: 0,
        correct: 0,
        incorrect: 0,
        partial: 0,
        accuracy: 0.0,
        by_category: BTreeMap::new(),
    };

    for p in predictions {
        let category = stats.by_category.entry(p.category.clone()).or_default();
        category.total += 1;

        match p.status {
            PredictionStatus::Active => stats.active += 1,
            PredictionStatus::Resolved => {
                stats.resolved += 1;
                match p.outcome {
                    Some(Outcome::Correct) => {
                        stats.correct += 1;
                        category.correct += 1;
                    }
                    Some(Outcome::Incorrect) => stats.incorrect += 1,
                    Some(Outcome::Partial) => stats.partial += 1,
                    None => {}
                }
            }
        }
    }

    if stats.resolved > 0 {
        stats.accuracy = stats.correct as f64 * 100.0 / stats.resolved as f64;
    }

    stats
}

/// Derived booking statistics
#[derive(Debug, Clone)]
pub struct BookingStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub completed: usize,

    /// Sum of completed booking prices
    pub revenue: u32,

    /// Completed revenue within the current calendar month
    pub month_revenue: u32,
}

/// Fold booking records into stats; `now` scopes the monthly subtotal
pub fn booking_stats(bookings: &[Booking], now: DateTime<Utc>) -> BookingStats {
    let mut stats = BookingStats {
        total: bookings.len(),
        pending: 0,
        approved: 0,
        completed: 0,
        revenue: 0,
        month_revenue: 0,
    };

    for b in bookings {
        match b.status {
            BookingStatus::Pending => stats.pending += 1,
            BookingStatus::Approved => stats.approved += 1,
            BookingStatus::Completed => {
                stats.completed += 1;
                stats.revenue += b.price;

                let this_month = b
                    .completed_at
                    .map(|at| at.year() == now.year() && at.month() == now.month())
                    .unwrap_or(false);
                if this_month {
                    stats.month_revenue += b.price;
                }
            }
        }
    }

    stats
}

/// Derived content-pipeline counts across the queue and posted archive
#[derive(Debug, Clone)]
pub struct ContentStats {
    pub queued: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub posted: usize,
}

pub fn content_stats(queue: &[ContentItem], posted: &[ContentItem]) -> ContentStats {
    let count = |status: ContentStatus| queue.iter().filter(|i| i.status == status).count();

    ContentStats {
        queued: queue.len(),
        pending: count(ContentStatus::Pending),
        approved: count(ContentStatus::Approved),
        rejected: count(ContentStatus::Rejected),
        posted: posted.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::advance;
    use chrono::{NaiveDate, TimeZone};

    fn prediction(category: &str) -> Prediction {
        Prediction::new(
            "some claim",
            50,
            category,
            NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        )
    }

    fn resolved(category: &str, outcome: Outcome) -> Prediction {
        let mut p = prediction(category);
        advance(&mut p, PredictionStatus::Resolved).unwrap();
        p.outcome = Some(outcome);
        p
    }

    #[test]
    fn test_accuracy_zero_resolutions_is_zero() {
        let stats = prediction_stats(&[prediction("crypto")]);
        assert_eq!(stats.accuracy, 0.0);
        assert_eq!(stats.active, 1);
        assert_eq!(stats.resolved, 0);
    }

    #[test]
    fn test_accuracy_one_correct_one_incorrect_is_fifty() {
        let stats = prediction_stats(&[
            resolved("crypto", Outcome::Correct),
            resolved("crypto", Outcome::Incorrect),
        ]);

        assert_eq!(stats.resolved, 2);
        assert_eq!(stats.accuracy, 50.0);
    }

    #[test]
    fn test_category_breakdown_single_pass() {
        let stats = prediction_stats(&[
            resolved("crypto", Outcome::Correct),
            resolved("crypto", Outcome::Partial),
            resolved("tech", Outcome::Incorrect),
            prediction("tech"),
        ]);

        assert_eq!(
            stats.by_category["crypto"],
            CategoryStats {
                total: 2,
                correct: 1
            }
        );
        assert_eq!(
            stats.by_category["tech"],
            CategoryStats {
                total: 2,
                correct: 0
            }
        );
        assert_eq!(stats.partial, 1);
    }

    #[test]
    fn test_booking_revenue_and_month_subtotal() {
        let now = Utc.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap();

        let mut this_month = Booking::new("a", "ref", "t", 150);
        advance(&mut this_month, BookingStatus::Approved).unwrap();
        advance(&mut this_month, BookingStatus::Completed).unwrap();
        this_month.completed_at = Some(Utc.with_ymd_and_hms(2026, 8, 3, 10, 0, 0).unwrap());

        let mut last_month = Booking::new("b", "ref", "t", 200);
        advance(&mut last_month, BookingStatus::Approved).unwrap();
        advance(&mut last_month, BookingStatus::Completed).unwrap();
        last_month.completed_at = Some(Utc.with_ymd_and_hms(2026, 7, 3, 10, 0, 0).unwrap());

        let pending = Booking::new("c", "ref", "t", 150);

        let stats = booking_stats(&[this_month, last_month, pending], now);

        assert_eq!(stats.revenue, 350);
        assert_eq!(stats.month_revenue, 150);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.completed, 2);
    }

    #[test]
    fn test_content_stats_counts_queue_and_archive() {
        use crate::domain::{SignalKind, SignalSnapshot};
        use crate::generator::templates::TemplateFamily;

        let mut approved = ContentItem::new(
            "a",
            TemplateFamily::BuildUpdate,
            5,
            SignalSnapshot::new(SignalKind::Manual, "t"),
        );
        advance(&mut approved, ContentStatus::Approved).unwrap();

        let pending = ContentItem::new(
            "b",
            TemplateFamily::HotTake,
            7,
            SignalSnapshot::new(SignalKind::Manual, "t"),
        );

        let mut posted = ContentItem::new(
            "c",
            TemplateFamily::BuildUpdate,
            5,
            SignalSnapshot::new(SignalKind::Manual, "t"),
        );
        advance(&mut posted, ContentStatus::Approved).unwrap();
        advance(&mut posted, ContentStatus::Posted).unwrap();

        let stats = content_stats(&[approved, pending], &[posted]);

        assert_eq!(stats.queued, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.approved, 1);
        assert_eq!(stats.posted, 1);
    }
}
