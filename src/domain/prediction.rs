//! Public predictions tracked to resolution.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::lifecycle::{Identified, Lifecycle};

/// A tracked public claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Unique identifier, assigned at creation
    pub id: String,

    /// The claim being made
    pub claim: String,

    /// Stated confidence, 0-100
    pub confidence: u8,

    /// Category label (e.g. "crypto", "tech")
    pub category: String,

    /// Date by which the claim must resolve
    pub deadline: NaiveDate,

    /// Current status
    pub status: PredictionStatus,

    /// Outcome, written at resolution
    pub outcome: Option<Outcome>,

    /// Supporting proof reference, written at resolution
    pub proof: Option<String>,

    /// When the prediction was made
    pub created_at: DateTime<Utc>,

    /// When the prediction was resolved (if ever)
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Prediction {
    /// Create a new active prediction
    pub fn new(
        claim: impl Into<String>,
        confidence: u8,
        category: impl Into<String>,
        deadline: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            claim: claim.into(),
            confidence: confidence.min(100),
            category: category.into(),
            deadline,
            status: PredictionStatus::Active,
            outcome: None,
            proof: None,
            created_at: Utc::now(),
            resolved_at: None,
        }
    }
}

/// Status of a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionStatus {
    /// Open, awaiting resolution
    Active,

    /// Resolved with an outcome (terminal)
    Resolved,
}

impl std::fmt::Display for PredictionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Active => "active",
            Self::Resolved => "resolved",
        };
        write!(f, "{}", s)
    }
}

/// How a resolved prediction turned out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The claim held
    Correct,

    /// The claim did not hold
    Incorrect,

    /// The claim partially held
    Partial,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
            Self::Partial => "partial",
        };
        write!(f, "{}", s)
    }
}

impl Identified for Prediction {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Lifecycle for Prediction {
    type Status = PredictionStatus;

    const TRANSITIONS: &'static [(PredictionStatus, PredictionStatus)] =
        &[(PredictionStatus::Active, PredictionStatus::Resolved)];

    fn status(&self) -> PredictionStatus {
        self.status
    }

    fn apply(&mut self, status: PredictionStatus, at: DateTime<Utc>) {
        self.status = status;
        match status {
            PredictionStatus::Active => self.created_at = at,
            PredictionStatus::Resolved => self.resolved_at = Some(at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_prediction_is_active() {
        let p = Prediction::new(
            "SOL hits 300",
            75,
            "crypto",
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        );

        assert_eq!(p.status, PredictionStatus::Active);
        assert_eq!(p.confidence, 75);
        assert!(p.outcome.is_none());
        assert!(p.resolved_at.is_none());
    }

    #[test]
    fn test_confidence_clamped_to_100() {
        let p = Prediction::new(
            "anything",
            200,
            "misc",
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        );
        assert_eq!(p.confidence, 100);
    }
}
