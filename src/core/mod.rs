//! Lifecycle engine, persistence, and admission rules.

pub mod capacity;
pub mod dedup;
pub mod lifecycle;
pub mod scoring;
pub mod store;

pub use capacity::{check_outstanding_request, check_weekly_capacity, CapacityError};
pub use dedup::{enforce_queue_cap, normalize, DedupError, DedupFilter};
pub use lifecycle::{advance, find, find_mut, Identified, Lifecycle, TransitionError};
pub use scoring::{score_live_state, Detection, ScoringConfig, DETECTION_THRESHOLD};
pub use store::RecordStore;
