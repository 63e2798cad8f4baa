//! Record types for the four pipeline kinds.
//!
//! Every record carries an opaque id, a kind-specific status, and the
//! timestamps written by its lifecycle transitions.

pub mod booking;
pub mod clip;
pub mod content;
pub mod prediction;

pub use booking::{Booking, BookingStatus};
pub use clip::{ChatMessage, Clip, ClipStatus, LiveState};
pub use content::{ContentItem, ContentStatus, SignalKind, SignalSnapshot};
pub use prediction::{Outcome, Prediction, PredictionStatus};
