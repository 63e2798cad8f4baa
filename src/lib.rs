//! brandpipe - personal brand content pipeline
//!
//! Converts raw activity signals (code commits, memory-log entries,
//! live-stream chat) into moderated, de-duplicated records that progress
//! through an approval workflow before external publication.
//!
//! # Architecture
//!
//! Four record kinds (content items, clips, predictions, bookings) share
//! one engine:
//! - each kind persists in its own whole-file JSON store
//! - a generic transition table governs status changes and timestamps
//! - admission rules (dedup, capacity, scoring) gate what enters a store
//!
//! # Modules
//!
//! - `adapters`: external clients (live-state endpoint, publisher)
//! - `core`: store, lifecycle engine, admission rules
//! - `domain`: the four record kinds
//! - `generator`: signals -> ranked content candidates
//! - `signals`: commit-history and memory-log providers
//! - `report`: read-side statistics
//! - `cli`: command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Generate post ideas from today's signals
//! brandpipe content generate
//!
//! # Approve and publish one
//! brandpipe content approve <id>
//! brandpipe content post <id>
//!
//! # Track a prediction to resolution
//! brandpipe predict create "SOL hits 300" 75 crypto 2026-03-01
//! brandpipe predict resolve <id> correct
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod generator;
pub mod report;
pub mod signals;

// Re-export main types at crate root for convenience
pub use crate::core::{
    advance, check_outstanding_request, check_weekly_capacity, enforce_queue_cap, find, find_mut,
    normalize, score_live_state, CapacityError, DedupError, DedupFilter, Detection, Lifecycle,
    RecordStore, ScoringConfig, TransitionError,
};
pub use crate::domain::{
    Booking, BookingStatus, ChatMessage, Clip, ClipStatus, ContentItem, ContentStatus, LiveState,
    Outcome, Prediction, PredictionStatus, SignalKind, SignalSnapshot,
};
pub use crate::generator::templates::TemplateFamily;
pub use crate::generator::IdeaGenerator;
pub use crate::report::{booking_stats, content_stats, prediction_stats};
pub use crate::signals::{CommitEntry, CommitHistory, MemoryLog, MemorySignal};

// External clients
pub use crate::adapters::{HttpPublisher, LiveStateClient, Publisher};
