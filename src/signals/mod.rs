//! Read-only upstream signal providers.
//!
//! Providers never fail the caller: an unavailable source degrades to an
//! empty signal set.

pub mod commits;
pub mod memory;

pub use commits::{CommitEntry, CommitHistory};
pub use memory::{DayLog, MemoryLog, MemorySignal};
