//! Deduplication filter and queue size cap for content admission.
//!
//! Exact-match-after-normalization only: no fuzzy or semantic comparison.

use thiserror::Error;

use crate::domain::ContentItem;

/// Rejection from the deduplication filter
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DedupError {
    #[error("duplicate content: matches an existing item after normalization")]
    DuplicateContent,
}

/// Case-fold, collapse whitespace runs to single spaces, trim
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Duplicate check against the active queue and the posted archive
pub struct DedupFilter {
    seen: Vec<String>,
}

impl DedupFilter {
    /// Build from every item currently in the queue and the archive
    pub fn new<'a>(existing: impl IntoIterator<Item = &'a ContentItem>) -> Self {
        Self {
            seen: existing.into_iter().map(|i| normalize(&i.text)).collect(),
        }
    }

    /// Admit `text` if no existing item matches it after normalization.
    /// Admitted text counts against later candidates in the same batch.
    pub fn admit(&mut self, text: &str) -> Result<(), DedupError> {
        let normalized = normalize(text);
        if self.seen.iter().any(|s| *s == normalized) {
            return Err(DedupError::DuplicateContent);
        }
        self.seen.push(normalized);
        Ok(())
    }
}

/// Enforce the queue size cap: drop the oldest entries (insertion order)
/// until the queue fits, never the newest.
pub fn enforce_queue_cap(queue: &mut Vec<ContentItem>, cap: usize) {
    while queue.len() > cap {
        queue.remove(0);
    }
}
