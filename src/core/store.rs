//! Durable JSON record stores.
//!
//! One store per record kind, each a single JSON file holding the ordered
//! collection. Every save rewrites the whole file (read-modify-write, not an
//! append log). There is no cross-process locking: two concurrent
//! invocations racing on the same file are last-writer-wins. That is an
//! accepted limitation of a single-user CLI, documented here rather than
//! papered over.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tracing::warn;

/// File-backed store for an ordered collection of one record kind
pub struct RecordStore<T> {
    path: PathBuf,
    _kind: PhantomData<T>,
}

impl<T> RecordStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create a handle for the store at `path`. Nothing is touched on disk
    /// until the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _kind: PhantomData,
        }
    }

    /// Path to the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the collection in stored order.
    ///
    /// A missing file is a normal first run and yields an empty collection.
    /// An unreadable or unparseable file also yields empty, with a warning
    /// (availability over strictness).
    pub async fn load(&self) -> Vec<T> {
        if !self.path.exists() {
            return Vec::new();
        }

        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "store unreadable, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "store unparseable, treating as empty");
                Vec::new()
            }
        }
    }

    /// Atomically overwrite the collection.
    ///
    /// Serializes to a sibling temp file and renames it over the target, so
    /// a crash mid-write never leaves a partial file. Creates the parent
    /// directory if needed (idempotent).
    pub async fn save(&self, records: &[T]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create store directory: {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(records).context("Failed to serialize store")?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)
            .await
            .with_context(|| format!("Failed to write store temp file: {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace store: {}", self.path.display()))?;

        Ok(())
    }

    /// Append one record, preserving existing order
    pub async fn append(&self, record: T) -> Result<()> {
        let mut records = self.load().await;
        records.push(record);
        self.save(&records).await
    }
}
