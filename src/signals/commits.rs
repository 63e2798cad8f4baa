//! Commit-history provider.
//!
//! Shells out to `git log` per configured project directory with a
//! time-bounded window. Directories without a repository are skipped
//! silently; a failing `git` invocation skips that project with a warning.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tokio::process::Command;
use tracing::{debug, warn};

/// Field separator in the `git log` pretty format
const UNIT_SEP: char = '\u{1f}';

/// One commit from a tracked project
#[derive(Debug, Clone)]
pub struct CommitEntry {
    /// Project name (directory basename)
    pub source: String,

    /// Abbreviated commit hash
    pub identifier: String,

    /// Commit subject line
    pub message: String,

    /// Committer timestamp
    pub timestamp: DateTime<Utc>,
}

/// Reads recent commits across a set of project directories
pub struct CommitHistory {
    project_dirs: Vec<PathBuf>,
}

impl CommitHistory {
    pub fn new(project_dirs: Vec<PathBuf>) -> Self {
        Self { project_dirs }
    }

    /// Commits from the trailing `window_hours` across all projects,
    /// newest first. Unavailable projects contribute nothing.
    pub async fn recent(&self, window_hours: u64) -> Vec<CommitEntry> {
        let mut entries = Vec::new();

        for dir in &self.project_dirs {
            if !dir.join(".git").exists() {
                debug!(dir = %dir.display(), "not a repository, skipping");
                continue;
            }

            let source = dir
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| dir.display().to_string());

            let output = Command::new("git")
                .arg("-C")
                .arg(dir)
                .arg("log")
                .arg(format!("--since={} hours ago", window_hours))
                .arg("--pretty=format:%h\u{1f}%s\u{1f}%cI")
                .output()
                .await;

            let output = match output {
                Ok(output) if output.status.success() => output,
                Ok(output) => {
                    warn!(
                        dir = %dir.display(),
                        status = %output.status,
                        "git log failed, skipping project"
                    );
                    continue;
                }
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "could not run git, skipping project");
                    continue;
                }
            };

            let stdout = String::from_utf8_lossy(&output.stdout);
            for line in stdout.lines() {
                if let Some(entry) = parse_log_line(&source, line) {
                    entries.push(entry);
                }
            }
        }

        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }
}

fn parse_log_line(source: &str, line: &str) -> Option<CommitEntry> {
    let mut parts = line.split(UNIT_SEP);
    let identifier = parts.next()?.trim();
    let message = parts.next()?.trim();
    let timestamp = parts.next()?.trim();

    if identifier.is_empty() {
        return None;
    }

    let timestamp = DateTime::parse_from_rfc3339(timestamp)
        .ok()?
        .with_timezone(&Utc);

    Some(CommitEntry {
        source: source.to_string(),
        identifier: identifier.to_string(),
        message: message.to_string(),
        timestamp,
    })
}
