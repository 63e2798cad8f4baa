//! Memory-log provider.
//!
//! Reads dated text files (`YYYY-MM-DD.md`) from a fixed directory and
//! derives coarse sentiment counts from decision / problem / success
//! language. An absent directory or file yields an empty signal.

use std::path::PathBuf;
use std::sync::OnceLock;

use chrono::{Duration, NaiveDate};
use regex::Regex;
use tokio::fs;

fn decision_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(decided|decision|chose|going with|picked)\b")
            .expect("decision pattern is valid")
    })
}

fn problem_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(stuck|bugs?|broken|problems?|failed|blocked)\b")
            .expect("problem pattern is valid")
    })
}

fn success_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(shipped|fixed|solved|launched|won)\b")
            .expect("success pattern is valid")
    })
}

/// One day's log text
#[derive(Debug, Clone)]
pub struct DayLog {
    pub date: NaiveDate,
    pub text: String,
}

/// Aggregated memory-log signal over a trailing day window
#[derive(Debug, Clone, Default)]
pub struct MemorySignal {
    /// The days that had a log file, oldest first
    pub days: Vec<DayLog>,

    /// Decision-language hits across the window
    pub decisions: usize,

    /// Problem-language hits across the window
    pub problems: usize,

    /// Success-language hits across the window
    pub successes: usize,
}

impl MemorySignal {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Reads dated log files from one directory
pub struct MemoryLog {
    dir: PathBuf,
}

impl MemoryLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Read the trailing `window_days` ending at `today` (inclusive)
    pub async fn read_window(&self, window_days: u32, today: NaiveDate) -> MemorySignal {
        let mut signal = MemorySignal::default();

        for offset in (0..window_days as i64).rev() {
            let date = today - Duration::days(offset);
            let path = self.dir.join(format!("{}.md", date));

            let Ok(text) = fs::read_to_string(&path).await else {
                continue;
            };

            signal.decisions += decision_re().find_iter(&text).count();
            signal.problems += problem_re().find_iter(&text).count();
            signal.successes += success_re().find_iter(&text).count();
            signal.days.push(DayLog { date, text });
        }

        signal
    }
}
