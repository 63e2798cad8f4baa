//! Configuration for brandpipe paths and limits.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (BRANDPIPE_HOME, BRANDPIPE_MEMORY, BRANDPIPE_LIVE_ENDPOINT)
//! 2. Config file (.brandpipe/config.yaml)
//! 3. Defaults (~/.brandpipe)
//!
//! Config file discovery:
//! - Searches current directory and parents for .brandpipe/config.yaml
//! - Paths in config file are relative to the config file's parent directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub limits: Option<LimitsConfig>,
    #[serde(default)]
    pub live: Option<LiveConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Engine state directory (relative to config file)
    pub home: Option<String>,
    /// Memory-log directory (relative to config file)
    pub memory: Option<String>,
    /// Project directories scanned for commits
    #[serde(default)]
    pub projects: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    pub queue_cap: Option<usize>,
    pub top_ideas: Option<usize>,
    pub commit_window_hours: Option<u64>,
    pub memory_window_days: Option<u32>,
    pub weekly_bookings: Option<usize>,
    pub booking_price: Option<u32>,
    pub chat_spike_messages: Option<usize>,
    pub viewer_threshold: Option<u32>,
    pub watch_interval_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LiveConfig {
    pub endpoint: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to brandpipe home (record stores)
    pub home: PathBuf,
    /// Absolute path to the memory-log directory
    pub memory_dir: PathBuf,
    /// Project directories scanned for commit signals
    pub projects: Vec<PathBuf>,
    /// Live-state endpoint, if configured
    pub live_endpoint: Option<String>,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Admission and generation limits
    pub limits: Limits,
}

/// Admission and generation tunables
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum content queue size (oldest entries dropped beyond this)
    pub queue_cap: usize,
    /// How many generated ideas to offer per run
    pub top_ideas: usize,
    /// Trailing commit window
    pub commit_window_hours: u64,
    /// Trailing memory-log window
    pub memory_window_days: u32,
    /// Bookings accepted per calendar week
    pub weekly_bookings: usize,
    /// Fixed consultation price
    pub booking_price: u32,
    /// Chat messages that count as a spike
    pub chat_spike_messages: usize,
    /// Viewer count that earns the viewer indicator
    pub viewer_threshold: u32,
    /// Interval between watch-mode detection checks
    pub watch_interval_secs: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            queue_cap: 50,
            top_ideas: 3,
            commit_window_hours: 24,
            memory_window_days: 7,
            weekly_bookings: 3,
            booking_price: 150,
            chat_spike_messages: 10,
            viewer_threshold: 50,
            watch_interval_secs: 300,
        }
    }
}

impl Limits {
    fn from_file(limits: Option<&LimitsConfig>) -> Self {
        let defaults = Self::default();
        let Some(l) = limits else {
            return defaults;
        };

        Self {
            queue_cap: l.queue_cap.unwrap_or(defaults.queue_cap),
            top_ideas: l.top_ideas.unwrap_or(defaults.top_ideas),
            commit_window_hours: l.commit_window_hours.unwrap_or(defaults.commit_window_hours),
            memory_window_days: l.memory_window_days.unwrap_or(defaults.memory_window_days),
            weekly_bookings: l.weekly_bookings.unwrap_or(defaults.weekly_bookings),
            booking_price: l.booking_price.unwrap_or(defaults.booking_price),
            chat_spike_messages: l.chat_spike_messages.unwrap_or(defaults.chat_spike_messages),
            viewer_threshold: l.viewer_threshold.unwrap_or(defaults.viewer_threshold),
            watch_interval_secs: l.watch_interval_secs.unwrap_or(defaults.watch_interval_secs),
        }
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".brandpipe").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's parent
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".brandpipe");

    let config_file = find_config_file();

    let (home, memory_dir, projects, live_endpoint, limits) = if let Some(ref config_path) =
        config_file
    {
        let config = load_config_file(config_path)?;

        // Base directory is the parent of .brandpipe/ (the project root)
        let base_dir = config_path
            .parent()
            .and_then(|p| p.parent())
            .unwrap_or(Path::new("."));

        let home = if let Ok(env_home) = std::env::var("BRANDPIPE_HOME") {
            PathBuf::from(env_home)
        } else if let Some(ref home_path) = config.paths.home {
            // home is relative to the .brandpipe/ directory
            let brandpipe_dir = config_path.parent().unwrap_or(Path::new("."));
            resolve_path(brandpipe_dir, home_path)
        } else {
            default_home.clone()
        };

        let memory_dir = if let Ok(env_memory) = std::env::var("BRANDPIPE_MEMORY") {
            PathBuf::from(env_memory)
        } else if let Some(ref memory_path) = config.paths.memory {
            resolve_path(base_dir, memory_path)
        } else {
            home.join("memory")
        };

        let projects = config
            .paths
            .projects
            .iter()
            .map(|p| resolve_path(base_dir, p))
            .collect();

        let live_endpoint = std::env::var("BRANDPIPE_LIVE_ENDPOINT")
            .ok()
            .or_else(|| config.live.as_ref().and_then(|l| l.endpoint.clone()));

        let limits = Limits::from_file(config.limits.as_ref());

        (home, memory_dir, projects, live_endpoint, limits)
    } else {
        let home = std::env::var("BRANDPIPE_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_home.clone());

        let memory_dir = std::env::var("BRANDPIPE_MEMORY")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join("memory"));

        let live_endpoint = std::env::var("BRANDPIPE_LIVE_ENDPOINT").ok();

        (home, memory_dir, Vec::new(), live_endpoint, Limits::default())
    };

    Ok(ResolvedConfig {
        home,
        memory_dir,
        projects,
        live_endpoint,
        config_file,
        limits,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

// ============================================================================
// Store path helpers
// ============================================================================

/// Active content queue ($BRANDPIPE_HOME/queue.json)
pub fn queue_path() -> Result<PathBuf> {
    Ok(config()?.home.join("queue.json"))
}

/// Posted content archive ($BRANDPIPE_HOME/posted.json)
pub fn posted_path() -> Result<PathBuf> {
    Ok(config()?.home.join("posted.json"))
}

/// Detected clips ($BRANDPIPE_HOME/clips.json)
pub fn clips_path() -> Result<PathBuf> {
    Ok(config()?.home.join("clips.json"))
}

/// Tracked predictions ($BRANDPIPE_HOME/predictions.json)
pub fn predictions_path() -> Result<PathBuf> {
    Ok(config()?.home.join("predictions.json"))
}

/// Consultation bookings ($BRANDPIPE_HOME/bookings.json)
pub fn bookings_path() -> Result<PathBuf> {
    Ok(config()?.home.join("bookings.json"))
}
