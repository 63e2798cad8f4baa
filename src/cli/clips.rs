//! Clip detection commands.

use std::time::Duration;

use anyhow::Result;
use clap::Subcommand;

use crate::adapters::LiveStateClient;
use crate::config;
use crate::core::{advance, find_mut, score_live_state, RecordStore, ScoringConfig, DETECTION_THRESHOLD};
use crate::domain::{Clip, ClipStatus};

use super::short_id;

#[derive(Subcommand, Debug)]
pub enum ClipCommands {
    /// Run one detection check against the live state
    Check,

    /// Re-run the detection check on a fixed interval until terminated
    Watch {
        /// Seconds between checks
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// List detected clips
    List,

    /// Approve a detected clip
    Approve {
        /// Record id (prefix accepted)
        id: String,
    },
}

pub async fn execute(command: ClipCommands) -> Result<()> {
    match command {
        ClipCommands::Check => {
            check_once().await?;
            Ok(())
        }
        ClipCommands::Watch { interval } => watch(interval).await,
        ClipCommands::List => list().await,
        ClipCommands::Approve { id } => approve(&id).await,
    }
}

fn clip_store() -> Result<RecordStore<Clip>> {
    Ok(RecordStore::new(config::clips_path()?))
}

/// One detection pass. Offline or below-threshold passes persist nothing.
async fn check_once() -> Result<()> {
    let cfg = config::config()?;

    let Some(endpoint) = cfg.live_endpoint.clone() else {
        println!("No live endpoint configured; offline.");
        return Ok(());
    };

    let Some(state) = LiveStateClient::new(endpoint).fetch().await else {
        println!("Live state unavailable; offline.");
        return Ok(());
    };

    let scoring = ScoringConfig {
        chat_spike_messages: cfg.limits.chat_spike_messages,
        viewer_threshold: cfg.limits.viewer_threshold,
    };
    let detection = score_live_state(&state, &scoring);

    if detection.is_clip() {
        let clip = Clip::detected(detection.score, detection.indicators.clone(), &state);
        let id = clip.id.clone();
        clip_store()?.append(clip).await?;

        println!(
            "Clip detected: {} (score {}, indicators: {})",
            short_id(&id),
            detection.score,
            detection.indicators.join(", ")
        );
    } else {
        println!(
            "No clip (score {} < threshold {})",
            detection.score, DETECTION_THRESHOLD
        );
    }

    Ok(())
}

/// Periodic detection. Checks are cheap and idempotent, so no overlap
/// prevention if one outlasts the interval.
async fn watch(interval: Option<u64>) -> Result<()> {
    let cfg = config::config()?;
    let secs = interval.unwrap_or(cfg.limits.watch_interval_secs);

    eprintln!("Watching live state every {}s (ctrl-c to stop)", secs);
    let mut ticker = tokio::time::interval(Duration::from_secs(secs));

    loop {
        ticker.tick().await;
        check_once().await?;
    }
}

/// List detected clips
async fn list() -> Result<()> {
    let clips = clip_store()?.load().await;

    if clips.is_empty() {
        println!("No clips detected yet.");
        return Ok(());
    }

    println!(
        "{:<10} {:<10} {:<6} {:<8} {:<40}",
        "ID", "STATUS", "SCORE", "VIEWERS", "INDICATORS"
    );
    println!("{}", "-".repeat(76));

    for clip in &clips {
        println!(
            "{:<10} {:<10} {:<6} {:<8} {:<40}",
            short_id(&clip.id),
            clip.status.to_string(),
            clip.score,
            clip.viewer_count,
            clip.indicators.join(", ")
        );
    }

    println!("\nTotal: {} clip(s)", clips.len());
    Ok(())
}

/// Approve a detected clip
async fn approve(id: &str) -> Result<()> {
    let store = clip_store()?;
    let mut clips = store.load().await;

    let Some(clip) = find_mut(&mut clips, id) else {
        println!("No clip matching '{}'", id);
        return Ok(());
    };

    if let Err(e) = advance(clip, ClipStatus::Approved) {
        println!("Cannot approve '{}': {}", short_id(&clip.id), e);
        return Ok(());
    }

    println!("{} -> {}", short_id(&clip.id), clip.status);
    store.save(&clips).await?;
    Ok(())
}
