//! Command-line interface for brandpipe.
//!
//! One subcommand per record kind, with a uniform verb shape:
//! generate/create, list, approve, resolve/complete/post, stats.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config;

pub mod book;
pub mod clips;
pub mod content;
pub mod predict;

/// brandpipe - personal brand content pipeline
#[derive(Parser, Debug)]
#[command(name = "brandpipe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate and moderate post ideas
    Content {
        #[command(subcommand)]
        command: content::ContentCommands,
    },

    /// Detect and review stream highlight clips
    Clips {
        #[command(subcommand)]
        command: clips::ClipCommands,
    },

    /// Track public predictions
    Predict {
        #[command(subcommand)]
        command: predict::PredictCommands,
    },

    /// Manage consultation bookings
    Book {
        #[command(subcommand)]
        command: book::BookCommands,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Content { command } => content::execute(command).await,
            Commands::Clips { command } => clips::execute(command).await,
            Commands::Predict { command } => predict::execute(command).await,
            Commands::Book { command } => book::execute(command).await,
            Commands::Config => show_config(),
        }
    }
}

/// Show the resolved configuration (for debugging)
fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("brandpipe configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home (stores):   {}", cfg.home.display());
    println!("  Memory log:      {}", cfg.memory_dir.display());
    if cfg.projects.is_empty() {
        println!("  Projects:        (none configured)");
    } else {
        for project in &cfg.projects {
            println!("  Project:         {}", project.display());
        }
    }
    println!();
    println!(
        "Live endpoint: {}",
        cfg.live_endpoint.as_deref().unwrap_or("(not configured)")
    );
    println!();
    println!("Limits:");
    println!("  Queue cap:           {}", cfg.limits.queue_cap);
    println!("  Ideas per run:       {}", cfg.limits.top_ideas);
    println!("  Commit window:       {}h", cfg.limits.commit_window_hours);
    println!("  Memory window:       {}d", cfg.limits.memory_window_days);
    println!("  Weekly bookings:     {}", cfg.limits.weekly_bookings);
    println!("  Booking price:       {}", cfg.limits.booking_price);
    println!("  Chat spike:          {} msgs", cfg.limits.chat_spike_messages);
    println!("  Viewer threshold:    {}", cfg.limits.viewer_threshold);
    println!("  Watch interval:      {}s", cfg.limits.watch_interval_secs);

    Ok(())
}

/// Truncate a text column for table output
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

/// Short id column (records use UUID strings)
pub(crate) fn short_id(id: &str) -> &str {
    &id[..id.len().min(8)]
}
