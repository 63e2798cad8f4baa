//! Content pipeline commands: generate, moderate, post.

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;

use crate::adapters::{HttpPublisher, Publisher};
use crate::config;
use crate::core::{advance, enforce_queue_cap, find_mut, DedupFilter, RecordStore};
use crate::domain::{ContentItem, ContentStatus};
use crate::generator::IdeaGenerator;
use crate::report;
use crate::signals::{CommitHistory, MemoryLog};

use super::{short_id, truncate};

#[derive(Subcommand, Debug)]
pub enum ContentCommands {
    /// Generate post ideas from commit and memory-log signals
    Generate {
        /// How many ideas to offer
        #[arg(short, long)]
        count: Option<usize>,
    },

    /// List the active queue
    Queue,

    /// Approve a queued item for posting
    Approve {
        /// Record id (prefix accepted)
        id: String,
    },

    /// Reject a queued item
    Reject {
        /// Record id (prefix accepted)
        id: String,
    },

    /// Publish an approved item and archive it
    Post {
        /// Record id (prefix accepted)
        id: String,
    },

    /// Show pipeline statistics
    Stats,
}

pub async fn execute(command: ContentCommands) -> Result<()> {
    match command {
        ContentCommands::Generate { count } => generate(count).await,
        ContentCommands::Queue => list_queue().await,
        ContentCommands::Approve { id } => moderate(&id, ContentStatus::Approved).await,
        ContentCommands::Reject { id } => moderate(&id, ContentStatus::Rejected).await,
        ContentCommands::Post { id } => post(&id).await,
        ContentCommands::Stats => stats().await,
    }
}

fn queue_store() -> Result<RecordStore<ContentItem>> {
    Ok(RecordStore::new(config::queue_path()?))
}

fn posted_store() -> Result<RecordStore<ContentItem>> {
    Ok(RecordStore::new(config::posted_path()?))
}

/// Generate ideas and admit non-duplicates into the queue
async fn generate(count: Option<usize>) -> Result<()> {
    let cfg = config::config()?;
    let count = count.unwrap_or(cfg.limits.top_ideas);

    let commits = CommitHistory::new(cfg.projects.clone())
        .recent(cfg.limits.commit_window_hours)
        .await;
    let memory = MemoryLog::new(cfg.memory_dir.clone())
        .read_window(cfg.limits.memory_window_days, Utc::now().date_naive())
        .await;

    if commits.is_empty() && memory.is_empty() {
        println!("No signals in the current window; nothing to generate.");
        return Ok(());
    }

    let ideas = IdeaGenerator::new().generate(&commits, &memory, count);

    let qs = queue_store()?;
    let ps = posted_store()?;
    let mut queue = qs.load().await;
    let posted = ps.load().await;

    let mut filter = DedupFilter::new(queue.iter().chain(posted.iter()));
    let mut admitted = 0;

    for idea in ideas {
        match filter.admit(&idea.text) {
            Ok(()) => {
                println!("+ [{}] {} {}", idea.template_family, short_id(&idea.id), idea.text);
                queue.push(idea);
                admitted += 1;
            }
            Err(e) => {
                println!("- skipped ({}): {}", e, truncate(&idea.text, 60));
            }
        }
    }

    enforce_queue_cap(&mut queue, cfg.limits.queue_cap);
    qs.save(&queue).await?;

    eprintln!("\n[{} idea(s) admitted, queue size {}]", admitted, queue.len());
    Ok(())
}

/// List the active queue
async fn list_queue() -> Result<()> {
    let queue = queue_store()?.load().await;

    if queue.is_empty() {
        println!("Queue is empty. Use 'brandpipe content generate' to add ideas.");
        return Ok(());
    }

    println!(
        "{:<10} {:<10} {:<5} {:<18} {:<50}",
        "ID", "STATUS", "PRIO", "FAMILY", "TEXT"
    );
    println!("{}", "-".repeat(95));

    for item in &queue {
        println!(
            "{:<10} {:<10} {:<5} {:<18} {:<50}",
            short_id(&item.id),
            item.status.to_string(),
            item.priority,
            item.template_family.to_string(),
            truncate(&item.text, 50)
        );
    }

    println!("\nTotal: {} item(s)", queue.len());
    Ok(())
}

/// Approve or reject a queued item
async fn moderate(id: &str, target: ContentStatus) -> Result<()> {
    let store = queue_store()?;
    let mut queue = store.load().await;

    let Some(item) = find_mut(&mut queue, id) else {
        println!("No content item matching '{}'", id);
        return Ok(());
    };

    if let Err(e) = advance(item, target) {
        println!("Cannot move '{}': {}", short_id(&item.id), e);
        return Ok(());
    }

    println!("{} -> {}", short_id(&item.id), item.status);
    store.save(&queue).await?;
    Ok(())
}

/// Publish an approved item; on success it moves to the posted archive
async fn post(id: &str) -> Result<()> {
    let qs = queue_store()?;
    let ps = posted_store()?;
    let mut queue = qs.load().await;

    let Some(pos) = queue.iter().position(|i| i.id.starts_with(id)) else {
        println!("No content item matching '{}'", id);
        return Ok(());
    };

    if queue[pos].status != ContentStatus::Approved {
        println!(
            "Only approved items can be posted ('{}' is {})",
            short_id(&queue[pos].id),
            queue[pos].status
        );
        return Ok(());
    }

    let publisher = match HttpPublisher::from_env() {
        Ok(publisher) => publisher,
        Err(e) => {
            eprintln!("Publisher unavailable: {}", e);
            return Ok(());
        }
    };

    match publisher.publish(&queue[pos].text).await {
        Ok(post_ref) => {
            archive_posted(&qs, &ps, &mut queue, pos, post_ref.clone()).await?;
            println!("Posted ({})", post_ref);
        }
        Err(e) => {
            // No retry here; the item stays approved for a later attempt.
            eprintln!("Publish failed, item left approved: {}", e);
        }
    }

    Ok(())
}

/// Move a published item from the queue to the posted archive.
///
/// The archive write happens first: if it fails, the queue file is left
/// untouched and the item survives. A crash between the two writes at worst
/// duplicates the item across stores, which is recoverable; the reverse
/// order could lose the published record from both.
async fn archive_posted(
    queue_store: &RecordStore<ContentItem>,
    posted_store: &RecordStore<ContentItem>,
    queue: &mut Vec<ContentItem>,
    pos: usize,
    post_ref: String,
) -> Result<()> {
    let mut item = queue.remove(pos);
    advance(&mut item, ContentStatus::Posted).map_err(|e| anyhow::anyhow!("{}", e))?;
    item.post_ref = Some(post_ref);

    posted_store.append(item).await?;
    queue_store.save(queue).await?;
    Ok(())
}

/// Show pipeline statistics
async fn stats() -> Result<()> {
    let queue = queue_store()?.load().await;
    let posted = posted_store()?.load().await;

    let stats = report::content_stats(&queue, &posted);

    println!("Content pipeline");
    println!("  Queued:   {}", stats.queued);
    println!("  Pending:  {}", stats.pending);
    println!("  Approved: {}", stats.approved);
    println!("  Rejected: {}", stats.rejected);
    println!("  Posted:   {}", stats.posted);

    Ok(())
}
