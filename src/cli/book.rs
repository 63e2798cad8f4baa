//! Consultation booking commands.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Subcommand;

use crate::config;
use crate::core::{advance, check_outstanding_request, check_weekly_capacity, find_mut, RecordStore};
use crate::domain::{Booking, BookingStatus};
use crate::report;

use super::{short_id, truncate};

#[derive(Subcommand, Debug)]
pub enum BookCommands {
    /// Submit a booking request (pre-validated requester identity)
    Create {
        /// Requester identity
        requester: String,

        /// Session topic
        topic: String,

        /// Linked external resource (profile URL, payment link)
        #[arg(short, long, default_value = "")]
        reference: String,
    },

    /// List pending requests
    Pending,

    /// Approve a request, optionally scheduling it
    Approve {
        /// Record id (prefix accepted)
        id: String,

        /// Session time (RFC 3339)
        #[arg(long)]
        time: Option<DateTime<Utc>>,
    },

    /// Record payment for a booking
    Paid {
        /// Record id (prefix accepted)
        id: String,
    },

    /// Mark a session completed
    Complete {
        /// Record id (prefix accepted)
        id: String,
    },

    /// Show revenue and status counts
    Stats,
}

pub async fn execute(command: BookCommands) -> Result<()> {
    match command {
        BookCommands::Create {
            requester,
            topic,
            reference,
        } => create(requester, topic, reference).await,
        BookCommands::Pending => pending().await,
        BookCommands::Approve { id, time } => approve(&id, time).await,
        BookCommands::Paid { id } => paid(&id).await,
        BookCommands::Complete { id } => complete(&id).await,
        BookCommands::Stats => stats().await,
    }
}

fn booking_store() -> Result<RecordStore<Booking>> {
    Ok(RecordStore::new(config::bookings_path()?))
}

/// Submit a request; capacity gates run before anything persists
async fn create(requester: String, topic: String, reference: String) -> Result<()> {
    let cfg = config::config()?;
    let store = booking_store()?;
    let bookings = store.load().await;

    if let Err(e) = check_weekly_capacity(&bookings, Utc::now(), cfg.limits.weekly_bookings) {
        println!("Rejected: {}", e);
        return Ok(());
    }
    if let Err(e) = check_outstanding_request(&bookings, &requester) {
        println!("Rejected: {}", e);
        return Ok(());
    }

    let booking = Booking::new(requester, reference, topic, cfg.limits.booking_price);
    let id = booking.id.clone();
    store.append(booking).await?;

    println!("Booking {} created (pending)", short_id(&id));
    Ok(())
}

/// List pending requests
async fn pending() -> Result<()> {
    let bookings = booking_store()?.load().await;
    let pending: Vec<&Booking> = bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Pending)
        .collect();

    if pending.is_empty() {
        println!("No pending bookings.");
        return Ok(());
    }

    println!(
        "{:<10} {:<16} {:<7} {:<6} {:<40}",
        "ID", "REQUESTER", "PRICE", "PAID", "TOPIC"
    );
    println!("{}", "-".repeat(80));

    for b in &pending {
        println!(
            "{:<10} {:<16} {:<7} {:<6} {:<40}",
            short_id(&b.id),
            truncate(&b.requester, 16),
            b.price,
            if b.paid { "yes" } else { "no" },
            truncate(&b.topic, 40)
        );
    }

    println!("\nTotal: {} pending", pending.len());
    Ok(())
}

/// Approve a request, optionally recording the session time
async fn approve(id: &str, time: Option<DateTime<Utc>>) -> Result<()> {
    let store = booking_store()?;
    let mut bookings = store.load().await;

    let Some(b) = find_mut(&mut bookings, id) else {
        println!("No booking matching '{}'", id);
        return Ok(());
    };

    if let Err(e) = advance(b, BookingStatus::Approved) {
        println!("Cannot approve '{}': {}", short_id(&b.id), e);
        return Ok(());
    }
    b.scheduled_for = time;

    match time {
        Some(t) => println!("{} approved for {}", short_id(&b.id), t.to_rfc3339()),
        None => println!("{} approved (unscheduled)", short_id(&b.id)),
    }
    store.save(&bookings).await?;
    Ok(())
}

/// Record payment. Independent of the status machine.
async fn paid(id: &str) -> Result<()> {
    let store = booking_store()?;
    let mut bookings = store.load().await;

    let Some(b) = find_mut(&mut bookings, id) else {
        println!("No booking matching '{}'", id);
        return Ok(());
    };

    b.mark_paid();
    println!("{} marked paid", short_id(&b.id));
    store.save(&bookings).await?;
    Ok(())
}

/// Mark a session completed
async fn complete(id: &str) -> Result<()> {
    let store = booking_store()?;
    let mut bookings = store.load().await;

    let Some(b) = find_mut(&mut bookings, id) else {
        println!("No booking matching '{}'", id);
        return Ok(());
    };

    if let Err(e) = advance(b, BookingStatus::Completed) {
        println!("Cannot complete '{}': {}", short_id(&b.id), e);
        return Ok(());
    }

    println!("{} completed", short_id(&b.id));
    store.save(&bookings).await?;
    Ok(())
}

/// Show revenue and status counts
async fn stats() -> Result<()> {
    let bookings = booking_store()?.load().await;
    let stats = report::booking_stats(&bookings, Utc::now());

    println!("Bookings");
    println!("  Total:      {}", stats.total);
    println!("  Pending:    {}", stats.pending);
    println!("  Approved:   {}", stats.approved);
    println!("  Completed:  {}", stats.completed);
    println!("  Revenue:    {}", stats.revenue);
    println!("  This month: {}", stats.month_revenue);

    Ok(())
}
