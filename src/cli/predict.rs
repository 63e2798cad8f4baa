//! Prediction tracking commands.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Subcommand;

use crate::config;
use crate::core::{advance, find_mut, RecordStore};
use crate::domain::{Outcome, Prediction, PredictionStatus};
use crate::report;

use super::{short_id, truncate};

#[derive(Subcommand, Debug)]
pub enum PredictCommands {
    /// Put a new claim on record
    Create {
        /// The claim text
        claim: String,

        /// Confidence percent, 0-100
        confidence: u8,

        /// Category label (e.g. crypto, tech)
        category: String,

        /// Resolution deadline (YYYY-MM-DD)
        deadline: NaiveDate,
    },

    /// List tracked predictions
    List,

    /// Resolve a prediction with an outcome
    Resolve {
        /// Record id (prefix accepted)
        id: String,

        /// How it turned out
        #[arg(value_enum)]
        outcome: Outcome,

        /// Supporting proof reference
        #[arg(long)]
        proof: Option<String>,
    },

    /// Show accuracy and category breakdown
    Stats,
}

pub async fn execute(command: PredictCommands) -> Result<()> {
    match command {
        PredictCommands::Create {
            claim,
            confidence,
            category,
            deadline,
        } => create(claim, confidence, category, deadline).await,
        PredictCommands::List => list().await,
        PredictCommands::Resolve { id, outcome, proof } => resolve(&id, outcome, proof).await,
        PredictCommands::Stats => stats().await,
    }
}

fn prediction_store() -> Result<RecordStore<Prediction>> {
    Ok(RecordStore::new(config::predictions_path()?))
}

async fn create(
    claim: String,
    confidence: u8,
    category: String,
    deadline: NaiveDate,
) -> Result<()> {
    let prediction = Prediction::new(claim, confidence, category, deadline);
    let id = prediction.id.clone();

    prediction_store()?.append(prediction).await?;

    println!("Prediction {} created (active)", short_id(&id));
    Ok(())
}

async fn list() -> Result<()> {
    let predictions = prediction_store()?.load().await;

    if predictions.is_empty() {
        println!("No predictions on record.");
        return Ok(());
    }

    println!(
        "{:<10} {:<10} {:<5} {:<10} {:<12} {:<40}",
        "ID", "STATUS", "CONF", "CATEGORY", "DEADLINE", "CLAIM"
    );
    println!("{}", "-".repeat(90));

    for p in &predictions {
        let status = match p.outcome {
            Some(outcome) => format!("{}", outcome),
            None => p.status.to_string(),
        };
        println!(
            "{:<10} {:<10} {:<5} {:<10} {:<12} {:<40}",
            short_id(&p.id),
            status,
            format!("{}%", p.confidence),
            truncate(&p.category, 10),
            p.deadline.to_string(),
            truncate(&p.claim, 40)
        );
    }

    println!("\nTotal: {} prediction(s)", predictions.len());
    Ok(())
}

async fn resolve(id: &str, outcome: Outcome, proof: Option<String>) -> Result<()> {
    let store = prediction_store()?;
    let mut predictions = store.load().await;

    let Some(p) = find_mut(&mut predictions, id) else {
        println!("No prediction matching '{}'", id);
        return Ok(());
    };

    if let Err(e) = advance(p, PredictionStatus::Resolved) {
        println!("Cannot resolve '{}': {}", short_id(&p.id), e);
        return Ok(());
    }

    p.outcome = Some(outcome);
    p.proof = proof;

    println!("{} resolved: {}", short_id(&p.id), outcome);
    store.save(&predictions).await?;
    Ok(())
}

async fn stats() -> Result<()> {
    let predictions = prediction_store()?.load().await;
    let stats = report::prediction_stats(&predictions);

    println!("Predictions");
    println!("  Total:     {}", stats.total);
    println!("  Active:    {}", stats.active);
    println!("  Resolved:  {}", stats.resolved);
    println!(
        "  Outcomes:  {} correct / {} incorrect / {} partial",
        stats.correct, stats.incorrect, stats.partial
    );
    println!("  Accuracy:  {:.1}%", stats.accuracy);

    if !stats.by_category.is_empty() {
        println!("\n  By category:");
        for (category, cat) in &stats.by_category {
            println!("    {:<12} {}/{} correct", category, cat.correct, cat.total);
        }
    }

    Ok(())
}
