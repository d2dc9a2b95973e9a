// Rust guideline compliant 2026-10-19

//! Adoption-report entry point.
//!
//! Wires the synthetic login Producer to the in-memory login log, runs the
//! adopted-user check once per user, and logs the aggregated report.
//!
//! # Usage
//!
//! ```text
//! # Summary only
//! RUST_LOG=info cargo run --bin adoption_report
//!
//! # Also show the per-user verdicts
//! RUST_LOG=debug cargo run --bin adoption_report
//! ```

mod adapters;
mod report;

use adapters::in_memory_login_log::InMemoryLoginLog;
use adoption::{AdoptedUserCheck, AdoptionCriteria};
use anyhow::Context as _;
use producer::{Producer, ProducerConfig};

/// Number of synthetic users in a demo run.
const USERS: usize = 1_000;

/// Fixed seed so successive demo runs print the same report.
const SEED: u64 = 2014;

fn main() -> anyhow::Result<()> {
    // Initialize the tracing subscriber before any work.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let producer_config = ProducerConfig::builder(USERS)
        .seed(SEED)
        .build()
        .context("failed to build producer config")?;
    // Generous capacity: every user can hit max_logins.
    let log = InMemoryLoginLog::new(USERS * producer_config.max_logins);
    let producer = Producer::new(producer_config);

    producer.run(&log).context("failed to generate login activity")?;
    tracing::info!(logins = log.len(), "main.activity.generated");

    let criteria = AdoptionCriteria::builder()
        .build()
        .context("invalid adoption criteria")?;
    let check = AdoptedUserCheck::new(criteria);
    let summary = report::summarize(&log, &check);

    tracing::info!(
        window_days = criteria.window_days(),
        required_logins = criteria.required_logins(),
        total_users = summary.total_users,
        adopted_users = summary.adopted_users,
        adoption_rate = summary.adoption_rate(),
        "main.report"
    );
    Ok(())
}
