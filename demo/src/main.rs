//! Eligo — Insurance Eligibility Verification Demo CLI
//!
//! Runs one or all of the five front-office demo scenarios. Each scenario
//! wires real Eligo components (verification lifecycle, classifier gateway,
//! role matrix, hash-chained audit trail, notification dispatcher) around a
//! scripted backend and canned patient data.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- eligible
//!   cargo run -p demo -- prior-auth
//!   cargo run -p demo -- outage
//!   cargo run -p demo -- access
//!   cargo run -p demo -- retention

mod patients;
mod scenarios;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use eligo_contracts::error::EligoResult;

use crate::scenarios::{access, eligible, outage, prior_auth, retention};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Eligo — AI-assisted insurance eligibility verification demo.
///
/// Each subcommand runs one or all of the five front-office scenarios,
/// demonstrating the verification lifecycle and its audit, access, and
/// notification side effects.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "Eligo insurance verification demo",
    long_about = "Runs Eligo front-office demo scenarios showing the verification\n\
                  lifecycle, prior authorization, classifier outage handling,\n\
                  role-based access control, and audit/retention enforcement."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all five front-office scenarios in sequence.
    RunAll,
    /// Scenario 1: Eligible Walk-In (clean record, one-pass resolution).
    Eligible,
    /// Scenario 2: Prior Authorization Workflow (requires_auth → eligible).
    PriorAuth,
    /// Scenario 3: Classifier Outage (retry budget, error-status fallback).
    Outage,
    /// Scenario 4: Access Control and Export (role matrix, audited denial).
    Access,
    /// Scenario 5: Retention Sweep and Compliance reporting.
    Retention,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = match cli.command {
        Command::RunAll => run_all(),
        Command::Eligible => eligible::run_scenario(),
        Command::PriorAuth => prior_auth::run_scenario(),
        Command::Outage => outage::run_scenario(),
        Command::Access => access::run_scenario(),
        Command::Retention => retention::run_scenario(),
    };

    match result {
        Ok(()) => {
            println!("All selected scenarios completed successfully.");
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

fn run_all() -> EligoResult<()> {
    eligible::run_scenario()?;
    prior_auth::run_scenario()?;
    outage::run_scenario()?;
    access::run_scenario()?;
    retention::run_scenario()?;
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("Eligo — AI-Assisted Insurance Eligibility Verification");
    println!("Front-Office Demo");
    println!("======================================================");
    println!();
    println!("Submission pipeline per verification:");
    println!("  [1] Access check: the role matrix allows or denies; denials are audited");
    println!("  [2] Validation: a dirty record leaves no trace anywhere");
    println!("  [3] Persist pending → classifier judges (with retries) → record resolves");
    println!("  [4] A classifier failure is absorbed into an error-status record");
    println!("  [5] Exactly one create entry lands on the SHA-256 audit chain");
    println!("  [6] Notifications fan out: patient confirmation or staff alerts");
    println!();
}
