//! CUSTOS Occupational-Health Reference Runtime — Demo CLI
//!
//! Runs one or all of the three clinic demo scenarios.  Each scenario uses
//! real CUSTOS components (access directory, gateway, permission cache,
//! decision recorder) wired together with fictional clinic data.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- front-desk
//!   cargo run -p demo -- tenant-isolation
//!   cargo run -p demo -- patient-portal

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use custos_ref_clinic::scenarios::{front_desk, patient_portal, tenant_isolation};

// ── CLI definition ────────────────────────────────────────────────────────────

/// CUSTOS — Tenant-scoped access control clinic demo.
///
/// Each subcommand runs one or all of the three clinic scenarios,
/// demonstrating CUSTOS's capability, scoping, and audit enforcement.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "CUSTOS occupational-health reference runtime demo",
    long_about = "Runs CUSTOS clinic demo scenarios showing capability gating,\n\
                  tenant/owner record scoping, and decision-log chain integrity."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all three clinic scenarios in sequence.
    RunAll,
    /// Scenario 1: Front Desk Booking (capability-gated appointment book).
    FrontDesk,
    /// Scenario 2: Tenant Isolation (same rows, three callers).
    TenantIsolation,
    /// Scenario 3: Patient Portal (owner scoping + global catalog).
    PatientPortal,
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
        Command::FrontDesk => front_desk::run_scenario(),
        Command::TenantIsolation => tenant_isolation::run_scenario(),
        Command::PatientPortal => patient_portal::run_scenario(),
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

fn run_all() -> custos_contracts::error::CustosResult<()> {
    front_desk::run_scenario()?;
    tenant_isolation::run_scenario()?;
    patient_portal::run_scenario()?;
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("CUSTOS — Tenant-Scoped Access Control");
    println!("Occupational-Health Reference Demo");
    println!("=====================================");
    println!();
    println!("CUSTOS enforcement pipeline per check:");
    println!("  [1] Permission cache consulted for (role, resource, action)");
    println!("  [2] Evaluator gates the action: super bypass, else capability lookup");
    println!("  [3] Scoping filter narrows records: global / tenant / owner, fail-closed");
    println!("  [4] Decision appended to the SHA-256 hash-chained log — allow or deny");
    println!();
}
