//! Scenario 1: Front Desk Booking
//!
//! A front-desk clerk at clinic-north works the appointment book:
//!
//! Sub-case A — list appointments  → Allow, narrowed to the clerk's tenant
//! Sub-case B — create a booking   → Allow (granted capability)
//! Sub-case C — delete a booking   → Deny (no capability; audited)
//!
//! Every decision — including the deny — lands in the hash-chained
//! decision log, whose integrity is verified at the end.

use std::sync::Arc;

use custos_audit::InMemoryAccessRecorder;
use custos_contracts::{
    capability::Action,
    decision::{AccessDecision, SessionId},
    error::{CustosError, CustosResult},
    identity::{CallerIdentity, Role, TenantId, UserId},
};
use custos_core::{
    traits::{IdentityProvider, RecordSource},
    Gateway,
};
use custos_registry::StaticAccessDirectory;

use crate::{
    records::{sample_appointments, Appointment},
    repository::InMemoryRepository,
    session::StaticIdentityProvider,
};

/// Run Scenario 1: Front Desk Booking.
pub fn run_scenario() -> CustosResult<()> {
    println!("=== Scenario 1: Front Desk Booking ===");
    println!();

    let directory = Arc::new(StaticAccessDirectory::from_toml_str(super::CLINIC_POLICY)?);
    let session_id = SessionId::new();
    let recorder = Arc::new(InMemoryAccessRecorder::new(session_id.0.to_string()));
    let gateway = Gateway::new(
        Box::new(Arc::clone(&directory)),
        Box::new(Arc::clone(&directory)),
        Box::new(Arc::clone(&recorder)),
    );

    // The identity comes from the provider once and is passed explicitly
    // to every check afterwards.
    let provider = StaticIdentityProvider::authenticated(CallerIdentity::in_tenant(
        Role::FrontDesk,
        "clerk-117",
        "clinic-north",
    ));
    let identity = provider.current_identity().ok_or(CustosError::Unauthenticated)?;

    println!("  Caller: clerk-117, role front_desk, tenant clinic-north");
    println!();

    let appointments = InMemoryRepository::seeded("appointments", sample_appointments());

    // ── Sub-case A: list appointments ─────────────────────────────────────────

    let visible = gateway.fetch_visible(&identity, &appointments)?;
    println!("  Sub-case A: list appointments");
    println!(
        "  Visible bookings:       {} of {} (tenant-scoped to clinic-north)",
        visible.len(),
        appointments.len()
    );

    // ── Sub-case B: create a booking ──────────────────────────────────────────

    println!();
    println!("  Sub-case B: create a booking");
    gateway.require(&identity, appointments.resource(), Action::Create)?;

    let booking = Appointment {
        id: "apt-007".to_string(),
        tenant_id: Some(TenantId::new("clinic-north")),
        patient_id: UserId::new("pat-305"),
        clinician: "Dr. S. Virtanen".to_string(),
        scheduled_for: "2026-03-16T09:30".to_string(),
        reason: "night-shift fitness evaluation".to_string(),
    };
    match appointments.create(booking) {
        Ok(()) => println!("  Booking apt-007:        created (capability granted, repository accepted)"),
        Err(e) => println!("  Booking apt-007:        repository rejected: {}", e),
    }

    // ── Sub-case C: delete a booking ──────────────────────────────────────────

    println!();
    println!("  Sub-case C: delete a booking");
    match gateway.check(&identity, appointments.resource(), Action::Delete)? {
        AccessDecision::Deny { reason } => {
            println!("  Decision:               Deny");
            println!("  Reason:                 {}", reason);
            println!("  Repository touched:     NO (gateway blocked before the collaborator)");
        }
        AccessDecision::Allow => {
            println!("  Unexpectedly allowed — front_desk must not delete bookings");
        }
    }

    // ── Decision log ──────────────────────────────────────────────────────────

    let integrity_ok = recorder.verify_integrity();
    let log = recorder.export_log();
    gateway.seal_session(&log.session_id)?;

    println!();
    println!(
        "  Decision log integrity: {} ({} decision(s), deny included)",
        if integrity_ok { "VERIFIED" } else { "FAILED" },
        log.events.len()
    );
    println!();
    println!("  Scenario 1 complete.");
    println!();

    Ok(())
}
