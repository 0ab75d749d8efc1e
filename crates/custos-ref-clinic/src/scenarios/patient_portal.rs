//! Scenario 3: Patient Portal
//!
//! A patient (role `subject`) signs into the portal:
//!
//! Sub-case A — list medical records   → owner-scoped: only their own
//! Sub-case B — browse pharmacy items  → global: the full catalog
//! Sub-case C — edit a medical record  → PermissionDenied (read-only role)
//! Sub-case D — anonymous visitor      → no identity, nothing to check
//!
//! Sub-case A is the heart of the portal: four records exist at the
//! clinic, exactly one belongs to the signed-in patient.

use std::sync::Arc;

use custos_audit::InMemoryAccessRecorder;
use custos_contracts::{
    capability::Action,
    decision::SessionId,
    error::{CustosError, CustosResult},
    identity::{CallerIdentity, Role},
};
use custos_core::{
    traits::{IdentityProvider, RecordSource},
    Gateway,
};
use custos_registry::StaticAccessDirectory;

use crate::{
    records::{sample_medical_records, sample_pharmacy_products},
    repository::InMemoryRepository,
    session::StaticIdentityProvider,
};

/// Run Scenario 3: Patient Portal.
pub fn run_scenario() -> CustosResult<()> {
    println!("=== Scenario 3: Patient Portal ===");
    println!();

    let directory = Arc::new(StaticAccessDirectory::from_toml_str(super::CLINIC_POLICY)?);
    let session_id = SessionId::new();
    let recorder = Arc::new(InMemoryAccessRecorder::new(session_id.0.to_string()));
    let gateway = Gateway::new(
        Box::new(Arc::clone(&directory)),
        Box::new(Arc::clone(&directory)),
        Box::new(Arc::clone(&recorder)),
    );

    let provider = StaticIdentityProvider::authenticated(CallerIdentity::in_tenant(
        Role::Subject,
        "pat-301",
        "clinic-north",
    ));
    let patient = provider.current_identity().ok_or(CustosError::Unauthenticated)?;

    println!("  Caller: pat-301, role subject, tenant clinic-north");

    let records = InMemoryRepository::seeded("medical_records", sample_medical_records());
    let catalog = InMemoryRepository::seeded("pharmacy_products", sample_pharmacy_products());

    // ── Sub-case A: own medical records only ──────────────────────────────────

    let mine = gateway.fetch_visible(&patient, &records)?;
    println!();
    println!("  Sub-case A: list medical records (owner-scoped)");
    println!(
        "  Visible records:        {} of {} (only the caller's own)",
        mine.len(),
        records.len()
    );
    for record in &mine {
        println!(
            "    {} — {} ({})",
            record.id, record.summary, record.recorded_on
        );
    }

    // ── Sub-case B: the global pharmacy catalog ───────────────────────────────

    let products = gateway.fetch_visible(&patient, &catalog)?;
    println!();
    println!("  Sub-case B: browse the pharmacy storefront (global)");
    println!(
        "  Visible products:       {} of {} (no scoping applied)",
        products.len(),
        catalog.len()
    );

    // ── Sub-case C: editing is off the table ──────────────────────────────────

    println!();
    println!("  Sub-case C: attempt to edit a medical record");
    match gateway.require(&patient, records.resource(), Action::Update) {
        Err(CustosError::PermissionDenied { role, resource, action }) => {
            println!(
                "  Hard failure:           role '{}' may not {} on '{}'",
                role, action, resource
            );
        }
        Err(e) => println!("  Unexpected error: {}", e),
        Ok(()) => println!("  Unexpectedly allowed — subjects are read-only"),
    }

    // ── Sub-case D: no identity, no checks ────────────────────────────────────

    println!();
    println!("  Sub-case D: anonymous visitor");
    let anonymous = StaticIdentityProvider::anonymous();
    match anonymous.current_identity() {
        None => {
            println!("  Identity provider:      no current identity");
            println!("  Access checks run:      NONE (callers fail with Unauthenticated)");
        }
        Some(_) => println!("  Unexpected identity for an anonymous provider"),
    }

    // ── Decision log ──────────────────────────────────────────────────────────

    let integrity_ok = recorder.verify_integrity();
    let log = recorder.export_log();
    gateway.seal_session(&log.session_id)?;

    println!();
    println!(
        "  Decision log integrity: {} ({} decision(s), denial recorded)",
        if integrity_ok { "VERIFIED" } else { "FAILED" },
        log.events.len()
    );
    println!();
    println!("  Scenario 3 complete.");
    println!();

    Ok(())
}
