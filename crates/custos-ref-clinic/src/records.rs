//! Simulated clinic data for the CUSTOS reference runtime.
//!
//! All data in this module is hardcoded and fictional. No external systems
//! are contacted. This module acts as a stand-in for the real clinical and
//! inventory databases of a production deployment.
//!
//! Two tenants exist in the sample world: `clinic-north` and `clinic-south`.
//! One appointment was imported from a legacy system and carries no tenant
//! id at all — the scoping filter hides it from everyone but the super
//! role.

use serde::{Deserialize, Serialize};

use custos_contracts::{
    identity::{TenantId, UserId},
    record::ScopedRecord,
};

use crate::repository::Identified;

// ── Appointments (tenant-scoped) ──────────────────────────────────────────────

/// A scheduled visit at one clinic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    /// The clinic the visit belongs to. Absent on legacy imports.
    pub tenant_id: Option<TenantId>,
    /// The patient the visit was booked for.
    pub patient_id: UserId,
    pub clinician: String,
    /// Scheduled start, ISO 8601 local clinic time.
    pub scheduled_for: String,
    pub reason: String,
}

impl ScopedRecord for Appointment {
    fn owner_id(&self) -> Option<&UserId> {
        Some(&self.patient_id)
    }

    fn tenant_id(&self) -> Option<&TenantId> {
        self.tenant_id.as_ref()
    }
}

impl Identified for Appointment {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Six appointments: three at clinic-north, two at clinic-south, and one
/// legacy import with no tenant id.
pub fn sample_appointments() -> Vec<Appointment> {
    let booking = |id: &str, tenant: Option<&str>, patient: &str, clinician: &str,
                   scheduled_for: &str, reason: &str| Appointment {
        id: id.to_string(),
        tenant_id: tenant.map(TenantId::new),
        patient_id: UserId::new(patient),
        clinician: clinician.to_string(),
        scheduled_for: scheduled_for.to_string(),
        reason: reason.to_string(),
    };

    vec![
        booking(
            "apt-001",
            Some("clinic-north"),
            "pat-301",
            "Dr. L. Okafor",
            "2026-03-09T09:00",
            "annual occupational physical",
        ),
        booking(
            "apt-002",
            Some("clinic-north"),
            "pat-302",
            "Dr. L. Okafor",
            "2026-03-09T10:30",
            "audiometry follow-up",
        ),
        booking(
            "apt-003",
            Some("clinic-south"),
            "pat-401",
            "Dr. M. Haddad",
            "2026-03-10T08:15",
            "pre-employment screening",
        ),
        booking(
            "apt-004",
            Some("clinic-north"),
            "pat-303",
            "Dr. S. Virtanen",
            "2026-03-11T14:00",
            "return-to-work assessment",
        ),
        booking(
            "apt-005",
            Some("clinic-south"),
            "pat-402",
            "Dr. M. Haddad",
            "2026-03-12T11:45",
            "vaccination appointment",
        ),
        booking(
            "apt-006",
            None,
            "pat-199",
            "Dr. A. Rivera",
            "2026-03-13T16:30",
            "legacy import, spirometry recheck",
        ),
    ]
}

// ── Medical records (owner-scoped) ────────────────────────────────────────────

/// A clinical record owned by the patient it describes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub id: String,
    pub tenant_id: Option<TenantId>,
    /// The patient the record belongs to — its owner for scoping purposes.
    pub patient_id: UserId,
    /// ICD-10 code of the primary finding.
    pub diagnosis_code: String,
    pub summary: String,
    /// Date of the encounter, ISO 8601.
    pub recorded_on: String,
}

impl ScopedRecord for MedicalRecord {
    fn owner_id(&self) -> Option<&UserId> {
        Some(&self.patient_id)
    }

    fn tenant_id(&self) -> Option<&TenantId> {
        self.tenant_id.as_ref()
    }
}

impl Identified for MedicalRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Four records, exactly one of which belongs to patient `pat-301`.
pub fn sample_medical_records() -> Vec<MedicalRecord> {
    let entry = |id: &str, patient: &str, diagnosis_code: &str, summary: &str,
                 recorded_on: &str| MedicalRecord {
        id: id.to_string(),
        tenant_id: Some(TenantId::new("clinic-north")),
        patient_id: UserId::new(patient),
        diagnosis_code: diagnosis_code.to_string(),
        summary: summary.to_string(),
        recorded_on: recorded_on.to_string(),
    };

    vec![
        entry(
            "mr-101",
            "pat-301",
            "Z02.1",
            "Pre-employment examination, fit for duty without restrictions.",
            "2026-02-10",
        ),
        entry(
            "mr-102",
            "pat-302",
            "H83.3",
            "Mild noise-induced threshold shift, hearing protection reinforced.",
            "2026-02-14",
        ),
        entry(
            "mr-103",
            "pat-303",
            "M54.5",
            "Low back pain after manual handling, referred to physiotherapy.",
            "2026-02-18",
        ),
        entry(
            "mr-104",
            "pat-304",
            "J45.9",
            "Asthma review, spirometry stable, continue current inhaler.",
            "2026-02-21",
        ),
    ]
}

// ── Stock items (tenant-scoped) ───────────────────────────────────────────────

/// One inventory line at a clinic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub id: String,
    pub tenant_id: Option<TenantId>,
    pub name: String,
    pub quantity: u32,
    pub reorder_level: u32,
}

impl ScopedRecord for StockItem {
    fn owner_id(&self) -> Option<&UserId> {
        None
    }

    fn tenant_id(&self) -> Option<&TenantId> {
        self.tenant_id.as_ref()
    }
}

impl Identified for StockItem {
    fn id(&self) -> &str {
        &self.id
    }
}

pub fn sample_stock_items() -> Vec<StockItem> {
    let line = |id: &str, tenant: &str, name: &str, quantity: u32, reorder_level: u32| StockItem {
        id: id.to_string(),
        tenant_id: Some(TenantId::new(tenant)),
        name: name.to_string(),
        quantity,
        reorder_level,
    };

    vec![
        line("stk-01", "clinic-north", "Sterile gauze pads 10x10", 240, 50),
        line("stk-02", "clinic-north", "Influenza vaccine doses", 18, 25),
        line("stk-03", "clinic-south", "Rapid antigen test kits", 96, 40),
        line("stk-04", "clinic-south", "Nitrile gloves, box of 100", 31, 20),
    ]
}

// ── Pharmacy products (globally visible) ──────────────────────────────────────

/// A storefront catalog entry, visible to every caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PharmacyProduct {
    pub id: String,
    pub name: String,
    pub price_cents: u32,
    pub requires_prescription: bool,
}

impl ScopedRecord for PharmacyProduct {
    fn owner_id(&self) -> Option<&UserId> {
        None
    }

    fn tenant_id(&self) -> Option<&TenantId> {
        None
    }
}

impl Identified for PharmacyProduct {
    fn id(&self) -> &str {
        &self.id
    }
}

pub fn sample_pharmacy_products() -> Vec<PharmacyProduct> {
    let product = |id: &str, name: &str, price_cents: u32, requires_prescription: bool| {
        PharmacyProduct {
            id: id.to_string(),
            name: name.to_string(),
            price_cents,
            requires_prescription,
        }
    };

    vec![
        product("phm-01", "Ibuprofen 400 mg, 30 tablets", 649, false),
        product("phm-02", "Cetirizine 10 mg, 14 tablets", 499, false),
        product("phm-03", "Salbutamol inhaler 100 µg", 1250, true),
        product("phm-04", "Ferrous sulfate 325 mg, 60 tablets", 899, false),
    ]
}
