//! # custos-ref-clinic
//!
//! Occupational-health reference runtime for the CUSTOS access-control
//! core.
//!
//! Demonstrates three enforcement scenarios over a fictional two-clinic
//! dataset:
//!
//! 1. **Front Desk Booking** — capability gating on the appointment book:
//!    read and create allowed, delete denied and audited.
//! 2. **Tenant Isolation** — the same rows narrowed differently for two
//!    tenant admins and the super admin, including a legacy row with no
//!    tenant id that only the super admin sees.
//! 3. **Patient Portal** — owner-scoped medical records, the global
//!    pharmacy catalog, and a hard `PermissionDenied` on edit attempts.
//!
//! All data is hardcoded and fictional. No external API calls are made.

pub mod records;
pub mod repository;
pub mod scenarios;
pub mod session;

// ── Tests ─────────────────────────────────────────────────────────────────────
