//! Reference enforcement scenarios.
//!
//! Each scenario wires real CUSTOS components — the TOML access directory,
//! the audited gateway, the hash-chained decision recorder — around the
//! fictional clinic dataset, and prints the enforcement outcomes.

pub mod front_desk;
pub mod patient_portal;
pub mod tenant_isolation;

/// The access configuration shared by all scenarios.
pub(crate) const CLINIC_POLICY: &str = include_str!("../../policies/clinic.toml");
