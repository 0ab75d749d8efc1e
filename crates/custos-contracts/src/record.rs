//! Record scoping types.
//!
//! The core never creates, mutates, or deletes domain records — records
//! are owned by the CRUD collaborator. The core only needs to see the two
//! fields visibility is decided on, which is what `ScopedRecord` exposes.

use serde::{Deserialize, Serialize};

use crate::identity::{TenantId, UserId};

/// How visibility is narrowed for one resource.
///
/// Every configured resource has exactly one strategy, declared in the
/// access configuration. Resources with no configured strategy are
/// fail-closed: nobody but the super role sees anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopingStrategy {
    /// No filtering — every caller sees every record.
    Global,
    /// Callers see records whose tenant id equals their own tenant id.
    /// Records without a tenant id are visible to the super role only.
    Tenant,
    /// Callers see records whose owner id equals their own user id.
    Owner,
}

impl ScopingStrategy {
    /// The canonical snake_case name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopingStrategy::Global => "global",
            ScopingStrategy::Tenant => "tenant",
            ScopingStrategy::Owner => "owner",
        }
    }
}

/// A domain record the scoping filter can decide visibility for.
///
/// Both accessors return `None` when the underlying field is absent —
/// common for legacy rows and for globally shared data. The filter treats
/// a missing field as matching no caller (fail-closed), never as matching
/// every caller.
pub trait ScopedRecord {
    /// The user who owns this record, if any.
    fn owner_id(&self) -> Option<&UserId>;

    /// The tenant this record belongs to, if any.
    fn tenant_id(&self) -> Option<&TenantId>;
}
