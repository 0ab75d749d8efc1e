//! Core trait definitions for the CUSTOS access-control pipeline.
//!
//! These five traits define the complete boundary of the core:
//!
//! - `RoleDirectory`    — static role → capability lookup (configuration)
//! - `ScopeDirectory`   — static resource → scoping-strategy lookup
//! - `IdentityProvider` — supplies the caller identity (external collaborator)
//! - `DecisionSink`     — records every access decision immutably
//! - `RecordSource`     — the CRUD collaborator the core filters records from
//!
//! The gateway wires them together in the correct order. The core never
//! manages session lifecycle, token refresh, or expiry — those belong to
//! the identity provider's real backend.

use custos_contracts::{
    capability::{CapabilitySet, ResourceName},
    decision::DecisionRecord,
    error::CustosResult,
    identity::{CallerIdentity, Role},
    record::{ScopedRecord, ScopingStrategy},
};

/// Static role → capability mapping.
///
/// Implementations are **trusted**, read-only after construction, and must
/// be deterministic: the same role always resolves to the same set.
/// Lookup never fails — a role with no configured entry resolves to the
/// empty set (closed world, deny-by-default).
pub trait RoleDirectory: Send + Sync {
    /// The capabilities granted to `role`. Empty for unconfigured roles.
    fn capabilities_of(&self, role: Role) -> &CapabilitySet;

    /// True only for the designated all-capabilities role.
    ///
    /// Used by the evaluator as a fast-path bypass of every capability and
    /// scoping check.
    fn is_super_role(&self, role: Role) -> bool;
}

/// Static resource → scoping-strategy mapping.
///
/// Every configured resource has exactly one strategy. `None` means the
/// resource is unconfigured, which the evaluator treats as fail-closed:
/// empty visibility for everyone but the super role.
pub trait ScopeDirectory: Send + Sync {
    fn strategy_of(&self, resource: &ResourceName) -> Option<ScopingStrategy>;
}

/// Supplies the caller identity the evaluator consumes.
///
/// The real implementation is a third-party auth backend and is out of
/// scope; the core only requires this one method. The returned identity is
/// immutable for the duration of any single access check.
pub trait IdentityProvider: Send + Sync {
    /// The currently authenticated caller, or `None` when unauthenticated.
    fn current_identity(&self) -> Option<CallerIdentity>;
}

/// The decision log: the immutable record of every access check.
///
/// Every check the gateway performs — allow or deny — produces exactly one
/// `DecisionRecord` that must be persisted by this sink. A failed write is
/// fatal: the decision is not returned to the caller.
pub trait DecisionSink: Send + Sync {
    /// Append one decision record to the log.
    ///
    /// Implementations must treat this as an append-only operation.
    /// Records written here are never modified or deleted by the core.
    fn record(&self, record: &DecisionRecord) -> CustosResult<()>;

    /// Seal the log for a finished session.
    ///
    /// Called by the hosting application on logout or session expiry.
    /// Implementations may use this to flush, sign, or close the log.
    fn seal(&self, session_id: &str) -> CustosResult<()>;
}

// One loaded configuration usually backs both directory seams, and one
// recorder is shared between the gateway and the caller that exports the
// log. Delegating through `Arc` lets a single instance be boxed into each
// seam without wrapper newtypes.

impl<T: RoleDirectory + ?Sized> RoleDirectory for std::sync::Arc<T> {
    fn capabilities_of(&self, role: Role) -> &CapabilitySet {
        (**self).capabilities_of(role)
    }

    fn is_super_role(&self, role: Role) -> bool {
        (**self).is_super_role(role)
    }
}

impl<T: ScopeDirectory + ?Sized> ScopeDirectory for std::sync::Arc<T> {
    fn strategy_of(&self, resource: &ResourceName) -> Option<ScopingStrategy> {
        (**self).strategy_of(resource)
    }
}

impl<T: DecisionSink + ?Sized> DecisionSink for std::sync::Arc<T> {
    fn record(&self, record: &DecisionRecord) -> CustosResult<()> {
        (**self).record(record)
    }

    fn seal(&self, session_id: &str) -> CustosResult<()> {
        (**self).seal(session_id)
    }
}

/// A collection of domain records owned by the CRUD collaborator.
///
/// The core only ever lists candidates and narrows them; creating,
/// mutating, and deleting records stays on the collaborator's side of the
/// boundary.
pub trait RecordSource: Send + Sync {
    /// The record type this source holds.
    type Record: ScopedRecord;

    /// The resource name visibility is configured under.
    fn resource(&self) -> &ResourceName;

    /// All candidate records, in the collaborator's storage order.
    fn list(&self) -> Vec<Self::Record>;
}
