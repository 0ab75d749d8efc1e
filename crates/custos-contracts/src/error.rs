//! Error types for the CUSTOS access-control core.
//!
//! Deny outcomes are not errors — `authorize` returns a boolean and the
//! gateway returns `AccessDecision`. Only malformed configuration, failed
//! audit writes, and the hardened `require` path produce errors.

use thiserror::Error;

use crate::capability::{Action, ResourceName};
use crate::identity::Role;

/// The unified error type for the CUSTOS crates.
#[derive(Debug, Error)]
pub enum CustosError {
    /// The access configuration is malformed.
    ///
    /// Raised once at load time, never per-call.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A hardened check was denied.
    ///
    /// Produced only by callers that ask for a hard failure; the evaluator
    /// itself reports denies as plain boolean / `AccessDecision` results.
    #[error("role '{role}' is not permitted to {action} on '{resource}'")]
    PermissionDenied {
        role: Role,
        resource: ResourceName,
        action: Action,
    },

    /// The decision sink could not persist a decision record.
    ///
    /// This is treated as fatal — a decision that cannot be audited is not
    /// returned to the caller.
    #[error("audit write failed: {reason}")]
    AuditWriteFailed { reason: String },

    /// A hardened path was invoked with no authenticated identity.
    #[error("no authenticated identity for the current session")]
    Unauthenticated,
}

/// Convenience alias used throughout the CUSTOS crates.
pub type CustosResult<T> = Result<T, CustosError>;
