//! Access decisions and the audited decision record.
//!
//! A deny is a normal outcome, not an error. Callers that need a hard
//! failure use the gateway's `require`, which wraps a deny in
//! `CustosError::PermissionDenied`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    capability::{Action, ResourceName},
    identity::{Role, TenantId, UserId},
};

/// Unique identifier for one authenticated session.
///
/// Every decision recorded by the audit trail belongs to a session
/// identified by this UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub uuid::Uuid);

impl SessionId {
    /// Create a new, unique session id.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// The outcome of a single access check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessDecision {
    /// The action is permitted.
    Allow,

    /// The action is not permitted.
    Deny {
        /// Human-readable explanation, written to the decision log.
        reason: String,
    },
}

impl AccessDecision {
    pub fn is_allow(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }
}

/// An immutable record of one access check, written to the decision log.
///
/// Every check the gateway performs — allowed or denied, cache hit or
/// cold evaluation — produces exactly one `DecisionRecord`. Records are
/// never modified after being written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// The caller's role at check time.
    pub role: Role,
    /// The caller's user account.
    pub user_id: UserId,
    /// The caller's tenant, if any.
    pub tenant_id: Option<TenantId>,
    /// The resource the check targeted.
    pub resource: ResourceName,
    /// The action the caller requested.
    pub action: Action,
    /// The decision the evaluator reached.
    pub decision: AccessDecision,
    /// Wall-clock time the record was created (UTC).
    pub timestamp: DateTime<Utc>,
}
