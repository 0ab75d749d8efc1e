//! The CUSTOS gateway: the audited access-check pipeline.
//!
//! The gateway enforces the CUSTOS check model:
//!
//!   Identity → Cache → [Evaluator::authorize] → Audit → Decision
//!
//! The audit invariant is absolute: no decision leaves `check()` unless a
//! `DecisionRecord` for it has been written to the `DecisionSink`. A failed
//! audit write aborts the check with `CustosError::AuditWriteFailed` — the
//! caller receives the error, not the decision.

use chrono::Utc;
use tracing::{debug, info, warn};

use custos_contracts::{
    capability::{Action, ResourceName},
    decision::{AccessDecision, DecisionRecord},
    error::{CustosError, CustosResult},
    identity::{CallerIdentity, Role},
};

use crate::{
    cache::PermissionCache,
    evaluator::Evaluator,
    traits::{DecisionSink, RecordSource, RoleDirectory, ScopeDirectory},
};

/// The audited front door to the access-control core.
///
/// Construct one gateway per process (or per configuration epoch) and share
/// it freely — every method takes `&self` and the caller identity as an
/// explicit argument. The hosting application resolves the identity through
/// its `IdentityProvider` and hands it in; the gateway never reads ambient
/// session state.
pub struct Gateway {
    evaluator: Evaluator,
    sink: Box<dyn DecisionSink>,
    cache: PermissionCache,
}

impl Gateway {
    /// Create a gateway over the given directories and decision sink.
    pub fn new(
        roles: Box<dyn RoleDirectory>,
        scopes: Box<dyn ScopeDirectory>,
        sink: Box<dyn DecisionSink>,
    ) -> Self {
        Self {
            evaluator: Evaluator::new(roles, scopes),
            sink,
            cache: PermissionCache::new(),
        }
    }

    /// The pure evaluation core, for callers that need unaudited filtering.
    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Check whether `identity` may perform `action` on `resource`,
    /// recording the decision.
    ///
    /// # Pipeline
    ///
    /// 1. Consult the permission cache for (role, resource, action).
    /// 2. On a miss, run `Evaluator::authorize` and memoize the outcome.
    ///    A cache hit skips evaluation only — never the audit write.
    /// 3. Append a `DecisionRecord` to the sink. **A failed write is fatal**
    ///    and the decision is not returned.
    /// 4. Return `AccessDecision::Allow` or `AccessDecision::Deny`.
    ///
    /// A deny is a normal `Ok` result. The only error paths are audit
    /// failures.
    pub fn check(
        &self,
        identity: &CallerIdentity,
        resource: &ResourceName,
        action: Action,
    ) -> CustosResult<AccessDecision> {
        let allowed = match self.cache.get(identity.role, resource, action) {
            Some(memoized) => {
                debug!(
                    role = %identity.role,
                    resource = %resource,
                    action = %action,
                    allowed = memoized,
                    "permission cache hit"
                );
                memoized
            }
            None => {
                let evaluated = self.evaluator.authorize(identity, resource, action);
                self.cache
                    .put(identity.role, resource.clone(), action, evaluated);
                evaluated
            }
        };

        let decision = if allowed {
            AccessDecision::Allow
        } else {
            warn!(
                role = %identity.role,
                user_id = %identity.user_id,
                resource = %resource,
                action = %action,
                "access denied"
            );
            AccessDecision::Deny {
                reason: format!(
                    "role '{}' holds no capability for {} on '{}'",
                    identity.role, action, resource
                ),
            }
        };

        let record = DecisionRecord {
            role: identity.role,
            user_id: identity.user_id.clone(),
            tenant_id: identity.tenant_id.clone(),
            resource: resource.clone(),
            action,
            decision: decision.clone(),
            timestamp: Utc::now(),
        };
        self.sink.record(&record)?;

        Ok(decision)
    }

    /// Like [`check`](Self::check), but a deny becomes a hard
    /// `CustosError::PermissionDenied`.
    pub fn require(
        &self,
        identity: &CallerIdentity,
        resource: &ResourceName,
        action: Action,
    ) -> CustosResult<()> {
        match self.check(identity, resource, action)? {
            AccessDecision::Allow => Ok(()),
            AccessDecision::Deny { .. } => Err(CustosError::PermissionDenied {
                role: identity.role,
                resource: resource.clone(),
                action,
            }),
        }
    }

    /// List the records from `source` that `identity` may see.
    ///
    /// Gates `Action::Read` on the source's resource first (audited, hard
    /// failure on deny), then narrows the candidates with the scoping
    /// filter. An empty visible set is a normal result — a brand-new tenant
    /// has no records yet.
    pub fn fetch_visible<S: RecordSource>(
        &self,
        identity: &CallerIdentity,
        source: &S,
    ) -> CustosResult<Vec<S::Record>> {
        self.require(identity, source.resource(), Action::Read)?;

        let candidates = source.list();
        let total = candidates.len();
        let visible = self
            .evaluator
            .visible_records(identity, source.resource(), candidates);

        debug!(
            role = %identity.role,
            resource = %source.resource(),
            candidates = total,
            visible = visible.len(),
            "record scoping applied"
        );

        Ok(visible)
    }

    /// Drop every cached outcome for `role`.
    ///
    /// Callers reloading the access configuration must invalidate each role
    /// whose grants changed before serving further checks.
    pub fn invalidate_role(&self, role: Role) {
        self.cache.invalidate_role(role);
        info!(role = %role, "cached permissions invalidated");
    }

    /// Seal the decision log for a finished session.
    pub fn seal_session(&self, session_id: &str) -> CustosResult<()> {
        self.sink.seal(session_id)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
