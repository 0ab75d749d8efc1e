//! Concurrency-safe permission decision cache.
//!
//! Caching is optional in the evaluation path — the evaluator itself is
//! cheap — but when the gateway caches, invalidation is a correctness
//! obligation, not an optimization detail: a stale entry can grant an
//! action a reconfigured role no longer holds. Entries are keyed by
//! (role, resource, action) and invalidated per role.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use custos_contracts::{
    capability::{Action, ResourceName},
    identity::Role,
};

type CacheKey = (Role, ResourceName, Action);

/// A read-mostly map of memoized authorization outcomes.
///
/// # Thread safety
///
/// All methods take `&self`; the map lives behind an `RwLock`, so any
/// number of readers proceed in parallel and invalidation is a write that
/// happens-before every subsequent read observing the new state.
#[derive(Default)]
pub struct PermissionCache {
    inner: RwLock<HashMap<CacheKey, bool>>,
}

impl PermissionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a memoized outcome, if one is present.
    pub fn get(&self, role: Role, resource: &ResourceName, action: Action) -> Option<bool> {
        let map = self.inner.read().expect("permission cache lock poisoned");
        map.get(&(role, resource.clone(), action)).copied()
    }

    /// Memoize the outcome of one (role, resource, action) evaluation.
    pub fn put(&self, role: Role, resource: ResourceName, action: Action, allowed: bool) {
        let mut map = self.inner.write().expect("permission cache lock poisoned");
        map.insert((role, resource, action), allowed);
    }

    /// Drop every entry for `role`.
    ///
    /// Must be called whenever the role's grants change (e.g. after a
    /// configuration reload); entries for other roles are untouched.
    pub fn invalidate_role(&self, role: Role) {
        let mut map = self.inner.write().expect("permission cache lock poisoned");
        let before = map.len();
        map.retain(|(cached_role, _, _), _| *cached_role != role);

        debug!(
            role = %role,
            dropped = before - map.len(),
            "permission cache invalidated for role"
        );
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.inner
            .write()
            .expect("permission cache lock poisoned")
            .clear();
    }

    /// Number of memoized entries.
    pub fn len(&self) -> usize {
        self.inner.read().expect("permission cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
