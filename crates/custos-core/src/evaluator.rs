//! The pure access evaluator: action gating and record scoping.
//!
//! Both operations are pure functions of their inputs — no I/O, no shared
//! mutable state, no mid-call reads of ambient session data. Calling either
//! twice with identical inputs yields identical outputs, and any number of
//! threads may call them concurrently without locking.

use tracing::{debug, warn};

use custos_contracts::{
    capability::{Action, ResourceName},
    identity::CallerIdentity,
    record::{ScopedRecord, ScopingStrategy},
};

use crate::traits::{RoleDirectory, ScopeDirectory};

/// The stateless evaluation core: Permission Evaluator + Record Scoping
/// Filter over static directories.
///
/// Owns the trusted configuration lookups; takes the caller identity as an
/// explicit argument on every call.
pub struct Evaluator {
    roles: Box<dyn RoleDirectory>,
    scopes: Box<dyn ScopeDirectory>,
}

impl Evaluator {
    /// Create an evaluator over the given directories.
    pub fn new(roles: Box<dyn RoleDirectory>, scopes: Box<dyn ScopeDirectory>) -> Self {
        Self { roles, scopes }
    }

    /// May `identity` perform `action` on `resource`?
    ///
    /// The super role is a total bypass — true for every (resource, action)
    /// pair, including resources with no configured entry. Every other role
    /// passes iff its capability set contains `(resource, action)` or
    /// `(resource, manage)`; requesting `manage` itself needs an explicit
    /// `manage` grant.
    ///
    /// A deny is a normal boolean result, not an error. Callers that need a
    /// hard failure use `Gateway::require`.
    pub fn authorize(
        &self,
        identity: &CallerIdentity,
        resource: &ResourceName,
        action: Action,
    ) -> bool {
        if self.roles.is_super_role(identity.role) {
            debug!(
                role = %identity.role,
                resource = %resource,
                action = %action,
                "super role bypass"
            );
            return true;
        }

        let allowed = self
            .roles
            .capabilities_of(identity.role)
            .allows(resource, action);

        debug!(
            role = %identity.role,
            resource = %resource,
            action = %action,
            allowed,
            "capability check"
        );

        allowed
    }

    /// Narrow `candidates` to the records visible to `identity`.
    ///
    /// Total and stable: never errors, preserves the input order, and an
    /// empty result is a valid, common outcome. Visibility rules:
    ///
    /// - super role → all candidates, unfiltered, regardless of strategy
    /// - `Global`   → all candidates
    /// - `Tenant`   → records whose tenant id equals the caller's; a record
    ///   with no tenant id, or a caller with no tenant id, matches nothing
    ///   (fail-closed)
    /// - `Owner`    → records whose owner id equals the caller's user id
    /// - unconfigured resource → empty (fail-closed, never fail-open)
    pub fn visible_records<R: ScopedRecord>(
        &self,
        identity: &CallerIdentity,
        resource: &ResourceName,
        candidates: Vec<R>,
    ) -> Vec<R> {
        if self.roles.is_super_role(identity.role) {
            return candidates;
        }

        let Some(strategy) = self.scopes.strategy_of(resource) else {
            warn!(
                resource = %resource,
                "no scoping strategy configured; returning no records"
            );
            return Vec::new();
        };

        match strategy {
            ScopingStrategy::Global => candidates,

            ScopingStrategy::Tenant => match &identity.tenant_id {
                Some(tenant) => candidates
                    .into_iter()
                    .filter(|record| record.tenant_id() == Some(tenant))
                    .collect(),
                // A caller with no tenant membership sees no tenant-scoped
                // records at all.
                None => Vec::new(),
            },

            ScopingStrategy::Owner => candidates
                .into_iter()
                .filter(|record| record.owner_id() == Some(&identity.user_id))
                .collect(),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use custos_contracts::{
        capability::{Action, Capability, CapabilitySet, ResourceName},
        identity::{CallerIdentity, Role, TenantId, UserId},
        record::{ScopedRecord, ScopingStrategy},
    };

    use crate::traits::{RoleDirectory, ScopeDirectory};

    use super::Evaluator;

    // ── Mock directories ─────────────────────────────────────────────────────

    /// A directory built from plain maps, the way tests want to spell it.
    struct MapDirectory {
        caps: HashMap<Role, CapabilitySet>,
        scopes: HashMap<ResourceName, ScopingStrategy>,
        empty: CapabilitySet,
    }

    impl MapDirectory {
        fn new() -> Self {
            Self {
                caps: HashMap::new(),
                scopes: HashMap::new(),
                empty: CapabilitySet::default(),
            }
        }

        fn grant(mut self, role: Role, resource: &str, action: Action) -> Self {
            self.caps
                .entry(role)
                .or_default()
                .grant(Capability::new(resource, action));
            self
        }

        fn scope(mut self, resource: &str, strategy: ScopingStrategy) -> Self {
            self.scopes.insert(ResourceName::new(resource), strategy);
            self
        }
    }

    impl RoleDirectory for MapDirectory {
        fn capabilities_of(&self, role: Role) -> &CapabilitySet {
            self.caps.get(&role).unwrap_or(&self.empty)
        }

        fn is_super_role(&self, role: Role) -> bool {
            role == Role::SuperAdmin
        }
    }

    impl ScopeDirectory for MapDirectory {
        fn strategy_of(&self, resource: &ResourceName) -> Option<ScopingStrategy> {
            self.scopes.get(resource).copied()
        }
    }

    /// Split one MapDirectory into the two boxed halves the evaluator takes.
    fn evaluator(build: fn() -> MapDirectory) -> Evaluator {
        Evaluator::new(Box::new(build()), Box::new(build()))
    }

    // ── Test records ─────────────────────────────────────────────────────────

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: &'static str,
        owner: Option<UserId>,
        tenant: Option<TenantId>,
    }

    impl Row {
        fn new(id: &'static str, owner: Option<&str>, tenant: Option<&str>) -> Self {
            Self {
                id,
                owner: owner.map(UserId::new),
                tenant: tenant.map(TenantId::new),
            }
        }
    }

    impl ScopedRecord for Row {
        fn owner_id(&self) -> Option<&UserId> {
            self.owner.as_ref()
        }

        fn tenant_id(&self) -> Option<&TenantId> {
            self.tenant.as_ref()
        }
    }

    fn ids(rows: &[Row]) -> Vec<&'static str> {
        rows.iter().map(|r| r.id).collect()
    }

    // ── authorize: capability gating ─────────────────────────────────────────

    fn front_desk_directory() -> MapDirectory {
        MapDirectory::new()
            .grant(Role::FrontDesk, "appointments", Action::Read)
            .grant(Role::FrontDesk, "appointments", Action::Create)
    }

    /// Concrete scenario A: front_desk holds {read, create} on appointments.
    #[test]
    fn front_desk_appointments_scenario() {
        let eval = evaluator(front_desk_directory);
        let clerk = CallerIdentity::in_tenant(Role::FrontDesk, "clerk-1", "clinic-north");
        let appointments = ResourceName::new("appointments");

        assert!(eval.authorize(&clerk, &appointments, Action::Read));
        assert!(eval.authorize(&clerk, &appointments, Action::Create));
        assert!(!eval.authorize(&clerk, &appointments, Action::Delete));
        assert!(!eval.authorize(&clerk, &appointments, Action::Update));
    }

    /// Every (resource, action) pair not granted to a role is denied.
    #[test]
    fn deny_by_default_for_ungranted_pairs() {
        let eval = evaluator(front_desk_directory);
        let clerk = CallerIdentity::in_tenant(Role::FrontDesk, "clerk-1", "clinic-north");

        // A role with no entry at all.
        let subject = CallerIdentity::new(Role::Subject, "pat-1");
        assert!(!eval.authorize(&subject, &ResourceName::new("appointments"), Action::Read));

        // A resource with no entry for an otherwise-configured role.
        assert!(!eval.authorize(&clerk, &ResourceName::new("invoices"), Action::Read));
    }

    /// The super role is allowed everything, including unconfigured resources.
    #[test]
    fn super_role_total_bypass() {
        let eval = evaluator(front_desk_directory);
        let root = CallerIdentity::new(Role::SuperAdmin, "root-1");

        for action in [
            Action::Create,
            Action::Read,
            Action::Update,
            Action::Delete,
            Action::Manage,
        ] {
            assert!(eval.authorize(&root, &ResourceName::new("appointments"), action));
            assert!(eval.authorize(&root, &ResourceName::new("not-configured"), action));
        }
    }

    /// `manage` is only granted by an explicit manage capability.
    #[test]
    fn manage_requires_explicit_grant() {
        let eval = evaluator(|| {
            MapDirectory::new()
                .grant(Role::TenantAdmin, "stock_items", Action::Manage)
                .grant(Role::Clinician, "stock_items", Action::Read)
                .grant(Role::Clinician, "stock_items", Action::Create)
                .grant(Role::Clinician, "stock_items", Action::Update)
                .grant(Role::Clinician, "stock_items", Action::Delete)
        });
        let stock = ResourceName::new("stock_items");

        let admin = CallerIdentity::in_tenant(Role::TenantAdmin, "adm-1", "clinic-north");
        assert!(eval.authorize(&admin, &stock, Action::Manage));
        assert!(eval.authorize(&admin, &stock, Action::Delete));

        let clinician = CallerIdentity::in_tenant(Role::Clinician, "dr-1", "clinic-north");
        assert!(eval.authorize(&clinician, &stock, Action::Delete));
        assert!(!eval.authorize(&clinician, &stock, Action::Manage));
    }

    /// Pure function: identical inputs, identical outputs.
    #[test]
    fn authorize_is_idempotent() {
        let eval = evaluator(front_desk_directory);
        let clerk = CallerIdentity::in_tenant(Role::FrontDesk, "clerk-1", "clinic-north");
        let appointments = ResourceName::new("appointments");

        let first = eval.authorize(&clerk, &appointments, Action::Read);
        let second = eval.authorize(&clerk, &appointments, Action::Read);
        assert_eq!(first, second);
    }

    // ── visible_records: scoping ─────────────────────────────────────────────

    fn scoped_directory() -> MapDirectory {
        MapDirectory::new()
            .scope("pharmacy_products", ScopingStrategy::Global)
            .scope("appointments", ScopingStrategy::Tenant)
            .scope("medical_records", ScopingStrategy::Owner)
    }

    /// Global strategy returns the full input list, length and order intact.
    #[test]
    fn global_strategy_passes_everything_through() {
        let eval = evaluator(scoped_directory);
        let subject = CallerIdentity::new(Role::Subject, "pat-1");

        let rows = vec![
            Row::new("a", None, None),
            Row::new("b", Some("someone-else"), Some("clinic-south")),
            Row::new("c", None, Some("clinic-north")),
        ];

        let visible =
            eval.visible_records(&subject, &ResourceName::new("pharmacy_products"), rows);
        assert_eq!(ids(&visible), vec!["a", "b", "c"]);
    }

    /// Concrete scenario B: 5 candidates, 3 in the caller's tenant.
    #[test]
    fn tenant_strategy_keeps_matching_tenant_only() {
        let eval = evaluator(scoped_directory);
        let admin = CallerIdentity::in_tenant(Role::TenantAdmin, "adm-1", "t1");

        let rows = vec![
            Row::new("a", None, Some("t1")),
            Row::new("b", None, Some("t2")),
            Row::new("c", None, Some("t1")),
            Row::new("d", None, Some("t2")),
            Row::new("e", None, Some("t1")),
        ];

        let visible = eval.visible_records(&admin, &ResourceName::new("appointments"), rows);
        // Exactly the three t1 records, in original relative order.
        assert_eq!(ids(&visible), vec!["a", "c", "e"]);
    }

    /// Records with no tenant id are excluded for non-super roles.
    #[test]
    fn tenant_strategy_fails_closed_on_missing_tenant_id() {
        let eval = evaluator(scoped_directory);
        let admin = CallerIdentity::in_tenant(Role::TenantAdmin, "adm-1", "t1");

        let rows = vec![
            Row::new("a", None, Some("t1")),
            Row::new("legacy", None, None),
            Row::new("b", None, Some("t1")),
        ];

        let visible = eval.visible_records(&admin, &ResourceName::new("appointments"), rows);
        assert_eq!(ids(&visible), vec!["a", "b"]);
    }

    /// A caller with no tenant membership sees no tenant-scoped records.
    #[test]
    fn tenant_strategy_with_tenantless_caller_sees_nothing() {
        let eval = evaluator(scoped_directory);
        let floating = CallerIdentity::new(Role::Clinician, "dr-1");

        let rows = vec![Row::new("a", None, Some("t1")), Row::new("b", None, None)];
        let visible = eval.visible_records(&floating, &ResourceName::new("appointments"), rows);
        assert!(visible.is_empty());
    }

    /// Concrete scenario C: 4 candidates, 1 owned by the caller.
    #[test]
    fn owner_strategy_keeps_own_records_only() {
        let eval = evaluator(scoped_directory);
        let patient = CallerIdentity::in_tenant(Role::Subject, "pat-7", "t1");

        let rows = vec![
            Row::new("a", Some("pat-1"), Some("t1")),
            Row::new("b", Some("pat-7"), Some("t1")),
            Row::new("c", Some("pat-2"), Some("t1")),
            Row::new("d", None, Some("t1")),
        ];

        let visible = eval.visible_records(&patient, &ResourceName::new("medical_records"), rows);
        assert_eq!(ids(&visible), vec!["b"]);
    }

    /// Concrete scenario D: super role, tenant-scoped resource, records with
    /// no tenant id at all — everything comes back unfiltered.
    #[test]
    fn super_role_sees_all_records_unfiltered() {
        let eval = evaluator(scoped_directory);
        let root = CallerIdentity::new(Role::SuperAdmin, "root-1");

        let rows = vec![
            Row::new("a", None, Some("t1")),
            Row::new("legacy", None, None),
            Row::new("b", None, Some("t2")),
        ];

        let visible = eval.visible_records(&root, &ResourceName::new("appointments"), rows);
        assert_eq!(ids(&visible), vec!["a", "legacy", "b"]);

        // Also for resources with no configured strategy.
        let rows = vec![Row::new("x", None, None)];
        let visible = eval.visible_records(&root, &ResourceName::new("not-configured"), rows);
        assert_eq!(ids(&visible), vec!["x"]);
    }

    /// Unconfigured resources yield nothing for non-super callers.
    #[test]
    fn unknown_resource_fails_closed() {
        let eval = evaluator(scoped_directory);
        let admin = CallerIdentity::in_tenant(Role::TenantAdmin, "adm-1", "t1");

        let rows = vec![Row::new("a", None, Some("t1"))];
        let visible = eval.visible_records(&admin, &ResourceName::new("not-configured"), rows);
        assert!(visible.is_empty());
    }

    /// An empty candidate list is a valid input and a valid result.
    #[test]
    fn empty_candidates_yield_empty_result() {
        let eval = evaluator(scoped_directory);
        let admin = CallerIdentity::in_tenant(Role::TenantAdmin, "adm-1", "t1");

        let visible = eval.visible_records::<Row>(
            &admin,
            &ResourceName::new("appointments"),
            Vec::new(),
        );
        assert!(visible.is_empty());
    }

    /// Pure function: filtering twice with identical inputs yields identical
    /// outputs.
    #[test]
    fn visible_records_is_idempotent() {
        let eval = evaluator(scoped_directory);
        let patient = CallerIdentity::in_tenant(Role::Subject, "pat-7", "t1");

        let rows = || {
            vec![
                Row::new("a", Some("pat-7"), Some("t1")),
                Row::new("b", Some("pat-1"), Some("t1")),
            ]
        };

        let first = eval.visible_records(&patient, &ResourceName::new("medical_records"), rows());
        let second = eval.visible_records(&patient, &ResourceName::new("medical_records"), rows());
        assert_eq!(first, second);
    }
}
