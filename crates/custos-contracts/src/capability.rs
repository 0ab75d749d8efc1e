//! Capability-based permission types.
//!
//! CUSTOS is deny-by-default: a role may only perform an action on a
//! resource if it holds the corresponding capability. Capabilities are
//! granted at configuration load and are never elevated at runtime — this
//! is a hard security invariant.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An action a caller can request on a resource.
///
/// `Manage` implies the four CRUD actions for the same resource, but is
/// itself granted only by an explicit `Manage` capability — holding all
/// four CRUD grants does not add up to `Manage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    Manage,
}

impl Action {
    /// The canonical snake_case name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Manage => "manage",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An opaque resource name.
///
/// Resource names should be plural and descriptive:
/// e.g. "appointments", "medical_records", "stock_items".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceName(pub String);

impl ResourceName {
    /// Construct a resource name from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single (resource, action) pair a role is permitted to perform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capability {
    pub resource: ResourceName,
    pub action: Action,
}

impl Capability {
    /// Construct a capability for an action on a named resource.
    pub fn new(resource: impl Into<String>, action: Action) -> Self {
        Self {
            resource: ResourceName::new(resource),
            action,
        }
    }
}

/// The full set of capabilities granted to one role.
///
/// Built by the access registry from configuration and never mutated
/// afterwards. Absence of a capability means deny.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    inner: HashSet<Capability>,
}

impl CapabilitySet {
    /// Grant a capability to this set.
    pub fn grant(&mut self, capability: Capability) {
        self.inner.insert(capability);
    }

    /// Return true if the set contains exactly the given capability.
    ///
    /// This is a literal membership test — it does NOT apply the manage
    /// implication. Use [`allows`](Self::allows) for authorization checks.
    pub fn has(&self, capability: &Capability) -> bool {
        self.inner.contains(capability)
    }

    /// Return true if this set permits `action` on `resource`.
    ///
    /// Permitted iff the set contains `(resource, action)` or
    /// `(resource, Manage)`. When `action` is `Manage` itself, both arms
    /// test the same capability, so only an explicit `Manage` grant passes.
    pub fn allows(&self, resource: &ResourceName, action: Action) -> bool {
        self.inner.contains(&Capability {
            resource: resource.clone(),
            action,
        }) || self.inner.contains(&Capability {
            resource: resource.clone(),
            action: Action::Manage,
        })
    }

    /// Return an iterator over all granted capabilities.
    pub fn all(&self) -> impl Iterator<Item = &Capability> {
        self.inner.iter()
    }

    /// Number of distinct capabilities in the set.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
