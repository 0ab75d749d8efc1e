//! Access configuration schema.
//!
//! An `AccessConfig` is deserialized from TOML and holds the role →
//! capability grant table, the resource → scoping-strategy table, and the
//! designated super role.  The tables are static configuration: loaded
//! once at startup, validated fatally, and never mutated afterwards.

use serde::{Deserialize, Serialize};

use custos_contracts::{
    capability::Action,
    identity::Role,
    record::ScopingStrategy,
};

/// One grant: a role receives a set of actions on one resource.
///
/// Each (role, resource) pair may appear at most once in the configuration;
/// a duplicate is a fatal load error, not a merge.
///
/// Example in TOML:
/// ```toml
/// [[grants]]
/// role = "front_desk"
/// resource = "appointments"
/// actions = ["read", "create"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantEntry {
    /// The role receiving the grant.
    pub role: Role,

    /// The resource the grant applies to.
    pub resource: String,

    /// The actions granted.  `manage` implies the four CRUD actions for
    /// this resource; an empty list is a configuration error.
    pub actions: Vec<Action>,
}

/// One scoping declaration: how visibility is narrowed for one resource.
///
/// Every resource has at most one entry; resources with no entry fail
/// closed at evaluation time.
///
/// Example in TOML:
/// ```toml
/// [[scopes]]
/// resource = "appointments"
/// strategy = "tenant"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeEntry {
    /// The resource being scoped.
    pub resource: String,

    /// The visibility rule: "global", "tenant", or "owner".
    pub strategy: ScopingStrategy,
}

/// The top-level structure deserialized from a TOML access-config file.
///
/// Example:
/// ```toml
/// super_role = "super_admin"
///
/// [[grants]]
/// role = "front_desk"
/// resource = "appointments"
/// actions = ["read", "create"]
///
/// [[scopes]]
/// resource = "appointments"
/// strategy = "tenant"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessConfig {
    /// The designated all-capabilities role.  Defaults to `super_admin`.
    pub super_role: Option<Role>,

    /// The grant table.  Absent roles get the empty capability set.
    #[serde(default)]
    pub grants: Vec<GrantEntry>,

    /// The scoping table.  Absent resources fail closed.
    #[serde(default)]
    pub scopes: Vec<ScopeEntry>,
}
