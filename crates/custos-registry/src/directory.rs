//! TOML-driven access directory implementation.
//!
//! `StaticAccessDirectory` loads an `AccessConfig` from a TOML string or
//! file and implements the `RoleDirectory` and `ScopeDirectory` traits
//! from custos-core.
//!
//! Validation is fatal and happens once, at load:
//!
//! 1. Malformed TOML → `ConfigError`.
//! 2. A duplicate (role, resource) grant entry → `ConfigError`.
//! 3. An empty `actions` list → `ConfigError`.
//! 4. A duplicate scope entry for one resource → `ConfigError`.
//!
//! After construction the directory is immutable and lock-free; readers on
//! any thread observe the same tables for the life of the process.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::debug;

use custos_contracts::{
    capability::{Capability, CapabilitySet, ResourceName},
    error::{CustosError, CustosResult},
    identity::Role,
    record::ScopingStrategy,
};
use custos_core::traits::{RoleDirectory, ScopeDirectory};

use crate::config::AccessConfig;

/// A `RoleDirectory` + `ScopeDirectory` backed by a TOML document.
///
/// Construct via `from_toml_str` or `from_file`, wrap in an `Arc`, and
/// hand clones to the gateway:
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use custos_registry::StaticAccessDirectory;
///
/// let directory = Arc::new(StaticAccessDirectory::from_file(Path::new("policies/clinic.toml"))?);
/// ```
#[derive(Debug)]
pub struct StaticAccessDirectory {
    super_role: Role,
    capabilities: HashMap<Role, CapabilitySet>,
    scopes: HashMap<ResourceName, ScopingStrategy>,
    /// Returned for roles with no configured grants.
    empty: CapabilitySet,
}

impl StaticAccessDirectory {
    /// Parse `s` as TOML and build a validated directory.
    ///
    /// Returns `CustosError::ConfigError` if the TOML is malformed, does
    /// not match the `AccessConfig` schema, or fails validation.
    pub fn from_toml_str(s: &str) -> CustosResult<Self> {
        let config: AccessConfig = toml::from_str(s).map_err(|e| CustosError::ConfigError {
            reason: format!("failed to parse access config TOML: {}", e),
        })?;
        Self::from_config(config)
    }

    /// Read the file at `path` and parse it as TOML access configuration.
    pub fn from_file(path: &Path) -> CustosResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| CustosError::ConfigError {
            reason: format!("failed to read access config '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Validate a parsed `AccessConfig` and build the lookup tables.
    pub fn from_config(config: AccessConfig) -> CustosResult<Self> {
        let super_role = config.super_role.unwrap_or(Role::SuperAdmin);

        let mut seen_grants: HashSet<(Role, String)> = HashSet::new();
        let mut capabilities: HashMap<Role, CapabilitySet> = HashMap::new();

        for grant in &config.grants {
            if !seen_grants.insert((grant.role, grant.resource.clone())) {
                return Err(CustosError::ConfigError {
                    reason: format!(
                        "duplicate grant for role '{}' on resource '{}'",
                        grant.role, grant.resource
                    ),
                });
            }

            if grant.actions.is_empty() {
                return Err(CustosError::ConfigError {
                    reason: format!(
                        "grant for role '{}' on resource '{}' lists no actions",
                        grant.role, grant.resource
                    ),
                });
            }

            let set = capabilities.entry(grant.role).or_default();
            for action in &grant.actions {
                set.grant(Capability::new(grant.resource.clone(), *action));
            }
        }

        let mut scopes: HashMap<ResourceName, ScopingStrategy> = HashMap::new();
        for scope in &config.scopes {
            let resource = ResourceName::new(scope.resource.clone());
            if scopes.insert(resource, scope.strategy).is_some() {
                return Err(CustosError::ConfigError {
                    reason: format!(
                        "duplicate scoping entry for resource '{}'",
                        scope.resource
                    ),
                });
            }
        }

        debug!(
            super_role = %super_role,
            roles = capabilities.len(),
            scoped_resources = scopes.len(),
            "access directory loaded"
        );

        Ok(Self {
            super_role,
            capabilities,
            scopes,
            empty: CapabilitySet::default(),
        })
    }

    /// The designated all-capabilities role.
    pub fn super_role(&self) -> Role {
        self.super_role
    }
}

impl RoleDirectory for StaticAccessDirectory {
    /// The capabilities granted to `role`.
    ///
    /// Never fails; roles absent from the grant table resolve to the empty
    /// set (closed world, deny-by-default).
    fn capabilities_of(&self, role: Role) -> &CapabilitySet {
        self.capabilities.get(&role).unwrap_or(&self.empty)
    }

    fn is_super_role(&self, role: Role) -> bool {
        role == self.super_role
    }
}

impl ScopeDirectory for StaticAccessDirectory {
    /// The scoping strategy configured for `resource`, or `None` when the
    /// resource is unconfigured — which the evaluator treats as fail-closed.
    fn strategy_of(&self, resource: &ResourceName) -> Option<ScopingStrategy> {
        self.scopes.get(resource).copied()
    }
}
