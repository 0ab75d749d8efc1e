//! Roles and caller identity types.
//!
//! A `Role` is one of a fixed, closed set defined at compile time. No code
//! outside the registry and the evaluator compares roles directly — callers
//! ask `authorize` instead of matching on role values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of roles recognized by the platform.
///
/// Which capabilities a role holds is configuration (see the access
/// registry), not a property of the variant itself. The one exception is
/// the designated super role, which the registry resolves at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform operator. Bypasses every capability and scoping check.
    SuperAdmin,
    /// Administrator of a single tenant (a clinic or company).
    TenantAdmin,
    /// Treating clinician within a tenant.
    Clinician,
    /// Reception / scheduling staff within a tenant.
    FrontDesk,
    /// A patient or employee viewing their own data.
    Subject,
}

impl Role {
    /// The canonical snake_case name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::TenantAdmin => "tenant_admin",
            Role::Clinician => "clinician",
            Role::FrontDesk => "front_desk",
            Role::Subject => "subject",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque identifier for a user account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    /// Construct a user id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier for a tenant (an organizational boundary such as a
/// clinic or company) used to partition record visibility.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(pub String);

impl TenantId {
    /// Construct a tenant id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The authenticated caller on whose behalf an access check runs.
///
/// Created once per authenticated session by the identity provider and
/// immutable for the session's lifetime. Every access-control call takes
/// a `CallerIdentity` as an explicit argument — there is no ambient
/// "current user" state anywhere in the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    /// The caller's role.
    pub role: Role,
    /// The caller's user account.
    pub user_id: UserId,
    /// The tenant the caller belongs to, if any. Super admins and other
    /// cross-tenant principals have no tenant.
    pub tenant_id: Option<TenantId>,
}

impl CallerIdentity {
    /// An identity with no tenant membership.
    pub fn new(role: Role, user_id: impl Into<String>) -> Self {
        Self {
            role,
            user_id: UserId::new(user_id),
            tenant_id: None,
        }
    }

    /// An identity scoped to a tenant.
    pub fn in_tenant(
        role: Role,
        user_id: impl Into<String>,
        tenant_id: impl Into<String>,
    ) -> Self {
        Self {
            role,
            user_id: UserId::new(user_id),
            tenant_id: Some(TenantId::new(tenant_id)),
        }
    }
}
