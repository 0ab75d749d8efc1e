//! Static identity provider for tests and demos.
//!
//! The real provider is a third-party auth backend; the reference runtime
//! only needs a fixed identity per scenario. Session lifecycle, token
//! refresh, and expiry stay out of scope.

use custos_contracts::identity::CallerIdentity;
use custos_core::traits::IdentityProvider;

/// An `IdentityProvider` that always answers with the same identity.
pub struct StaticIdentityProvider {
    identity: Option<CallerIdentity>,
}

impl StaticIdentityProvider {
    /// A provider representing an authenticated session.
    pub fn authenticated(identity: CallerIdentity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// A provider representing an unauthenticated visitor.
    pub fn anonymous() -> Self {
        Self { identity: None }
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn current_identity(&self) -> Option<CallerIdentity> {
        self.identity.clone()
    }
}
