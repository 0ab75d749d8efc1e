//! # custos-core
//!
//! The trust boundary of the CUSTOS access-control core.
//!
//! This crate provides:
//! - The five seam traits (`RoleDirectory`, `ScopeDirectory`,
//!   `IdentityProvider`, `DecisionSink`, `RecordSource`)
//! - The pure `Evaluator` (action gating + record scoping)
//! - The `PermissionCache` (the only shared mutable state in the path)
//! - The `Gateway` that pipelines cache → evaluate → audit
//!
//! ## Usage
//!
//! ```rust,ignore
//! use custos_core::{Gateway, traits::{RoleDirectory, ScopeDirectory, DecisionSink}};
//! ```

pub mod cache;
pub mod evaluator;
pub mod gateway;
pub mod traits;

pub use cache::PermissionCache;
pub use evaluator::Evaluator;
pub use gateway::Gateway;
