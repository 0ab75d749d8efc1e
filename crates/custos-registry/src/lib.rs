//! # custos-registry
//!
//! A TOML-driven, deny-by-default role and scoping registry for the CUSTOS
//! access-control core.
//!
//! ## Overview
//!
//! This crate provides [`StaticAccessDirectory`], which implements the
//! [`RoleDirectory`](custos_core::traits::RoleDirectory) and
//! [`ScopeDirectory`](custos_core::traits::ScopeDirectory) traits.  Grants
//! and scoping strategies are declared in a TOML file, validated fatally at
//! load, and immutable afterwards.  Roles and resources absent from the
//! tables deny by default.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use custos_registry::StaticAccessDirectory;
//!
//! let directory = StaticAccessDirectory::from_file(Path::new("policies/clinic.toml"))?;
//! // Wrap in an Arc and pass to `custos_core::Gateway::new(...)`.
//! ```

pub mod config;
pub mod directory;

pub use config::{AccessConfig, GrantEntry, ScopeEntry};
pub use directory::StaticAccessDirectory;

// ── Tests ─────────────────────────────────────────────────────────────────────
