//! # custos-contracts
//!
//! Shared types, schemas, and contracts for the CUSTOS access-control core.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions and error types.

pub mod capability;
pub mod decision;
pub mod error;
pub mod identity;
pub mod record;
