//! Core Kernel - Foundational types for the insurance manager
//!
//! This crate provides the building blocks shared by every other crate:
//! - Strongly-typed integer keys for the persisted entities
//! - The error raised when a key fails to parse

pub mod identifiers;
pub mod error;

pub use identifiers::{CustomerId, PolicyNumber, ClaimId};
pub use error::CoreError;
