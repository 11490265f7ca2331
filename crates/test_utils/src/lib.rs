//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! insurance manager test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for customers
//! - `builders`: Builder for customer details with sensible defaults
//! - `database`: PostgreSQL test database (container or `TEST_DATABASE_URL`)
//! - `assertions`: Assertion helpers for data-layer results
//! - `generators`: Fake and property-based customer data

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
