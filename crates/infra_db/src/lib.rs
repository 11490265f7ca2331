//! Infrastructure Database Layer
//!
//! This crate maps the insurance manager's entities onto PostgreSQL using
//! SQLx and owns the schema migrations.
//!
//! # Architecture
//!
//! - [`InsuranceDbContext`] owns the pool and exposes one repository per
//!   table
//! - Repositories translate rows to domain types and back
//! - Keys, uniqueness and foreign keys (with cascading deletes) are enforced
//!   by the database; violations come back as typed [`DatabaseError`]s
//!
//! # Schema
//!
//! ```text
//! customers ──< customer_policies >── policies        claims
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseSettings, InsuranceDbContext, Repository};
//!
//! let db = InsuranceDbContext::connect(&DatabaseSettings::load()?).await?;
//! db.migrate().await?;
//!
//! let policy = db.policies().create().await?;
//! let customer = db.enroll_customer(&details, &[policy.number]).await?;
//! ```

pub mod pool;
pub mod config;
pub mod error;
pub mod schema;
pub mod migrations;
pub mod repositories;
pub mod context;

pub use pool::{DatabasePool, create_pool, create_pool_from_url, DatabaseConfig};
pub use config::DatabaseSettings;
pub use error::DatabaseError;
pub use migrations::{MIGRATOR, MigrationStatus, run_migrations, revert_migrations, migration_status};
pub use repositories::{
    Repository, CustomerRepository, PolicyRepository, CustomerPolicyRepository, ClaimRepository,
};
pub use context::InsuranceDbContext;
