//! Repository implementations for the persisted entities
//!
//! Each repository owns a clone of the pool and maps between database rows
//! and domain types. Queries are plain runtime SQL with bound parameters;
//! rows decode through `sqlx::FromRow`.
//!
//! The operations every entity shares (read one, read all, delete) are
//! expressed by the [`Repository`] trait. Creation and update differ per
//! entity and stay inherent methods.

use async_trait::async_trait;
use std::fmt;

use crate::error::DatabaseError;

pub mod customer;
pub mod policy;
pub mod customer_policy;
pub mod claims;

pub use customer::CustomerRepository;
pub use policy::PolicyRepository;
pub use customer_policy::CustomerPolicyRepository;
pub use claims::ClaimRepository;

/// Generic read/delete access to one table
#[async_trait]
pub trait Repository: Send + Sync {
    /// The domain type a row maps to
    type Entity: Send;
    /// The primary key, composite for join tables
    type Key: Copy + Send + Sync + fmt::Debug + 'static;

    /// Retrieves a single entity by key
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no row has the key
    async fn get(&self, key: Self::Key) -> Result<Self::Entity, DatabaseError>;

    /// Retrieves every entity, ordered by key
    async fn list(&self) -> Result<Vec<Self::Entity>, DatabaseError>;

    /// Deletes a single entity by key
    ///
    /// Foreign keys declared `ON DELETE CASCADE` remove dependent rows in
    /// the same statement.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no row was deleted
    async fn delete(&self, key: Self::Key) -> Result<(), DatabaseError>;

    /// Checks whether a row with the key exists
    async fn exists(&self, key: Self::Key) -> Result<bool, DatabaseError> {
        match self.get(key).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}
