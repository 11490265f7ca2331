//! Database context
//!
//! [`InsuranceDbContext`] is the single entry point to the data layer. It
//! owns the pool, hands out one repository per table, and runs the few
//! operations that span tables.

use tracing::{info, instrument};

use core_kernel::PolicyNumber;
use domain_party::{Customer, CustomerDetails, CustomerValidator};

use crate::config::DatabaseSettings;
use crate::error::DatabaseError;
use crate::migrations;
use crate::pool::{create_pool, DatabasePool};
use crate::repositories::{
    customer, customer_policy, ClaimRepository, CustomerPolicyRepository, CustomerRepository,
    PolicyRepository,
};

/// Pool plus the repositories for every mapped table
///
/// Cloning is cheap; clones share the pool.
#[derive(Debug, Clone)]
pub struct InsuranceDbContext {
    pool: DatabasePool,
    customers: CustomerRepository,
    policies: PolicyRepository,
    customer_policies: CustomerPolicyRepository,
    claims: ClaimRepository,
}

impl InsuranceDbContext {
    /// Wraps an existing pool
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            customers: CustomerRepository::new(pool.clone()),
            policies: PolicyRepository::new(pool.clone()),
            customer_policies: CustomerPolicyRepository::new(pool.clone()),
            claims: ClaimRepository::new(pool.clone()),
            pool,
        }
    }

    /// Creates a pool from settings and wraps it
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, DatabaseError> {
        let pool = create_pool(settings.pool_config()).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    pub fn customers(&self) -> &CustomerRepository {
        &self.customers
    }

    pub fn policies(&self) -> &PolicyRepository {
        &self.policies
    }

    pub fn customer_policies(&self) -> &CustomerPolicyRepository {
        &self.customer_policies
    }

    pub fn claims(&self) -> &ClaimRepository {
        &self.claims
    }

    /// Applies pending migrations
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        migrations::run_migrations(&self.pool).await
    }

    /// Verifies the database answers a trivial query
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;
        Ok(())
    }

    /// Creates a customer and links it to existing policies atomically
    ///
    /// Either the customer and every link are written, or nothing is.
    ///
    /// # Errors
    ///
    /// - `DatabaseError::InvalidData` if the details fail validation
    /// - `DatabaseError::ForeignKeyViolation` if a policy does not exist
    /// - `DatabaseError::DuplicateEntry` if `policies` repeats a number
    #[instrument(skip(self, details), fields(policy_count = policies.len()))]
    pub async fn enroll_customer(
        &self,
        details: &CustomerDetails,
        policies: &[PolicyNumber],
    ) -> Result<Customer, DatabaseError> {
        CustomerValidator::ensure_valid(details)?;

        let mut tx = self.pool.begin().await?;

        let row = customer::insert(&mut *tx, details).await?;
        let mut enrolled: Customer = row.into();

        for policy in policies {
            customer_policy::insert(&mut *tx, enrolled.id, *policy).await?;
            enrolled.link_policy(*policy)?;
        }

        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        info!(customer_id = %enrolled.id, "Customer enrolled");
        Ok(enrolled)
    }
}
