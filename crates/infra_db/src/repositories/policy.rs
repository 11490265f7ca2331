//! Policy repository implementation
//!
//! The `policies` table holds only the identity column, so a policy is
//! created from default values and never updated.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{CustomerId, PolicyNumber};
use domain_policy::Policy;

use super::Repository;
use crate::error::DatabaseError;

/// Repository for managing policy data
#[derive(Debug, Clone)]
pub struct PolicyRepository {
    pool: PgPool,
}

impl PolicyRepository {
    /// Creates a new PolicyRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new policy and returns it with its generated number
    #[instrument(skip(self))]
    pub async fn create(&self) -> Result<Policy, DatabaseError> {
        let number = sqlx::query_scalar::<_, i32>(
            "INSERT INTO policies DEFAULT VALUES RETURNING policy_number",
        )
        .fetch_one(&self.pool)
        .await?;

        debug!(policy_number = number, "Policy created");
        Ok(Policy::new(PolicyNumber::new(number)))
    }

    /// Retrieves a policy together with the customers linked to it
    pub async fn get_with_customers(&self, number: PolicyNumber) -> Result<Policy, DatabaseError> {
        let row = sqlx::query_as::<_, PolicyWithCustomersRow>(
            r#"
            SELECT
                p.policy_number,
                COALESCE(
                    array_agg(cp.customer_id ORDER BY cp.customer_id)
                        FILTER (WHERE cp.customer_id IS NOT NULL),
                    '{}'::INTEGER[]
                ) AS customers
            FROM policies p
            LEFT JOIN customer_policies cp ON cp.policy_number = p.policy_number
            WHERE p.policy_number = $1
            GROUP BY p.policy_number
            "#,
        )
        .bind(number.value())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Policy", number))?;

        Ok(Policy {
            number: PolicyNumber::new(row.policy_number),
            customers: row.customers.into_iter().map(CustomerId::new).collect(),
        })
    }
}

#[async_trait]
impl Repository for PolicyRepository {
    type Entity = Policy;
    type Key = PolicyNumber;

    async fn get(&self, number: PolicyNumber) -> Result<Policy, DatabaseError> {
        let found = sqlx::query_scalar::<_, i32>(
            "SELECT policy_number FROM policies WHERE policy_number = $1",
        )
        .bind(number.value())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Policy", number))?;

        Ok(Policy::new(PolicyNumber::new(found)))
    }

    async fn list(&self) -> Result<Vec<Policy>, DatabaseError> {
        let numbers = sqlx::query_scalar::<_, i32>(
            "SELECT policy_number FROM policies ORDER BY policy_number",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(numbers
            .into_iter()
            .map(|n| Policy::new(PolicyNumber::new(n)))
            .collect())
    }

    #[instrument(skip(self))]
    async fn delete(&self, number: PolicyNumber) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM policies WHERE policy_number = $1")
            .bind(number.value())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Policy", number));
        }

        debug!("Policy deleted with its customer links");
        Ok(())
    }
}

/// Policy row joined with its aggregated customer ids
#[derive(Debug, Clone, sqlx::FromRow)]
struct PolicyWithCustomersRow {
    policy_number: i32,
    customers: Vec<i32>,
}
