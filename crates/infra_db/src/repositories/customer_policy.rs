//! Customer/policy link repository
//!
//! Manages rows of the `customer_policies` join table. Referential
//! integrity is left to PostgreSQL: linking to a missing customer or policy
//! surfaces as `DatabaseError::ForeignKeyViolation`, linking the same pair
//! twice as `DatabaseError::DuplicateEntry`.

use async_trait::async_trait;
use sqlx::postgres::PgExecutor;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{CustomerId, PolicyNumber};
use domain_party::Customer;
use domain_policy::{CustomerPolicy, Policy};

use super::customer::CustomerRow;
use super::Repository;
use crate::error::DatabaseError;

/// Repository for the customer/policy join table
#[derive(Debug, Clone)]
pub struct CustomerPolicyRepository {
    pool: PgPool,
}

impl CustomerPolicyRepository {
    /// Creates a new CustomerPolicyRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Links a customer to a policy
    ///
    /// # Errors
    ///
    /// - `DatabaseError::ForeignKeyViolation` if either side does not exist
    /// - `DatabaseError::DuplicateEntry` if the link already exists
    #[instrument(skip(self))]
    pub async fn link(
        &self,
        customer_id: CustomerId,
        policy_number: PolicyNumber,
    ) -> Result<CustomerPolicy, DatabaseError> {
        let link = insert(&self.pool, customer_id, policy_number).await?;
        debug!("Customer linked to policy");
        Ok(link.into())
    }

    /// Removes a link between a customer and a policy
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the pair was not linked
    pub async fn unlink(
        &self,
        customer_id: CustomerId,
        policy_number: PolicyNumber,
    ) -> Result<(), DatabaseError> {
        self.delete((customer_id, policy_number)).await
    }

    /// Returns every link held by a customer, ordered by policy number
    pub async fn find_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<CustomerPolicy>, DatabaseError> {
        let rows = sqlx::query_as::<_, CustomerPolicyRow>(
            r#"
            SELECT customer_id, policy_number
            FROM customer_policies
            WHERE customer_id = $1
            ORDER BY policy_number
            "#,
        )
        .bind(customer_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CustomerPolicy::from).collect())
    }

    /// Returns every link on a policy, ordered by customer id
    ///
    /// Served by the secondary index on `policy_number`.
    pub async fn find_by_policy(
        &self,
        policy_number: PolicyNumber,
    ) -> Result<Vec<CustomerPolicy>, DatabaseError> {
        let rows = sqlx::query_as::<_, CustomerPolicyRow>(
            r#"
            SELECT customer_id, policy_number
            FROM customer_policies
            WHERE policy_number = $1
            ORDER BY customer_id
            "#,
        )
        .bind(policy_number.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CustomerPolicy::from).collect())
    }

    /// Navigates from a customer to the policies it holds
    pub async fn policies_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Policy>, DatabaseError> {
        let numbers = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT p.policy_number
            FROM policies p
            INNER JOIN customer_policies cp ON cp.policy_number = p.policy_number
            WHERE cp.customer_id = $1
            ORDER BY p.policy_number
            "#,
        )
        .bind(customer_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(numbers
            .into_iter()
            .map(|n| Policy::new(PolicyNumber::new(n)))
            .collect())
    }

    /// Navigates from a policy to the customers holding it
    pub async fn customers_for_policy(
        &self,
        policy_number: PolicyNumber,
    ) -> Result<Vec<Customer>, DatabaseError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT
                c.customer_id, c.first_name, c.last_name, c.date_of_birth,
                c.address, c.phone_number, c.email, c.customer_photo_url
            FROM customers c
            INNER JOIN customer_policies cp ON cp.customer_id = c.customer_id
            WHERE cp.policy_number = $1
            ORDER BY c.customer_id
            "#,
        )
        .bind(policy_number.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }
}

#[async_trait]
impl Repository for CustomerPolicyRepository {
    type Entity = CustomerPolicy;
    type Key = (CustomerId, PolicyNumber);

    async fn get(&self, key: (CustomerId, PolicyNumber)) -> Result<CustomerPolicy, DatabaseError> {
        let (customer_id, policy_number) = key;

        let row = sqlx::query_as::<_, CustomerPolicyRow>(
            r#"
            SELECT customer_id, policy_number
            FROM customer_policies
            WHERE customer_id = $1 AND policy_number = $2
            "#,
        )
        .bind(customer_id.value())
        .bind(policy_number.value())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            DatabaseError::not_found("CustomerPolicy", CustomerPolicy::new(customer_id, policy_number))
        })?;

        Ok(row.into())
    }

    async fn list(&self) -> Result<Vec<CustomerPolicy>, DatabaseError> {
        let rows = sqlx::query_as::<_, CustomerPolicyRow>(
            r#"
            SELECT customer_id, policy_number
            FROM customer_policies
            ORDER BY customer_id, policy_number
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CustomerPolicy::from).collect())
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: (CustomerId, PolicyNumber)) -> Result<(), DatabaseError> {
        let (customer_id, policy_number) = key;

        let result = sqlx::query(
            "DELETE FROM customer_policies WHERE customer_id = $1 AND policy_number = $2",
        )
        .bind(customer_id.value())
        .bind(policy_number.value())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(
                "CustomerPolicy",
                CustomerPolicy::new(customer_id, policy_number),
            ));
        }
        Ok(())
    }
}

/// Inserts a link row on any executor, so it can run inside a transaction
pub(crate) async fn insert<'e, E>(
    executor: E,
    customer_id: CustomerId,
    policy_number: PolicyNumber,
) -> Result<CustomerPolicyRow, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, CustomerPolicyRow>(
        r#"
        INSERT INTO customer_policies (customer_id, policy_number)
        VALUES ($1, $2)
        RETURNING customer_id, policy_number
        "#,
    )
    .bind(customer_id.value())
    .bind(policy_number.value())
    .fetch_one(executor)
    .await
}

/// Database row for a customer/policy link
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct CustomerPolicyRow {
    pub customer_id: i32,
    pub policy_number: i32,
}

impl From<CustomerPolicyRow> for CustomerPolicy {
    fn from(row: CustomerPolicyRow) -> Self {
        CustomerPolicy::new(
            CustomerId::new(row.customer_id),
            PolicyNumber::new(row.policy_number),
        )
    }
}
