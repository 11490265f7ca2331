//! Customer repository implementation
//!
//! Maps the `customers` table to [`Customer`]. Details are validated before
//! every insert and update.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::postgres::PgExecutor;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{CustomerId, PolicyNumber};
use domain_party::{Customer, CustomerDetails, CustomerValidator};

use super::Repository;
use crate::error::DatabaseError;

/// Repository for managing customer data
///
/// # Example
///
/// ```rust,ignore
/// use infra_db::repositories::{CustomerRepository, Repository};
///
/// let repo = CustomerRepository::new(pool);
/// let customer = repo.create(&details).await?;
/// let loaded = repo.get_with_policies(customer.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new customer; the database assigns the key
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidData` if the details fail validation
    #[instrument(skip(self, details))]
    pub async fn create(&self, details: &CustomerDetails) -> Result<Customer, DatabaseError> {
        CustomerValidator::ensure_valid(details)?;

        let row = insert(&self.pool, details).await?;
        debug!(customer_id = row.customer_id, "Customer created");

        Ok(row.into())
    }

    /// Overwrites every descriptive column of an existing customer
    ///
    /// The navigation collection is not persisted; the returned customer
    /// carries an empty `policies` list.
    ///
    /// # Errors
    ///
    /// - `DatabaseError::InvalidData` if the details fail validation
    /// - `DatabaseError::NotFound` if the customer does not exist
    #[instrument(skip(self, customer), fields(customer_id = %customer.id))]
    pub async fn update(&self, customer: &Customer) -> Result<Customer, DatabaseError> {
        CustomerValidator::ensure_valid(&customer.details)?;
        let details = &customer.details;

        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            UPDATE customers
            SET first_name = $2,
                last_name = $3,
                date_of_birth = $4,
                address = $5,
                phone_number = $6,
                email = $7,
                customer_photo_url = $8
            WHERE customer_id = $1
            RETURNING
                customer_id, first_name, last_name, date_of_birth,
                address, phone_number, email, customer_photo_url
            "#,
        )
        .bind(customer.id.value())
        .bind(&details.first_name)
        .bind(&details.last_name)
        .bind(details.date_of_birth)
        .bind(&details.address)
        .bind(&details.phone_number)
        .bind(&details.email)
        .bind(&details.customer_photo_url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Customer", customer.id))?;

        Ok(row.into())
    }

    /// Retrieves a customer together with the policy numbers linked to it
    ///
    /// The links are read in the same statement through a left join on the
    /// join table, ordered by policy number.
    #[instrument(skip(self))]
    pub async fn get_with_policies(&self, id: CustomerId) -> Result<Customer, DatabaseError> {
        let row = sqlx::query_as::<_, CustomerWithPoliciesRow>(
            r#"
            SELECT
                c.customer_id, c.first_name, c.last_name, c.date_of_birth,
                c.address, c.phone_number, c.email, c.customer_photo_url,
                COALESCE(
                    array_agg(cp.policy_number ORDER BY cp.policy_number)
                        FILTER (WHERE cp.policy_number IS NOT NULL),
                    '{}'::INTEGER[]
                ) AS policies
            FROM customers c
            LEFT JOIN customer_policies cp ON cp.customer_id = c.customer_id
            WHERE c.customer_id = $1
            GROUP BY c.customer_id
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Customer", id))?;

        let mut customer: Customer = row.customer.into();
        customer.policies = row.policies.into_iter().map(PolicyNumber::new).collect();
        Ok(customer)
    }
}

#[async_trait]
impl Repository for CustomerRepository {
    type Entity = Customer;
    type Key = CustomerId;

    #[instrument(skip(self))]
    async fn get(&self, id: CustomerId) -> Result<Customer, DatabaseError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT
                customer_id, first_name, last_name, date_of_birth,
                address, phone_number, email, customer_photo_url
            FROM customers
            WHERE customer_id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Customer", id))?;

        Ok(row.into())
    }

    async fn list(&self) -> Result<Vec<Customer>, DatabaseError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT
                customer_id, first_name, last_name, date_of_birth,
                address, phone_number, email, customer_photo_url
            FROM customers
            ORDER BY customer_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: CustomerId) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM customers WHERE customer_id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Customer", id));
        }

        debug!("Customer deleted with its policy links");
        Ok(())
    }
}

/// Inserts a customer row on any executor, so it can run inside a
/// transaction
pub(crate) async fn insert<'e, E>(executor: E, details: &CustomerDetails) -> Result<CustomerRow, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, CustomerRow>(
        r#"
        INSERT INTO customers (
            first_name, last_name, date_of_birth, address,
            phone_number, email, customer_photo_url
        ) VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING
            customer_id, first_name, last_name, date_of_birth,
            address, phone_number, email, customer_photo_url
        "#,
    )
    .bind(&details.first_name)
    .bind(&details.last_name)
    .bind(details.date_of_birth)
    .bind(&details.address)
    .bind(&details.phone_number)
    .bind(&details.email)
    .bind(&details.customer_photo_url)
    .fetch_one(executor)
    .await
}

/// Database row for customer
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CustomerRow {
    pub customer_id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: NaiveDateTime,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub customer_photo_url: Option<String>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer::new(
            CustomerId::new(row.customer_id),
            CustomerDetails {
                first_name: row.first_name,
                last_name: row.last_name,
                date_of_birth: row.date_of_birth,
                address: row.address,
                phone_number: row.phone_number,
                email: row.email,
                customer_photo_url: row.customer_photo_url,
            },
        )
    }
}

/// Customer row joined with its aggregated policy numbers
#[derive(Debug, Clone, sqlx::FromRow)]
struct CustomerWithPoliciesRow {
    #[sqlx(flatten)]
    customer: CustomerRow,
    policies: Vec<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_row_maps_every_column() {
        let row = CustomerRow {
            customer_id: 4,
            first_name: Some("Mere".to_string()),
            last_name: Some("Tane".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1975, 2, 28)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            address: None,
            phone_number: Some("+64 21 555 0101".to_string()),
            email: Some("mere@example.co.nz".to_string()),
            customer_photo_url: None,
        };

        let customer = Customer::from(row.clone());
        assert_eq!(customer.id, CustomerId::new(4));
        assert_eq!(customer.details.first_name, row.first_name);
        assert_eq!(customer.details.date_of_birth, row.date_of_birth);
        assert_eq!(customer.details.phone_number, row.phone_number);
        assert!(customer.policies.is_empty());
    }
}
