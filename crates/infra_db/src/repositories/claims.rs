//! Claims repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::ClaimId;
use domain_claims::Claim;

use super::Repository;
use crate::error::DatabaseError;

/// Repository for managing claims data
///
/// Claims carry no columns besides their identity, so the repository only
/// creates, reads and deletes.
#[derive(Debug, Clone)]
pub struct ClaimRepository {
    pool: PgPool,
}

impl ClaimRepository {
    /// Creates a new ClaimRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new claim and returns it with its generated id
    #[instrument(skip(self))]
    pub async fn create(&self) -> Result<Claim, DatabaseError> {
        let id = sqlx::query_scalar::<_, i32>("INSERT INTO claims DEFAULT VALUES RETURNING claim_id")
            .fetch_one(&self.pool)
            .await?;

        debug!(claim_id = id, "Claim created");
        Ok(Claim::new(ClaimId::new(id)))
    }
}

#[async_trait]
impl Repository for ClaimRepository {
    type Entity = Claim;
    type Key = ClaimId;

    async fn get(&self, id: ClaimId) -> Result<Claim, DatabaseError> {
        let found = sqlx::query_scalar::<_, i32>("SELECT claim_id FROM claims WHERE claim_id = $1")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Claim", id))?;

        Ok(Claim::new(ClaimId::new(found)))
    }

    async fn list(&self) -> Result<Vec<Claim>, DatabaseError> {
        let ids = sqlx::query_scalar::<_, i32>("SELECT claim_id FROM claims ORDER BY claim_id")
            .fetch_all(&self.pool)
            .await?;

        Ok(ids.into_iter().map(|id| Claim::new(ClaimId::new(id))).collect())
    }

    async fn delete(&self, id: ClaimId) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM claims WHERE claim_id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Claim", id));
        }
        Ok(())
    }
}
