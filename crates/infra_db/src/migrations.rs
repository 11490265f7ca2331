//! Schema migrations
//!
//! Migrations live in `/migrations` at the workspace root as reversible
//! `<version>_<name>.up.sql` / `.down.sql` pairs and are embedded into the
//! binary at compile time. Applying and reverting take sqlx's advisory lock,
//! so concurrent callers serialize on the database.

use serde::Serialize;
use sqlx::migrate::{Migrate, Migrator};
use tracing::info;

use crate::error::DatabaseError;
use crate::pool::DatabasePool;

/// Every migration known to this build
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Whether a known migration has been applied to a database
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationStatus {
    pub version: i64,
    pub description: String,
    pub applied: bool,
}

/// Returns the highest migration version embedded in this build
pub fn latest_version() -> Option<i64> {
    MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .map(|m| m.version)
        .max()
}

/// Applies all pending migrations
///
/// # Errors
///
/// Returns `DatabaseError::MigrationFailed` if any migration fails or an
/// applied migration no longer matches its embedded checksum
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), DatabaseError> {
    info!("Running database migrations");
    MIGRATOR.run(pool).await?;
    info!(version = ?latest_version(), "Database schema up to date");
    Ok(())
}

/// Reverts applied migrations newer than `target`
///
/// A `target` of `0` reverts everything, dropping all tables.
pub async fn revert_migrations(pool: &DatabasePool, target: i64) -> Result<(), DatabaseError> {
    info!(target, "Reverting database migrations");
    MIGRATOR.undo(pool, target).await?;
    Ok(())
}

/// Lists every known migration with its applied flag, oldest first
pub async fn migration_status(pool: &DatabasePool) -> Result<Vec<MigrationStatus>, DatabaseError> {
    let mut conn = pool.acquire().await?;
    conn.ensure_migrations_table().await?;
    let applied = conn.list_applied_migrations().await?;

    let mut statuses: Vec<MigrationStatus> = MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .map(|m| MigrationStatus {
            version: m.version,
            description: m.description.to_string(),
            applied: applied.iter().any(|a| a.version == m.version),
        })
        .collect();
    statuses.sort_by_key(|s| s.version);

    Ok(statuses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{self, constraints, tables};

    fn sql_of(down: bool) -> String {
        MIGRATOR
            .iter()
            .filter(|m| m.migration_type.is_down_migration() == down)
            .map(|m| m.sql.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_single_initial_migration() {
        let ups: Vec<_> = MIGRATOR
            .iter()
            .filter(|m| !m.migration_type.is_down_migration())
            .collect();

        assert_eq!(ups.len(), 1);
        assert_eq!(ups[0].version, 20251013201534);
        assert_eq!(ups[0].description, "initial create");
        assert_eq!(latest_version(), Some(20251013201534));
    }

    #[test]
    fn test_every_migration_is_reversible() {
        for up in MIGRATOR.iter().filter(|m| !m.migration_type.is_down_migration()) {
            assert!(
                MIGRATOR
                    .iter()
                    .any(|m| m.version == up.version && m.migration_type.is_down_migration()),
                "migration {} has no down script",
                up.version
            );
        }
    }

    #[test]
    fn test_up_script_declares_every_schema_name() {
        let up = sql_of(false);
        for name in schema::ALL_TABLES.iter().chain(schema::ALL_CONSTRAINTS.iter()) {
            assert!(up.contains(name), "up script is missing {}", name);
        }
    }

    #[test]
    fn test_up_script_creates_tables_in_listed_order() {
        let up = sql_of(false);
        let offsets: Vec<usize> = schema::ALL_TABLES
            .iter()
            .map(|table| {
                up.find(&format!("CREATE TABLE {} (", table))
                    .unwrap_or_else(|| panic!("up script does not create {}", table))
            })
            .collect();

        assert!(offsets.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_join_table_cascades_both_sides() {
        let up = sql_of(false);
        assert_eq!(up.matches("ON DELETE CASCADE").count(), 2);
        assert!(up.contains("PRIMARY KEY (customer_id, policy_number)"));
        assert!(up.contains(&format!(
            "{} ON {} (policy_number)",
            constraints::IX_CUSTOMER_POLICIES_POLICY_NUMBER,
            tables::CUSTOMER_POLICIES
        )));
    }

    #[test]
    fn test_down_script_drops_every_table() {
        let down = sql_of(true);
        for table in schema::ALL_TABLES {
            assert!(
                down.contains(&format!("DROP TABLE {};", table)),
                "down script does not drop {}",
                table
            );
        }
    }
}
