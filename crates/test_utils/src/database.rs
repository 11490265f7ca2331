//! Database Test Utilities
//!
//! Provides a migrated PostgreSQL database for integration tests. When
//! `TEST_DATABASE_URL` is set the tests connect to that server; otherwise a
//! throwaway container is started per test. Tests that cannot get either
//! are skipped with a message instead of failing.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use testcontainers::ContainerAsync;
use testcontainers_modules::postgres::Postgres;
use testcontainers_modules::testcontainers::runners::AsyncRunner;

use infra_db::{run_migrations, InsuranceDbContext};

/// Environment variable naming an existing database to test against
pub const TEST_DATABASE_URL_ENV: &str = "TEST_DATABASE_URL";

/// Credentials of the stock postgres image
const POSTGRES_USER: &str = "postgres";
const POSTGRES_PASSWORD: &str = "postgres";
const POSTGRES_DB: &str = "postgres";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A migrated PostgreSQL database for one test
///
/// Keeps the container (if any) alive for as long as the value lives.
pub struct TestDatabase {
    container: Option<ContainerAsync<Postgres>>,
    pub url: String,
    pub pool: PgPool,
}

impl TestDatabase {
    /// Connects to `TEST_DATABASE_URL` or starts a container, then applies
    /// the migrations
    ///
    /// # Errors
    ///
    /// Returns an error if no database can be reached or migrations fail
    pub async fn new() -> Result<Self, BoxError> {
        match std::env::var(TEST_DATABASE_URL_ENV) {
            Ok(url) => Self::connect(url, None).await,
            Err(_) => Self::start_container().await,
        }
    }

    async fn start_container() -> Result<Self, BoxError> {
        let container = Postgres::default().start().await?;

        let port = container.get_host_port_ipv4(5432).await?;
        let host = container.get_host().await?.to_string();
        let url = format!(
            "postgres://{}:{}@{}:{}/{}",
            POSTGRES_USER, POSTGRES_PASSWORD, host, port, POSTGRES_DB
        );

        Self::connect(url, Some(container)).await
    }

    async fn connect(
        url: String,
        container: Option<ContainerAsync<Postgres>>,
    ) -> Result<Self, BoxError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&url)
            .await?;

        run_migrations(&pool).await?;

        Ok(Self {
            container,
            url,
            pool,
        })
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Whether this database belongs to this test alone
    ///
    /// Databases reached through `TEST_DATABASE_URL` are shared by every
    /// test in the run, so destructive tests should skip them.
    pub fn is_isolated(&self) -> bool {
        self.container.is_some()
    }

    /// Returns a db context over this database's pool
    pub fn context(&self) -> InsuranceDbContext {
        InsuranceDbContext::new(self.pool.clone())
    }
}

/// Returns a test database, or `None` (after printing why) when none is
/// available in this environment
pub async fn try_test_database() -> Option<TestDatabase> {
    match TestDatabase::new().await {
        Ok(db) => Some(db),
        Err(e) => {
            eprintln!(
                "skipping database test: no PostgreSQL available ({}); set {} or start Docker",
                e, TEST_DATABASE_URL_ENV
            );
            None
        }
    }
}

/// Declares an async test that receives a migrated [`TestDatabase`]
///
/// The test body is skipped when no database is available.
#[macro_export]
macro_rules! db_test {
    ($name:ident, |$db:ident| $body:block) => {
        #[tokio::test]
        async fn $name() {
            let Some($db) = $crate::database::try_test_database().await else {
                return;
            };
            $body
        }
    };
}
