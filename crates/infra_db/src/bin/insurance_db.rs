//! Insurance Manager - database maintenance binary
//!
//! Applies, reverts and inspects the schema migrations.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending migrations
//! insurance-db migrate
//!
//! # Revert everything
//! insurance-db revert --target 0
//!
//! # Show migration state as JSON
//! INSURANCE_DB_URL=postgres://... insurance-db status --json
//! ```
//!
//! Settings are read from `insurance-db.toml`, `.env`, and `INSURANCE_DB_*`
//! variables; see `infra_db::config`.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use infra_db::{
    migration_status, revert_migrations, DatabaseSettings, InsuranceDbContext,
};

#[derive(Debug, Parser)]
#[command(name = "insurance-db", version, about = "Schema maintenance for the insurance manager database")]
struct Cli {
    /// Settings file (defaults to ./insurance-db.toml when present)
    #[arg(long, global = true, env = "INSURANCE_DB_CONFIG")]
    config: Option<PathBuf>,

    /// Connection string, overriding every other source
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply all pending migrations
    Migrate,
    /// Revert applied migrations newer than the target version
    Revert {
        /// Version to revert to; 0 reverts everything
        #[arg(long, default_value_t = 0)]
        target: i64,
    },
    /// List known migrations and whether each is applied
    Status {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Check that the database is reachable
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut settings = DatabaseSettings::load_from(cli.config.as_deref())
        .context("failed to load database settings")?;
    if let Some(url) = cli.database_url {
        settings.url = url;
    }

    init_tracing(&settings);

    let db = InsuranceDbContext::connect(&settings)
        .await
        .context("failed to connect to database")?;

    match cli.command {
        Command::Migrate => {
            db.migrate().await?;
        }
        Command::Revert { target } => {
            revert_migrations(db.pool(), target).await?;
            tracing::info!(target, "Revert complete");
        }
        Command::Status { json } => {
            let statuses = migration_status(db.pool()).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&statuses)?);
            } else {
                for status in statuses {
                    println!(
                        "{:<16} {:<8} {}",
                        status.version,
                        if status.applied { "applied" } else { "pending" },
                        status.description
                    );
                }
            }
        }
        Command::Check => {
            db.health_check().await?;
            tracing::info!("Database reachable");
        }
    }

    db.pool().close().await;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(settings: &DatabaseSettings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if settings.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}
