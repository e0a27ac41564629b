//! Populate an empty database with default admin and staff accounts.

use anyhow::Context;

use fincount_api::config::required;
use fincount_api::seed::{seed_default_users, SeedConfig, SeedOutcome};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fincount_api::init_tracing("fincount_api=info,fincount_seed=info");

    let database_url = required("DATABASE_URL")?;
    let config = SeedConfig::from_env().context("Invalid seed configuration")?;

    let pool = fincount_db::create_pool(&database_url, 2)
        .await
        .context("Failed to connect to database")?;
    fincount_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    match seed_default_users(&pool, &config).await? {
        SeedOutcome::Skipped { existing } => {
            tracing::warn!(existing, "Users already present, skipping seed");
        }
        SeedOutcome::Created(usernames) => {
            tracing::info!(?usernames, "Seeded default users; change their passwords before production use");
        }
    }

    pool.close().await;
    Ok(())
}
