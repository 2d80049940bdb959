//! Apply the workspace migrations to `DATABASE_URL`.

use anyhow::Context;
use companyflow_core::{telemetry, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    telemetry::init_for(&config)?;

    tracing::info!(environment = %config.environment, "Running migrations");
    let pool = companyflow_db::setup_database(&config).await?;
    pool.close().await;

    Ok(())
}
