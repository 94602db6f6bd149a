//! Database seed script: applies migrations and loads the sample dataset.
//! Run with: cargo run --bin seed

use news_api::config::Config;
use news_api::db::seed::{seed, SeedData};
use news_api::db::Database;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "news_api=info,seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config).await?;

    db.run_migrations().await?;

    let data = SeedData::sample()?;
    seed(&db.pg, &data).await?;

    db.close().await;

    Ok(())
}
