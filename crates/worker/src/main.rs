use anyhow::Context;
use regsuite_worker::{scheduler, WorkerConfig};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "regsuite_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WorkerConfig::from_env();
    tracing::info!(
        tick_secs = config.tick_secs,
        license_reminder_days = config.license_reminder_days,
        follow_up_days = config.follow_up_days,
        "Loaded worker configuration"
    );

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = regsuite_db::create_pool(&database_url).await?;
    regsuite_db::health_check(&pool).await?;
    regsuite_db::run_migrations(&pool).await?;
    tracing::info!("Database ready");

    let cancel = CancellationToken::new();
    let handle = tokio::spawn(scheduler::run(pool, config, cancel.clone()));

    tokio::signal::ctrl_c().await?;
    tracing::info!("Received SIGINT, stopping worker");
    cancel.cancel();
    handle.await?;

    tracing::info!("Worker stopped");
    Ok(())
}
