//! Runs the Tickler reminder service.
//!
//! Configuration comes from `tickler.toml`, `TICKLER_*` variables and the
//! Twilio credential variables (see [`tickler::config`]). A `.env` file in the
//! working directory is loaded first. Log verbosity follows `RUST_LOG` and
//! defaults to `info`.
//!
//! Tasks are stored in `PostgreSQL` when `database.url` is set and in memory
//! otherwise. The process serves HTTP until interrupted, then stops the
//! scheduler executor.

use mockable::DefaultClock;
use std::sync::Arc;
use tickler::config::ServiceConfig;
use tickler::http;
use tickler::scheduler::JobScheduler;
use tickler::task::{
    adapters::{
        memory::InMemoryTaskRepository, postgres::PostgresTaskRepository,
        twilio::TwilioNotificationSink,
    },
    ports::TaskRepository,
    services::TaskReminderService,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            return Err(err.into());
        }
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServiceConfig::load()?;
    match config.database.url.as_deref() {
        Some(url) => {
            info!("using PostgreSQL task store");
            let repository = PostgresTaskRepository::connect(url)?;
            run(Arc::new(repository), &config).await
        }
        None => {
            info!("using in-memory task store");
            run(Arc::new(InMemoryTaskRepository::new()), &config).await
        }
    }
}

async fn run<R>(repository: Arc<R>, config: &ServiceConfig) -> Result<(), BoxError>
where
    R: TaskRepository + 'static,
{
    let notifier = Arc::new(TwilioNotificationSink::new(config.twilio.settings())?);
    let scheduler = Arc::new(JobScheduler::with_tick_interval(
        Arc::new(DefaultClock),
        config.tick_interval(),
    ));
    let service = TaskReminderService::new(repository, notifier, Arc::clone(&scheduler));
    let executor = scheduler.start(Arc::new(service.job_handler()))?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr()?).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, http::router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    executor.shutdown().await?;
    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
    }
}
