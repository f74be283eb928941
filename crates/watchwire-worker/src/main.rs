mod scheduler;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use watchwire_core::SystemClock;
use watchwire_sync::{
    ChangeChecker, FixedIntervalPacer, UpdateOrchestrator, WatchStatusPropagator,
};

use crate::scheduler::{init_scheduled_jobs, CompletionCallback, CronTrigger, JobSchedule};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = watchwire_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(env = %config.env, "worker: starting");

    let pool_config = watchwire_db::PoolConfig::from_app_config(&config);
    let pool = watchwire_db::connect_pool(&config.database_url, pool_config).await?;
    watchwire_db::run_migrations(&pool).await?;
    watchwire_db::health_check(&pool).await?;

    let store = Arc::new(watchwire_db::PgStore::new(pool));
    let catalog = Arc::new(watchwire_tmdb::TmdbClient::new(
        &watchwire_tmdb::TmdbClientConfig::from_app_config(&config),
    )?);
    // One pacer for both jobs so overlapping runs share the request budget.
    let pacer = Arc::new(FixedIntervalPacer::from_millis(config.request_interval_ms));

    let checker = Arc::new(ChangeChecker::new(
        store.clone(),
        catalog,
        WatchStatusPropagator::new(store.clone()),
        pacer,
        Arc::new(SystemClock),
        config.change_lookback_days,
    ));
    let orchestrator = Arc::new(UpdateOrchestrator::new(store, checker));

    let trigger = Arc::new(CronTrigger::new().await?);
    let on_show_updates_done: CompletionCallback = Arc::new(|| {
        tracing::info!("worker: show updates done; notifying subscribers");
    });
    let on_movie_updates_done: CompletionCallback = Arc::new(|| {
        tracing::info!("worker: movie updates done; notifying subscribers");
    });

    let handle = init_scheduled_jobs(
        trigger,
        orchestrator,
        JobSchedule::from_app_config(&config),
        on_show_updates_done,
        on_movie_updates_done,
    )
    .await?;

    shutdown_signal().await;
    tracing::info!(
        shows = ?handle.show_job_status(),
        movies = ?handle.movie_job_status(),
        "worker: job status at shutdown"
    );
    handle.stop().await?;
    tracing::info!("worker: stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "worker: failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "worker: failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, stopping scheduled jobs");
}
