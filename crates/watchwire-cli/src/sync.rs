//! Wires the sync engine for one-off runs from the command line.

use std::sync::Arc;

use sqlx::PgPool;
use watchwire_core::{AppConfig, ContentKind, SystemClock};
use watchwire_db::PgStore;
use watchwire_sync::{
    ChangeChecker, CheckOutcome, FixedIntervalPacer, ItemChecker, UpdateOrchestrator,
    WatchStatusPropagator,
};
use watchwire_tmdb::{TmdbClient, TmdbClientConfig};

fn build_checker(config: &AppConfig, store: &Arc<PgStore>) -> anyhow::Result<ChangeChecker> {
    let catalog = TmdbClient::new(&TmdbClientConfig::from_app_config(config))?;
    Ok(ChangeChecker::new(
        store.clone(),
        Arc::new(catalog),
        WatchStatusPropagator::new(store.clone()),
        Arc::new(FixedIntervalPacer::from_millis(config.request_interval_ms)),
        Arc::new(SystemClock),
        config.change_lookback_days,
    ))
}

pub(crate) async fn run_sweep(
    config: &AppConfig,
    pool: PgPool,
    kind: ContentKind,
) -> anyhow::Result<()> {
    let store = Arc::new(PgStore::new(pool));
    let checker = Arc::new(build_checker(config, &store)?);
    let orchestrator = UpdateOrchestrator::new(store, checker);

    let report = match kind {
        ContentKind::Show => orchestrator.update_shows().await?,
        ContentKind::Movie => orchestrator.update_movies().await?,
    };

    println!(
        "{kind} sweep: {} candidates, {} updated, {} unchanged, {} failed ({} ms)",
        report.candidates,
        report.updated,
        report.unchanged,
        report.failed,
        report.elapsed.as_millis()
    );
    Ok(())
}

pub(crate) async fn run_check(
    config: &AppConfig,
    pool: PgPool,
    kind: ContentKind,
    id: i64,
) -> anyhow::Result<()> {
    let row = watchwire_db::get_tracked_item(&pool, kind, id).await?;
    let item = row.into_item(kind);
    let store = Arc::new(PgStore::new(pool));
    let checker = build_checker(config, &store)?;

    match checker.check_for_changes(&item).await? {
        CheckOutcome::Unchanged => println!("{kind} {id} ({}): no changes", item.title),
        CheckOutcome::Updated {
            new_seasons,
            new_episodes,
        } => println!(
            "{kind} {id} ({}): updated, {new_seasons} new seasons, {new_episodes} new episodes",
            item.title
        ),
    }
    Ok(())
}
