//! Background job scheduler.
//!
//! [`init_scheduled_jobs`] registers the show and movie sweeps on a
//! [`PeriodicTrigger`], starts both, and returns a [`SchedulerHandle`] that
//! owns the registrations until shutdown.

mod cron;
mod job;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio_cron_scheduler::JobSchedulerError;
use uuid::Uuid;
use watchwire_core::{
    AppConfig, ContentKind, DEFAULT_MOVIE_UPDATE_CRON, DEFAULT_SHOW_UPDATE_CRON,
};
use watchwire_sync::UpdateBatch;

pub use self::cron::CronTrigger;
pub use self::job::{JobRunner, JobState, JobStatus, RunOutcome};

/// Invoked after a batch finishes without a fatal error.
pub type CompletionCallback = Arc<dyn Fn() + Send + Sync>;

/// Work a trigger runs each time its cadence fires.
pub type ScheduledTask = Arc<dyn Fn() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// Identifies one registration on a [`PeriodicTrigger`].
pub type TriggerId = Uuid;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("cron scheduler error: {0}")]
    Cron(#[from] JobSchedulerError),

    #[error("invalid cadence '{cadence}': {reason}")]
    InvalidCadence { cadence: String, reason: String },

    #[error("no registration with id {0}")]
    UnknownTrigger(TriggerId),
}

/// A source of periodic wake-ups keyed by a five-field cron cadence.
#[async_trait]
pub trait PeriodicTrigger: Send + Sync {
    /// Registers `task` to run on `cadence`. Nothing fires until
    /// [`PeriodicTrigger::start`] is called for the returned id.
    async fn register(
        &self,
        cadence: &str,
        task: ScheduledTask,
    ) -> Result<TriggerId, SchedulerError>;

    async fn start(&self, id: TriggerId) -> Result<(), SchedulerError>;

    /// Deregisters `id`. Runs already in flight are not interrupted.
    async fn stop(&self, id: TriggerId) -> Result<(), SchedulerError>;

    /// Releases the trigger once every registration is stopped.
    async fn shutdown(&self) -> Result<(), SchedulerError>;
}

/// Cadences for the two sweeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSchedule {
    pub show_cron: String,
    pub movie_cron: String,
}

impl Default for JobSchedule {
    fn default() -> Self {
        Self {
            show_cron: DEFAULT_SHOW_UPDATE_CRON.to_string(),
            movie_cron: DEFAULT_MOVIE_UPDATE_CRON.to_string(),
        }
    }
}

impl JobSchedule {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            show_cron: config.show_update_cron.clone(),
            movie_cron: config.movie_update_cron.clone(),
        }
    }
}

struct Registration {
    id: TriggerId,
    runner: Arc<JobRunner>,
}

/// Owns both job registrations. Dropping it without calling
/// [`SchedulerHandle::stop`] leaves the jobs registered on the trigger.
pub struct SchedulerHandle {
    trigger: Arc<dyn PeriodicTrigger>,
    shows: Registration,
    movies: Registration,
}

impl SchedulerHandle {
    #[must_use]
    pub fn show_job_status(&self) -> JobStatus {
        self.shows.runner.status()
    }

    #[must_use]
    pub fn movie_job_status(&self) -> JobStatus {
        self.movies.runner.status()
    }

    /// Deregisters both jobs and shuts the trigger down.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchedulerError`] raised by the trigger. Both
    /// deregistrations are attempted regardless.
    pub async fn stop(self) -> Result<(), SchedulerError> {
        let shows = self.trigger.stop(self.shows.id).await;
        let movies = self.trigger.stop(self.movies.id).await;
        shows?;
        movies?;
        self.trigger.shutdown().await?;
        tracing::info!("scheduler: stopped");
        Ok(())
    }
}

impl std::fmt::Debug for SchedulerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulerHandle")
            .field("shows", &self.shows.id)
            .field("movies", &self.movies.id)
            .finish_non_exhaustive()
    }
}

/// Registers and starts the show and movie sweeps.
///
/// Each run executes the batch for its kind and invokes the matching
/// completion callback only when the batch did not fail as a whole.
///
/// # Errors
///
/// Returns [`SchedulerError`] if either job cannot be registered or started.
pub async fn init_scheduled_jobs(
    trigger: Arc<dyn PeriodicTrigger>,
    batch: Arc<dyn UpdateBatch>,
    schedule: JobSchedule,
    on_show_updates_done: CompletionCallback,
    on_movie_updates_done: CompletionCallback,
) -> Result<SchedulerHandle, SchedulerError> {
    tracing::info!(
        show_cron = %schedule.show_cron,
        movie_cron = %schedule.movie_cron,
        "scheduler: initializing"
    );

    let shows = register_job(
        trigger.as_ref(),
        &schedule.show_cron,
        JobRunner::new(ContentKind::Show, Arc::clone(&batch), on_show_updates_done),
    )
    .await?;
    let movies = register_job(
        trigger.as_ref(),
        &schedule.movie_cron,
        JobRunner::new(ContentKind::Movie, batch, on_movie_updates_done),
    )
    .await?;

    Ok(SchedulerHandle {
        trigger,
        shows,
        movies,
    })
}

async fn register_job(
    trigger: &dyn PeriodicTrigger,
    cadence: &str,
    runner: JobRunner,
) -> Result<Registration, SchedulerError> {
    let runner = Arc::new(runner);
    let task: ScheduledTask = {
        let runner = Arc::clone(&runner);
        Arc::new(move || -> Pin<Box<dyn Future<Output = ()> + Send>> {
            let runner = Arc::clone(&runner);
            Box::pin(async move {
                runner.run().await;
            })
        })
    };

    let id = trigger.register(cadence, task).await?;
    trigger.start(id).await?;
    tracing::info!(job = runner.name(), cron = %cadence, "scheduler: registered job");

    Ok(Registration { id, runner })
}

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod tests;
