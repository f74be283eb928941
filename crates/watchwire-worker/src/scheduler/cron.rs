use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};

use super::{PeriodicTrigger, ScheduledTask, SchedulerError, TriggerId};

/// [`PeriodicTrigger`] backed by `tokio-cron-scheduler`.
pub struct CronTrigger {
    scheduler: JobScheduler,
    pending: Mutex<HashMap<TriggerId, Job>>,
    running: Mutex<bool>,
}

impl CronTrigger {
    /// # Errors
    ///
    /// Returns [`SchedulerError::Cron`] if the underlying scheduler cannot be
    /// created.
    pub async fn new() -> Result<Self, SchedulerError> {
        Ok(Self {
            scheduler: JobScheduler::new().await?,
            pending: Mutex::new(HashMap::new()),
            running: Mutex::new(false),
        })
    }
}

#[async_trait]
impl PeriodicTrigger for CronTrigger {
    async fn register(
        &self,
        cadence: &str,
        task: ScheduledTask,
    ) -> Result<TriggerId, SchedulerError> {
        let expression = with_seconds_field(cadence)?;
        let job = Job::new_async(expression.as_str(), move |_uuid, _lock| task())?;
        let id = job.guid();
        self.pending.lock().await.insert(id, job);
        Ok(id)
    }

    async fn start(&self, id: TriggerId) -> Result<(), SchedulerError> {
        let job = self
            .pending
            .lock()
            .await
            .remove(&id)
            .ok_or(SchedulerError::UnknownTrigger(id))?;
        self.scheduler.add(job).await?;

        let mut running = self.running.lock().await;
        if !*running {
            self.scheduler.start().await?;
            *running = true;
        }
        Ok(())
    }

    async fn stop(&self, id: TriggerId) -> Result<(), SchedulerError> {
        if self.pending.lock().await.remove(&id).is_some() {
            return Ok(());
        }
        self.scheduler.remove(&id).await?;
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), SchedulerError> {
        let mut running = self.running.lock().await;
        if *running {
            let mut scheduler = self.scheduler.clone();
            scheduler.shutdown().await?;
            *running = false;
        }
        Ok(())
    }
}

/// `tokio-cron-scheduler` expects a leading seconds field; five-field
/// cadences fire at second zero.
pub(super) fn with_seconds_field(cadence: &str) -> Result<String, SchedulerError> {
    let fields: Vec<&str> = cadence.split_whitespace().collect();
    match fields.len() {
        5 => Ok(format!("0 {}", fields.join(" "))),
        6 | 7 => Ok(fields.join(" ")),
        n => Err(SchedulerError::InvalidCadence {
            cadence: cadence.to_string(),
            reason: format!("expected 5 fields, found {n}"),
        }),
    }
}
