use std::sync::{Arc, Mutex, PoisonError};

use watchwire_core::ContentKind;
use watchwire_sync::UpdateBatch;

use super::CompletionCallback;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobStatus {
    pub state: JobState,
    pub last_outcome: Option<RunOutcome>,
}

/// One scheduled sweep plus its `Idle -> Running -> Idle` state.
pub struct JobRunner {
    kind: ContentKind,
    batch: Arc<dyn UpdateBatch>,
    on_done: CompletionCallback,
    status: Mutex<JobStatus>,
}

impl JobRunner {
    #[must_use]
    pub fn new(
        kind: ContentKind,
        batch: Arc<dyn UpdateBatch>,
        on_done: CompletionCallback,
    ) -> Self {
        Self {
            kind,
            batch,
            on_done,
            status: Mutex::new(JobStatus {
                state: JobState::Idle,
                last_outcome: None,
            }),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self.kind {
            ContentKind::Show => "show_updates",
            ContentKind::Movie => "movie_updates",
        }
    }

    #[must_use]
    pub fn status(&self) -> JobStatus {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs one sweep. Returns `None` when skipped because the previous run
    /// of this job has not finished.
    pub async fn run(&self) -> Option<RunOutcome> {
        if !self.try_begin() {
            tracing::warn!(
                job = self.name(),
                "scheduler: previous run still in progress; skipping trigger"
            );
            return None;
        }

        tracing::info!(job = self.name(), "scheduler: starting run");
        let outcome = match self.batch.run_batch(self.kind).await {
            Ok(report) => {
                (self.on_done)();
                tracing::info!(
                    job = self.name(),
                    candidates = report.candidates,
                    updated = report.updated,
                    failed = report.failed,
                    "scheduler: run complete"
                );
                RunOutcome::Succeeded
            }
            Err(e) => {
                tracing::error!(job = self.name(), error = %e, "scheduler: run failed");
                RunOutcome::Failed
            }
        };

        self.finish(outcome);
        Some(outcome)
    }

    fn try_begin(&self) -> bool {
        let mut status = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        if status.state == JobState::Running {
            return false;
        }
        status.state = JobState::Running;
        true
    }

    fn finish(&self, outcome: RunOutcome) {
        let mut status = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        status.state = JobState::Idle;
        status.last_outcome = Some(outcome);
    }
}
