//! Change reconciliation engine: detects upstream catalog changes for
//! tracked shows and movies, applies them through the storage ports, and
//! re-opens watch status for profiles when new content appears.

pub mod checker;
pub mod error;
pub mod filter;
pub mod orchestrator;
pub mod pacing;
pub mod propagate;

pub use checker::{ChangeChecker, CheckOutcome, ItemChecker};
pub use error::SyncError;
pub use filter::{
    filter_unique_episode_ids, filter_unique_season_ids, has_structural_additions, is_relevant,
};
pub use orchestrator::{BatchReport, UpdateBatch, UpdateOrchestrator};
pub use pacing::{FixedIntervalPacer, NoopPacer, Pacer};
pub use propagate::{PropagationSummary, WatchStatusPropagator};
