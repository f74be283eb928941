//! Domain types, storage/catalog ports, and configuration shared by every
//! watchwire crate.

mod app_config;
pub mod changes;
mod config;
pub mod dates;
mod error;
pub mod items;
pub mod ports;
pub mod watch_status;

pub use app_config::{AppConfig, Environment};
pub use changes::{ChangeAction, ChangeKey, ChangeRecord, ChangeValue};
pub use config::{
    load_app_config, load_app_config_from_env, DEFAULT_MOVIE_UPDATE_CRON,
    DEFAULT_SHOW_UPDATE_CRON, DEFAULT_TMDB_BASE_URL, MAX_CHANGE_LOOKBACK_DAYS,
};
pub use dates::{generate_date_range, Clock, DateWindow, FixedClock, SystemClock};
pub use error::{BoxError, CatalogError, ConfigError, StoreError};
pub use items::{
    ContentKind, EpisodeSummary, MovieMetadata, SeasonSummary, SeasonUpsert, ShowDetails,
    ShowMetadata, TrackedItem,
};
pub use ports::{ChangeCatalog, ContentStore, WatchStatusStore};
pub use watch_status::WatchStatus;
