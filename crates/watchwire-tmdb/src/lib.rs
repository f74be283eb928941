//! Client for the TMDB v3 REST API, limited to the change feeds and the
//! detail lookups needed to apply a change locally.

mod catalog;
pub mod client;
pub mod error;
pub mod normalize;
pub(crate) mod retry;
pub mod types;

pub use client::{TmdbClient, TmdbClientConfig};
pub use error::TmdbError;
pub use normalize::normalize_changes;
