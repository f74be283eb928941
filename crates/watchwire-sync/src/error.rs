use thiserror::Error;
use watchwire_core::{CatalogError, StoreError};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}
