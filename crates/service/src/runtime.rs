//! Runtime environment helpers
//!
//! Opens the configured document store, preparing the data directory first
//! when the file backend is selected.

use std::sync::Arc;

use configs::DatabaseConfig;
use tracing::info;

use crate::storage::{self, DocumentStore, StoreTarget};

/// Resolve the store target, make sure its directory exists, and connect.
pub async fn open_store(cfg: &DatabaseConfig) -> anyhow::Result<Arc<dyn DocumentStore>> {
    let target = StoreTarget::parse(cfg)?;
    if let StoreTarget::File(dir) = &target {
        common::env::ensure_data_dir(dir).await?;
    }
    let store = storage::connect(target).await?;
    info!(backend = store.backend(), database = %cfg.name, "document store ready");
    Ok(store)
}
