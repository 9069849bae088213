//! Storage abstractions for service layer
//!
//! A [`DocumentStore`] is the long-lived connection opened once at startup;
//! each [`CollectionHandle`] is a named view over it holding one resource
//! kind's records. Backends:
//! - [`memory::MemoryStore`]: in-process, nothing persisted
//! - [`json_file::JsonFileStore`]: one JSON file per collection
//! - `mongo::MongoStore`: MongoDB, behind the `mongo` feature

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use configs::DatabaseConfig;
use models::Record;

use crate::errors::ServiceError;

pub mod json_file;
pub mod memory;
#[cfg(feature = "mongo")]
pub mod mongo;

/// Result of a merge update against one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    /// A record with the requested `id` existed.
    pub matched: bool,
    /// At least one field on it changed value.
    pub modified: bool,
}

/// Named partition of the document store holding one resource kind.
///
/// Lookups go by the application `id` field. When several records share an
/// `id`, `find_one`, `update_one` and `delete_one` act on the first match in
/// the backend's natural order.
#[async_trait]
pub trait CollectionHandle: Send + Sync {
    async fn insert_one(&self, record: Record) -> Result<(), ServiceError>;
    async fn find_all(&self) -> Result<Vec<Record>, ServiceError>;
    async fn find_one(&self, id: &str) -> Result<Option<Record>, ServiceError>;
    /// Overwrite only the fields present in `patch`.
    async fn update_one(&self, id: &str, patch: &Record) -> Result<UpdateOutcome, ServiceError>;
    /// Returns whether a record was removed.
    async fn delete_one(&self, id: &str) -> Result<bool, ServiceError>;
}

/// Store connection shared by every request for the process lifetime.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    fn backend(&self) -> &'static str;
    async fn collection(&self, name: &str) -> Result<Arc<dyn CollectionHandle>, ServiceError>;
}

/// Backend selected from `database.url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTarget {
    Memory,
    /// Directory holding `<collection>.json` files.
    File(PathBuf),
    Mongo { url: String, database: String },
}

impl StoreTarget {
    pub fn parse(cfg: &DatabaseConfig) -> Result<Self, ServiceError> {
        let url = cfg.url.trim();
        if url.starts_with("memory://") {
            return Ok(Self::Memory);
        }
        if let Some(path) = url.strip_prefix("file://") {
            let root = if path.is_empty() { PathBuf::from("data") } else { PathBuf::from(path) };
            return Ok(Self::File(root.join(&cfg.name)));
        }
        if url.starts_with("mongodb://") || url.starts_with("mongodb+srv://") {
            return Ok(Self::Mongo { url: url.to_string(), database: cfg.name.clone() });
        }
        let scheme = url.split("://").next().unwrap_or_default();
        Err(ServiceError::Config(format!("unsupported database url scheme: {scheme}")))
    }
}

/// Open the store for `target`.
pub async fn connect(target: StoreTarget) -> Result<Arc<dyn DocumentStore>, ServiceError> {
    match target {
        StoreTarget::Memory => Ok(Arc::new(memory::MemoryStore::new())),
        StoreTarget::File(dir) => Ok(Arc::new(json_file::JsonFileStore::new(dir))),
        #[cfg(feature = "mongo")]
        StoreTarget::Mongo { url, database } => {
            Ok(Arc::new(mongo::MongoStore::connect(&url, &database).await?))
        }
        #[cfg(not(feature = "mongo"))]
        StoreTarget::Mongo { .. } => Err(ServiceError::Config(
            "mongodb support not compiled in; rebuild with --features mongo".into(),
        )),
    }
}
