use std::{collections::HashMap, path::{Path, PathBuf}, sync::Arc};

use async_trait::async_trait;
use models::Record;
use tokio::{fs, sync::RwLock};
use tracing::debug;

use super::memory::{delete_first, find_first, update_first};
use super::{CollectionHandle, DocumentStore, UpdateOutcome};
use crate::errors::ServiceError;

/// JSON file-backed collection.
///
/// Keeps the records in memory in insertion order and rewrites
/// `<dir>/<name>.json` after every mutation. A mutation whose write fails
/// leaves the in-memory state untouched.
pub struct JsonFileCollection {
    inner: RwLock<Vec<Record>>,
    file_path: PathBuf,
}

impl JsonFileCollection {
    /// Load the collection from `path`. Creates the file with an empty array if missing.
    pub async fn open<P: Into<PathBuf>>(name: &str, path: P) -> Result<Self, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.map_err(ServiceError::storage)?;
        }

        let records: Vec<Record> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ServiceError::Storage(format!("corrupt collection file {}: {e}", file_path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                write_atomic(&file_path, &[]).await?;
                Vec::new()
            }
            Err(e) => return Err(ServiceError::storage(e)),
        };
        debug!(collection = name, count = records.len(), path = %file_path.display(), "collection loaded");

        Ok(Self { inner: RwLock::new(records), file_path })
    }

    /// Apply `f` to a copy of the records; persist and swap it in when `f`
    /// reports a change.
    async fn mutate<T, F>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut Vec<Record>) -> (T, bool),
    {
        let mut records = self.inner.write().await;
        let mut next = records.clone();
        let (out, changed) = f(&mut next);
        if changed {
            write_atomic(&self.file_path, &next).await?;
            *records = next;
        }
        Ok(out)
    }
}

async fn write_atomic(path: &Path, records: &[Record]) -> Result<(), ServiceError> {
    let data = serde_json::to_vec_pretty(records).map_err(ServiceError::storage)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data).await.map_err(ServiceError::storage)?;
    fs::rename(&tmp, path).await.map_err(ServiceError::storage)?;
    Ok(())
}

#[async_trait]
impl CollectionHandle for JsonFileCollection {
    async fn insert_one(&self, record: Record) -> Result<(), ServiceError> {
        self.mutate(|records| {
            records.push(record);
            ((), true)
        })
        .await
    }

    async fn find_all(&self) -> Result<Vec<Record>, ServiceError> {
        Ok(self.inner.read().await.clone())
    }

    async fn find_one(&self, id: &str) -> Result<Option<Record>, ServiceError> {
        let records = self.inner.read().await;
        Ok(find_first(&records, id).cloned())
    }

    async fn update_one(&self, id: &str, patch: &Record) -> Result<UpdateOutcome, ServiceError> {
        self.mutate(|records| {
            let out = update_first(records, id, patch);
            (out, out.modified)
        })
        .await
    }

    async fn delete_one(&self, id: &str) -> Result<bool, ServiceError> {
        self.mutate(|records| {
            let removed = delete_first(records, id);
            (removed, removed)
        })
        .await
    }
}

/// Directory of JSON collection files, one per collection name.
pub struct JsonFileStore {
    dir: PathBuf,
    collections: RwLock<HashMap<String, Arc<JsonFileCollection>>>,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into(), collections: RwLock::new(HashMap::new()) }
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    fn backend(&self) -> &'static str { "file" }

    async fn collection(&self, name: &str) -> Result<Arc<dyn CollectionHandle>, ServiceError> {
        if let Some(existing) = self.collections.read().await.get(name) {
            let handle: Arc<dyn CollectionHandle> = existing.clone();
            return Ok(handle);
        }
        let mut map = self.collections.write().await;
        // another task may have opened it while we waited for the write lock
        if let Some(existing) = map.get(name) {
            let handle: Arc<dyn CollectionHandle> = existing.clone();
            return Ok(handle);
        }
        let path = self.dir.join(format!("{name}.json"));
        let opened = Arc::new(JsonFileCollection::open(name, path).await?);
        map.insert(name.to_string(), opened.clone());
        let handle: Arc<dyn CollectionHandle> = opened;
        Ok(handle)
    }
}
