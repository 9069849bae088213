use std::future::Future;
use std::sync::Arc;

use models::record::sanitize_patch;
use models::{Record, ResourceKind};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::errors::ServiceError;
use crate::storage::{CollectionHandle, DocumentStore};

/// Failure of one resource operation, already worded for the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OperationError {
    /// No record carries the requested identifier.
    #[error("{0}")]
    NotFound(String),
    /// The storage call itself failed; the driver error is only logged.
    #[error("{0}")]
    StorageFault(String),
}

/// CRUD over one collection handle. Stateless between calls; every
/// operation is exactly one storage round trip.
#[derive(Clone)]
pub struct ResourceManager {
    kind: ResourceKind,
    collection: Arc<dyn CollectionHandle>,
}

impl ResourceManager {
    pub fn new(kind: ResourceKind, collection: Arc<dyn CollectionHandle>) -> Self {
        Self { kind, collection }
    }

    /// Bind `kind` to its collection in `store`.
    pub async fn open(kind: ResourceKind, store: &dyn DocumentStore) -> Result<Self, ServiceError> {
        let collection = store.collection(kind.collection).await?;
        Ok(Self::new(kind, collection))
    }

    pub fn kind(&self) -> ResourceKind { self.kind }

    /// Run one storage call; a fault becomes `StorageFault` carrying the
    /// operation's fixed message.
    async fn guard<T, F>(
        &self,
        operation: &'static str,
        failure: fn(&ResourceKind) -> String,
        call: F,
    ) -> Result<T, OperationError>
    where
        F: Future<Output = Result<T, ServiceError>>,
    {
        call.await.map_err(|e| {
            error!(resource = self.kind.collection, operation, error = %e, "storage call failed");
            OperationError::StorageFault(failure(&self.kind))
        })
    }

    fn not_found(&self, operation: &'static str, id: &str) -> OperationError {
        debug!(resource = self.kind.collection, operation, %id, "not found");
        OperationError::NotFound(self.kind.not_found_message())
    }

    /// Insert `record` as given. Duplicate ids are not checked.
    pub async fn create(&self, record: Record) -> Result<String, OperationError> {
        let id = models::record_id(&record).map(str::to_owned);
        self.guard("create", ResourceKind::create_failed_message, self.collection.insert_one(record))
            .await?;
        info!(resource = self.kind.collection, id = ?id, "created");
        Ok(self.kind.created_message())
    }

    /// Every record in the collection, in store order.
    pub async fn list(&self) -> Result<Vec<Record>, OperationError> {
        let records = self
            .guard("list", ResourceKind::list_failed_message, self.collection.find_all())
            .await?;
        debug!(resource = self.kind.collection, count = records.len(), "listed");
        Ok(records)
    }

    pub async fn get(&self, id: &str) -> Result<Record, OperationError> {
        self.guard("get", ResourceKind::get_failed_message, self.collection.find_one(id))
            .await?
            .ok_or_else(|| self.not_found("get", id))
    }

    /// Merge `patch` into the record addressed by `id`.
    ///
    /// `id` inside the patch is ignored. Success is decided on whether a
    /// record matched, so a patch that changes nothing still succeeds. An
    /// empty patch only checks existence.
    pub async fn update(&self, id: &str, patch: Record) -> Result<String, OperationError> {
        let patch = sanitize_patch(patch);
        let failure = ResourceKind::update_failed_message;
        let (matched, modified) = if patch.is_empty() {
            let found = self.guard("update", failure, self.collection.find_one(id)).await?;
            (found.is_some(), false)
        } else {
            let out = self.guard("update", failure, self.collection.update_one(id, &patch)).await?;
            (out.matched, out.modified)
        };
        if !matched {
            return Err(self.not_found("update", id));
        }
        info!(resource = self.kind.collection, %id, modified, "updated");
        Ok(self.kind.updated_message())
    }

    pub async fn delete(&self, id: &str) -> Result<String, OperationError> {
        let removed = self
            .guard("delete", ResourceKind::delete_failed_message, self.collection.delete_one(id))
            .await?;
        if !removed {
            return Err(self.not_found("delete", id));
        }
        info!(resource = self.kind.collection, %id, "deleted");
        Ok(self.kind.deleted_message())
    }
}
