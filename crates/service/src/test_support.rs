//! Test doubles for the storage layer.

use std::sync::Arc;

use async_trait::async_trait;
use models::Record;

use crate::errors::ServiceError;
use crate::storage::{CollectionHandle, DocumentStore, UpdateOutcome};

/// Collection whose every call fails, standing in for an unreachable store.
pub struct FailingCollection {
    name: String,
}

impl FailingCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn fault(&self) -> ServiceError {
        ServiceError::Storage(format!("{}: connection refused", self.name))
    }
}

#[async_trait]
impl CollectionHandle for FailingCollection {
    async fn insert_one(&self, _record: Record) -> Result<(), ServiceError> {
        Err(self.fault())
    }

    async fn find_all(&self) -> Result<Vec<Record>, ServiceError> {
        Err(self.fault())
    }

    async fn find_one(&self, _id: &str) -> Result<Option<Record>, ServiceError> {
        Err(self.fault())
    }

    async fn update_one(&self, _id: &str, _patch: &Record) -> Result<UpdateOutcome, ServiceError> {
        Err(self.fault())
    }

    async fn delete_one(&self, _id: &str) -> Result<bool, ServiceError> {
        Err(self.fault())
    }
}

/// Store that hands out [`FailingCollection`]s.
#[derive(Default)]
pub struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    fn backend(&self) -> &'static str { "failing" }

    async fn collection(&self, name: &str) -> Result<Arc<dyn CollectionHandle>, ServiceError> {
        let handle: Arc<dyn CollectionHandle> = Arc::new(FailingCollection::new(name));
        Ok(handle)
    }
}
