//! MongoDB backend (`mongo` feature).
//!
//! Records map one-to-one onto BSON documents. The driver-assigned `_id`
//! is returned to callers as its hex string; lookups never use it.

use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use models::Record;
use mongodb::bson::{self, doc, Bson, Document};
use mongodb::{Client, Collection, Database};
use tracing::debug;

use super::{CollectionHandle, DocumentStore, UpdateOutcome};
use crate::errors::ServiceError;

pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Open a client for `url` and scope it to `database`. The driver pools
    /// connections internally; the store is shared by every request.
    pub async fn connect(url: &str, database: &str) -> Result<Self, ServiceError> {
        let client = Client::with_uri_str(url).await.map_err(ServiceError::storage)?;
        Ok(Self { db: client.database(database) })
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn backend(&self) -> &'static str { "mongodb" }

    async fn collection(&self, name: &str) -> Result<Arc<dyn CollectionHandle>, ServiceError> {
        let handle: Arc<dyn CollectionHandle> = Arc::new(MongoCollection {
            name: name.to_string(),
            inner: self.db.collection::<Document>(name),
        });
        Ok(handle)
    }
}

pub struct MongoCollection {
    name: String,
    inner: Collection<Document>,
}

fn to_document(record: &Record) -> Result<Document, ServiceError> {
    bson::to_document(record).map_err(ServiceError::storage)
}

fn to_record(mut document: Document) -> Record {
    if let Ok(oid) = document.get_object_id("_id") {
        document.insert("_id", Bson::String(oid.to_hex()));
    }
    match Bson::Document(document).into_relaxed_extjson() {
        serde_json::Value::Object(map) => map,
        _ => Record::new(),
    }
}

fn by_id(id: &str) -> Document {
    doc! { "id": id }
}

#[async_trait]
impl CollectionHandle for MongoCollection {
    async fn insert_one(&self, record: Record) -> Result<(), ServiceError> {
        let document = to_document(&record)?;
        let res = self.inner.insert_one(document, None).await.map_err(ServiceError::storage)?;
        debug!(collection = %self.name, inserted_id = %res.inserted_id, "insert_one");
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Record>, ServiceError> {
        let cursor = self.inner.find(doc! {}, None).await.map_err(ServiceError::storage)?;
        let documents: Vec<Document> = cursor.try_collect().await.map_err(ServiceError::storage)?;
        Ok(documents.into_iter().map(to_record).collect())
    }

    async fn find_one(&self, id: &str) -> Result<Option<Record>, ServiceError> {
        let found = self.inner.find_one(by_id(id), None).await.map_err(ServiceError::storage)?;
        Ok(found.map(to_record))
    }

    async fn update_one(&self, id: &str, patch: &Record) -> Result<UpdateOutcome, ServiceError> {
        let set = to_document(patch)?;
        let res = self
            .inner
            .update_one(by_id(id), doc! { "$set": set }, None)
            .await
            .map_err(ServiceError::storage)?;
        Ok(UpdateOutcome { matched: res.matched_count > 0, modified: res.modified_count > 0 })
    }

    async fn delete_one(&self, id: &str) -> Result<bool, ServiceError> {
        let res = self.inner.delete_one(by_id(id), None).await.map_err(ServiceError::storage)?;
        Ok(res.deleted_count > 0)
    }
}
