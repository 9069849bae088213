use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use models::record::{matches_id, merge};
use models::Record;
use tokio::sync::RwLock;

use super::{CollectionHandle, DocumentStore, UpdateOutcome};
use crate::errors::ServiceError;

// Ordered-vector primitives shared with the JSON file backend. Insertion
// order is the "natural order" used for first-match lookups.

pub(crate) fn find_first<'a>(records: &'a [Record], id: &str) -> Option<&'a Record> {
    records.iter().find(|r| matches_id(r, id))
}

pub(crate) fn update_first(records: &mut [Record], id: &str, patch: &Record) -> UpdateOutcome {
    match records.iter_mut().find(|r| matches_id(r, id)) {
        Some(record) => UpdateOutcome { matched: true, modified: merge(record, patch) > 0 },
        None => UpdateOutcome::default(),
    }
}

pub(crate) fn delete_first(records: &mut Vec<Record>, id: &str) -> bool {
    match records.iter().position(|r| matches_id(r, id)) {
        Some(idx) => {
            records.remove(idx);
            true
        }
        None => false,
    }
}

/// In-process collection. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryCollection {
    records: RwLock<Vec<Record>>,
}

impl MemoryCollection {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl CollectionHandle for MemoryCollection {
    async fn insert_one(&self, record: Record) -> Result<(), ServiceError> {
        self.records.write().await.push(record);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Record>, ServiceError> {
        Ok(self.records.read().await.clone())
    }

    async fn find_one(&self, id: &str) -> Result<Option<Record>, ServiceError> {
        let records = self.records.read().await;
        Ok(find_first(&records, id).cloned())
    }

    async fn update_one(&self, id: &str, patch: &Record) -> Result<UpdateOutcome, ServiceError> {
        let mut records = self.records.write().await;
        Ok(update_first(&mut records, id, patch))
    }

    async fn delete_one(&self, id: &str) -> Result<bool, ServiceError> {
        let mut records = self.records.write().await;
        Ok(delete_first(&mut records, id))
    }
}

/// In-process store; collections are created on first use.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Arc<MemoryCollection>>>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend(&self) -> &'static str { "memory" }

    async fn collection(&self, name: &str) -> Result<Arc<dyn CollectionHandle>, ServiceError> {
        if let Some(existing) = self.collections.read().await.get(name) {
            let handle: Arc<dyn CollectionHandle> = existing.clone();
            return Ok(handle);
        }
        let mut map = self.collections.write().await;
        let handle: Arc<dyn CollectionHandle> = map
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(MemoryCollection::new()))
            .clone();
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn rec(v: Value) -> Record {
        models::record::from_value(v).unwrap()
    }

    #[tokio::test]
    async fn first_match_wins_for_duplicate_ids() -> Result<(), ServiceError> {
        let c = MemoryCollection::new();
        c.insert_one(rec(json!({"id": "u1", "n": 1}))).await?;
        c.insert_one(rec(json!({"id": "u1", "n": 2}))).await?;

        assert_eq!(c.find_one("u1").await?.unwrap()["n"], json!(1));

        let out = c.update_one("u1", &rec(json!({"n": 10}))).await?;
        assert_eq!(out, UpdateOutcome { matched: true, modified: true });
        let all = c.find_all().await?;
        assert_eq!(all[0]["n"], json!(10));
        assert_eq!(all[1]["n"], json!(2));

        assert!(c.delete_one("u1").await?);
        assert_eq!(c.find_one("u1").await?.unwrap()["n"], json!(2));
        Ok(())
    }

    #[tokio::test]
    async fn update_reports_match_without_modification() -> Result<(), ServiceError> {
        let c = MemoryCollection::new();
        c.insert_one(rec(json!({"id": "d1", "name": "Soup"}))).await?;
        let out = c.update_one("d1", &rec(json!({"name": "Soup"}))).await?;
        assert_eq!(out, UpdateOutcome { matched: true, modified: false });
        let missing = c.update_one("nope", &rec(json!({"name": "x"}))).await?;
        assert_eq!(missing, UpdateOutcome::default());
        Ok(())
    }

    #[tokio::test]
    async fn store_hands_out_the_same_collection() -> Result<(), ServiceError> {
        let store = MemoryStore::new();
        store.collection("users").await?.insert_one(rec(json!({"id": "a"}))).await?;
        assert_eq!(store.collection("users").await?.find_all().await?.len(), 1);
        assert!(store.collection("dishes").await?.find_all().await?.is_empty());
        Ok(())
    }
}
