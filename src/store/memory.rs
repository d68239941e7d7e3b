//! Almacén de documentos en memoria
//!
//! Se usa cuando no hay `DATABASE_URL` configurada y en los tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::{unique_value, Document, DocumentStore, StoreError};

type Collection = BTreeMap<String, Map<String, Value>>;

#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Collection>>,
    unavailable: AtomicBool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simula una caída del almacén: todas las operaciones fallan
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store is offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.check_available()?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|data| Document::new(id, data.clone())))
    }

    async fn list_by_owner(
        &self,
        collection: &str,
        owner_id: &str,
    ) -> Result<Vec<Document>, StoreError> {
        self.check_available()?;
        let collections = self.collections.read().await;
        let docs = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, data)| Document::new(id.clone(), data.clone()))
                    .filter(|doc| doc.is_owned_by(owner_id))
                    .collect()
            })
            .unwrap_or_default();
        Ok(docs)
    }

    async fn find_one(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Document>, StoreError> {
        self.check_available()?;
        let collections = self.collections.read().await;
        Ok(collections.get(collection).and_then(|docs| {
            docs.iter()
                .find(|(_, data)| data.get(field).and_then(Value::as_str) == Some(value))
                .map(|(id, data)| Document::new(id.clone(), data.clone()))
        }))
    }

    async fn merge(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<Document, StoreError> {
        self.check_available()?;
        let mut collections = self.collections.write().await;
        let data = collections
            .entry(collection.to_string())
            .or_default()
            .entry(id.to_string())
            .or_default();
        for (key, value) in patch {
            data.insert(key, value);
        }
        Ok(Document::new(id, data.clone()))
    }

    async fn insert_unique(
        &self,
        collection: &str,
        id: &str,
        unique_field: &str,
        data: Map<String, Value>,
    ) -> Result<Document, StoreError> {
        self.check_available()?;
        let value = unique_value(&data, unique_field)?.to_string();

        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        let taken = docs.contains_key(id)
            || docs
                .values()
                .any(|doc| doc.get(unique_field).and_then(Value::as_str) == Some(value.as_str()));
        if taken {
            return Err(StoreError::Duplicate(format!("{}.{} = {}", collection, unique_field, value)));
        }

        docs.insert(id.to_string(), data.clone());
        Ok(Document::new(id, data))
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(collection)
            .map(|docs| docs.remove(id).is_some())
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_merge_keeps_unpatched_keys() {
        let store = MemoryDocumentStore::new();
        store
            .merge("Drivers", "9876543210", obj(json!({ "city": "Pune", "userId": "a" })))
            .await
            .unwrap();
        let doc = store
            .merge("Drivers", "9876543210", obj(json!({ "city": "Nagpur" })))
            .await
            .unwrap();

        assert_eq!(doc.data["city"], "Nagpur");
        assert_eq!(doc.data["userId"], "a");
    }

    #[tokio::test]
    async fn test_list_by_owner_filters() {
        let store = MemoryDocumentStore::new();
        store.merge("Vehicles", "1", obj(json!({ "userId": "a" }))).await.unwrap();
        store.merge("Vehicles", "2", obj(json!({ "userId": "b" }))).await.unwrap();
        store.merge("Vehicles", "3", obj(json!({}))).await.unwrap();

        let docs = store.list_by_owner("Vehicles", "a").await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "1");
    }

    #[tokio::test]
    async fn test_find_one_and_delete() {
        let store = MemoryDocumentStore::new();
        store
            .merge("users", "u1", obj(json!({ "email": "a@x.com" })))
            .await
            .unwrap();

        let found = store.find_one("users", "email", "a@x.com").await.unwrap();
        assert_eq!(found.map(|d| d.id), Some("u1".to_string()));

        assert!(store.delete("users", "u1").await.unwrap());
        assert!(!store.delete("users", "u1").await.unwrap());
        assert!(store.get("users", "u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_unique_rejects_taken_value() {
        let store = MemoryDocumentStore::new();
        store
            .insert_unique("users", "u1", "email", obj(json!({ "email": "a@x.com" })))
            .await
            .unwrap();

        let again = store
            .insert_unique("users", "u2", "email", obj(json!({ "email": "a@x.com" })))
            .await;
        assert!(matches!(again, Err(StoreError::Duplicate(_))));
        assert!(store.get("users", "u2").await.unwrap().is_none());

        let missing = store.insert_unique("users", "u3", "email", obj(json!({}))).await;
        assert!(matches!(missing, Err(StoreError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_operation() {
        let store = MemoryDocumentStore::new();
        store.set_unavailable(true);
        let result = store.list_by_owner("AllOrders", "a").await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}
