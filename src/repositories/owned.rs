//! Repositorio genérico con filtrado por cuenta propietaria
//!
//! Toda lectura filtra por `userId`. Un documento de otra cuenta se trata
//! como inexistente al leer o borrar y como prohibido al sobrescribir.

use std::marker::PhantomData;
use std::sync::Arc;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::store::{to_patch, Document, DocumentStore, OWNER_FIELD};
use crate::utils::errors::{forbidden_error, not_found_error, AppResult};

/// Entidad guardada en una colección con dueño
pub trait OwnedEntity: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: &'static str;
    const RESOURCE: &'static str;

    /// Clave primaria del documento, si ya la tiene
    fn document_id(&self) -> Option<String>;

    fn set_owner(&mut self, owner_id: &str);
}

pub struct OwnedRepository<T: OwnedEntity> {
    store: Arc<dyn DocumentStore>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: OwnedEntity> OwnedRepository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store, _entity: PhantomData }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Todas las entidades de la cuenta
    pub async fn list(&self, owner_id: &str) -> AppResult<Vec<T>> {
        let documents = self.store.list_by_owner(T::COLLECTION, owner_id).await?;
        let total = documents.len();
        let items: Vec<T> = documents.into_iter().filter_map(decode).collect();
        if items.len() != total {
            warn!(
                "⚠️ {} documentos ilegibles en {} ignorados",
                total - items.len(),
                T::COLLECTION
            );
        }
        Ok(items)
    }

    /// Buscar una entidad propia por id
    pub async fn find(&self, owner_id: &str, id: &str) -> AppResult<T> {
        let document = self.owned_document(owner_id, id).await?;
        let value = document.into_value();
        Ok(serde_json::from_value(value).map_err(crate::store::StoreError::from)?)
    }

    /// Crear o fusionar por clave primaria, sellando el dueño
    pub async fn save(&self, owner_id: &str, id: &str, mut entity: T) -> AppResult<T> {
        if let Some(existing) = self.store.get(T::COLLECTION, id).await? {
            if !existing.is_owned_by(owner_id) {
                return Err(forbidden_error(
                    &format!("save {}", T::RESOURCE.to_lowercase()),
                    "it belongs to another account",
                ));
            }
        }

        entity.set_owner(owner_id);
        let mut patch = to_patch(&entity)?;
        patch.remove("id");
        debug!("💾 merge {}/{} ({} campos)", T::COLLECTION, id, patch.len());

        let document = self.store.merge(T::COLLECTION, id, patch).await?;
        Ok(serde_json::from_value(document.into_value()).map_err(crate::store::StoreError::from)?)
    }

    /// Borrar una entidad propia
    pub async fn delete(&self, owner_id: &str, id: &str) -> AppResult<()> {
        self.owned_document(owner_id, id).await?;
        self.store.delete(T::COLLECTION, id).await?;
        debug!("🗑️ delete {}/{}", T::COLLECTION, id);
        Ok(())
    }

    /// Fusionar un parche parcial sobre una entidad propia
    pub async fn patch(
        &self,
        owner_id: &str,
        id: &str,
        mut patch: serde_json::Map<String, serde_json::Value>,
    ) -> AppResult<T> {
        self.owned_document(owner_id, id).await?;
        patch.remove(OWNER_FIELD);
        let document = self.store.merge(T::COLLECTION, id, patch).await?;
        Ok(serde_json::from_value(document.into_value()).map_err(crate::store::StoreError::from)?)
    }

    async fn owned_document(&self, owner_id: &str, id: &str) -> AppResult<Document> {
        match self.store.get(T::COLLECTION, id).await? {
            Some(document) if document.is_owned_by(owner_id) => Ok(document),
            _ => Err(not_found_error(T::RESOURCE, id)),
        }
    }
}

fn decode<T: DeserializeOwned>(document: Document) -> Option<T> {
    let id = document.id.clone();
    match serde_json::from_value(document.into_value()) {
        Ok(entity) => Some(entity),
        Err(e) => {
            warn!("⚠️ Documento {} ilegible: {}", id, e);
            None
        }
    }
}
