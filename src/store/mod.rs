//! Almacén de documentos
//!
//! Contrato mínimo que la aplicación necesita de la base de datos de
//! documentos: colecciones de objetos JSON indexados por id, con un campo
//! `userId` que identifica a la cuenta propietaria.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// Campo de cada documento que identifica a la cuenta propietaria
pub const OWNER_FIELD: &str = "userId";

/// Colecciones conocidas
pub mod collections {
    pub const ORDERS: &str = "AllOrders";
    pub const DRIVERS: &str = "Drivers";
    pub const VEHICLES: &str = "Vehicles";
    pub const USERS: &str = "users";
}

/// Errores del almacén de documentos
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Document store unavailable: {0}")]
    Unavailable(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Duplicate value: {0}")]
    Duplicate(String),

    #[error("Malformed document: {0}")]
    Serialization(String),

    #[error("Database failure: {0}")]
    Database(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(e.to_string())
            }
            // 42501 = insufficient_privilege
            sqlx::Error::Database(db) if db.code().as_deref() == Some("42501") => {
                StoreError::PermissionDenied(db.message().to_string())
            }
            // 23505 = unique_violation
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                StoreError::Duplicate(db.message().to_string())
            }
            _ => StoreError::Database(e.to_string()),
        }
    }
}

/// Documento almacenado: id dentro de la colección + cuerpo JSON
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, data: Map<String, Value>) -> Self {
        Self { id: id.into(), data }
    }

    /// Cuenta propietaria del documento, si la tiene
    pub fn owner(&self) -> Option<&str> {
        self.data.get(OWNER_FIELD).and_then(Value::as_str)
    }

    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.owner() == Some(owner_id)
    }

    /// Cuerpo del documento con el id expuesto como campo `id`
    pub fn into_value(self) -> Value {
        let mut data = self.data;
        data.entry("id".to_string())
            .or_insert_with(|| Value::String(self.id.clone()));
        Value::Object(data)
    }
}

/// Operaciones sobre el almacén de documentos
///
/// `merge` crea el documento si no existe; si existe, las claves de primer
/// nivel del parche sustituyen a las actuales y el resto se conserva.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    async fn list_by_owner(&self, collection: &str, owner_id: &str)
        -> Result<Vec<Document>, StoreError>;

    async fn find_one(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Document>, StoreError>;

    async fn merge(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<Document, StoreError>;

    /// Crear un documento nuevo si ningún otro de la colección comparte el
    /// valor de `unique_field`; la comprobación y la escritura son atómicas.
    async fn insert_unique(
        &self,
        collection: &str,
        id: &str,
        unique_field: &str,
        data: Map<String, Value>,
    ) -> Result<Document, StoreError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError>;
}

/// Valor de texto del campo único de un documento a insertar
pub(crate) fn unique_value<'a>(
    data: &'a Map<String, Value>,
    unique_field: &str,
) -> Result<&'a str, StoreError> {
    data.get(unique_field).and_then(Value::as_str).ok_or_else(|| {
        StoreError::Serialization(format!("missing text field '{}'", unique_field))
    })
}

/// Convierte un valor serializado en el mapa que espera `merge`
pub fn to_patch<T: serde::Serialize>(value: &T) -> Result<Map<String, Value>, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Serialization(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}
