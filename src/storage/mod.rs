//! Almacenamiento de objetos
//!
//! Destino de los ficheros subidos (documentos KYC y documentos de
//! conductores). Cada subida devuelve la ruta interna y una URL de descarga
//! que se guarda tal cual en el documento correspondiente.

pub mod http;
pub mod local;
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::utils::errors::AppError;

pub use http::HttpObjectStorage;
pub use local::LocalObjectStorage;
pub use memory::MemoryObjectStorage;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upload rejected: {0}")]
    Rejected(String),
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        AppError::Storage(e.to_string())
    }
}

/// Objeto ya almacenado
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub path: String,
    pub url: String,
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<StoredObject, StorageError>;
}

/// Construye `<category>/<accountId>/<subcategory>/<timestamp>-<filename>`
pub fn object_path(
    category: &str,
    account_id: &str,
    subcategory: &str,
    file_name: &str,
    now: DateTime<Utc>,
) -> String {
    let safe_name: String = file_name
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!(
        "{}/{}/{}/{}-{}",
        category,
        account_id,
        subcategory,
        now.timestamp_millis(),
        safe_name
    )
}

/// URL pública de un objeto: cada segmento de la ruta se codifica por separado
pub fn public_url(base_url: &str, path: &str) -> String {
    let encoded: Vec<String> = path
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    format!("{}/{}", base_url.trim_end_matches('/'), encoded.join("/"))
}
