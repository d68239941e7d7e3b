//! Almacenamiento remoto mediante HTTP PUT
//!
//! Compatible con cualquier servicio que acepte `PUT <endpoint>/<ruta>` con el
//! contenido del fichero en el cuerpo (buckets con URL prefirmada, MinIO, etc.).

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};

use super::{public_url, ObjectStorage, StorageError, StoredObject};

#[derive(Debug, Clone)]
pub struct HttpObjectStorage {
    client: Client,
    endpoint: String,
    public_base_url: String,
}

impl HttpObjectStorage {
    pub fn new(client: Client, endpoint: impl Into<String>, public_base_url: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            public_base_url: public_base_url.into(),
        }
    }
}

#[async_trait]
impl ObjectStorage for HttpObjectStorage {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<StoredObject, StorageError> {
        let target = public_url(&self.endpoint, path);
        let response = self
            .client
            .put(&target)
            .header(CONTENT_TYPE, content_type.unwrap_or("application/octet-stream"))
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("❌ Subida rechazada por {}: {}", target, status);
            return Err(StorageError::Rejected(format!("{} answered {}", target, status)));
        }

        Ok(StoredObject {
            path: path.to_string(),
            url: public_url(&self.public_base_url, path),
        })
    }
}
