//! Almacenamiento en el sistema de ficheros local
//!
//! Los ficheros se sirven después bajo `/uploads` desde el router.

use std::path::PathBuf;

use async_trait::async_trait;

use super::{public_url, ObjectStorage, StorageError, StoredObject};

#[derive(Debug, Clone)]
pub struct LocalObjectStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        _content_type: Option<&str>,
    ) -> Result<StoredObject, StorageError> {
        if path.split('/').any(|segment| segment == ".." || segment.is_empty()) {
            return Err(StorageError::Rejected(format!("invalid object path '{}'", path)));
        }

        let target = self.root.join(path);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, &bytes).await?;

        tracing::debug!("💾 {} bytes escritos en {}", bytes.len(), target.display());
        Ok(StoredObject {
            path: path.to_string(),
            url: public_url(&self.public_base_url, path),
        })
    }
}
