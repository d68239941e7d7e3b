use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ObjectStorage, StorageError, StoredObject};

/// Almacenamiento en memoria para tests; puede configurarse para fallar a
/// partir de la subida N.
#[derive(Default)]
pub struct MemoryObjectStorage {
    objects: RwLock<HashMap<String, Vec<u8>>>,
    uploads: AtomicUsize,
    fail_from: Option<usize>,
}

impl MemoryObjectStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Las subidas con índice (desde 0) mayor o igual a `index` fallan
    pub fn failing_from(index: usize) -> Self {
        Self {
            fail_from: Some(index),
            ..Self::default()
        }
    }

    pub async fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.objects.read().await.get(path).cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    /// Rutas guardadas, en orden alfabético
    pub async fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.objects.read().await.keys().cloned().collect();
        paths.sort();
        paths
    }
}

#[async_trait]
impl ObjectStorage for MemoryObjectStorage {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        _content_type: Option<&str>,
    ) -> Result<StoredObject, StorageError> {
        let index = self.uploads.fetch_add(1, Ordering::SeqCst);
        if matches!(self.fail_from, Some(limit) if index >= limit) {
            return Err(StorageError::Rejected(format!("permission denied for '{}'", path)));
        }

        self.objects.write().await.insert(path.to_string(), bytes);
        Ok(StoredObject {
            path: path.to_string(),
            url: format!("memory://{}", path),
        })
    }
}
