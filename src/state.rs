//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use anyhow::Result;
use reqwest::Client;

use crate::config::{EnvironmentConfig, StorageBackend};
use crate::repositories::{DriverRepository, OrderRepository, UserRepository, VehicleRepository};
use crate::services::kyc_service::KycService;
use crate::storage::{HttpObjectStorage, LocalObjectStorage, ObjectStorage};
use crate::store::DocumentStore;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub storage: Arc<dyn ObjectStorage>,
    pub config: EnvironmentConfig,
    pub jwt: JwtConfig,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        storage: Arc<dyn ObjectStorage>,
        config: EnvironmentConfig,
    ) -> Self {
        let jwt = JwtConfig::from(&config);
        Self {
            store,
            storage,
            config,
            jwt,
        }
    }

    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.store.clone())
    }

    pub fn drivers(&self) -> DriverRepository {
        DriverRepository::new(self.store.clone())
    }

    pub fn vehicles(&self) -> VehicleRepository {
        VehicleRepository::new(self.store.clone())
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.store.clone())
    }

    pub fn kyc(&self) -> KycService {
        KycService::new(self.users(), self.storage.clone())
    }
}

/// Crear el almacenamiento de objetos según la configuración
pub fn build_object_storage(config: &EnvironmentConfig) -> Result<Arc<dyn ObjectStorage>> {
    match config.storage_backend {
        StorageBackend::Local => Ok(Arc::new(LocalObjectStorage::new(
            config.storage_dir.clone(),
            config.storage_public_url.clone(),
        ))),
        StorageBackend::Http => {
            let endpoint = config
                .storage_http_endpoint
                .clone()
                .ok_or_else(|| anyhow::anyhow!("STORAGE_HTTP_ENDPOINT must be set when STORAGE_BACKEND=http"))?;
            Ok(Arc::new(HttpObjectStorage::new(
                Client::new(),
                endpoint,
                config.storage_public_url.clone(),
            )))
        }
    }
}
