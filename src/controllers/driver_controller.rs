use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use validator::Validate;

use crate::dto::{ApiResponse, ListResponse, SearchQuery};
use crate::models::{DocumentRef, Driver, DriverDocumentSlot, Identity};
use crate::repositories::DriverRepository;
use crate::services::kyc_workflow::AttachedFile;
use crate::services::search::filter_by_query;
use crate::storage::{object_path, ObjectStorage};
use crate::utils::errors::AppError;
use crate::utils::validation::validate_file_size;

/// Carpeta raíz de los documentos de conductores
pub const DRIVER_CATEGORY: &str = "drivers";

pub struct DriverController {
    repository: DriverRepository,
    storage: Arc<dyn ObjectStorage>,
    max_upload_bytes: usize,
}

impl DriverController {
    pub fn new(repository: DriverRepository, storage: Arc<dyn ObjectStorage>, max_upload_bytes: usize) -> Self {
        Self {
            repository,
            storage,
            max_upload_bytes,
        }
    }

    pub async fn list(&self, identity: &Identity, query: &SearchQuery) -> Result<ListResponse<Driver>, AppError> {
        let drivers = self.repository.list(identity.owner_id()).await?;
        let items = filter_by_query(&drivers, query.q.as_deref().unwrap_or_default());
        Ok(ListResponse::new(drivers.len(), items))
    }

    pub async fn get(&self, identity: &Identity, mobile_number: &str) -> Result<Driver, AppError> {
        self.repository.find(identity.owner_id(), mobile_number).await
    }

    pub async fn save(&self, identity: &Identity, driver: Driver) -> Result<ApiResponse<ListResponse<Driver>>, AppError> {
        driver.validate()?;
        let saved = self.repository.save_driver(identity.owner_id(), driver).await?;
        let drivers = self.repository.list(identity.owner_id()).await?;
        Ok(ApiResponse::success_with_message(
            ListResponse::all(drivers),
            format!("Driver {} saved", saved.full_name()),
        ))
    }

    pub async fn delete(&self, identity: &Identity, mobile_number: &str) -> Result<ApiResponse<ListResponse<Driver>>, AppError> {
        self.repository.delete(identity.owner_id(), mobile_number).await?;
        let drivers = self.repository.list(identity.owner_id()).await?;
        Ok(ApiResponse::success_with_message(
            ListResponse::all(drivers),
            format!("Driver {} deleted", mobile_number),
        ))
    }

    /// Subir un documento a un hueco del conductor
    pub async fn upload_document(
        &self,
        identity: &Identity,
        mobile_number: &str,
        slot: DriverDocumentSlot,
        file: AttachedFile,
    ) -> Result<Driver, AppError> {
        validate_file_size(file.bytes.len(), self.max_upload_bytes)
            .map_err(|_| AppError::ValidationError("File size must be under 5MB.".to_string()))?;

        // El conductor debe existir y ser de la cuenta antes de subir nada
        self.repository.find(identity.owner_id(), mobile_number).await?;

        let subcategory = format!("{}/{}", mobile_number, slot.as_str());
        let path = object_path(
            DRIVER_CATEGORY,
            identity.owner_id(),
            &subcategory,
            &file.file_name,
            Utc::now(),
        );
        let stored = self
            .storage
            .put(&path, file.bytes, file.content_type.as_deref())
            .await?;
        info!("📎 Documento {} subido para el conductor {}", slot, mobile_number);

        self.repository
            .set_document(
                identity.owner_id(),
                mobile_number,
                slot,
                DocumentRef {
                    public_id: stored.path,
                    url: stored.url,
                },
            )
            .await
    }
}
