use serde_json::Map;

use super::owned::{OwnedEntity, OwnedRepository};
use crate::models::{DocumentRef, Driver, DriverDocumentSlot};
use crate::store::{collections, StoreError};
use crate::utils::errors::{AppError, AppResult};

impl OwnedEntity for Driver {
    const COLLECTION: &'static str = collections::DRIVERS;
    const RESOURCE: &'static str = "Driver";

    fn document_id(&self) -> Option<String> {
        let mobile = self.mobile_number.trim();
        (!mobile.is_empty()).then(|| mobile.to_string())
    }

    fn set_owner(&mut self, owner_id: &str) {
        self.user_id = Some(owner_id.to_string());
    }
}

pub type DriverRepository = OwnedRepository<Driver>;

impl OwnedRepository<Driver> {
    /// Guardar usando el número de móvil como clave.
    ///
    /// Una edición sin documentos conserva los ya subidos: los huecos vacíos
    /// del cuerpo se rellenan con los guardados antes de fusionar.
    pub async fn save_driver(&self, owner_id: &str, mut driver: Driver) -> AppResult<Driver> {
        let id = driver
            .document_id()
            .ok_or_else(|| AppError::ValidationError("mobileNumber is required".to_string()))?;

        if let Some(existing) = self.store().get(collections::DRIVERS, &id).await? {
            if existing.is_owned_by(owner_id) {
                let stored: Driver =
                    serde_json::from_value(existing.into_value()).map_err(StoreError::from)?;
                driver.documents.fill_missing(&stored.documents);
            }
        }
        self.save(owner_id, &id, driver).await
    }

    /// Sustituir un hueco de documentación conservando los demás
    pub async fn set_document(
        &self,
        owner_id: &str,
        mobile_number: &str,
        slot: DriverDocumentSlot,
        document: DocumentRef,
    ) -> AppResult<Driver> {
        let mut driver = self.find(owner_id, mobile_number).await?;
        driver.documents.set(slot, document);

        let mut patch = Map::new();
        patch.insert(
            "documents".to_string(),
            serde_json::to_value(&driver.documents).map_err(StoreError::from)?,
        );
        self.patch(owner_id, mobile_number, patch).await
    }
}
