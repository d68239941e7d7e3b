use uuid::Uuid;

use super::owned::{OwnedEntity, OwnedRepository};
use crate::models::Vehicle;
use crate::store::collections;
use crate::utils::errors::AppResult;

impl OwnedEntity for Vehicle {
    const COLLECTION: &'static str = collections::VEHICLES;
    const RESOURCE: &'static str = "Vehicle";

    fn document_id(&self) -> Option<String> {
        self.id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }

    fn set_owner(&mut self, owner_id: &str) {
        self.user_id = Some(owner_id.to_string());
    }
}

pub type VehicleRepository = OwnedRepository<Vehicle>;

impl OwnedRepository<Vehicle> {
    /// Guardar; un vehículo nuevo recibe un UUID v4
    pub async fn save_vehicle(&self, owner_id: &str, mut vehicle: Vehicle) -> AppResult<Vehicle> {
        let id = match vehicle.document_id() {
            Some(id) => id,
            None => Uuid::new_v4().to_string(),
        };
        vehicle.id = Some(id.clone());
        self.save(owner_id, &id, vehicle).await
    }
}
