use validator::Validate;

use crate::dto::{ApiResponse, ListResponse, SearchQuery};
use crate::models::{Identity, Vehicle};
use crate::repositories::{OwnedEntity, VehicleRepository};
use crate::services::search::{filter_by_query, group_vehicles, VehicleGroups};
use crate::utils::errors::AppError;

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(repository: VehicleRepository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, identity: &Identity, query: &SearchQuery) -> Result<ListResponse<Vehicle>, AppError> {
        let vehicles = self.repository.list(identity.owner_id()).await?;
        let items = filter_by_query(&vehicles, query.q.as_deref().unwrap_or_default());
        Ok(ListResponse::new(vehicles.len(), items))
    }

    pub async fn get(&self, identity: &Identity, id: &str) -> Result<Vehicle, AppError> {
        self.repository.find(identity.owner_id(), id).await
    }

    pub async fn save(&self, identity: &Identity, vehicle: Vehicle) -> Result<ApiResponse<ListResponse<Vehicle>>, AppError> {
        vehicle.validate()?;
        let created = vehicle.document_id().is_none();
        self.repository.save_vehicle(identity.owner_id(), vehicle).await?;
        let vehicles = self.repository.list(identity.owner_id()).await?;
        let message = if created { "Vehicle added" } else { "Vehicle updated" };
        Ok(ApiResponse::success_with_message(ListResponse::all(vehicles), message))
    }

    pub async fn delete(&self, identity: &Identity, id: &str) -> Result<ApiResponse<ListResponse<Vehicle>>, AppError> {
        self.repository.delete(identity.owner_id(), id).await?;
        let vehicles = self.repository.list(identity.owner_id()).await?;
        Ok(ApiResponse::success_with_message(ListResponse::all(vehicles), "Vehicle deleted"))
    }

    /// Vista empresa → subtipo
    pub async fn grouped(&self, identity: &Identity) -> Result<VehicleGroups, AppError> {
        let vehicles = self.repository.list(identity.owner_id()).await?;
        Ok(group_vehicles(&vehicles))
    }
}
