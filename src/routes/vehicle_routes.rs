use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::{ApiResponse, ListResponse, SearchQuery};
use crate::models::{Identity, Vehicle};
use crate::services::search::VehicleGroups;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(save_vehicle))
        .route("/grouped", get(grouped_vehicles))
        .route("/:id", get(get_vehicle).delete(delete_vehicle))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ListResponse<Vehicle>>, AppError> {
    let controller = VehicleController::new(state.vehicles());
    let response = controller.list(&identity, &query).await?;
    Ok(Json(response))
}

async fn save_vehicle(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(vehicle): Json<Vehicle>,
) -> Result<Json<ApiResponse<ListResponse<Vehicle>>>, AppError> {
    let controller = VehicleController::new(state.vehicles());
    let response = controller.save(&identity, vehicle).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(state.vehicles());
    let response = controller.get(&identity, &id).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ListResponse<Vehicle>>>, AppError> {
    let controller = VehicleController::new(state.vehicles());
    let response = controller.delete(&identity, &id).await?;
    Ok(Json(response))
}

async fn grouped_vehicles(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<VehicleGroups>, AppError> {
    let controller = VehicleController::new(state.vehicles());
    let response = controller.grouped(&identity).await?;
    Ok(Json(response))
}
