use axum::{
    extract::{Multipart, Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};

use super::multipart::{multipart_error, read_attached_file};
use crate::controllers::driver_controller::DriverController;
use crate::dto::{ApiResponse, ListResponse, SearchQuery};
use crate::models::{Driver, DriverDocumentSlot, Identity};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_drivers).post(save_driver))
        .route("/:mobile", get(get_driver).delete(delete_driver))
        .route("/:mobile/documents/:slot", post(upload_driver_document))
}

fn controller(state: &AppState) -> DriverController {
    DriverController::new(state.drivers(), state.storage.clone(), state.config.max_upload_bytes)
}

async fn list_drivers(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ListResponse<Driver>>, AppError> {
    let response = controller(&state).list(&identity, &query).await?;
    Ok(Json(response))
}

async fn save_driver(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(driver): Json<Driver>,
) -> Result<Json<ApiResponse<ListResponse<Driver>>>, AppError> {
    let response = controller(&state).save(&identity, driver).await?;
    Ok(Json(response))
}

async fn get_driver(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(mobile): Path<String>,
) -> Result<Json<Driver>, AppError> {
    let response = controller(&state).get(&identity, &mobile).await?;
    Ok(Json(response))
}

async fn delete_driver(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(mobile): Path<String>,
) -> Result<Json<ApiResponse<ListResponse<Driver>>>, AppError> {
    let response = controller(&state).delete(&identity, &mobile).await?;
    Ok(Json(response))
}

async fn upload_driver_document(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path((mobile, slot)): Path<(String, String)>,
    mut multipart: Multipart,
) -> Result<Json<Driver>, AppError> {
    let slot: DriverDocumentSlot = slot.parse().map_err(AppError::BadRequest)?;

    let mut file = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some("file") {
            file = Some(read_attached_file(field).await?);
            break;
        }
    }
    let file = file.ok_or_else(|| AppError::ValidationError("A 'file' part is required".to_string()))?;

    let response = controller(&state)
        .upload_document(&identity, &mobile, slot, file)
        .await?;
    Ok(Json(response))
}
