use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::settlement_controller::SettlementController;
use crate::dto::{ApiResponse, ListResponse};
use crate::models::Identity;
use crate::services::settlement::{Settlement, SettlementFilter};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_settlement_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_settlements))
        .route("/:id/paid", post(mark_settlement_paid))
}

async fn list_settlements(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(filter): Query<SettlementFilter>,
) -> Result<Json<ListResponse<Settlement>>, AppError> {
    let controller = SettlementController::new(state.orders());
    let response = controller.list(&identity, &filter).await?;
    Ok(Json(response))
}

async fn mark_settlement_paid(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ListResponse<Settlement>>>, AppError> {
    let controller = SettlementController::new(state.orders());
    let response = controller.mark_paid(&identity, &id).await?;
    Ok(Json(response))
}
