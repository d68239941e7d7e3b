use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::order_controller::OrderController;
use crate::dto::{ApiResponse, ListResponse, OrderQuery};
use crate::models::{Identity, Order};
use crate::services::search::StatusCounts;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_order_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(save_order))
        .route("/status-counts", get(order_status_counts))
        .route("/:id", get(get_order).delete(delete_order))
}

async fn list_orders(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<OrderQuery>,
) -> Result<Json<ListResponse<Order>>, AppError> {
    let controller = OrderController::new(state.orders());
    let response = controller.list(&identity, &query).await?;
    Ok(Json(response))
}

async fn save_order(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(order): Json<Order>,
) -> Result<Json<ApiResponse<ListResponse<Order>>>, AppError> {
    let controller = OrderController::new(state.orders());
    let response = controller.save(&identity, order).await?;
    Ok(Json(response))
}

async fn get_order(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<Json<Order>, AppError> {
    let controller = OrderController::new(state.orders());
    let response = controller.get(&identity, &id).await?;
    Ok(Json(response))
}

async fn delete_order(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ListResponse<Order>>>, AppError> {
    let controller = OrderController::new(state.orders());
    let response = controller.delete(&identity, &id).await?;
    Ok(Json(response))
}

async fn order_status_counts(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<StatusCounts>, AppError> {
    let controller = OrderController::new(state.orders());
    let response = controller.status_counts(&identity).await?;
    Ok(Json(response))
}
