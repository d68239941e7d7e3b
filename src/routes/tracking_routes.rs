use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::tracking_controller::TrackingController;
use crate::dto::{ListResponse, SearchQuery};
use crate::models::Identity;
use crate::services::tracking::TrackingEntry;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_tracking_router() -> Router<AppState> {
    Router::new().route("/", get(list_tracking))
}

async fn list_tracking(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ListResponse<TrackingEntry>>, AppError> {
    let controller = TrackingController::new(state.orders());
    let response = controller.list(&identity, &query).await?;
    Ok(Json(response))
}
