use axum::{extract::State, routing::get, Extension, Json, Router};

use crate::controllers::dashboard_controller::DashboardController;
use crate::models::Identity;
use crate::services::dashboard_service::DashboardSummary;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new().route("/", get(dashboard_summary))
}

async fn dashboard_summary(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<DashboardSummary>, AppError> {
    let controller = DashboardController::new(state);
    let response = controller.summary(&identity).await?;
    Ok(Json(response))
}
