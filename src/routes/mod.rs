//! Rutas HTTP del panel
//!
//! Públicas: `/health`, `/api/auth/signup`, `/api/auth/signin`.
//! Con token: `/api/auth/me`, `/api/dashboard`, `/api/kyc`.
//! Con token y KYC completado: pedidos, conductores, vehículos,
//! liquidaciones y seguimiento.

pub mod auth_routes;
pub mod dashboard_routes;
pub mod driver_routes;
pub mod kyc_routes;
pub mod multipart;
pub mod order_routes;
pub mod settlement_routes;
pub mod tracking_routes;
pub mod vehicle_routes;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::StorageBackend;
use crate::middleware::auth::{auth_middleware, kyc_gate_middleware};
use crate::middleware::cors::cors_layer;
use crate::state::AppState;

/// Secciones operativas: autenticación y después el gate KYC
fn gated(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    // route_layer: la última capa añadida se ejecuta primero
    router
        .route_layer(from_fn_with_state(state.clone(), kyc_gate_middleware))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware))
}

fn authenticated(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    router.route_layer(from_fn_with_state(state.clone(), auth_middleware))
}

/// Construir la aplicación completa
pub fn create_app(state: AppState) -> Router {
    let auth = auth_routes::create_auth_router()
        .merge(authenticated(auth_routes::create_session_router(), &state));

    let mut app = Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth)
        .nest("/api/dashboard", authenticated(dashboard_routes::create_dashboard_router(), &state))
        .nest("/api/kyc", authenticated(kyc_routes::create_kyc_router(), &state))
        .nest("/api/orders", gated(order_routes::create_order_router(), &state))
        .nest("/api/drivers", gated(driver_routes::create_driver_router(), &state))
        .nest("/api/vehicles", gated(vehicle_routes::create_vehicle_router(), &state))
        .nest("/api/settlements", gated(settlement_routes::create_settlement_router(), &state))
        .nest("/api/tracking", gated(tracking_routes::create_tracking_router(), &state));

    if state.config.storage_backend == StorageBackend::Local {
        app = app.nest_service("/uploads", ServeDir::new(&state.config.storage_dir));
    }

    // Cinco documentos KYC más los campos de texto
    let body_limit = state.config.max_upload_bytes.saturating_mul(6);

    app.layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
