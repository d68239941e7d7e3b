//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, la extracción de tokens y el
//! acceso condicionado a la verificación KYC.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::{
    models::Identity,
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, verify_token},
    },
};

pub const KYC_REQUIRED_MESSAGE: &str = "Complete KYC verification to access this section";

/// Middleware de autenticación JWT
///
/// Inyecta `Identity` en las extensions de la request.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &state.jwt)?;

    debug!("🔐 Request autenticada para la cuenta {}", claims.id);
    request.extensions_mut().insert(Identity::new(claims.id));

    Ok(next.run(request).await)
}

/// Bloquea las secciones operativas hasta que el KYC esté completado
///
/// Debe ejecutarse después de `auth_middleware`.
pub async fn kyc_gate_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !state.config.kyc_gate {
        return Ok(next.run(request).await);
    }

    let identity = request
        .extensions()
        .get::<Identity>()
        .cloned()
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let account = state
        .users()
        .find_by_id(identity.owner_id())
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => AppError::Unauthorized("Cuenta no encontrada".to_string()),
            other => other,
        })?;

    if !account.kyc_status().is_completed() {
        debug!("🚧 Acceso bloqueado por KYC ({}) para {}", account.kyc_status(), identity.user_id);
        return Err(AppError::Forbidden(KYC_REQUIRED_MESSAGE.to_string()));
    }

    Ok(next.run(request).await)
}
