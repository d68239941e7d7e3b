use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::header,
    routing::{get, post},
    Extension, Json, Router,
};
use std::str::FromStr;
use tracing::debug;

use super::multipart::{multipart_error, read_attached_file, read_text};
use crate::controllers::kyc_controller::{KycController, KycForm};
use crate::dto::kyc_dto::{KycLinkRequest, KycStatusResponse, KycSubmitResponse};
use crate::models::{DocumentKind, Identity, OperationalField, UploadMethod};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_kyc_router() -> Router<AppState> {
    Router::new()
        .route("/submit", post(submit_kyc))
        .route("/status", get(kyc_status))
}

/// Acepta multipart (ficheros o enlaces) o JSON (solo enlaces)
async fn submit_kyc(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    request: Request,
) -> Result<Json<KycSubmitResponse>, AppError> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("multipart/form-data"))
        .unwrap_or(false);

    let form = if is_multipart {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        read_kyc_form(multipart).await?
    } else {
        let Json(body) = Json::<KycLinkRequest>::from_request(request, &state)
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        KycForm::from_links(body)?
    };

    let controller = KycController::new(&state);
    let response = controller.submit(&identity, form).await?;
    Ok(Json(response))
}

async fn read_kyc_form(mut multipart: Multipart) -> Result<KycForm, AppError> {
    let mut form = KycForm::default();
    let mut method = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == "method" || name == "documentUploadMethod" {
            let value = read_text(field).await?;
            method = Some(UploadMethod::from_str(value.trim()).map_err(AppError::ValidationError)?);
        } else if let Ok(kind) = DocumentKind::from_str(&name) {
            if field.file_name().is_some() {
                form.files.push((kind, read_attached_file(field).await?));
            } else {
                let url = read_text(field).await?;
                form.links.push((kind, url));
            }
        } else if let Ok(op_field) = OperationalField::from_str(&name) {
            form.operational.push((op_field, read_text(field).await?));
        } else {
            debug!("📎 Campo multipart ignorado: {}", name);
        }
    }

    form.method = method.unwrap_or(if form.files.is_empty() && !form.links.is_empty() {
        UploadMethod::Link
    } else {
        UploadMethod::File
    });
    Ok(form)
}

async fn kyc_status(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<KycStatusResponse>, AppError> {
    let controller = KycController::new(&state);
    let response = controller.status(&identity).await?;
    Ok(Json(response))
}
