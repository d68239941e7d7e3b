//! Lectura de campos multipart

use axum::extract::multipart::{Field, MultipartError};

use crate::services::kyc_workflow::AttachedFile;
use crate::utils::errors::AppError;

pub fn multipart_error(e: MultipartError) -> AppError {
    AppError::BadRequest(format!("Invalid multipart body: {}", e))
}

/// Leer un campo de fichero completo en memoria
pub async fn read_attached_file(field: Field<'_>) -> Result<AttachedFile, AppError> {
    let file_name = field
        .file_name()
        .map(str::to_string)
        .or_else(|| field.name().map(str::to_string))
        .unwrap_or_else(|| "upload".to_string());
    let content_type = field.content_type().map(str::to_string);
    let bytes = field.bytes().await.map_err(multipart_error)?;

    Ok(AttachedFile {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    })
}

/// Leer un campo de texto
pub async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    field.text().await.map_err(multipart_error)
}
