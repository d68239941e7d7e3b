//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use chrono::NaiveDate;
use validator::ValidationError;

/// Tamaño máximo de un fichero subido (5 MiB)
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar que un string no esté vacío (ni sea sólo espacios)
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("Required".into());
        return Err(error);
    }
    Ok(())
}

/// Validar que un string sea una URL absoluta
pub fn validate_absolute_url(value: &str) -> Result<(), ValidationError> {
    if !validator::validate_url(value.trim()) {
        let mut error = ValidationError::new("url");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar el tamaño de un fichero contra un límite en bytes
pub fn validate_file_size(size: usize, max: usize) -> Result<(), ValidationError> {
    if size > max {
        let mut error = ValidationError::new("file_size");
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &size);
        error.message = Some("File size must be under 5MB.".into());
        return Err(error);
    }
    Ok(())
}

/// Normaliza un email para búsqueda y almacenamiento
pub fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}
