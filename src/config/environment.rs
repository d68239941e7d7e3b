//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::utils::validation::MAX_UPLOAD_BYTES;

/// Backend de almacenamiento de objetos
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    Local,
    Http,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(StorageBackend::Local),
            "http" => Ok(StorageBackend::Http),
            other => Err(anyhow!("STORAGE_BACKEND desconocido: '{}'", other)),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub storage_backend: StorageBackend,
    pub storage_dir: String,
    pub storage_public_url: String,
    pub storage_http_endpoint: Option<String>,
    pub max_upload_bytes: usize,
    pub kyc_gate: bool,
    pub log_level: String,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{} tiene un valor inválido '{}': {}", name, raw, e)),
        Err(_) => Ok(default),
    }
}

impl EnvironmentConfig {
    /// Leer la configuración de las variables de entorno
    pub fn from_env() -> Result<Self> {
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        if jwt_secret.trim().is_empty() {
            return Err(anyhow!("JWT_SECRET no puede estar vacío"));
        }

        let config = Self {
            environment: var_or("ENVIRONMENT", "development"),
            port: parse_var("PORT", 3000)?,
            host: var_or("HOST", "0.0.0.0"),
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
            jwt_secret,
            jwt_expiration: parse_var("JWT_EXPIRATION", 3600)?,
            cors_origins: var_or("CORS_ORIGINS", "*")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            storage_backend: parse_var("STORAGE_BACKEND", StorageBackend::Local)?,
            storage_dir: var_or("STORAGE_DIR", "./uploads"),
            storage_public_url: var_or("STORAGE_PUBLIC_URL", "http://localhost:3000/uploads"),
            storage_http_endpoint: env::var("STORAGE_HTTP_ENDPOINT").ok(),
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", MAX_UPLOAD_BYTES)?,
            kyc_gate: parse_var("KYC_GATE", true)?,
            log_level: var_or("LOG_LEVEL", "debug"),
        };

        if config.storage_backend == StorageBackend::Http && config.storage_http_endpoint.is_none() {
            return Err(anyhow!("STORAGE_HTTP_ENDPOINT must be set when STORAGE_BACKEND=http"));
        }

        Ok(config)
    }

    /// Configuración para tests: almacén en memoria, sin variables de entorno
    pub fn for_tests() -> Self {
        Self {
            environment: "test".to_string(),
            port: 0,
            host: "127.0.0.1".to_string(),
            database_url: None,
            jwt_secret: "test-secret".to_string(),
            jwt_expiration: 3600,
            cors_origins: vec!["*".to_string()],
            storage_backend: StorageBackend::Local,
            storage_dir: std::env::temp_dir().display().to_string(),
            storage_public_url: "http://localhost/uploads".to_string(),
            storage_http_endpoint: None,
            max_upload_bytes: MAX_UPLOAD_BYTES,
            kyc_gate: true,
            log_level: "debug".to_string(),
        }
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// CORS abierto cuando no hay orígenes explícitos
    pub fn cors_is_permissive(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }

    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::DEBUG)
    }
}
