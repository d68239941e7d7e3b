//! Conexión al almacén de documentos
//!
//! Con `DATABASE_URL` se usa PostgreSQL (tabla JSONB `documents`); sin ella,
//! el almacén en memoria para desarrollo local.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::config::{database::DatabaseConfig, EnvironmentConfig};
use crate::store::{DocumentStore, MemoryDocumentStore, PgDocumentStore};

/// Crear el almacén de documentos según la configuración
pub async fn connect_document_store(config: &EnvironmentConfig) -> Result<Arc<dyn DocumentStore>> {
    match &config.database_url {
        Some(url) => {
            info!("🐘 Conectando a PostgreSQL en {}", mask_database_url(url));
            let pool = DatabaseConfig::new(url.clone()).create_pool().await?;
            let store = PgDocumentStore::new(pool);
            store.ensure_schema().await?;
            info!("✅ Almacén de documentos PostgreSQL listo");
            Ok(Arc::new(store))
        }
        None => {
            warn!("⚠️ DATABASE_URL no configurada: usando almacén en memoria (los datos no persisten)");
            Ok(Arc::new(MemoryDocumentStore::new()))
        }
    }
}

/// Función helper para enmascarar la URL de la base de datos en logs
pub fn mask_database_url(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    match url.rfind('@') {
        Some(at_pos) if at_pos > scheme_end => {
            format!("{}***:***@{}", &url[..scheme_end + 3], &url[at_pos + 1..])
        }
        _ => url.to_string(),
    }
}
