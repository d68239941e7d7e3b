use std::sync::Arc;

use log::debug;
use uuid::Uuid;

use crate::models::{Account, KycRecord};
use crate::store::{collections, to_patch, DocumentStore, StoreError};
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Cuentas de operador en la colección `users`
pub struct UserRepository {
    store: Arc<dyn DocumentStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Crear una cuenta nueva, devuelve su id.
    ///
    /// El almacén rechaza un segundo documento con el mismo email aunque dos
    /// altas lleguen a la vez.
    pub async fn create(&self, account: &Account) -> AppResult<String> {
        let id = Uuid::new_v4().to_string();
        self.store
            .insert_unique(collections::USERS, &id, "email", to_patch(account)?)
            .await
            .map_err(|e| match e {
                StoreError::Duplicate(_) => AppError::Conflict("Email already exists".to_string()),
                other => AppError::Store(other),
            })?;
        debug!("👤 Cuenta {} creada", id);
        Ok(id)
    }

    /// Buscar por email ya normalizado
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<(String, Account)>> {
        let document = self.store.find_one(collections::USERS, "email", email).await?;
        match document {
            Some(document) => {
                let account = serde_json::from_value(serde_json::Value::Object(document.data))
                    .map_err(StoreError::from)?;
                Ok(Some((document.id, account)))
            }
            None => Ok(None),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Account> {
        let document = self
            .store
            .get(collections::USERS, id)
            .await?
            .ok_or_else(|| not_found_error("User", id))?;
        Ok(serde_json::from_value(serde_json::Value::Object(document.data)).map_err(StoreError::from)?)
    }

    /// Escribir el registro KYC de una sola vez
    pub async fn write_kyc(&self, id: &str, record: &KycRecord) -> AppResult<Account> {
        // La cuenta debe existir antes de fusionar
        self.find_by_id(id).await?;
        let document = self
            .store
            .merge(collections::USERS, id, to_patch(record)?)
            .await?;
        Ok(serde_json::from_value(serde_json::Value::Object(document.data)).map_err(StoreError::from)?)
    }
}
