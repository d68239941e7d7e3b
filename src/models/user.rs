//! Modelo de cuenta de operador
//!
//! Documento de la colección `users`. Además de las credenciales guarda el
//! registro KYC de la cuenta.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::kyc::{KycDocuments, KycStatus, OperationalInfo, UploadMethod};
use super::lenient;

/// Cuenta tal como se guarda
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(default, deserialize_with = "lenient::string")]
    pub full_name: String,

    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,

    #[serde(default)]
    pub password_hash: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub kyc_status: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_parsed", skip_serializing_if = "Option::is_none")]
    pub document_upload_method: Option<UploadMethod>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<KycDocuments>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operational_info: Option<OperationalInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kyc_submitted_at: Option<Value>,
}

impl Account {
    /// Cuenta recién registrada: KYC pendiente de envío
    pub fn new(full_name: String, email: String, password_hash: String) -> Self {
        Self {
            full_name,
            email,
            password_hash,
            created_at: Some(Utc::now()),
            kyc_status: Some(KycStatus::NotSubmitted.as_str().to_string()),
            document_upload_method: None,
            documents: None,
            operational_info: None,
            kyc_submitted_at: None,
        }
    }

    pub fn kyc_status(&self) -> KycStatus {
        KycStatus::normalize(self.kyc_status.as_deref())
    }
}

/// Response de usuario para la API (sin hash de contraseña)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub kyc_status: KycStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserResponse {
    pub fn from_account(id: impl Into<String>, account: &Account) -> Self {
        Self {
            id: id.into(),
            full_name: account.full_name.clone(),
            email: account.email.clone(),
            kyc_status: account.kyc_status(),
            created_at: account.created_at,
        }
    }
}
