use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{KycStatus, OperationalInfo, UploadMethod};

// Envío KYC por enlaces (JSON)
//
// Las claves de `documents` aceptan el nombre corto (`gst`) o la clave del
// registro (`gstCertificate`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycLinkRequest {
    #[serde(default)]
    pub method: Option<UploadMethod>,
    #[serde(default)]
    pub documents: BTreeMap<String, String>,
    #[serde(default)]
    pub operational_info: OperationalInfo,
}

// Resultado del envío
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KycSubmitResponse {
    pub message: String,
    pub kyc_status: KycStatus,
    pub document_upload_method: UploadMethod,
    pub progress: Vec<u8>,
}

// Estado KYC de la cuenta
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KycStatusResponse {
    pub kyc_status: KycStatus,
    pub document_upload_method: Option<UploadMethod>,
    pub kyc_submitted_at: Option<Value>,
}
