//! Modelo KYC
//!
//! Registro de verificación que cuelga de la cuenta del operador.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lenient;

/// Estado KYC normalizado
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KycStatus {
    #[default]
    NotSubmitted,
    Pending,
    Completed,
}

impl KycStatus {
    /// Lectura tolerante del valor guardado
    ///
    /// `approved` equivale a `completed` y `rejected` vuelve a
    /// `not-submitted`. Cualquier otro valor desconocido también.
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("pending") => KycStatus::Pending,
            Some("completed") | Some("approved") => KycStatus::Completed,
            _ => KycStatus::NotSubmitted,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KycStatus::NotSubmitted => "not-submitted",
            KycStatus::Pending => "pending",
            KycStatus::Completed => "completed",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, KycStatus::Completed)
    }
}

impl fmt::Display for KycStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Método de aportación de documentos, uno por envío
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMethod {
    #[default]
    File,
    Link,
}

impl FromStr for UploadMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" | "files" | "upload" => Ok(UploadMethod::File),
            "link" | "links" | "url" | "urls" => Ok(UploadMethod::Link),
            other => Err(format!("Unknown upload method: {}", other)),
        }
    }
}

/// Los cinco documentos obligatorios, en el orden fijo de subida
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Gst,
    Pan,
    Incorporation,
    Signatory,
    Bank,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 5] = [
        DocumentKind::Gst,
        DocumentKind::Pan,
        DocumentKind::Incorporation,
        DocumentKind::Signatory,
        DocumentKind::Bank,
    ];

    /// Nombre del campo de formulario y de la carpeta en el almacenamiento
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Gst => "gst",
            DocumentKind::Pan => "pan",
            DocumentKind::Incorporation => "incorporation",
            DocumentKind::Signatory => "signatory",
            DocumentKind::Bank => "bank",
        }
    }

    /// Clave dentro de `documents` en el registro guardado
    pub fn record_key(&self) -> &'static str {
        match self {
            DocumentKind::Gst => "gstCertificate",
            DocumentKind::Pan => "panCard",
            DocumentKind::Incorporation => "incorporation",
            DocumentKind::Signatory => "signatoryId",
            DocumentKind::Bank => "bankDetails",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            DocumentKind::Gst => 0,
            DocumentKind::Pan => 1,
            DocumentKind::Incorporation => 2,
            DocumentKind::Signatory => 3,
            DocumentKind::Bank => 4,
        }
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s || kind.record_key() == s)
            .ok_or_else(|| format!("Unknown KYC document: {}", s))
    }
}

/// Referencias resueltas de los cinco documentos
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KycDocuments {
    #[serde(rename = "gstCertificate", default, deserialize_with = "lenient::string")]
    pub gst_certificate: String,
    #[serde(rename = "panCard", default, deserialize_with = "lenient::string")]
    pub pan_card: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub incorporation: String,
    #[serde(rename = "signatoryId", default, deserialize_with = "lenient::string")]
    pub signatory_id: String,
    #[serde(rename = "bankDetails", default, deserialize_with = "lenient::string")]
    pub bank_details: String,
}

impl KycDocuments {
    pub fn get(&self, kind: DocumentKind) -> &str {
        match kind {
            DocumentKind::Gst => &self.gst_certificate,
            DocumentKind::Pan => &self.pan_card,
            DocumentKind::Incorporation => &self.incorporation,
            DocumentKind::Signatory => &self.signatory_id,
            DocumentKind::Bank => &self.bank_details,
        }
    }

    pub fn set(&mut self, kind: DocumentKind, reference: String) {
        match kind {
            DocumentKind::Gst => self.gst_certificate = reference,
            DocumentKind::Pan => self.pan_card = reference,
            DocumentKind::Incorporation => self.incorporation = reference,
            DocumentKind::Signatory => self.signatory_id = reference,
            DocumentKind::Bank => self.bank_details = reference,
        }
    }
}

/// Información operativa (todos los campos opcionales)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationalInfo {
    #[serde(default, deserialize_with = "lenient::string")]
    pub services: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub fleet_details: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub coverage_zones: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub pricing_model: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub tracking_capability: String,
}

/// Campos de operational info, tal como llegan en formularios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationalField {
    Services,
    FleetDetails,
    CoverageZones,
    PricingModel,
    TrackingCapability,
}

impl OperationalField {
    pub const ALL: [OperationalField; 5] = [
        OperationalField::Services,
        OperationalField::FleetDetails,
        OperationalField::CoverageZones,
        OperationalField::PricingModel,
        OperationalField::TrackingCapability,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationalField::Services => "services",
            OperationalField::FleetDetails => "fleetDetails",
            OperationalField::CoverageZones => "coverageZones",
            OperationalField::PricingModel => "pricingModel",
            OperationalField::TrackingCapability => "trackingCapability",
        }
    }
}

impl FromStr for OperationalField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("Unknown operational field: {}", s))
    }
}

impl OperationalInfo {
    pub fn set(&mut self, field: OperationalField, value: String) {
        match field {
            OperationalField::Services => self.services = value,
            OperationalField::FleetDetails => self.fleet_details = value,
            OperationalField::CoverageZones => self.coverage_zones = value,
            OperationalField::PricingModel => self.pricing_model = value,
            OperationalField::TrackingCapability => self.tracking_capability = value,
        }
    }
}

/// Parche que se escribe sobre la cuenta al enviar el KYC
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KycRecord {
    pub documents: KycDocuments,
    pub document_upload_method: UploadMethod,
    pub operational_info: OperationalInfo,
    pub kyc_status: KycStatus,
    pub kyc_submitted_at: DateTime<Utc>,
}
