//! Modelo de Driver
//!
//! Documento de la colección `Drivers`, indexado por número de móvil.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::lenient;
use crate::utils::validation::validate_not_blank;

/// Referencia a un fichero en el almacenamiento de objetos
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentRef {
    #[serde(rename = "publicId", default, deserialize_with = "lenient::string")]
    pub public_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: String,
}

impl DocumentRef {
    pub fn is_empty(&self) -> bool {
        self.public_id.is_empty() && self.url.is_empty()
    }
}

/// Huecos fijos de documentación del conductor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriverDocuments {
    #[serde(rename = "Aadhaar_or_PAN_Card", default)]
    pub aadhaar_or_pan_card: DocumentRef,
    #[serde(rename = "Driving_License", default)]
    pub driving_license: DocumentRef,
    #[serde(rename = "Insurance_Certificate", default)]
    pub insurance_certificate: DocumentRef,
    #[serde(rename = "Vehicle_RC", default)]
    pub vehicle_rc: DocumentRef,
}

impl DriverDocuments {
    pub fn slot(&self, slot: DriverDocumentSlot) -> &DocumentRef {
        match slot {
            DriverDocumentSlot::AadhaarOrPanCard => &self.aadhaar_or_pan_card,
            DriverDocumentSlot::DrivingLicense => &self.driving_license,
            DriverDocumentSlot::InsuranceCertificate => &self.insurance_certificate,
            DriverDocumentSlot::VehicleRc => &self.vehicle_rc,
        }
    }

    pub fn set(&mut self, slot: DriverDocumentSlot, document: DocumentRef) {
        match slot {
            DriverDocumentSlot::AadhaarOrPanCard => self.aadhaar_or_pan_card = document,
            DriverDocumentSlot::DrivingLicense => self.driving_license = document,
            DriverDocumentSlot::InsuranceCertificate => self.insurance_certificate = document,
            DriverDocumentSlot::VehicleRc => self.vehicle_rc = document,
        }
    }

    pub fn is_empty(&self) -> bool {
        DriverDocumentSlot::ALL.iter().all(|slot| self.slot(*slot).is_empty())
    }

    /// Rellenar los huecos vacíos con los ya guardados
    pub fn fill_missing(&mut self, stored: &DriverDocuments) {
        for slot in DriverDocumentSlot::ALL {
            if self.slot(slot).is_empty() && !stored.slot(slot).is_empty() {
                self.set(slot, stored.slot(slot).clone());
            }
        }
    }
}

/// Identificador de hueco, tal como aparece en la ruta de subida
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverDocumentSlot {
    AadhaarOrPanCard,
    DrivingLicense,
    InsuranceCertificate,
    VehicleRc,
}

impl DriverDocumentSlot {
    pub const ALL: [DriverDocumentSlot; 4] = [
        DriverDocumentSlot::AadhaarOrPanCard,
        DriverDocumentSlot::DrivingLicense,
        DriverDocumentSlot::InsuranceCertificate,
        DriverDocumentSlot::VehicleRc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DriverDocumentSlot::AadhaarOrPanCard => "Aadhaar_or_PAN_Card",
            DriverDocumentSlot::DrivingLicense => "Driving_License",
            DriverDocumentSlot::InsuranceCertificate => "Insurance_Certificate",
            DriverDocumentSlot::VehicleRc => "Vehicle_RC",
        }
    }
}

impl fmt::Display for DriverDocumentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DriverDocumentSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown document slot: {}", s))
    }
}

/// Conductor
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct Driver {
    #[serde(rename = "firstName", default, deserialize_with = "lenient::string")]
    #[validate(custom = "validate_not_blank")]
    pub first_name: String,

    #[serde(rename = "lastName", default, deserialize_with = "lenient::string")]
    #[validate(custom = "validate_not_blank")]
    pub last_name: String,

    #[serde(rename = "mobileNumber", default, deserialize_with = "lenient::string")]
    #[validate(custom = "validate_not_blank")]
    pub mobile_number: String,

    #[serde(default, deserialize_with = "lenient::string")]
    #[validate(custom = "validate_not_blank")]
    pub city: String,

    #[serde(default, deserialize_with = "lenient::string")]
    #[validate(custom = "validate_not_blank")]
    pub state: String,

    #[serde(rename = "vehicleNumber", default, deserialize_with = "lenient::string")]
    #[validate(custom = "validate_not_blank")]
    pub vehicle_number: String,

    #[serde(default, deserialize_with = "lenient::opt_bool", skip_serializing_if = "Option::is_none")]
    pub occupied: Option<bool>,

    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub last_completed_order: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub last_delivery_time: Option<String>,

    #[serde(default, skip_serializing_if = "DriverDocuments::is_empty")]
    pub documents: DriverDocuments,

    #[serde(rename = "userId", default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Driver {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}
