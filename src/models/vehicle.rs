//! Modelo de Vehicle
//!
//! Registro plano por operador en la colección `Vehicles`. La jerarquía
//! empresa → subtipo sólo se deriva para mostrarla.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::lenient;
use crate::utils::validation::validate_not_blank;

/// Vehículo ofertado por una empresa de transporte
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct Vehicle {
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    #[validate(custom = "validate_not_blank")]
    pub company_name: String,

    #[serde(default, deserialize_with = "lenient::string")]
    #[validate(custom = "validate_not_blank")]
    pub company_url: String,

    #[serde(default, deserialize_with = "lenient::string")]
    #[validate(custom = "validate_not_blank")]
    pub subtype: String,

    #[serde(default, deserialize_with = "lenient::string")]
    #[validate(custom = "validate_not_blank")]
    pub vehicle_type: String,

    #[serde(default, deserialize_with = "lenient::string")]
    #[validate(custom = "validate_not_blank")]
    pub capacity: String,

    #[serde(default, deserialize_with = "lenient::string")]
    #[validate(custom = "validate_not_blank")]
    pub available_wheels: String,

    #[serde(default, deserialize_with = "lenient::string")]
    #[validate(custom = "validate_not_blank")]
    pub price_per_kg: String,

    #[serde(default, deserialize_with = "lenient::string")]
    #[validate(custom = "validate_not_blank")]
    pub price_per_tonne: String,

    #[serde(rename = "userId", default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}
