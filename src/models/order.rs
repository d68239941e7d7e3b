//! Modelo de Order
//!
//! Documento de la colección `AllOrders`, indexado por `order_id`. Los campos
//! que el panel no interpreta se conservan tal cual en `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use super::lenient;
use crate::utils::validation::validate_not_blank;

/// Pedido de transporte
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct Order {
    #[serde(default, deserialize_with = "lenient::string")]
    #[validate(custom = "validate_not_blank")]
    pub order_id: String,

    #[serde(default, deserialize_with = "lenient::string")]
    #[validate(custom = "validate_not_blank")]
    pub user_name: String,

    #[serde(default, deserialize_with = "lenient::string")]
    #[validate(custom = "validate_not_blank")]
    pub user_phone: String,

    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    #[validate(custom = "validate_not_blank")]
    pub company_name: String,

    #[serde(default, deserialize_with = "lenient::string")]
    #[validate(custom = "validate_not_blank")]
    pub booking_status: String,

    #[serde(default, deserialize_with = "lenient::string")]
    #[validate(custom = "validate_not_blank")]
    pub order_status: String,

    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub payment_mode: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    #[validate(custom = "validate_not_blank")]
    pub vehicle_type: String,

    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub subtype_vehicle: Option<String>,

    #[serde(rename = "vehicleNumber", default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub vehicle_number: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    #[validate(custom = "validate_not_blank")]
    pub material: String,

    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub material_quantity: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub from_address: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub from_lat: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub from_lng: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    #[validate(custom = "validate_not_blank")]
    pub destination_address: String,

    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub dest_lat: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub dest_lng: Option<String>,

    // Importes: se guardan tal como llegan ("₹1,200", 800, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advance_amount: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_amount: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_date: Option<Value>,

    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,

    #[serde(rename = "userId", default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Order {
    /// Fecha de reserva como texto, si la hay
    pub fn booking_date_text(&self) -> Option<String> {
        match self.booking_date.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete() -> Value {
        json!({
            "order_id": 1001,
            "user_name": "Asha",
            "user_phone": "9876543210",
            "company_name": "Acme",
            "booking_status": "Confirmed",
            "order_status": "Pending",
            "vehicle_type": "Truck",
            "material": "Steel",
            "destination_address": "Pune",
            "price": "₹1,200",
            "odc_length": 12
        })
    }

    #[test]
    fn test_order_keeps_unknown_fields() {
        let order: Order = serde_json::from_value(complete()).unwrap();
        assert_eq!(order.order_id, "1001");
        assert_eq!(order.extra.get("odc_length"), Some(&json!(12)));

        let back = serde_json::to_value(&order).unwrap();
        assert_eq!(back["odc_length"], json!(12));
        assert_eq!(back["price"], json!("₹1,200"));
        assert!(back.get("payment_status").is_none());
    }

    #[test]
    fn test_order_validation_requires_fields() {
        let order: Order = serde_json::from_value(complete()).unwrap();
        assert!(order.validate().is_ok());

        let mut missing = complete();
        missing["material"] = json!("  ");
        let order: Order = serde_json::from_value(missing).unwrap();
        let errors = order.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("material"));
    }
}
