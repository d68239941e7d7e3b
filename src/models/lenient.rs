//! Deserialización tolerante para campos de formulario
//!
//! Los documentos guardados desde distintos clientes mezclan `"5"` y `5` para
//! el mismo campo. Números y booleanos se aceptan como su forma de texto.

use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Campo de texto obligatorio; ausente o `null` se lee como cadena vacía
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_string).unwrap_or_default())
}

/// Campo de texto opcional
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_string))
}

fn value_to_bool(value: Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(b),
        Value::String(s) => Some(matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "1")),
        Value::Number(n) => Some(n.as_f64().map(|f| f != 0.0).unwrap_or(false)),
        _ => None,
    }
}

/// Booleano que puede venir como `"true"`/`"false"`
pub fn bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_bool).unwrap_or(false))
}

/// Booleano opcional; ausente o `null` se conserva como `None`
pub fn opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_bool))
}

/// Valor enumerado leído por `FromStr`; lo que no se reconoce queda en `None`
pub fn opt_parsed<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(value_to_string)
        .and_then(|s| s.parse::<T>().ok()))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "super::string")]
        capacity: String,
        #[serde(default, deserialize_with = "super::opt_string")]
        note: Option<String>,
        #[serde(default, deserialize_with = "super::bool")]
        occupied: bool,
        #[serde(default, deserialize_with = "super::opt_bool")]
        paid: Option<bool>,
    }

    #[test]
    fn test_numbers_become_text() {
        let form: Form = serde_json::from_value(json!({ "capacity": 12, "note": 3.5, "occupied": "true" })).unwrap();
        assert_eq!(form.capacity, "12");
        assert_eq!(form.note.as_deref(), Some("3.5"));
        assert!(form.occupied);
    }

    #[test]
    fn test_missing_and_null() {
        let form: Form = serde_json::from_value(json!({ "capacity": null })).unwrap();
        assert_eq!(form.capacity, "");
        assert!(form.note.is_none());
        assert!(!form.occupied);
        assert!(form.paid.is_none());
    }

    #[test]
    fn test_optional_bool_keeps_value() {
        let form: Form = serde_json::from_value(json!({ "paid": "false" })).unwrap();
        assert_eq!(form.paid, Some(false));
    }
}
