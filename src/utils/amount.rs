//! Lectura de importes
//!
//! Los precios llegan como texto libre ("₹1,200", "800", 950.5). Se
//! conservan sólo dígitos y punto decimal antes de convertir a `Decimal`.

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde_json::Value;

lazy_static! {
    static ref NON_NUMERIC: Regex = Regex::new(r"[^\d.]").expect("static regex");
}

/// Un valor "presente" en el sentido del formulario: texto no vacío,
/// número distinto de cero o `true`
fn is_present(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::Bool(b) => *b,
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Importe de un campo `price`: se eliminan los caracteres no numéricos;
/// lo que no se pueda interpretar cuenta como cero
pub fn parse_price(value: &Value) -> Decimal {
    if value.is_null() {
        return Decimal::ZERO;
    }
    let cleaned = NON_NUMERIC.replace_all(&value_text(value), "").into_owned();
    parse_decimal(&cleaned).unwrap_or(Decimal::ZERO)
}

/// Importe numérico estricto (campo `total_amount`)
pub fn parse_numeric(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()).unwrap_or(Decimal::ZERO),
        Value::String(s) => parse_decimal(s).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

/// Importe de un pedido: `price` si está presente, si no `total_amount`
pub fn order_amount(price: Option<&Value>, total_amount: Option<&Value>) -> Decimal {
    match (price, total_amount) {
        (Some(price), _) if is_present(price) => parse_price(price),
        (_, Some(total)) if is_present(total) => parse_numeric(total),
        _ => Decimal::ZERO,
    }
}
