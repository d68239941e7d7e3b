//! Seguimiento de pedidos en mapa

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::Order;
use crate::utils::timestamp::parse_flexible_timestamp;

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingEntry {
    pub id: String,
    pub driver: String,
    pub vehicle: String,
    pub vehicle_number: Option<String>,
    pub location: Coordinates,
    pub status: String,
    pub last_updated: Option<DateTime<Utc>>,
    pub route: [Coordinates; 2],
}

/// Coordenada no numérica → 0
fn coordinate(value: &Option<String>) -> f64 {
    value
        .as_deref()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn or_unknown(value: &str) -> String {
    if value.trim().is_empty() {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}

impl From<&Order> for TrackingEntry {
    fn from(order: &Order) -> Self {
        let origin = Coordinates {
            lat: coordinate(&order.from_lat),
            lng: coordinate(&order.from_lng),
        };
        let destination = Coordinates {
            lat: coordinate(&order.dest_lat),
            lng: coordinate(&order.dest_lng),
        };
        Self {
            id: order.order_id.clone(),
            driver: or_unknown(&order.user_name),
            vehicle: or_unknown(&order.vehicle_type),
            vehicle_number: order.vehicle_number.clone(),
            location: destination,
            status: or_unknown(&order.order_status),
            last_updated: order.booking_date.as_ref().and_then(parse_flexible_timestamp),
            route: [origin, destination],
        }
    }
}

/// Entradas de seguimiento filtradas por id o matrícula
pub fn tracking_entries(orders: &[Order], query: &str) -> Vec<TrackingEntry> {
    let query = query.trim().to_lowercase();
    orders
        .iter()
        .map(TrackingEntry::from)
        .filter(|entry| {
            query.is_empty()
                || entry.id.to_lowercase().contains(&query)
                || entry
                    .vehicle_number
                    .as_deref()
                    .map_or(false, |number| number.to_lowercase().contains(&query))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_projection_with_defaults() {
        let order: Order = serde_json::from_value(json!({
            "order_id": "T1",
            "from_lat": "18.52",
            "from_lng": 73.85,
            "dest_lat": "n/a",
            "booking_date": "2024-03-05"
        }))
        .unwrap();
        let entry = TrackingEntry::from(&order);
        assert_eq!(entry.driver, "Unknown");
        assert_eq!(entry.vehicle, "Unknown");
        assert_eq!(entry.status, "Unknown");
        assert_eq!(entry.route[0], Coordinates { lat: 18.52, lng: 73.85 });
        assert_eq!(entry.location, Coordinates { lat: 0.0, lng: 0.0 });
        assert!(entry.last_updated.is_some());
    }

    #[test]
    fn test_search_by_id_or_vehicle_number() {
        let orders: Vec<Order> = vec![
            serde_json::from_value(json!({ "order_id": "T1", "vehicleNumber": "MH12AB1234" })).unwrap(),
            serde_json::from_value(json!({ "order_id": "T2" })).unwrap(),
        ];
        assert_eq!(tracking_entries(&orders, "mh12").len(), 1);
        assert_eq!(tracking_entries(&orders, "t2")[0].id, "T2");
        assert_eq!(tracking_entries(&orders, "").len(), 2);
        assert!(tracking_entries(&orders, "zzz").is_empty());

        let value = serde_json::to_value(&tracking_entries(&orders, "t2")[0]).unwrap();
        assert!(value["lastUpdated"].is_null());
    }
}
