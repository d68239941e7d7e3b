//! Agregados del panel principal
//!
//! Se recalculan enteros a partir de las listas de la cuenta en cada
//! petición.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Driver, KycStatus, Order, Vehicle};
use crate::utils::amount::order_amount;
use crate::utils::timestamp::parse_flexible_timestamp;

/// Meses que se conservan en la serie de ingresos
pub const MONTHS_KEPT: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRevenue {
    pub label: String,
    pub year: i32,
    pub month: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_orders: usize,
    pub active_drivers: usize,
    pub vehicles_in_use: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    pub monthly_revenue: Vec<MonthlyRevenue>,
    pub kyc_status: KycStatus,
}

/// Importe de un pedido según sus campos `price` / `total_amount`
pub fn amount_of(order: &Order) -> Decimal {
    order_amount(order.price.as_ref(), order.total_amount.as_ref())
}

/// Instante de creación: `createdAt` y, si no se puede leer, `booking_date`
pub fn order_instant(order: &Order) -> Option<DateTime<Utc>> {
    order
        .created_at
        .as_ref()
        .and_then(parse_flexible_timestamp)
        .or_else(|| order.booking_date.as_ref().and_then(parse_flexible_timestamp))
}

/// Serie mensual: los pedidos sin fecha legible no entran en ningún mes
pub fn monthly_revenue(orders: &[Order]) -> Vec<MonthlyRevenue> {
    let mut buckets: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
    for order in orders {
        if let Some(instant) = order_instant(order) {
            *buckets.entry((instant.year(), instant.month())).or_default() += amount_of(order);
        }
    }

    let skip = buckets.len().saturating_sub(MONTHS_KEPT);
    buckets
        .into_iter()
        .skip(skip)
        .map(|((year, month), value)| MonthlyRevenue {
            label: month_label(year, month),
            year,
            month,
            value,
        })
        .collect()
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|date| date.format("%b %Y").to_string())
        .unwrap_or_else(|| format!("{}-{:02}", year, month))
}

pub fn summarize(
    orders: &[Order],
    drivers: &[Driver],
    vehicles: &[Vehicle],
    kyc_status: KycStatus,
) -> DashboardSummary {
    DashboardSummary {
        total_orders: orders.len(),
        active_drivers: drivers.len(),
        vehicles_in_use: vehicles.len(),
        total_revenue: orders.iter().map(amount_of).sum(),
        monthly_revenue: monthly_revenue(orders),
        kyc_status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::str::FromStr;

    fn order(price: Value, created_at: Value) -> Order {
        serde_json::from_value(json!({
            "order_id": "X",
            "price": price,
            "createdAt": created_at
        }))
        .unwrap()
    }

    #[test]
    fn test_revenue_excludes_unparsable_dates_from_buckets() {
        let orders = vec![
            order(json!("₹1,200"), json!("2024-03-05T10:00:00Z")),
            order(json!("800"), json!({ "seconds": 1709856000, "nanoseconds": 0 })),
            order(json!("500"), json!("someday")),
        ];
        let summary = summarize(&orders, &[], &[], KycStatus::Completed);
        assert_eq!(summary.total_revenue, Decimal::from(2500));
        assert_eq!(summary.total_orders, 3);
        assert_eq!(summary.monthly_revenue.len(), 1);
        assert_eq!(summary.monthly_revenue[0].label, "Mar 2024");
        assert_eq!(summary.monthly_revenue[0].value, Decimal::from(2000));
    }

    #[test]
    fn test_keeps_latest_six_months_ascending() {
        let orders: Vec<Order> = (1..=8)
            .map(|month| order(json!("100"), json!(format!("2024-{:02}-15", month))))
            .collect();
        let series = monthly_revenue(&orders);
        let months: Vec<u32> = series.iter().map(|m| m.month).collect();
        assert_eq!(months, vec![3, 4, 5, 6, 7, 8]);
        assert_eq!(series[0].label, "Mar 2024");
    }

    #[test]
    fn test_total_amount_fallback_and_booking_date() {
        let order: Order = serde_json::from_value(json!({
            "order_id": "Y",
            "price": "",
            "total_amount": 750.5,
            "booking_date": "2023-12-01"
        }))
        .unwrap();
        assert_eq!(amount_of(&order), Decimal::from_str("750.5").unwrap());
        let series = monthly_revenue(&[order]);
        assert_eq!(series[0].year, 2023);
        assert_eq!(series[0].month, 12);
    }

    #[test]
    fn test_counts_and_serialization() {
        let drivers = vec![Driver::default(), Driver::default()];
        let vehicles = vec![Vehicle::default()];
        let summary = summarize(&[], &drivers, &vehicles, KycStatus::Pending);
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["activeDrivers"], json!(2));
        assert_eq!(value["vehiclesInUse"], json!(1));
        assert_eq!(value["totalRevenue"], json!(0.0));
        assert_eq!(value["kycStatus"], json!("pending"));
    }
}
