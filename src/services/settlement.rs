//! Liquidaciones de pago
//!
//! Proyección de los pedidos de la cuenta a filas de cobro, con filtros
//! por estado de pago, rango de fechas y texto.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Order;
use crate::utils::amount::parse_price;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::validate_date;

pub const DEFAULT_PAYMENT_STATUS: &str = "Unpaid";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub id: String,
    pub customer: String,
    pub date: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub payment_status: String,
}

impl From<&Order> for Settlement {
    fn from(order: &Order) -> Self {
        let id = if order.order_id.is_empty() {
            order
                .extra
                .get("id")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        } else {
            order.order_id.clone()
        };
        let date: String = order
            .booking_date_text()
            .unwrap_or_default()
            .chars()
            .take(10)
            .collect();

        Self {
            id,
            customer: order.user_name.clone(),
            date,
            amount: order.price.as_ref().map(parse_price).unwrap_or(Decimal::ZERO),
            payment_status: order
                .payment_status
                .clone()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PAYMENT_STATUS.to_string()),
        }
    }
}

/// Filtros de la vista de liquidaciones
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettlementFilter {
    pub status: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub q: Option<String>,
}

struct ParsedFilter {
    status: Option<String>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    query: String,
}

fn parse_bound(value: &Option<String>) -> AppResult<Option<NaiveDate>> {
    match value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        Some(text) => validate_date(text)
            .map(Some)
            .map_err(|_| AppError::ValidationError(format!("Invalid date '{}', expected YYYY-MM-DD", text))),
        None => Ok(None),
    }
}

impl SettlementFilter {
    fn parse(&self) -> AppResult<ParsedFilter> {
        let status = self
            .status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"))
            .map(str::to_lowercase);
        Ok(ParsedFilter {
            status,
            from: parse_bound(&self.from)?,
            to: parse_bound(&self.to)?,
            query: self.q.as_deref().unwrap_or_default().trim().to_lowercase(),
        })
    }
}

impl ParsedFilter {
    fn matches(&self, row: &Settlement) -> bool {
        if let Some(status) = &self.status {
            if row.payment_status.to_lowercase() != *status {
                return false;
            }
        }

        if self.from.is_some() || self.to.is_some() {
            let Ok(date) = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d") else {
                return false;
            };
            if self.from.map_or(false, |from| date < from) || self.to.map_or(false, |to| date > to) {
                return false;
            }
        }

        self.query.is_empty()
            || row.customer.to_lowercase().contains(&self.query)
            || row.id.to_lowercase().contains(&self.query)
            || row.date.contains(&self.query)
            || row.amount.to_string().contains(&self.query)
    }
}

/// Filas de liquidación filtradas
pub fn settlements(orders: &[Order], filter: &SettlementFilter) -> AppResult<Vec<Settlement>> {
    let filter = filter.parse()?;
    Ok(orders
        .iter()
        .map(Settlement::from)
        .filter(|row| filter.matches(row))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order(id: &str, name: &str, date: &str, price: &str, status: Option<&str>) -> Order {
        let mut value = json!({
            "order_id": id,
            "user_name": name,
            "booking_date": date,
            "price": price
        });
        if let Some(status) = status {
            value["payment_status"] = json!(status);
        }
        serde_json::from_value(value).unwrap()
    }

    fn sample() -> Vec<Order> {
        vec![
            order("A1", "Asha Rao", "2024-03-05T10:00:00Z", "₹1,200", None),
            order("A2", "Vikram", "2024-03-20", "800", Some("Paid")),
            order("A3", "Meera", "2024-04-02", "450", Some("Unpaid")),
        ]
    }

    #[test]
    fn test_projection_defaults() {
        let rows = settlements(&sample(), &SettlementFilter::default()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].date, "2024-03-05");
        assert_eq!(rows[0].amount, Decimal::from(1200));
        assert_eq!(rows[0].payment_status, "Unpaid");
    }

    #[test]
    fn test_status_filter() {
        let filter = SettlementFilter { status: Some("paid".into()), ..Default::default() };
        let rows = settlements(&sample(), &filter).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "A2");

        let all = SettlementFilter { status: Some("All".into()), ..Default::default() };
        assert_eq!(settlements(&sample(), &all).unwrap().len(), 3);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let filter = SettlementFilter {
            from: Some("2024-03-05".into()),
            to: Some("2024-03-20".into()),
            ..Default::default()
        };
        let ids: Vec<String> = settlements(&sample(), &filter).unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["A1", "A2"]);
    }

    #[test]
    fn test_text_search_and_bad_dates() {
        let filter = SettlementFilter { q: Some("MEERA".into()), ..Default::default() };
        assert_eq!(settlements(&sample(), &filter).unwrap().len(), 1);

        let filter = SettlementFilter { q: Some("1200".into()), ..Default::default() };
        assert_eq!(settlements(&sample(), &filter).unwrap()[0].id, "A1");

        let bad = SettlementFilter { from: Some("05/03/2024".into()), ..Default::default() };
        assert!(matches!(settlements(&sample(), &bad), Err(AppError::ValidationError(_))));
    }
}
