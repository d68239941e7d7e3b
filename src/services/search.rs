//! Búsqueda y filtrado en memoria
//!
//! Funciones puras sobre listas ya leídas del almacén. Se recalculan enteras
//! en cada petición.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Driver, Order, Vehicle};

/// Facetas de estado de pedido, en orden de presentación
pub const ORDER_STATUS_FACETS: [&str; 6] = [
    "pending",
    "in-progress",
    "completed",
    "rejected",
    "confirmed",
    "cancelled",
];

/// Quitar marcas de formato (`* _ \` ~`), recortar y pasar a minúsculas
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '*' | '_' | '`' | '~'))
        .collect::<String>()
        .trim()
        .to_lowercase()
}

/// Entidad con campos de texto sobre los que se busca
pub trait Searchable {
    fn search_fields(&self) -> Vec<Option<&str>>;

    /// Vacío coincide siempre; si no, basta con un campo que contenga la consulta
    fn matches_query(&self, normalized_query: &str) -> bool {
        if normalized_query.is_empty() {
            return true;
        }
        self.search_fields()
            .into_iter()
            .flatten()
            .any(|field| normalize(field).contains(normalized_query))
    }
}

fn present(value: &str) -> Option<&str> {
    Some(value)
}

impl Searchable for Order {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            present(&self.order_id),
            present(&self.user_name),
            present(&self.user_phone),
            present(&self.company_name),
            present(&self.booking_status),
            present(&self.order_status),
            present(&self.vehicle_type),
            self.subtype_vehicle.as_deref(),
            present(&self.material),
            present(&self.destination_address),
        ]
    }
}

impl Searchable for Driver {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            present(&self.first_name),
            present(&self.last_name),
            present(&self.mobile_number),
            present(&self.city),
            present(&self.state),
            present(&self.vehicle_number),
        ]
    }
}

impl Searchable for Vehicle {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            present(&self.company_name),
            present(&self.company_url),
            present(&self.subtype),
            present(&self.vehicle_type),
            present(&self.capacity),
            present(&self.available_wheels),
            present(&self.price_per_kg),
            present(&self.price_per_tonne),
        ]
    }
}

/// Filtrar por texto libre
pub fn filter_by_query<T: Searchable + Clone>(items: &[T], query: &str) -> Vec<T> {
    let query = normalize(query);
    items
        .iter()
        .filter(|item| item.matches_query(&query))
        .cloned()
        .collect()
}

/// Un pedido está en una faceta si `order_status` O `booking_status` coincide
pub fn order_matches_facet(order: &Order, normalized_facet: &str) -> bool {
    normalized_facet.is_empty()
        || normalize(&order.order_status) == normalized_facet
        || normalize(&order.booking_status) == normalized_facet
}

/// Filtrar pedidos por texto libre y faceta de estado
pub fn filter_orders(orders: &[Order], query: &str, facet: &str) -> Vec<Order> {
    let query = normalize(query);
    let facet = normalize(facet);
    orders
        .iter()
        .filter(|order| order_matches_facet(order, &facet) && order.matches_query(&query))
        .cloned()
        .collect()
}

/// Recuento de pedidos por faceta
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub counts: BTreeMap<String, usize>,
}

pub fn status_counts(orders: &[Order]) -> StatusCounts {
    let counts = ORDER_STATUS_FACETS
        .iter()
        .map(|facet| {
            let count = orders
                .iter()
                .filter(|order| order_matches_facet(order, facet))
                .count();
            (facet.to_string(), count)
        })
        .collect();
    StatusCounts {
        total: orders.len(),
        counts,
    }
}

/// Agrupación empresa → subtipo → vehículos, sólo para mostrar
pub type VehicleGroups = BTreeMap<String, BTreeMap<String, Vec<Vehicle>>>;

pub fn group_vehicles(vehicles: &[Vehicle]) -> VehicleGroups {
    let mut groups: VehicleGroups = BTreeMap::new();
    for vehicle in vehicles {
        groups
            .entry(vehicle.company_name.clone())
            .or_default()
            .entry(vehicle.subtype.clone())
            .or_default()
            .push(vehicle.clone());
    }
    groups
}
