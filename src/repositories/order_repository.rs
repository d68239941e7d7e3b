use serde_json::{json, Map};

use super::owned::{OwnedEntity, OwnedRepository};
use crate::models::Order;
use crate::store::collections;
use crate::utils::errors::{AppError, AppResult};

impl OwnedEntity for Order {
    const COLLECTION: &'static str = collections::ORDERS;
    const RESOURCE: &'static str = "Order";

    fn document_id(&self) -> Option<String> {
        let id = self.order_id.trim();
        (!id.is_empty()).then(|| id.to_string())
    }

    fn set_owner(&mut self, owner_id: &str) {
        self.user_id = Some(owner_id.to_string());
    }
}

pub type OrderRepository = OwnedRepository<Order>;

impl OwnedRepository<Order> {
    /// Marcar el pago de un pedido como cobrado
    pub async fn mark_paid(&self, owner_id: &str, order_id: &str) -> AppResult<Order> {
        let mut patch = Map::new();
        patch.insert("payment_status".to_string(), json!("Paid"));
        self.patch(owner_id, order_id, patch).await
    }

    /// Guardar usando `order_id` como clave
    pub async fn save_order(&self, owner_id: &str, order: Order) -> AppResult<Order> {
        let id = order
            .document_id()
            .ok_or_else(|| AppError::ValidationError("order_id is required".to_string()))?;
        self.save(owner_id, &id, order).await
    }
}
