use validator::Validate;

use crate::dto::{ApiResponse, ListResponse, OrderQuery};
use crate::models::{Identity, Order};
use crate::repositories::OrderRepository;
use crate::services::search::{filter_orders, status_counts, StatusCounts};
use crate::utils::errors::AppError;

pub struct OrderController {
    repository: OrderRepository,
}

impl OrderController {
    pub fn new(repository: OrderRepository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, identity: &Identity, query: &OrderQuery) -> Result<ListResponse<Order>, AppError> {
        let orders = self.repository.list(identity.owner_id()).await?;
        let items = filter_orders(
            &orders,
            query.q.as_deref().unwrap_or_default(),
            query.status.as_deref().unwrap_or_default(),
        );
        Ok(ListResponse::new(orders.len(), items))
    }

    pub async fn get(&self, identity: &Identity, order_id: &str) -> Result<Order, AppError> {
        self.repository.find(identity.owner_id(), order_id).await
    }

    /// Guardar y devolver la lista refrescada
    pub async fn save(&self, identity: &Identity, order: Order) -> Result<ApiResponse<ListResponse<Order>>, AppError> {
        order.validate()?;
        let saved = self.repository.save_order(identity.owner_id(), order).await?;
        let orders = self.repository.list(identity.owner_id()).await?;
        Ok(ApiResponse::success_with_message(
            ListResponse::all(orders),
            format!("Order {} saved", saved.order_id),
        ))
    }

    pub async fn delete(&self, identity: &Identity, order_id: &str) -> Result<ApiResponse<ListResponse<Order>>, AppError> {
        self.repository.delete(identity.owner_id(), order_id).await?;
        let orders = self.repository.list(identity.owner_id()).await?;
        Ok(ApiResponse::success_with_message(
            ListResponse::all(orders),
            format!("Order {} deleted", order_id),
        ))
    }

    pub async fn status_counts(&self, identity: &Identity) -> Result<StatusCounts, AppError> {
        let orders = self.repository.list(identity.owner_id()).await?;
        Ok(status_counts(&orders))
    }
}
