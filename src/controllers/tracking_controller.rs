use crate::dto::{ListResponse, SearchQuery};
use crate::models::Identity;
use crate::repositories::OrderRepository;
use crate::services::tracking::{tracking_entries, TrackingEntry};
use crate::utils::errors::AppError;

pub struct TrackingController {
    orders: OrderRepository,
}

impl TrackingController {
    pub fn new(orders: OrderRepository) -> Self {
        Self { orders }
    }

    pub async fn list(&self, identity: &Identity, query: &SearchQuery) -> Result<ListResponse<TrackingEntry>, AppError> {
        let orders = self.orders.list(identity.owner_id()).await?;
        let items = tracking_entries(&orders, query.q.as_deref().unwrap_or_default());
        Ok(ListResponse::new(orders.len(), items))
    }
}
