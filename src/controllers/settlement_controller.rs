use tracing::info;

use crate::dto::{ApiResponse, ListResponse};
use crate::models::Identity;
use crate::repositories::OrderRepository;
use crate::services::settlement::{settlements, Settlement, SettlementFilter};
use crate::utils::errors::AppError;

pub struct SettlementController {
    orders: OrderRepository,
}

impl SettlementController {
    pub fn new(orders: OrderRepository) -> Self {
        Self { orders }
    }

    pub async fn list(&self, identity: &Identity, filter: &SettlementFilter) -> Result<ListResponse<Settlement>, AppError> {
        let orders = self.orders.list(identity.owner_id()).await?;
        let items = settlements(&orders, filter)?;
        Ok(ListResponse::new(orders.len(), items))
    }

    /// Marcar como cobrado y devolver las liquidaciones refrescadas
    pub async fn mark_paid(&self, identity: &Identity, order_id: &str) -> Result<ApiResponse<ListResponse<Settlement>>, AppError> {
        self.orders.mark_paid(identity.owner_id(), order_id).await?;
        info!("💰 Pedido {} marcado como pagado", order_id);
        let refreshed = self.list(identity, &SettlementFilter::default()).await?;
        Ok(ApiResponse::success_with_message(refreshed, "Payment marked as Paid"))
    }
}
