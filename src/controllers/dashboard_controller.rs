use crate::models::Identity;
use crate::services::dashboard_service::{summarize, DashboardSummary};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct DashboardController {
    state: AppState,
}

impl DashboardController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Resumen del panel, recalculado desde las colecciones de la cuenta
    pub async fn summary(&self, identity: &Identity) -> Result<DashboardSummary, AppError> {
        let owner = identity.owner_id();
        let orders = self.state.orders().list(owner).await?;
        let drivers = self.state.drivers().list(owner).await?;
        let vehicles = self.state.vehicles().list(owner).await?;
        let account = self.state.users().find_by_id(owner).await?;

        Ok(summarize(&orders, &drivers, &vehicles, account.kyc_status()))
    }
}
