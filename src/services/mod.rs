//! Services module
//!
//! Lógica de negocio de la aplicación: autenticación, búsqueda, asistente y
//! envío KYC, agregados del panel, liquidaciones y seguimiento.

pub mod auth_service;
pub mod dashboard_service;
pub mod kyc_service;
pub mod kyc_workflow;
pub mod search;
pub mod settlement;
pub mod tracking;

pub use auth_service::AuthService;
pub use kyc_service::KycService;
pub use kyc_workflow::{KycWizard, WizardAction};
