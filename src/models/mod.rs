//! Modelos del sistema
//!
//! Documentos de las colecciones del panel (pedidos, conductores, vehículos,
//! cuentas) y los tipos del registro KYC.

pub mod auth;
pub mod driver;
pub mod kyc;
pub mod lenient;
pub mod order;
pub mod user;
pub mod vehicle;

pub use auth::Identity;
pub use driver::{DocumentRef, Driver, DriverDocumentSlot, DriverDocuments};
pub use kyc::{DocumentKind, KycDocuments, KycRecord, KycStatus, OperationalField, OperationalInfo, UploadMethod};
pub use order::Order;
pub use user::{Account, UserResponse};
pub use vehicle::Vehicle;
