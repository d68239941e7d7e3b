//! Repositorios sobre el almacén de documentos

pub mod driver_repository;
pub mod order_repository;
pub mod owned;
pub mod user_repository;
pub mod vehicle_repository;

pub use driver_repository::DriverRepository;
pub use order_repository::OrderRepository;
pub use owned::{OwnedEntity, OwnedRepository};
pub use user_repository::UserRepository;
pub use vehicle_repository::VehicleRepository;
