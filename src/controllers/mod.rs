//! Controladores HTTP
//!
//! Cada controlador se construye por request a partir del estado y
//! devuelve DTOs listos para serializar.

pub mod auth_controller;
pub mod dashboard_controller;
pub mod driver_controller;
pub mod kyc_controller;
pub mod order_controller;
pub mod settlement_controller;
pub mod tracking_controller;
pub mod vehicle_controller;
