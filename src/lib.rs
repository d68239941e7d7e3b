//! Backend del panel de administración logística
//!
//! Cuentas con verificación KYC, pedidos, conductores, vehículos,
//! liquidaciones y seguimiento, todo aislado por cuenta propietaria.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
pub mod store;
pub mod utils;

pub use routes::create_app;
pub use state::AppState;
