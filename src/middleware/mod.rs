//! Middleware del sistema
//!
//! Autenticación JWT, acceso condicionado al KYC y CORS.

pub mod auth;
pub mod cors;

pub use auth::*;
pub use cors::*;
