//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación,
//! JWT, fechas e importes.

pub mod amount;
pub mod errors;
pub mod jwt;
pub mod timestamp;
pub mod validation;
