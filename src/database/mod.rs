//! Módulo de base de datos
//!
//! Maneja la conexión con PostgreSQL o el almacén en memoria

pub mod connection;

pub use connection::connect_document_store;
