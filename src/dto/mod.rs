//! DTOs de la API HTTP

pub mod auth_dto;
pub mod common;
pub mod kyc_dto;

pub use common::{ApiResponse, ListResponse, OrderQuery, SearchQuery};
