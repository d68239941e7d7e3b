use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::UserResponse;
use crate::utils::validation::validate_not_blank;

// Signup request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub full_name: String,

    #[serde(default)]
    #[validate(email)]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Required"))]
    pub password: String,
}

// Signin request
#[derive(Debug, Deserialize, Validate)]
pub struct SigninRequest {
    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Required"))]
    pub password: String,
}

// Mensaje simple
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// Signin response
#[derive(Debug, Serialize)]
pub struct SigninResponse {
    pub token: String,
    pub user: UserResponse,
}
