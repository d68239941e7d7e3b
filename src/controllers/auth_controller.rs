use crate::dto::auth_dto::{MessageResponse, SigninRequest, SigninResponse, SignupRequest};
use crate::models::{Identity, UserResponse};
use crate::services::AuthService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct AuthController {
    service: AuthService,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: AuthService::new(state.users(), state.jwt.clone()),
        }
    }

    pub async fn signup(&self, request: SignupRequest) -> Result<MessageResponse, AppError> {
        self.service.register(request).await?;
        Ok(MessageResponse::new("User registered successfully!"))
    }

    pub async fn signin(&self, request: SigninRequest) -> Result<SigninResponse, AppError> {
        let (token, user) = self.service.authenticate(request).await?;
        Ok(SigninResponse { token, user })
    }

    pub async fn me(&self, identity: &Identity) -> Result<UserResponse, AppError> {
        self.service.current_user(identity).await
    }
}
