//! Servicio de autenticación
//!
//! Registro y verificación de credenciales. El email se normaliza a
//! minúsculas antes de buscar o guardar; la contraseña sólo se guarda como
//! hash bcrypt.

use bcrypt::{hash, verify};
use tracing::{info, warn};
use validator::Validate;

use crate::dto::auth_dto::{SigninRequest, SignupRequest};
use crate::models::{Account, Identity, UserResponse};
use crate::repositories::UserRepository;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::{generate_token, JwtConfig};
use crate::utils::validation::normalize_email;

pub const BCRYPT_COST: u32 = 10;

pub struct AuthService {
    users: UserRepository,
    jwt: JwtConfig,
}

impl AuthService {
    pub fn new(users: UserRepository, jwt: JwtConfig) -> Self {
        Self { users, jwt }
    }

    /// Registrar una cuenta nueva; devuelve su id
    pub async fn register(&self, request: SignupRequest) -> AppResult<String> {
        request.validate()?;
        let email = normalize_email(&request.email);

        if self.users.find_by_email(&email).await?.is_some() {
            warn!("⚠️ Registro duplicado para {}", email);
            return Err(AppError::Conflict("Email already exists".to_string()));
        }

        let password_hash =
            hash(&request.password, BCRYPT_COST).map_err(|e| AppError::Hash(e.to_string()))?;
        let account = Account::new(request.full_name.trim().to_string(), email.clone(), password_hash);
        let id = self.users.create(&account).await?;

        info!("✅ Cuenta registrada: {}", email);
        Ok(id)
    }

    /// Verificar credenciales y emitir un token de una hora
    pub async fn authenticate(&self, request: SigninRequest) -> AppResult<(String, UserResponse)> {
        request.validate()?;
        let email = normalize_email(&request.email);

        let (id, account) = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::BadRequest("User not found".to_string()))?;

        let valid = verify(&request.password, &account.password_hash)
            .map_err(|e| AppError::Hash(e.to_string()))?;
        if !valid {
            warn!("🔒 Contraseña incorrecta para {}", email);
            return Err(AppError::BadRequest("Invalid credentials".to_string()));
        }

        let token = generate_token(&id, &self.jwt)?;
        info!("🔑 Login correcto: {}", email);
        Ok((token, UserResponse::from_account(id, &account)))
    }

    /// Cuenta del llamador
    pub async fn current_user(&self, identity: &Identity) -> AppResult<UserResponse> {
        let account = self.users.find_by_id(identity.owner_id()).await?;
        Ok(UserResponse::from_account(identity.owner_id(), &account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDocumentStore;
    use crate::utils::jwt::verify_token;
    use std::sync::Arc;

    fn service() -> AuthService {
        AuthService::new(
            UserRepository::new(Arc::new(MemoryDocumentStore::new())),
            JwtConfig {
                secret: "test-secret".to_string(),
                expiration: 3600,
            },
        )
    }

    fn signup(email: &str) -> SignupRequest {
        SignupRequest {
            full_name: "Asha Rao".to_string(),
            email: email.to_string(),
            password: "s3cret!".to_string(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_is_case_insensitive() {
        let service = service();
        service.register(signup("A@x.com")).await.unwrap();
        let err = service.register(signup("a@x.com")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref msg) if msg == "Email already exists"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_signups_create_one_account() {
        let service = Arc::new(service());
        let emails = ["A@x.com", "a@x.com", "a@X.com", "A@X.COM"];

        let handles: Vec<_> = emails
            .iter()
            .map(|email| {
                let service = service.clone();
                let request = signup(email);
                tokio::spawn(async move { service.register(request).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(AppError::Conflict(msg)) => assert_eq!(msg, "Email already exists"),
                Err(other) => panic!("unexpected error: {:?}", other),
            }
        }
        assert_eq!(created, 1);
    }

    #[tokio::test]
    async fn test_signin_outcomes() {
        let service = service();
        let id = service.register(signup("asha@x.com")).await.unwrap();

        let (token, user) = service
            .authenticate(SigninRequest {
                email: "ASHA@x.com".into(),
                password: "s3cret!".into(),
            })
            .await
            .unwrap();
        assert_eq!(user.id, id);
        assert_eq!(verify_token(&token, &service.jwt).unwrap().id, id);

        let wrong = service
            .authenticate(SigninRequest {
                email: "asha@x.com".into(),
                password: "nope".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(wrong, AppError::BadRequest(ref msg) if msg == "Invalid credentials"));

        let missing = service
            .authenticate(SigninRequest {
                email: "ghost@x.com".into(),
                password: "s3cret!".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(missing, AppError::BadRequest(ref msg) if msg == "User not found"));
    }

    #[tokio::test]
    async fn test_signup_requires_fields() {
        let service = service();
        let err = service
            .register(SignupRequest {
                full_name: " ".into(),
                email: "not-an-email".into(),
                password: String::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_password_is_hashed() {
        let service = service();
        service.register(signup("asha@x.com")).await.unwrap();
        let (_, account) = service.users.find_by_email("asha@x.com").await.unwrap().unwrap();
        assert_ne!(account.password_hash, "s3cret!");
        assert!(account.password_hash.starts_with("$2"));
    }
}
