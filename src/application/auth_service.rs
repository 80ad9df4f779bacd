use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{CreateUser, LoginRequest, User};
use crate::infrastructure::security::{
    generate_token, hash_password, validate_token, verify_password,
};
use anyhow::Result;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, trace, warn};
use uuid::Uuid;

/// Signed token paired with the user it was issued for.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: User,
}

pub struct AuthService<R: UserRepository> {
    user_repository: Arc<R>,
    jwt_secret: String,
    token_ttl: Duration,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(user_repository: Arc<R>, jwt_secret: String, token_ttl: Duration) -> Self {
        Self {
            user_repository,
            jwt_secret,
            token_ttl,
        }
    }

    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn signup(&self, req: CreateUser) -> Result<Session> {
        trace!("Starting signup");
        let req = req.normalized();
        req.validate()?;

        let password_hash = hash_password(&req.password).map_err(|e| {
            error!(error = %e, "Failed to hash password");
            DomainError::Internal(format!("Failed to hash password: {}", e))
        })?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            email: req.email,
            name: req.name.trim().to_string(),
            password_hash,
            created_at: Utc::now(),
            is_premium: false,
        };

        debug!(user_id = %user.id, "Saving user to repository");
        self.user_repository.insert_user(user.clone()).await?;

        let token = self.issue_token(&user.id)?;
        info!(user_id = %user.id, email = %user.email, "User signed up");

        Ok(Session { token, user })
    }

    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn login(&self, req: LoginRequest) -> Result<Session> {
        trace!("Starting login");
        let req = req.normalized();
        req.validate()?;

        let user = self
            .user_repository
            .find_user_by_email(&req.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %req.email, "User not found during login");
                DomainError::InvalidCredentials
            })?;

        let is_valid = verify_password(&req.password, &user.password_hash).map_err(|e| {
            error!(error = %e, "Failed to verify password");
            DomainError::Internal(format!("Failed to verify password: {}", e))
        })?;

        if !is_valid {
            warn!(user_id = %user.id, "Invalid password during login");
            return Err(DomainError::InvalidCredentials.into());
        }

        let token = self.issue_token(&user.id)?;
        info!(user_id = %user.id, email = %user.email, "Login successful");

        Ok(Session { token, user })
    }

    #[instrument(skip(self))]
    pub async fn profile(&self, user_id: &str) -> Result<User> {
        self.user_repository
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("User not found: {}", user_id)).into())
    }

    /// Resolves a bearer token to the stored user it was issued for.
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: &str) -> Result<User> {
        let user_id = validate_token(token, &self.jwt_secret).map_err(|e| {
            warn!(error = %e, "Rejected bearer token");
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    DomainError::Unauthorized("Token expired".to_string())
                }
                _ => DomainError::Unauthorized("Invalid token".to_string()),
            }
        })?;

        let user = self
            .user_repository
            .find_user_by_id(&user_id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user_id, "Token subject not found");
                DomainError::Unauthorized("User not found".to_string())
            })?;

        trace!(user_id = %user.id, "Bearer token accepted");
        Ok(user)
    }

    fn issue_token(&self, user_id: &str) -> Result<String> {
        generate_token(user_id, &self.jwt_secret, self.token_ttl).map_err(|e| {
            error!(error = %e, "Failed to generate token");
            DomainError::Internal(format!("Failed to generate token: {}", e)).into()
        })
    }
}
