//! Authentication service - credentials, signup and session tokens.
//!
//! Tokens are HS256 JWTs carrying the username, user id and role.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, MAX_USERNAME_LENGTH};
use crate::domain::{Password, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username
    pub sub: String,
    /// User id
    pub uid: i64,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Returned by login and signup
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthResponse {
    /// Bearer token for the `Authorization` header
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    #[schema(example = "user")]
    pub username: String,
    pub role: UserRole,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and issue a token.
    ///
    /// Unknown users, wrong passwords and disabled accounts all fail with
    /// the same `InvalidCredentials` error.
    async fn login(&self, username: String, password: String) -> AppResult<AuthResponse>;

    /// Self-service registration. Only the USER role can be obtained this way.
    async fn signup(
        &self,
        username: String,
        password: String,
        requested_role: Option<String>,
    ) -> AppResult<AuthResponse>;

    /// Create an administrator. Callers must already hold the ADMIN role.
    async fn register_admin(&self, username: String, password: String) -> AppResult<User>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }

    fn issue_token(&self, user: &User) -> AppResult<AuthResponse> {
        let now = Utc::now();
        let expires_at = Duration::try_hours(self.config.jwt_expiration_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| AppError::Config("JWT expiration is out of range".to_string()))?;

        let claims = Claims {
            sub: user.username.clone(),
            uid: user.id,
            role: user.role.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret_bytes()),
        )?;

        Ok(AuthResponse {
            token,
            username: user.username.clone(),
            role: user.role,
        })
    }

    async fn create_user(
        &self,
        username: String,
        password: String,
        role: UserRole,
    ) -> AppResult<User> {
        if username.trim().is_empty() || username.chars().count() > MAX_USERNAME_LENGTH as usize {
            return Err(AppError::validation(format!(
                "Username must be 1 to {} characters",
                MAX_USERNAME_LENGTH
            )));
        }

        if self.uow.users().exists_by_username(&username).await? {
            return Err(AppError::conflict("Username"));
        }

        let password_hash = Password::new(&password)?.into_string();
        let user = self.uow.users().create(username, password_hash, role).await?;

        tracing::info!(user_id = user.id, username = %user.username, role = %user.role, "User registered");
        Ok(user)
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login(&self, username: String, password: String) -> AppResult<AuthResponse> {
        let user = self.uow.users().find_by_username(&username).await?;

        // Verify against a dummy hash when the user is missing so response
        // timing does not reveal which usernames exist.
        let stored = match &user {
            Some(user) => Password::from_hash(user.password_hash.as_str()),
            None => Password::unmatchable(),
        };
        let password_valid = stored.verify(&password);

        match user {
            Some(user) if password_valid && user.enabled => self.issue_token(&user),
            _ => {
                tracing::debug!(username = %username, "Login rejected");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    async fn signup(
        &self,
        username: String,
        password: String,
        requested_role: Option<String>,
    ) -> AppResult<AuthResponse> {
        if UserRole::from_requested(requested_role.as_deref()).is_admin() {
            return Err(AppError::forbidden(
                "Administrator accounts can only be created by an administrator",
            ));
        }

        let user = self.create_user(username, password, UserRole::User).await?;
        self.issue_token(&user)
    }

    async fn register_admin(&self, username: String, password: String) -> AppResult<User> {
        self.create_user(username, password, UserRole::Admin).await
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
