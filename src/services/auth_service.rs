//! Authentication service - Registration and login.
//!
//! Passwords are hashed by the domain `Password` value object; tokens
//! are issued by the shared [`TokenService`].

use async_trait::async_trait;
use std::sync::Arc;

use super::token_service::{Claims, TokenResponse, TokenService};
use crate::config::ROLE_USER;
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Argon2 hash of a random value, verified against when the email is
/// unknown so both login failure paths cost the same.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$3sBqv1KXUVd3/LcEBsXCaD7H37xJ3rM+KwL2RmVb5uo";

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user holding the default role
    async fn register(&self, email: String, password: String) -> AppResult<User>;

    /// Login and return an access token
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Verify an access token and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    tokens: TokenService,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, tokens: TokenService) -> Self {
        Self { uow, tokens }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, email: String, password: String) -> AppResult<User> {
        let email = normalize_email(&email);
        if self.uow.users().find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email is already registered"));
        }

        let password_hash = Password::new(&password)?.into_string();
        let user = self
            .uow
            .users()
            .create(email, password_hash, vec![ROLE_USER.to_string()])
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let email = normalize_email(&email);
        let user = self.uow.users().find_by_email(&email).await?;

        let stored_hash = user
            .as_ref()
            .map(|u| u.password_hash.as_str())
            .unwrap_or(DUMMY_HASH);
        let password_valid = Password::from_hash(stored_hash).verify(&password);

        match user {
            Some(user) if password_valid => self.tokens.issue(&user),
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        self.tokens.validate(token)
    }
}
