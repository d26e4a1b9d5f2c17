//! Domain service for authentication and user management.
//!
//! Handles registration, login, refresh-token exchange and access-token checks.

use serde::Serialize;
use thiserror::Error;

use super::tokens::{Claims, TokenError};

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Same error for unknown usernames and wrong passwords.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    /// Malformed, badly signed, or no longer the stored token.
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Access token expired")]
    AccessTokenExpired,

    #[error("Invalid access token")]
    InvalidAccessToken,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Registration form as submitted; blank fields are rejected.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl Registration {
    pub fn validate(&self) -> Result<(), AuthError> {
        let fields = [
            &self.username,
            &self.email,
            &self.password,
            &self.confirm_password,
        ];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(AuthError::Validation("All fields required".to_string()));
        }

        if self.password != self.confirm_password {
            return Err(AuthError::Validation("Passwords must match".to_string()));
        }

        if !self.email.contains('@') {
            return Err(AuthError::Validation("Invalid email address".to_string()));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates a user and returns its public user id.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] for missing fields or mismatched passwords,
    /// [`AuthError::Conflict`] if the username or email is taken.
    async fn register(&self, registration: Registration) -> Result<String, AuthError>;

    /// Verifies credentials, issues a token pair and stores the refresh token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AuthError>;

    /// Exchanges the user's current refresh token for a new access token.
    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError>;

    /// Verifies an access token for a protected request.
    fn authenticate(&self, access_token: &str) -> Result<Claims, AuthError>;
}
