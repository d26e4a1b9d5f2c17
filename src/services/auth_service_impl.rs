//! `SeaORM` implementation of the `AuthService` trait.

use crate::config::SecurityConfig;
use crate::db::{CreateUserOutcome, Store};
use crate::services::auth_service::{AuthError, AuthService, Registration, TokenPair};
use crate::services::tokens::{Claims, TokenError, TokenIssuer, TokenKind};
use async_trait::async_trait;
use tracing::{debug, info, warn};

pub struct SeaOrmAuthService {
    store: Store,
    tokens: TokenIssuer,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub fn new(store: Store, security: SecurityConfig) -> Self {
        Self {
            store,
            tokens: TokenIssuer::from_config(&security),
            security,
        }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, registration: Registration) -> Result<String, AuthError> {
        registration.validate()?;

        let username = registration.username.trim();
        let email = registration.email.trim();

        let outcome = self
            .store
            .create_user(username, email, &registration.password, &self.security)
            .await?;

        match outcome {
            CreateUserOutcome::Created(user) => {
                info!(
                    "Registered user {} <{}> ({})",
                    user.username, user.email, user.user_id
                );
                Ok(user.user_id)
            }
            CreateUserOutcome::Conflict => Err(AuthError::Conflict(
                "Username or email already exists".to_string(),
            )),
        }
    }

    async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AuthError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "Username and password are required".to_string(),
            ));
        }

        let Some(user) = self
            .store
            .verify_user_password(username.trim(), password, &self.security)
            .await?
        else {
            debug!("Rejected login for {}", username);
            return Err(AuthError::InvalidCredentials);
        };

        let access_token = self.tokens.issue(&user.user_id, TokenKind::Access)?;
        let refresh_token = self.tokens.issue(&user.user_id, TokenKind::Refresh)?;

        // Replaces whatever refresh token the user held before
        if !self
            .store
            .set_refresh_token(&user.user_id, Some(&refresh_token))
            .await?
        {
            return Err(AuthError::Internal(format!(
                "User {} disappeared during login",
                user.user_id
            )));
        }

        info!("User {} logged in", user.username);

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        if refresh_token.trim().is_empty() {
            return Err(AuthError::Validation("Refresh token required".to_string()));
        }

        let claims = self
            .tokens
            .verify(refresh_token, TokenKind::Refresh)
            .map_err(|e| match e {
                TokenError::Expired => AuthError::RefreshTokenExpired,
                _ => AuthError::InvalidRefreshToken,
            })?;

        if !self
            .store
            .refresh_token_matches(&claims.user_id, refresh_token)
            .await?
        {
            warn!(
                "Refresh token for user {} is not the stored one",
                claims.user_id
            );
            return Err(AuthError::InvalidRefreshToken);
        }

        Ok(self.tokens.issue(&claims.user_id, TokenKind::Access)?)
    }

    fn authenticate(&self, access_token: &str) -> Result<Claims, AuthError> {
        self.tokens
            .verify(access_token, TokenKind::Access)
            .map_err(|e| match e {
                TokenError::Expired => AuthError::AccessTokenExpired,
                _ => AuthError::InvalidAccessToken,
            })
    }
}
