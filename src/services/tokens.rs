//! Signed access and refresh tokens (HS256 JWT).

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: String,
    pub exp: i64,
    pub iat: i64,
    /// Unique per issued token, so two logins never yield the same refresh token
    pub jti: String,
    pub typ: TokenKind,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    /// Malformed, bad signature, or a token of the other kind
    #[error("Invalid token")]
    Invalid,

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    #[must_use]
    pub fn new(secret: &str, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl,
            refresh_ttl,
        }
    }

    #[must_use]
    pub fn from_config(config: &SecurityConfig) -> Self {
        Self::new(
            &config.jwt_secret,
            Duration::minutes(config.access_token_ttl_minutes),
            Duration::days(config.refresh_token_ttl_days),
        )
    }

    pub fn issue(&self, user_id: &str, kind: TokenKind) -> Result<String, TokenError> {
        let now = Utc::now();
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };

        let claims = Claims {
            user_id: user_id.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
            typ: kind,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Checks signature, expiry (no leeway) and that the token is of `kind`.
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            },
        )?;

        if data.claims.typ != kind {
            return Err(TokenError::Invalid);
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-test-secret-test-secret";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(SECRET, Duration::minutes(15), Duration::days(7))
    }

    #[test]
    fn issued_tokens_verify_and_carry_user_id() {
        let issuer = issuer();
        let token = issuer.issue("user-1", TokenKind::Access).unwrap();
        let claims = issuer.verify(&token, TokenKind::Access).unwrap();

        assert_eq!(claims.user_id, "user-1");
        assert_eq!(claims.typ, TokenKind::Access);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn refresh_outlives_access() {
        let issuer = issuer();
        let access = issuer.issue("u", TokenKind::Access).unwrap();
        let refresh = issuer.issue("u", TokenKind::Refresh).unwrap();

        let access = issuer.verify(&access, TokenKind::Access).unwrap();
        let refresh = issuer.verify(&refresh, TokenKind::Refresh).unwrap();
        assert!(refresh.exp - access.exp > Duration::days(6).num_seconds());
    }

    #[test]
    fn consecutive_tokens_differ() {
        let issuer = issuer();
        let a = issuer.issue("u", TokenKind::Refresh).unwrap();
        let b = issuer.issue("u", TokenKind::Refresh).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let expired = TokenIssuer::new(SECRET, Duration::seconds(-30), Duration::seconds(-30));
        let token = expired.issue("u", TokenKind::Access).unwrap();

        assert_eq!(
            issuer().verify(&token, TokenKind::Access).unwrap_err(),
            TokenError::Expired
        );
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let other = TokenIssuer::new(
            "another-secret-another-secret-xx",
            Duration::minutes(15),
            Duration::days(7),
        );
        let token = other.issue("u", TokenKind::Refresh).unwrap();

        assert_eq!(
            issuer().verify(&token, TokenKind::Refresh).unwrap_err(),
            TokenError::Invalid
        );
    }

    #[test]
    fn garbage_is_invalid() {
        assert_eq!(
            issuer().verify("not.a.jwt", TokenKind::Access).unwrap_err(),
            TokenError::Invalid
        );
    }

    #[test]
    fn kinds_are_not_interchangeable() {
        let issuer = issuer();
        let access = issuer.issue("u", TokenKind::Access).unwrap();
        let refresh = issuer.issue("u", TokenKind::Refresh).unwrap();

        assert_eq!(
            issuer.verify(&access, TokenKind::Refresh).unwrap_err(),
            TokenError::Invalid
        );
        assert_eq!(
            issuer.verify(&refresh, TokenKind::Access).unwrap_err(),
            TokenError::Invalid
        );
    }
}
