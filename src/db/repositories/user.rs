use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tokio::task;

use crate::config::SecurityConfig;
use crate::db::is_unique_violation;
use crate::entities::{prelude::*, users};

/// User data returned from repository (without sensitive password hash)
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: String,
    pub username: String,
    pub email: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            user_id: model.user_id,
            username: model.username,
            email: model.email,
        }
    }
}

#[derive(Debug, Clone)]
pub enum CreateUserOutcome {
    Created(User),
    /// Username or email already taken
    Conflict,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Get user by username
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")?;

        Ok(user.map(User::from))
    }

    /// Hashes the password and inserts the user.
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password: &str,
        config: &SecurityConfig,
    ) -> Result<CreateUserOutcome> {
        let password = password.to_string();
        let config = config.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, &config))
            .await
            .context("Password hashing task panicked")??;

        let active = users::ActiveModel {
            user_id: Set(uuid::Uuid::new_v4().to_string()),
            username: Set(username.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            refresh_token: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        match Users::insert(active).exec_with_returning(&self.conn).await {
            Ok(model) => Ok(CreateUserOutcome::Created(User::from(model))),
            Err(err) if is_unique_violation(&err) => Ok(CreateUserOutcome::Conflict),
            Err(err) => Err(err).context("Failed to insert user"),
        }
    }

    /// Verify password for a user, returning the user on success.
    /// Note: This uses `spawn_blocking` because Argon2 hashing is CPU-intensive
    /// and would block the async runtime if run directly.
    ///
    /// Unknown usernames still pay for one Argon2 run with the configured
    /// params, so response time does not reveal which accounts exist.
    pub async fn verify_password(
        &self,
        username: &str,
        password: &str,
        config: &SecurityConfig,
    ) -> Result<Option<User>> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user for password verification")?;

        let Some(user) = user else {
            let password = password.to_string();
            let config = config.clone();
            task::spawn_blocking(move || hash_password(&password, &config))
                .await
                .context("Password hashing task panicked")??;
            return Ok(None);
        };

        let password_hash = user.password_hash.clone();
        let password = password.to_string();

        let is_valid = task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash)
                .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

            Ok::<bool, anyhow::Error>(
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
            )
        })
        .await
        .context("Password verification task panicked")??;

        Ok(is_valid.then(|| User::from(user)))
    }

    /// Replaces the stored refresh token. Returns false if the user is gone.
    pub async fn set_refresh_token(&self, user_id: &str, token: Option<&str>) -> Result<bool> {
        let result = Users::update_many()
            .col_expr(
                users::Column::RefreshToken,
                sea_orm::sea_query::Expr::value(token.map(ToString::to_string)),
            )
            .filter(users::Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await
            .context("Failed to store refresh token")?;

        Ok(result.rows_affected > 0)
    }

    /// Whether `token` is the refresh token currently stored for `user_id`.
    pub async fn refresh_token_matches(&self, user_id: &str, token: &str) -> Result<bool> {
        let user = users::Entity::find()
            .filter(users::Column::UserId.eq(user_id))
            .filter(users::Column::RefreshToken.eq(token))
            .one(&self.conn)
            .await
            .context("Failed to query refresh token")?;

        Ok(user.is_some())
    }
}

/// Hash a password using Argon2id with the configured cost params.
pub fn hash_password(password: &str, config: &SecurityConfig) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = Params::new(
        config.argon2_memory_cost_kib,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None, // output length (use default)
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_salted_and_verifiable() {
        let config = SecurityConfig::default();
        let first = hash_password("correct horse", &config).unwrap();
        let second = hash_password("correct horse", &config).unwrap();

        assert_ne!(first, second);
        assert!(!first.contains("correct horse"));

        let parsed = PasswordHash::new(&first).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"correct horse", &parsed)
                .is_ok()
        );
        assert!(
            Argon2::default()
                .verify_password(b"wrong horse", &parsed)
                .is_err()
        );
    }

    #[test]
    fn invalid_params_are_rejected() {
        let config = SecurityConfig {
            argon2_time_cost: 0,
            ..SecurityConfig::default()
        };
        assert!(hash_password("pw", &config).is_err());
    }
}
