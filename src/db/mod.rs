use crate::config::SecurityConfig;
use anyhow::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr, Statement,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::inventory::{ItemFields, ItemRecord, WriteOutcome};
pub use repositories::office::Office;
pub use repositories::user::{CreateUserOutcome, User};

/// True when the database rejected a write on a UNIQUE constraint.
#[must_use]
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if let Some(path_str) = db_url.strip_prefix("sqlite:")
            && !path_str.starts_with(":memory:")
        {
            let path_str = path_str.trim_start_matches("//");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn office_repo(&self) -> repositories::office::OfficeRepository {
        repositories::office::OfficeRepository::new(self.conn.clone())
    }

    fn inventory_repo(&self) -> repositories::inventory::InventoryRepository {
        repositories::inventory::InventoryRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    // Offices

    pub async fn list_offices(&self) -> Result<Vec<Office>> {
        self.office_repo().list().await
    }

    pub async fn get_office_by_name(&self, name: &str) -> Result<Option<Office>> {
        self.office_repo().get_by_name(name).await
    }

    pub async fn seed_offices(&self, names: &[String]) -> Result<u64> {
        self.office_repo().ensure(names).await
    }

    // Inventory

    pub async fn list_items(&self) -> Result<Vec<ItemRecord>> {
        self.inventory_repo().list().await
    }

    pub async fn get_item(&self, id: &str) -> Result<Option<ItemRecord>> {
        self.inventory_repo().get(id).await
    }

    pub async fn count_items(&self) -> Result<u64> {
        self.inventory_repo().count().await
    }

    pub async fn create_item(&self, fields: ItemFields) -> Result<WriteOutcome> {
        self.inventory_repo().create(fields).await
    }

    pub async fn update_item(&self, id: &str, fields: ItemFields) -> Result<WriteOutcome> {
        self.inventory_repo().update(id, fields).await
    }

    pub async fn delete_item(&self, id: &str) -> Result<bool> {
        self.inventory_repo().delete(id).await
    }

    // Users

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
        config: &SecurityConfig,
    ) -> Result<CreateUserOutcome> {
        self.user_repo()
            .create(username, email, password, config)
            .await
    }

    pub async fn verify_user_password(
        &self,
        username: &str,
        password: &str,
        config: &SecurityConfig,
    ) -> Result<Option<User>> {
        self.user_repo()
            .verify_password(username, password, config)
            .await
    }

    pub async fn set_refresh_token(&self, user_id: &str, token: Option<&str>) -> Result<bool> {
        self.user_repo().set_refresh_token(user_id, token).await
    }

    pub async fn refresh_token_matches(&self, user_id: &str, token: &str) -> Result<bool> {
        self.user_repo().refresh_token_matches(user_id, token).await
    }
}
