//! `SeaORM` implementation of the `InventoryService` trait.

use crate::db::{ItemRecord, Office, Store, WriteOutcome};
use crate::services::inventory_service::{InventoryError, InventoryService, ItemInput};
use async_trait::async_trait;
use tracing::debug;

pub struct SeaOrmInventoryService {
    store: Store,
}

impl SeaOrmInventoryService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

fn map_outcome(
    outcome: WriteOutcome,
    id: &str,
    office_id: i32,
    mac: &str,
) -> Result<String, InventoryError> {
    match outcome {
        WriteOutcome::Written(id) => Ok(id),
        WriteOutcome::OfficeMissing => Err(InventoryError::InvalidOffice(office_id)),
        WriteOutcome::ItemMissing => Err(InventoryError::ItemNotFound(id.to_string())),
        WriteOutcome::DuplicateMac => Err(InventoryError::DuplicateMac(mac.to_string())),
    }
}

#[async_trait]
impl InventoryService for SeaOrmInventoryService {
    async fn list_offices(&self) -> Result<Vec<Office>, InventoryError> {
        Ok(self.store.list_offices().await?)
    }

    async fn list_items(&self) -> Result<Vec<ItemRecord>, InventoryError> {
        Ok(self.store.list_items().await?)
    }

    async fn get_item(&self, id: &str) -> Result<ItemRecord, InventoryError> {
        self.store
            .get_item(id)
            .await?
            .ok_or_else(|| InventoryError::ItemNotFound(id.to_string()))
    }

    async fn create_item(&self, input: ItemInput) -> Result<String, InventoryError> {
        let fields = input.into_fields()?;
        let office_id = fields.office_id;
        let mac = fields.mac_address.clone();

        let outcome = self.store.create_item(fields).await?;
        map_outcome(outcome, "", office_id, &mac)
    }

    async fn update_item(&self, id: &str, input: ItemInput) -> Result<(), InventoryError> {
        let fields = input.into_fields()?;
        let office_id = fields.office_id;
        let mac = fields.mac_address.clone();

        let outcome = self.store.update_item(id, fields).await?;
        map_outcome(outcome, id, office_id, &mac).map(|_| ())
    }

    async fn delete_item(&self, id: &str) -> Result<bool, InventoryError> {
        let deleted = self.store.delete_item(id).await?;
        if !deleted {
            debug!("Delete of unknown inventory item {} ignored", id);
        }
        Ok(deleted)
    }
}
