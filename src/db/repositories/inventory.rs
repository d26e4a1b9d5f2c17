use crate::entities::{inventory, offices, prelude::*};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder, Set,
    TransactionTrait,
};
use tracing::{debug, info};

use crate::db::is_unique_violation;

/// An inventory row joined with its office name.
#[derive(Debug, Clone)]
pub struct ItemRecord {
    pub id: String,
    pub office_id: i32,
    pub office_name: String,
    pub computer_device: Option<String>,
    pub pc_name: Option<String>,
    pub brand_model: Option<String>,
    pub processor: Option<String>,
    pub motherboard: Option<String>,
    pub ram: Option<String>,
    pub graphics_processing: Option<String>,
    pub internal_memory: Option<String>,
    pub mac_address: String,
    pub operating_system: Option<String>,
    pub microsoft_office: Option<String>,
    pub antivirus_software: Option<String>,
    pub status: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Every writable column of an inventory row.
#[derive(Debug, Clone, Default)]
pub struct ItemFields {
    pub office_id: i32,
    pub computer_device: Option<String>,
    pub pc_name: Option<String>,
    pub brand_model: Option<String>,
    pub processor: Option<String>,
    pub motherboard: Option<String>,
    pub ram: Option<String>,
    pub graphics_processing: Option<String>,
    pub internal_memory: Option<String>,
    pub mac_address: String,
    pub operating_system: Option<String>,
    pub microsoft_office: Option<String>,
    pub antivirus_software: Option<String>,
    pub status: Option<String>,
}

/// Result of a create or update that ran to completion without a database fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(String),
    OfficeMissing,
    ItemMissing,
    DuplicateMac,
}

pub struct InventoryRepository {
    conn: DatabaseConnection,
}

impl InventoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_record(item: inventory::Model, office: Option<offices::Model>) -> ItemRecord {
        ItemRecord {
            id: item.id,
            office_id: item.office_id,
            office_name: office.map(|o| o.name).unwrap_or_default(),
            computer_device: item.computer_device,
            pc_name: item.pc_name,
            brand_model: item.brand_model,
            processor: item.processor,
            motherboard: item.motherboard,
            ram: item.ram,
            graphics_processing: item.graphics_processing,
            internal_memory: item.internal_memory,
            mac_address: item.mac_address,
            operating_system: item.operating_system,
            microsoft_office: item.microsoft_office,
            antivirus_software: item.antivirus_software,
            status: item.status,
            timestamp: item.timestamp,
        }
    }

    fn active_model(id: String, fields: ItemFields, now: DateTime<Utc>) -> inventory::ActiveModel {
        inventory::ActiveModel {
            id: Set(id),
            office_id: Set(fields.office_id),
            computer_device: Set(fields.computer_device),
            pc_name: Set(fields.pc_name),
            brand_model: Set(fields.brand_model),
            processor: Set(fields.processor),
            motherboard: Set(fields.motherboard),
            ram: Set(fields.ram),
            graphics_processing: Set(fields.graphics_processing),
            internal_memory: Set(fields.internal_memory),
            mac_address: Set(fields.mac_address),
            operating_system: Set(fields.operating_system),
            microsoft_office: Set(fields.microsoft_office),
            antivirus_software: Set(fields.antivirus_software),
            status: Set(fields.status),
            timestamp: Set(now),
        }
    }

    /// All items, most recently modified first.
    pub async fn list(&self) -> Result<Vec<ItemRecord>> {
        let rows = Inventory::find()
            .find_also_related(Offices)
            .order_by_desc(inventory::Column::Timestamp)
            .all(&self.conn)
            .await
            .context("Failed to list inventory items")?;

        Ok(rows
            .into_iter()
            .map(|(item, office)| Self::map_record(item, office))
            .collect())
    }

    pub async fn get(&self, id: &str) -> Result<Option<ItemRecord>> {
        let row = Inventory::find_by_id(id.to_string())
            .find_also_related(Offices)
            .one(&self.conn)
            .await
            .context("Failed to query inventory item")?;

        Ok(row.map(|(item, office)| Self::map_record(item, office)))
    }

    pub async fn count(&self) -> Result<u64> {
        Inventory::find()
            .count(&self.conn)
            .await
            .context("Failed to count inventory items")
    }

    /// Validates the office and inserts in one transaction.
    pub async fn create(&self, fields: ItemFields) -> Result<WriteOutcome> {
        let txn = self.conn.begin().await?;

        if Offices::find_by_id(fields.office_id).one(&txn).await?.is_none() {
            return Ok(WriteOutcome::OfficeMissing);
        }

        let id = uuid::Uuid::new_v4().to_string();
        let mac = fields.mac_address.clone();
        let active = Self::active_model(id.clone(), fields, Utc::now());

        match Inventory::insert(active).exec_without_returning(&txn).await {
            Ok(_) => {}
            Err(err) if is_unique_violation(&err) => {
                debug!("Rejected duplicate MAC address {}", mac);
                return Ok(WriteOutcome::DuplicateMac);
            }
            Err(err) => return Err(err).context("Failed to insert inventory item"),
        }

        txn.commit().await?;
        info!("Added inventory item {} ({})", id, mac);
        Ok(WriteOutcome::Written(id))
    }

    /// Overwrites every column of an existing item in one transaction.
    pub async fn update(&self, id: &str, fields: ItemFields) -> Result<WriteOutcome> {
        let txn = self.conn.begin().await?;

        if Inventory::find_by_id(id.to_string())
            .one(&txn)
            .await?
            .is_none()
        {
            return Ok(WriteOutcome::ItemMissing);
        }

        if Offices::find_by_id(fields.office_id).one(&txn).await?.is_none() {
            return Ok(WriteOutcome::OfficeMissing);
        }

        let active = Self::active_model(id.to_string(), fields, Utc::now());

        match active.update(&txn).await {
            Ok(_) => {}
            Err(err) if is_unique_violation(&err) => return Ok(WriteOutcome::DuplicateMac),
            Err(DbErr::RecordNotUpdated) => return Ok(WriteOutcome::ItemMissing),
            Err(err) => return Err(err).context("Failed to update inventory item"),
        }

        txn.commit().await?;
        info!("Updated inventory item {}", id);
        Ok(WriteOutcome::Written(id.to_string()))
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = Inventory::delete_by_id(id.to_string())
            .exec(&self.conn)
            .await
            .context("Failed to delete inventory item")?;

        Ok(result.rows_affected > 0)
    }
}
