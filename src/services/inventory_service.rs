//! Domain service for offices and inventory items.

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::db::{ItemFields, ItemRecord, Office};

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Item {0} not found")]
    ItemNotFound(String),

    #[error("Invalid office ID")]
    InvalidOffice(i32),

    #[error("Duplicate MAC address")]
    DuplicateMac(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for InventoryError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for InventoryError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// An item as submitted for create or full replace.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ItemInput {
    #[serde(deserialize_with = "office_id_from_number_or_string")]
    pub office_id: Option<i32>,
    pub computer_device: Option<String>,
    pub pc_name: Option<String>,
    pub brand_model: Option<String>,
    pub processor: Option<String>,
    pub motherboard: Option<String>,
    pub ram: Option<String>,
    pub graphics_processing: Option<String>,
    pub internal_memory: Option<String>,
    pub mac_address: Option<String>,
    pub operating_system: Option<String>,
    pub microsoft_office: Option<String>,
    pub antivirus_software: Option<String>,
    pub status: Option<String>,
}

/// Form selects often post the office id as a string.
fn office_id_from_number_or_string<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i32),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("office_id is not a number: {s}"))),
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ItemInput {
    /// Trims every field, checks the required ones and normalizes the MAC address.
    pub fn into_fields(self) -> Result<ItemFields, InventoryError> {
        let computer_device = clean(self.computer_device);
        let pc_name = clean(self.pc_name);
        let brand_model = clean(self.brand_model);
        let mac_address = clean(self.mac_address).map(|m| m.to_uppercase());

        let (office_id, computer_device, pc_name, brand_model, mac_address) = match (
            self.office_id,
            computer_device,
            pc_name,
            brand_model,
            mac_address,
        ) {
            (Some(office_id), cd @ Some(_), pc @ Some(_), bm @ Some(_), Some(mac)) => {
                (office_id, cd, pc, bm, mac)
            }
            (office_id, cd, pc, bm, mac) => {
                let missing: Vec<&str> = [
                    ("office_id", office_id.is_none()),
                    ("computer_device", cd.is_none()),
                    ("pc_name", pc.is_none()),
                    ("brand_model", bm.is_none()),
                    ("mac_address", mac.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();

                return Err(InventoryError::Validation(format!(
                    "Missing required fields: {}",
                    missing.join(", ")
                )));
            }
        };

        Ok(ItemFields {
            office_id,
            computer_device,
            pc_name,
            brand_model,
            processor: clean(self.processor),
            motherboard: clean(self.motherboard),
            ram: clean(self.ram),
            graphics_processing: clean(self.graphics_processing),
            internal_memory: clean(self.internal_memory),
            mac_address,
            operating_system: clean(self.operating_system),
            microsoft_office: clean(self.microsoft_office),
            antivirus_software: clean(self.antivirus_software),
            status: clean(self.status),
        })
    }
}

#[async_trait::async_trait]
pub trait InventoryService: Send + Sync {
    async fn list_offices(&self) -> Result<Vec<Office>, InventoryError>;

    /// All items joined with office name, newest modification first.
    async fn list_items(&self) -> Result<Vec<ItemRecord>, InventoryError>;

    /// # Errors
    ///
    /// Returns [`InventoryError::ItemNotFound`] if no item has this id.
    async fn get_item(&self, id: &str) -> Result<ItemRecord, InventoryError>;

    /// Creates an item and returns its new id.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvalidOffice`] or [`InventoryError::DuplicateMac`]
    /// without writing anything.
    async fn create_item(&self, input: ItemInput) -> Result<String, InventoryError>;

    /// Replaces every field of an existing item.
    async fn update_item(&self, id: &str, input: ItemInput) -> Result<(), InventoryError>;

    /// Returns whether a row was removed. Missing ids are not an error.
    async fn delete_item(&self, id: &str) -> Result<bool, InventoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ItemInput {
        ItemInput {
            office_id: Some(1),
            computer_device: Some("Desktop".to_string()),
            pc_name: Some(" PC-01 ".to_string()),
            brand_model: Some("Dell OptiPlex 7090".to_string()),
            mac_address: Some("aa:bb:cc:dd:ee:ff".to_string()),
            ram: Some("   ".to_string()),
            ..ItemInput::default()
        }
    }

    #[test]
    fn fields_are_trimmed_and_mac_uppercased() {
        let fields = input().into_fields().unwrap();
        assert_eq!(fields.pc_name.as_deref(), Some("PC-01"));
        assert_eq!(fields.mac_address, "AA:BB:CC:DD:EE:FF");
        assert_eq!(fields.ram, None);
    }

    #[test]
    fn missing_required_fields_are_listed() {
        let item = ItemInput {
            pc_name: None,
            mac_address: Some(String::new()),
            ..input()
        };

        match item.into_fields() {
            Err(InventoryError::Validation(msg)) => {
                assert!(msg.contains("pc_name"));
                assert!(msg.contains("mac_address"));
                assert!(!msg.contains("office_id"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn empty_input_lists_every_required_field() {
        match ItemInput::default().into_fields() {
            Err(InventoryError::Validation(msg)) => assert_eq!(
                msg,
                "Missing required fields: office_id, computer_device, pc_name, brand_model, mac_address"
            ),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn missing_device_type_is_rejected() {
        let item = ItemInput {
            computer_device: None,
            ..input()
        };
        assert!(matches!(
            item.into_fields(),
            Err(InventoryError::Validation(msg)) if msg.contains("computer_device")
        ));
    }

    #[test]
    fn office_id_accepts_numbers_and_strings() {
        let numeric: ItemInput = serde_json::from_str(r#"{"office_id": 3}"#).unwrap();
        let text: ItemInput = serde_json::from_str(r#"{"office_id": "4"}"#).unwrap();
        let blank: ItemInput = serde_json::from_str(r#"{"office_id": ""}"#).unwrap();
        let absent: ItemInput = serde_json::from_str("{}").unwrap();

        assert_eq!(numeric.office_id, Some(3));
        assert_eq!(text.office_id, Some(4));
        assert_eq!(blank.office_id, None);
        assert_eq!(absent.office_id, None);
        assert!(serde_json::from_str::<ItemInput>(r#"{"office_id": "HR"}"#).is_err());
    }
}
