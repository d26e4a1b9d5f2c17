use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::{ItemRecord, Office};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            id: None,
        }
    }

    pub fn with_id(message: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            id: Some(id.into()),
        }
    }
}

// Auth

/// Fields are optional so that a missing one is reported as a validation
/// error rather than a JSON rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "confirmPassword", alias = "confirm_password")]
    pub confirm_password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
}

// Inventory

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OfficeDto {
    pub id: i32,
    pub name: String,
}

impl From<Office> for OfficeDto {
    fn from(office: Office) -> Self {
        Self {
            id: office.id,
            name: office.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ItemDto {
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

impl From<ItemRecord> for ItemDto {
    fn from(item: ItemRecord) -> Self {
        Self {
            id: item.id,
            office_id: item.office_id,
            office_name: item.office_name,
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
}

// System

#[derive(Debug, Serialize)]
pub struct HealthLiveResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthReadinessChecks {
    pub database: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthReadyResponse {
    pub ready: bool,
    pub uptime_seconds: u64,
    pub version: &'static str,
    pub checks: HealthReadinessChecks,
}
