use sea_orm_migration::prelude::*;

use super::m20250301_create_offices::Offices;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Inventory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Inventory::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Inventory::OfficeId).integer().not_null())
                    .col(ColumnDef::new(Inventory::ComputerDevice).string().null())
                    .col(ColumnDef::new(Inventory::PcName).string().null())
                    .col(ColumnDef::new(Inventory::BrandModel).string().null())
                    .col(ColumnDef::new(Inventory::Processor).string().null())
                    .col(ColumnDef::new(Inventory::Motherboard).string().null())
                    .col(ColumnDef::new(Inventory::Ram).string().null())
                    .col(
                        ColumnDef::new(Inventory::GraphicsProcessing)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(Inventory::InternalMemory).string().null())
                    .col(
                        ColumnDef::new(Inventory::MacAddress)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Inventory::OperatingSystem).string().null())
                    .col(ColumnDef::new(Inventory::MicrosoftOffice).string().null())
                    .col(
                        ColumnDef::new(Inventory::AntivirusSoftware)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(Inventory::Status).string().null())
                    .col(
                        ColumnDef::new(Inventory::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_office_id")
                            .from(Inventory::Table, Inventory::OfficeId)
                            .to(Offices::Table, Offices::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing sorts by most recent modification
        manager
            .create_index(
                Index::create()
                    .name("idx_inventory_timestamp")
                    .table(Inventory::Table)
                    .col(Inventory::Timestamp)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Inventory::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Inventory {
    Table,
    Id,
    OfficeId,
    ComputerDevice,
    PcName,
    BrandModel,
    Processor,
    Motherboard,
    Ram,
    GraphicsProcessing,
    InternalMemory,
    MacAddress,
    OperatingSystem,
    MicrosoftOffice,
    AntivirusSoftware,
    Status,
    Timestamp,
}
