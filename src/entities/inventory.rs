use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "inventory")]
pub struct Model {
    /// Random UUID v4, assigned on insert
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub office_id: i32,

    pub computer_device: Option<String>,
    pub pc_name: Option<String>,
    pub brand_model: Option<String>,
    pub processor: Option<String>,
    pub motherboard: Option<String>,
    pub ram: Option<String>,
    pub graphics_processing: Option<String>,
    pub internal_memory: Option<String>,

    #[sea_orm(unique)]
    pub mac_address: String,

    pub operating_system: Option<String>,
    pub microsoft_office: Option<String>,
    pub antivirus_software: Option<String>,
    pub status: Option<String>,

    /// Last modification time
    pub timestamp: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::offices::Entity",
        from = "Column::OfficeId",
        to = "super::offices::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Offices,
}

impl Related<super::offices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Offices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
