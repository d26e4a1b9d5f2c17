use crate::entities::{offices, prelude::*};
use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::OnConflict,
};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Office {
    pub id: i32,
    pub name: String,
}

impl From<offices::Model> for Office {
    fn from(model: offices::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

pub struct OfficeRepository {
    conn: DatabaseConnection,
}

impl OfficeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<Office>> {
        let rows = Offices::find()
            .order_by_asc(offices::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list offices")?;

        Ok(rows.into_iter().map(Office::from).collect())
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<Office>> {
        let row = Offices::find()
            .filter(offices::Column::Name.eq(name))
            .one(&self.conn)
            .await
            .context("Failed to query office by name")?;

        Ok(row.map(Office::from))
    }

    /// Inserts every name not already present. Returns how many were added.
    pub async fn ensure(&self, names: &[String]) -> Result<u64> {
        let mut inserted = 0;

        for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
            let active = offices::ActiveModel {
                name: Set(name.to_string()),
                ..Default::default()
            };

            inserted += Offices::insert(active)
                .on_conflict(
                    OnConflict::column(offices::Column::Name)
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&self.conn)
                .await
                .with_context(|| format!("Failed to seed office {name}"))?;
        }

        if inserted > 0 {
            info!("Seeded {} office(s)", inserted);
        }

        Ok(inserted)
    }
}
