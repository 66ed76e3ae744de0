//! SeaORM implementation of SlotRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set};

use super::{db_err, parse_category};
use crate::domain::slot::{Slot, SlotRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::parking_slot;

pub struct SeaOrmSlotRepository {
    db: DatabaseConnection,
}

impl SeaOrmSlotRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: parking_slot::Model) -> DomainResult<Slot> {
    Ok(Slot {
        slot_number: m.slot_number,
        vehicle_category: parse_category(&m.vehicle_category)?,
        is_available: m.is_available,
    })
}

fn domain_to_active(s: &Slot) -> parking_slot::ActiveModel {
    parking_slot::ActiveModel {
        slot_number: Set(s.slot_number),
        vehicle_category: Set(s.vehicle_category.as_str().to_string()),
        is_available: Set(s.is_available),
    }
}

// ── SlotRepository impl ─────────────────────────────────────────

#[async_trait]
impl SlotRepository for SeaOrmSlotRepository {
    async fn save_many(&self, slots: Vec<Slot>) -> DomainResult<()> {
        if slots.is_empty() {
            return Ok(());
        }
        debug!("Saving {} parking slots", slots.len());

        let models: Vec<parking_slot::ActiveModel> =
            slots.iter().map(domain_to_active).collect();
        parking_slot::Entity::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<Slot>> {
        let models = parking_slot::Entity::find()
            .order_by_asc(parking_slot::Column::SlotNumber)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_by_number(&self, slot_number: i32) -> DomainResult<Option<Slot>> {
        let model = parking_slot::Entity::find_by_id(slot_number)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn delete_by_number(&self, slot_number: i32) -> DomainResult<Option<Slot>> {
        let Some(model) = parking_slot::Entity::find_by_id(slot_number)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let slot = model_to_domain(model.clone())?;
        model.delete(&self.db).await.map_err(db_err)?;
        debug!("Deleted parking slot {}", slot_number);
        Ok(Some(slot))
    }
}
