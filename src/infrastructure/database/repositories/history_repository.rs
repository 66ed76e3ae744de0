//! SeaORM implementation of HistoryRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    NotSet, Set,
};

use super::{db_err, parse_category};
use crate::domain::history::{HistoryRecord, HistoryRepository};
use crate::domain::reservation::Reservation;
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::reservation_history;

pub struct SeaOrmHistoryRepository {
    db: DatabaseConnection,
}

impl SeaOrmHistoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation_history::Model) -> DomainResult<HistoryRecord> {
    Ok(HistoryRecord {
        id: m.id,
        owner_id: m.owner_id,
        plate: m.plate,
        entry_time: m.entry_time,
        exit_time: m.exit_time,
        vehicle_category: parse_category(&m.vehicle_category)?,
        price: m.price,
        slot_number: m.slot_number,
        archived_at: m.archived_at,
    })
}

// ── HistoryRepository impl ──────────────────────────────────────

#[async_trait]
impl HistoryRepository for SeaOrmHistoryRepository {
    async fn insert(&self, record: HistoryRecord) -> DomainResult<()> {
        debug!(
            "Archiving reservation for {} on slot {}",
            record.owner_id, record.slot_number
        );

        let model = reservation_history::ActiveModel {
            id: NotSet,
            owner_id: Set(record.owner_id),
            plate: Set(record.plate),
            entry_time: Set(record.entry_time),
            exit_time: Set(record.exit_time),
            vehicle_category: Set(record.vehicle_category.as_str().to_string()),
            price: Set(record.price),
            slot_number: Set(record.slot_number),
            archived_at: Set(record.archived_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<HistoryRecord>> {
        let models = reservation_history::Entity::find()
            .order_by_asc(reservation_history::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn exists_matching(&self, r: &Reservation) -> DomainResult<bool> {
        let found = reservation_history::Entity::find()
            .filter(reservation_history::Column::OwnerId.eq(&r.owner_id))
            .filter(reservation_history::Column::Plate.eq(&r.plate))
            .filter(reservation_history::Column::EntryTime.eq(r.entry_time))
            .filter(reservation_history::Column::ExitTime.eq(r.exit_time))
            .filter(
                reservation_history::Column::VehicleCategory.eq(r.vehicle_category.as_str()),
            )
            .filter(reservation_history::Column::Price.eq(r.price))
            .filter(reservation_history::Column::SlotNumber.eq(r.slot_number))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.is_some())
    }
}
