//! Create reservation_history table
//!
//! Append-only archive used for reporting. Dedup happens in application
//! code by natural-key match, not a unique constraint over the business
//! columns.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReservationHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReservationHistory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ReservationHistory::OwnerId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReservationHistory::Plate)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReservationHistory::EntryTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReservationHistory::ExitTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReservationHistory::VehicleCategory)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReservationHistory::Price)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReservationHistory::SlotNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReservationHistory::ArchivedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservation_history_owner")
                    .table(ReservationHistory::Table)
                    .col(ReservationHistory::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservation_history_entry_time")
                    .table(ReservationHistory::Table)
                    .col(ReservationHistory::EntryTime)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReservationHistory::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ReservationHistory {
    Table,
    Id,
    OwnerId,
    Plate,
    EntryTime,
    ExitTime,
    VehicleCategory,
    Price,
    SlotNumber,
    ArchivedAt,
}
