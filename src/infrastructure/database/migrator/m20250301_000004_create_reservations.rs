//! Create reservations table
//!
//! Active bookings only; completed and expired reservations are removed
//! from this table. The id doubles as the entry token; exit_token is
//! looked up by the exit gate.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservations::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reservations::OwnerId).string().not_null())
                    .col(ColumnDef::new(Reservations::Plate).string().not_null())
                    .col(
                        ColumnDef::new(Reservations::EntryTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::ExitTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::VehicleCategory)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reservations::Price).double().not_null())
                    .col(
                        ColumnDef::new(Reservations::SlotNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::Arrived)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Reservations::ExitToken).string().not_null())
                    .col(
                        ColumnDef::new(Reservations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_slot_number")
                    .table(Reservations::Table)
                    .col(Reservations::SlotNumber)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_exit_token")
                    .table(Reservations::Table)
                    .col(Reservations::ExitToken)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_owner")
                    .table(Reservations::Table)
                    .col(Reservations::OwnerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Reservations {
    Table,
    Id,
    OwnerId,
    Plate,
    EntryTime,
    ExitTime,
    VehicleCategory,
    Price,
    SlotNumber,
    Arrived,
    ExitToken,
    CreatedAt,
}
