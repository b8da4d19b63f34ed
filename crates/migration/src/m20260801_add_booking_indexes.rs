use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // The authoritative double-booking guard: one ticket per
        // (trip, cargo, seat) no matter how requests interleave.
        manager
            .create_index(
                Index::create()
                    .name("idx-tickets-trip-cargo-seat")
                    .table(Tickets::Table)
                    .col(Tickets::TripId)
                    .col(Tickets::Cargo)
                    .col(Tickets::Seat)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // A crew member is assigned to a trip at most once.
        manager
            .create_index(
                Index::create()
                    .name("idx-trip_crews-trip-crew")
                    .table(TripCrews::Table)
                    .col(TripCrews::TripId)
                    .col(TripCrews::CrewId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Trip listings sort and window on departure time.
        manager
            .create_index(
                Index::create()
                    .name("idx-trips-departure_time")
                    .table(Trips::Table)
                    .col(Trips::DepartureTime)
                    .to_owned(),
            )
            .await?;

        // Order listings are scoped per user.
        manager
            .create_index(
                Index::create()
                    .name("idx-orders-user_id")
                    .table(Orders::Table)
                    .col(Orders::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx-orders-user_id")
                    .table(Orders::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx-trips-departure_time")
                    .table(Trips::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx-trip_crews-trip-crew")
                    .table(TripCrews::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx-tickets-trip-cargo-seat")
                    .table(Tickets::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Tickets {
    Table,
    TripId,
    Cargo,
    Seat,
}

#[derive(DeriveIden)]
enum TripCrews {
    Table,
    TripId,
    CrewId,
}

#[derive(DeriveIden)]
enum Trips {
    Table,
    DepartureTime,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    UserId,
}
