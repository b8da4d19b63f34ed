use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create stations table
        manager
            .create_table(
                Table::create()
                    .table(Stations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Stations::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Stations::Name).string().not_null())
                    .col(ColumnDef::new(Stations::Latitude).double().not_null())
                    .col(ColumnDef::new(Stations::Longitude).double().not_null())
                    .to_owned(),
            )
            .await?;

        // Create routes table
        manager
            .create_table(
                Table::create()
                    .table(Routes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Routes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Routes::SourceId).uuid().not_null())
                    .col(ColumnDef::new(Routes::DestinationId).uuid().not_null())
                    .col(ColumnDef::new(Routes::Distance).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-routes-source_id")
                            .from(Routes::Table, Routes::SourceId)
                            .to(Stations::Table, Stations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-routes-destination_id")
                            .from(Routes::Table, Routes::DestinationId)
                            .to(Stations::Table, Stations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create crews table
        manager
            .create_table(
                Table::create()
                    .table(Crews::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Crews::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Crews::FirstName).string().not_null())
                    .col(ColumnDef::new(Crews::LastName).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Create train_types table
        manager
            .create_table(
                Table::create()
                    .table(TrainTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TrainTypes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TrainTypes::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Create trains table
        manager
            .create_table(
                Table::create()
                    .table(Trains::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Trains::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Trains::Name).string().not_null())
                    .col(ColumnDef::new(Trains::CargoNum).integer().not_null())
                    .col(ColumnDef::new(Trains::PlacesInCargo).integer().not_null())
                    .col(ColumnDef::new(Trains::TrainTypeId).uuid().not_null())
                    .col(ColumnDef::new(Trains::ImagePath).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-trains-train_type_id")
                            .from(Trains::Table, Trains::TrainTypeId)
                            .to(TrainTypes::Table, TrainTypes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create trips table
        manager
            .create_table(
                Table::create()
                    .table(Trips::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Trips::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Trips::RouteId).uuid().not_null())
                    .col(ColumnDef::new(Trips::TrainId).uuid().not_null())
                    .col(
                        ColumnDef::new(Trips::DepartureTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Trips::ArrivalTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-trips-route_id")
                            .from(Trips::Table, Trips::RouteId)
                            .to(Routes::Table, Routes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-trips-train_id")
                            .from(Trips::Table, Trips::TrainId)
                            .to(Trains::Table, Trains::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create trip_crews junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(TripCrews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TripCrews::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TripCrews::TripId).uuid().not_null())
                    .col(ColumnDef::new(TripCrews::CrewId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-trip_crews-trip_id")
                            .from(TripCrews::Table, TripCrews::TripId)
                            .to(Trips::Table, Trips::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-trip_crews-crew_id")
                            .from(TripCrews::Table, TripCrews::CrewId)
                            .to(Crews::Table, Crews::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create orders table
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Orders::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Orders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Orders::UserId).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Create tickets table
        manager
            .create_table(
                Table::create()
                    .table(Tickets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tickets::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Tickets::Cargo).integer().not_null())
                    .col(ColumnDef::new(Tickets::Seat).integer().not_null())
                    .col(ColumnDef::new(Tickets::TripId).uuid().not_null())
                    .col(ColumnDef::new(Tickets::OrderId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-tickets-trip_id")
                            .from(Tickets::Table, Tickets::TripId)
                            .to(Trips::Table, Trips::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-tickets-order_id")
                            .from(Tickets::Table, Tickets::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tickets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TripCrews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Trips::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Trains::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TrainTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Crews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Routes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Stations::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Stations {
    Table,
    Id,
    Name,
    Latitude,
    Longitude,
}

#[derive(DeriveIden)]
enum Routes {
    Table,
    Id,
    SourceId,
    DestinationId,
    Distance,
}

#[derive(DeriveIden)]
enum Crews {
    Table,
    Id,
    FirstName,
    LastName,
}

#[derive(DeriveIden)]
enum TrainTypes {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Trains {
    Table,
    Id,
    Name,
    CargoNum,
    PlacesInCargo,
    TrainTypeId,
    ImagePath,
}

#[derive(DeriveIden)]
enum Trips {
    Table,
    Id,
    RouteId,
    TrainId,
    DepartureTime,
    ArrivalTime,
}

#[derive(DeriveIden)]
enum TripCrews {
    Table,
    Id,
    TripId,
    CrewId,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    CreatedAt,
    UserId,
}

#[derive(DeriveIden)]
enum Tickets {
    Table,
    Id,
    Cargo,
    Seat,
    TripId,
    OrderId,
}
