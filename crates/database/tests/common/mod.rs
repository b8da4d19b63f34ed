#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use database::entities::{crew, route, station, train, train_type, trip};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, Database, DatabaseConnection};
use uuid::Uuid;

/// Fresh in-memory database with the real migrations applied.
pub async fn setup() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub async fn create_station(db: &DatabaseConnection, name: &str) -> station::Model {
    station::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_owned()),
        latitude: Set(50.45),
        longitude: Set(30.52),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn create_route(
    db: &DatabaseConnection,
    source: &station::Model,
    destination: &station::Model,
) -> route::Model {
    route::ActiveModel {
        id: Set(Uuid::new_v4()),
        source_id: Set(source.id),
        destination_id: Set(destination.id),
        distance: Set(540),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn create_train(
    db: &DatabaseConnection,
    cargo_num: i32,
    places_in_cargo: i32,
) -> train::Model {
    let train_type = train_type::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Intercity".to_owned()),
    }
    .insert(db)
    .await
    .unwrap();

    train::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("IC-731".to_owned()),
        cargo_num: Set(cargo_num),
        places_in_cargo: Set(places_in_cargo),
        train_type_id: Set(train_type.id),
        image_path: Set(None),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn create_trip(
    db: &DatabaseConnection,
    route: &route::Model,
    train: &train::Model,
    departure_time: DateTime<FixedOffset>,
    arrival_time: DateTime<FixedOffset>,
) -> trip::Model {
    trip::ActiveModel {
        id: Set(Uuid::new_v4()),
        route_id: Set(route.id),
        train_id: Set(train.id),
        departure_time: Set(departure_time),
        arrival_time: Set(arrival_time),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn create_crew(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
) -> crew::Model {
    crew::ActiveModel {
        id: Set(Uuid::new_v4()),
        first_name: Set(first_name.to_owned()),
        last_name: Set(last_name.to_owned()),
    }
    .insert(db)
    .await
    .unwrap()
}

/// A fixed point in time on 2026-09-01, offset by `hour`.
pub fn on_sep_1(hour: u32) -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(2026, 9, 1, hour, 0, 0)
        .unwrap()
        .fixed_offset()
}

/// Same clock time one day later.
pub fn on_sep_2(hour: u32) -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(2026, 9, 2, hour, 0, 0)
        .unwrap()
        .fixed_offset()
}

/// One trip over a fresh station pair, departing 08:00, arriving 14:00.
pub async fn simple_trip(db: &DatabaseConnection, train: &train::Model) -> trip::Model {
    let source = create_station(db, "Kyiv-Pasazhyrskyi").await;
    let destination = create_station(db, "Lviv").await;
    let route = create_route(db, &source, &destination).await;
    create_trip(db, &route, train, on_sep_1(8), on_sep_1(14)).await
}
