mod common;

use common::*;
use database::entities::{order, ticket, trip};
use database::services::order::{NewTicket, OrderError, OrderService};
use models::booking::BookingError;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, SqlErr};
use uuid::Uuid;

fn seat(trip: &trip::Model, cargo: i32, seat: i32) -> NewTicket {
    NewTicket {
        cargo,
        seat,
        trip_id: trip.id,
    }
}

async fn order_count(db: &DatabaseConnection) -> u64 {
    order::Entity::find().count(db).await.unwrap()
}

async fn ticket_count(db: &DatabaseConnection) -> u64 {
    ticket::Entity::find().count(db).await.unwrap()
}

#[tokio::test]
async fn order_and_tickets_are_persisted_together() {
    let db = setup().await;
    let train = create_train(&db, 5, 20).await;
    let trip = simple_trip(&db, &train).await;

    let (placed, tickets) =
        OrderService::create_order(&db, "user-1", vec![seat(&trip, 3, 15), seat(&trip, 3, 16)])
            .await
            .unwrap();

    assert_eq!(placed.user_id, "user-1");
    assert_eq!(tickets.len(), 2);
    assert!(tickets.iter().all(|t| t.order_id == placed.id));
    assert_eq!(order_count(&db).await, 1);
    assert_eq!(ticket_count(&db).await, 2);
}

#[tokio::test]
async fn empty_order_is_rejected_without_persisting() {
    let db = setup().await;

    let err = OrderService::create_order(&db, "user-1", vec![])
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::EmptyOrder));
    assert_eq!(order_count(&db).await, 0);
}

#[tokio::test]
async fn cargo_out_of_range_is_rejected() {
    let db = setup().await;
    let train = create_train(&db, 5, 20).await;
    let trip = simple_trip(&db, &train).await;

    let err = OrderService::create_order(&db, "user-1", vec![seat(&trip, 6, 1)])
        .await
        .unwrap_err();

    match err {
        OrderError::Booking(inner @ BookingError::CargoOutOfRange { .. }) => {
            assert_eq!(inner.to_string(), "Cargo must be in range [1, 5]");
        }
        other => panic!("expected cargo range error, got {other:?}"),
    }
    assert_eq!(order_count(&db).await, 0);
    assert_eq!(ticket_count(&db).await, 0);
}

#[tokio::test]
async fn seat_out_of_range_is_rejected() {
    let db = setup().await;
    let train = create_train(&db, 5, 20).await;
    let trip = simple_trip(&db, &train).await;

    let err = OrderService::create_order(&db, "user-1", vec![seat(&trip, 3, 21)])
        .await
        .unwrap_err();

    match err {
        OrderError::Booking(inner @ BookingError::SeatOutOfRange { .. }) => {
            assert_eq!(inner.to_string(), "Seat must be in range [1, 20]");
        }
        other => panic!("expected seat range error, got {other:?}"),
    }
    assert_eq!(ticket_count(&db).await, 0);
}

#[tokio::test]
async fn booking_the_same_seat_twice_conflicts() {
    let db = setup().await;
    let train = create_train(&db, 5, 20).await;
    let trip = simple_trip(&db, &train).await;

    OrderService::create_order(&db, "user-1", vec![seat(&trip, 3, 15)])
        .await
        .unwrap();
    let err = OrderService::create_order(&db, "user-2", vec![seat(&trip, 3, 15)])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OrderError::Booking(BookingError::SeatTaken { cargo: 3, seat: 15 })
    ));
    // Only the first booking survives.
    assert_eq!(order_count(&db).await, 1);
    assert_eq!(ticket_count(&db).await, 1);
}

#[tokio::test]
async fn failing_ticket_rolls_back_the_whole_order() {
    let db = setup().await;
    let train = create_train(&db, 5, 20).await;
    let trip = simple_trip(&db, &train).await;

    let err = OrderService::create_order(
        &db,
        "user-1",
        vec![seat(&trip, 1, 1), seat(&trip, 2, 2), seat(&trip, 9, 1)],
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        OrderError::Booking(BookingError::CargoOutOfRange { .. })
    ));
    // The two valid tickets must not survive their failed sibling.
    assert_eq!(order_count(&db).await, 0);
    assert_eq!(ticket_count(&db).await, 0);
}

#[tokio::test]
async fn duplicate_seat_within_one_order_conflicts() {
    let db = setup().await;
    let train = create_train(&db, 5, 20).await;
    let trip = simple_trip(&db, &train).await;

    let err = OrderService::create_order(
        &db,
        "user-1",
        vec![seat(&trip, 2, 7), seat(&trip, 2, 7)],
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        OrderError::Booking(BookingError::SeatTaken { cargo: 2, seat: 7 })
    ));
    assert_eq!(order_count(&db).await, 0);
    assert_eq!(ticket_count(&db).await, 0);
}

#[tokio::test]
async fn unknown_trip_is_rejected() {
    let db = setup().await;
    let missing = Uuid::new_v4();

    let err = OrderService::create_order(
        &db,
        "user-1",
        vec![NewTicket {
            cargo: 1,
            seat: 1,
            trip_id: missing,
        }],
    )
    .await
    .unwrap_err();

    assert!(matches!(err, OrderError::TripNotFound(id) if id == missing));
    assert_eq!(order_count(&db).await, 0);
}

#[tokio::test]
async fn unique_index_guards_inserts_that_bypass_the_service() {
    let db = setup().await;
    let train = create_train(&db, 5, 20).await;
    let trip = simple_trip(&db, &train).await;

    let (first, _) = OrderService::create_order(&db, "user-1", vec![seat(&trip, 4, 4)])
        .await
        .unwrap();

    // Same (trip, cargo, seat) inserted directly, as a racing transaction
    // that slipped past the existence check would do.
    let err = ticket::ActiveModel {
        id: Set(Uuid::new_v4()),
        cargo: Set(4),
        seat: Set(4),
        trip_id: Set(trip.id),
        order_id: Set(first.id),
    }
    .insert(&db)
    .await
    .unwrap_err();

    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));
    assert_eq!(ticket_count(&db).await, 1);
}

#[tokio::test]
async fn orders_are_scoped_to_their_owner() {
    let db = setup().await;
    let train = create_train(&db, 5, 20).await;
    let trip = simple_trip(&db, &train).await;

    let (alices, _) = OrderService::create_order(&db, "alice", vec![seat(&trip, 1, 1)])
        .await
        .unwrap();
    OrderService::create_order(&db, "bob", vec![seat(&trip, 1, 2)])
        .await
        .unwrap();

    let listed = OrderService::list_for_user(&db, "alice").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].0.id, alices.id);

    assert!(
        OrderService::get_for_user(&db, "bob", alices.id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(!OrderService::delete_for_user(&db, "bob", alices.id).await.unwrap());
    assert_eq!(order_count(&db).await, 2);
}

#[tokio::test]
async fn list_for_user_is_newest_first() {
    let db = setup().await;

    let older = order::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(on_sep_1(9)),
        user_id: Set("alice".to_owned()),
    }
    .insert(&db)
    .await
    .unwrap();
    let newer = order::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(on_sep_2(9)),
        user_id: Set("alice".to_owned()),
    }
    .insert(&db)
    .await
    .unwrap();

    let listed = OrderService::list_for_user(&db, "alice").await.unwrap();
    let ids: Vec<Uuid> = listed.iter().map(|(o, _)| o.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
}

#[tokio::test]
async fn get_for_user_returns_tickets_sorted_by_cargo_then_seat() {
    let db = setup().await;
    let train = create_train(&db, 5, 20).await;
    let trip = simple_trip(&db, &train).await;

    let (placed, _) = OrderService::create_order(
        &db,
        "alice",
        vec![seat(&trip, 2, 5), seat(&trip, 1, 9), seat(&trip, 1, 2)],
    )
    .await
    .unwrap();

    let (_, tickets) = OrderService::get_for_user(&db, "alice", placed.id)
        .await
        .unwrap()
        .unwrap();
    let pairs: Vec<(i32, i32)> = tickets.iter().map(|t| (t.cargo, t.seat)).collect();
    assert_eq!(pairs, vec![(1, 2), (1, 9), (2, 5)]);
}

#[tokio::test]
async fn deleting_an_order_cascades_to_its_tickets() {
    let db = setup().await;
    let train = create_train(&db, 5, 20).await;
    let trip = simple_trip(&db, &train).await;

    let (placed, _) =
        OrderService::create_order(&db, "alice", vec![seat(&trip, 1, 1), seat(&trip, 1, 2)])
            .await
            .unwrap();
    assert_eq!(ticket_count(&db).await, 2);

    assert!(OrderService::delete_for_user(&db, "alice", placed.id).await.unwrap());
    assert_eq!(order_count(&db).await, 0);
    assert_eq!(ticket_count(&db).await, 0);
}
