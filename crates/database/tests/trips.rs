mod common;

use common::*;
use database::entities::{trip_crew, trip};
use database::services::order::{NewTicket, OrderService};
use database::services::trip::{NewTrip, TripError, TripFilter, TripService};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

fn by_source(source: &str) -> TripFilter {
    TripFilter {
        source: Some(source.to_owned()),
        ..Default::default()
    }
}

fn by_date(date: &str) -> TripFilter {
    TripFilter {
        date: Some(date.to_owned()),
        ..Default::default()
    }
}

#[tokio::test]
async fn listing_is_ascending_by_departure_time() {
    let db = setup().await;
    let train = create_train(&db, 5, 20).await;
    let source = create_station(&db, "Kyiv-Pasazhyrskyi").await;
    let destination = create_station(&db, "Lviv").await;
    let route = create_route(&db, &source, &destination).await;

    let noon = create_trip(&db, &route, &train, on_sep_1(12), on_sep_1(18)).await;
    let morning = create_trip(&db, &route, &train, on_sep_1(8), on_sep_1(14)).await;
    let midmorning = create_trip(&db, &route, &train, on_sep_1(10), on_sep_1(16)).await;

    let listed = TripService::list(&db, TripFilter::default()).await.unwrap();
    let ids: Vec<Uuid> = listed.iter().map(|s| s.trip.id).collect();
    assert_eq!(ids, vec![morning.id, midmorning.id, noon.id]);
}

#[tokio::test]
async fn availability_reflects_sold_tickets() {
    let db = setup().await;
    let train = create_train(&db, 5, 20).await;
    let trip = simple_trip(&db, &train).await;

    OrderService::create_order(
        &db,
        "user-1",
        vec![
            NewTicket { cargo: 1, seat: 1, trip_id: trip.id },
            NewTicket { cargo: 1, seat: 2, trip_id: trip.id },
            NewTicket { cargo: 2, seat: 1, trip_id: trip.id },
        ],
    )
    .await
    .unwrap();

    let listed = TripService::list(&db, TripFilter::default()).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].total_seats, 100);
    assert_eq!(listed[0].tickets_available, 97);
    assert_eq!(listed[0].route_name, "Kyiv-Pasazhyrskyi - Lviv");
    assert_eq!(listed[0].train_name, "IC-731");
}

#[tokio::test]
async fn fresh_trip_has_full_availability() {
    let db = setup().await;
    let train = create_train(&db, 5, 20).await;
    simple_trip(&db, &train).await;

    let listed = TripService::list(&db, TripFilter::default()).await.unwrap();
    assert_eq!(listed[0].tickets_available, 100);
}

#[tokio::test]
async fn source_filter_is_a_case_insensitive_substring_match() {
    let db = setup().await;
    let train = create_train(&db, 5, 20).await;
    let kyiv = create_station(&db, "Kyiv-Pasazhyrskyi").await;
    let lviv = create_station(&db, "Lviv").await;
    let outbound = create_route(&db, &kyiv, &lviv).await;
    let inbound = create_route(&db, &lviv, &kyiv).await;

    let from_kyiv = create_trip(&db, &outbound, &train, on_sep_1(8), on_sep_1(14)).await;
    create_trip(&db, &inbound, &train, on_sep_1(9), on_sep_1(15)).await;

    for query in ["kyiv", "KYIV", "  pasazhyrskyi  "] {
        let listed = TripService::list(&db, by_source(query)).await.unwrap();
        let ids: Vec<Uuid> = listed.iter().map(|s| s.trip.id).collect();
        assert_eq!(ids, vec![from_kyiv.id], "query {query:?}");
    }
}

#[tokio::test]
async fn destination_filter_matches_the_arrival_station() {
    let db = setup().await;
    let train = create_train(&db, 5, 20).await;
    let kyiv = create_station(&db, "Kyiv-Pasazhyrskyi").await;
    let lviv = create_station(&db, "Lviv").await;
    let outbound = create_route(&db, &kyiv, &lviv).await;
    let inbound = create_route(&db, &lviv, &kyiv).await;

    create_trip(&db, &outbound, &train, on_sep_1(8), on_sep_1(14)).await;
    let to_kyiv = create_trip(&db, &inbound, &train, on_sep_1(9), on_sep_1(15)).await;

    let listed = TripService::list(
        &db,
        TripFilter {
            destination: Some("kyiv".to_owned()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let ids: Vec<Uuid> = listed.iter().map(|s| s.trip.id).collect();
    assert_eq!(ids, vec![to_kyiv.id]);
}

#[tokio::test]
async fn unmatched_source_returns_nothing() {
    let db = setup().await;
    let train = create_train(&db, 5, 20).await;
    simple_trip(&db, &train).await;

    let listed = TripService::list(&db, by_source("Odesa")).await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn blank_filters_are_ignored() {
    let db = setup().await;
    let train = create_train(&db, 5, 20).await;
    simple_trip(&db, &train).await;

    let listed = TripService::list(&db, by_source("   ")).await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn date_filter_selects_the_departure_day() {
    let db = setup().await;
    let train = create_train(&db, 5, 20).await;
    let source = create_station(&db, "Kyiv-Pasazhyrskyi").await;
    let destination = create_station(&db, "Lviv").await;
    let route = create_route(&db, &source, &destination).await;

    let first = create_trip(&db, &route, &train, on_sep_1(8), on_sep_1(14)).await;
    create_trip(&db, &route, &train, on_sep_2(8), on_sep_2(14)).await;

    let listed = TripService::list(&db, by_date("2026-09-01")).await.unwrap();
    let ids: Vec<Uuid> = listed.iter().map(|s| s.trip.id).collect();
    assert_eq!(ids, vec![first.id]);
}

#[tokio::test]
async fn unparseable_date_is_silently_ignored() {
    let db = setup().await;
    let train = create_train(&db, 5, 20).await;
    let source = create_station(&db, "Kyiv-Pasazhyrskyi").await;
    let destination = create_station(&db, "Lviv").await;
    let route = create_route(&db, &source, &destination).await;

    create_trip(&db, &route, &train, on_sep_1(8), on_sep_1(14)).await;
    create_trip(&db, &route, &train, on_sep_2(8), on_sep_2(14)).await;

    for query in ["invalid-date", "01/09/2026", "2026-13-40"] {
        let listed = TripService::list(&db, by_date(query)).await.unwrap();
        assert_eq!(listed.len(), 2, "query {query:?}");
    }
}

#[tokio::test]
async fn detail_carries_roster_and_taken_seats_in_order() {
    let db = setup().await;
    let train = create_train(&db, 5, 20).await;
    let trip = simple_trip(&db, &train).await;
    let conductor = create_crew(&db, "Olena", "Bondar").await;
    let driver = create_crew(&db, "Taras", "Melnyk").await;
    TripService::update(
        &db,
        trip.id,
        NewTrip {
            route_id: trip.route_id,
            train_id: trip.train_id,
            departure_time: trip.departure_time,
            arrival_time: trip.arrival_time,
            crew_ids: vec![driver.id, conductor.id],
        },
    )
    .await
    .unwrap();

    OrderService::create_order(
        &db,
        "user-1",
        vec![
            NewTicket { cargo: 2, seat: 5, trip_id: trip.id },
            NewTicket { cargo: 1, seat: 9, trip_id: trip.id },
        ],
    )
    .await
    .unwrap();

    let detail = TripService::get_detail(&db, trip.id).await.unwrap().unwrap();
    assert_eq!(detail.source.name, "Kyiv-Pasazhyrskyi");
    assert_eq!(detail.destination.name, "Lviv");
    assert_eq!(detail.train.name, "IC-731");
    assert_eq!(detail.train_type.name, "Intercity");
    assert_eq!(detail.taken_seats, vec![(1, 9), (2, 5)]);

    let names: Vec<String> = detail.crew.iter().map(|c| c.full_name()).collect();
    assert_eq!(names, vec!["Olena Bondar", "Taras Melnyk"]);
}

#[tokio::test]
async fn detail_of_unknown_trip_is_none() {
    let db = setup().await;
    assert!(
        TripService::get_detail(&db, Uuid::new_v4())
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn trip_creation_validates_times_and_references() {
    let db = setup().await;
    let train = create_train(&db, 5, 20).await;
    let source = create_station(&db, "Kyiv-Pasazhyrskyi").await;
    let destination = create_station(&db, "Lviv").await;
    let route = create_route(&db, &source, &destination).await;

    let err = TripService::create(
        &db,
        NewTrip {
            route_id: route.id,
            train_id: train.id,
            departure_time: on_sep_1(8),
            arrival_time: on_sep_1(8),
            crew_ids: vec![],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, TripError::ArrivalBeforeDeparture));

    let missing = Uuid::new_v4();
    let err = TripService::create(
        &db,
        NewTrip {
            route_id: missing,
            train_id: train.id,
            departure_time: on_sep_1(8),
            arrival_time: on_sep_1(14),
            crew_ids: vec![],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, TripError::RouteNotFound(id) if id == missing));

    let err = TripService::create(
        &db,
        NewTrip {
            route_id: route.id,
            train_id: train.id,
            departure_time: on_sep_1(8),
            arrival_time: on_sep_1(14),
            crew_ids: vec![missing],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, TripError::CrewNotFound(id) if id == missing));

    assert_eq!(trip::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn trip_update_replaces_the_crew_roster() {
    let db = setup().await;
    let train = create_train(&db, 5, 20).await;
    let trip = simple_trip(&db, &train).await;
    let first = create_crew(&db, "Olena", "Bondar").await;
    let second = create_crew(&db, "Taras", "Melnyk").await;

    let roster = |ids: Vec<Uuid>| NewTrip {
        route_id: trip.route_id,
        train_id: trip.train_id,
        departure_time: trip.departure_time,
        arrival_time: trip.arrival_time,
        crew_ids: ids,
    };

    TripService::update(&db, trip.id, roster(vec![first.id])).await.unwrap();
    TripService::update(&db, trip.id, roster(vec![second.id])).await.unwrap();

    let assigned: Vec<Uuid> = trip_crew::Entity::find()
        .filter(trip_crew::Column::TripId.eq(trip.id))
        .all(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|tc| tc.crew_id)
        .collect();
    assert_eq!(assigned, vec![second.id]);
}
