use crate::entities::{crew, route, station, ticket, train, train_type, trip, trip_crew};
use chrono::{NaiveDate, NaiveTime};
use sea_orm::sea_query::{Expr, ExprTrait, Func};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, ModelTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// Filters accepted by the trip listing endpoint. All raw strings from the
/// query; parsing and trimming happen here.
#[derive(Debug, Default, Clone)]
pub struct TripFilter {
    pub source: Option<String>,
    pub destination: Option<String>,
    pub date: Option<String>,
}

/// One row of the trip listing, with seat availability already computed.
#[derive(Debug, Clone)]
pub struct TripSummary {
    pub trip: trip::Model,
    pub route_name: String,
    pub train_name: String,
    pub total_seats: i64,
    pub tickets_available: i64,
}

/// Everything a client needs to render a trip and pick a free seat.
#[derive(Debug, Clone)]
pub struct TripDetail {
    pub trip: trip::Model,
    pub route: route::Model,
    pub source: station::Model,
    pub destination: station::Model,
    pub train: train::Model,
    pub train_type: train_type::Model,
    pub crew: Vec<crew::Model>,
    /// Already sold (cargo, seat) pairs, ordered by cargo then seat.
    pub taken_seats: Vec<(i32, i32)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTrip {
    pub route_id: Uuid,
    pub train_id: Uuid,
    pub departure_time: chrono::DateTime<chrono::FixedOffset>,
    pub arrival_time: chrono::DateTime<chrono::FixedOffset>,
    pub crew_ids: Vec<Uuid>,
}

#[derive(Debug, Error)]
pub enum TripError {
    #[error("Arrival time must be after departure time")]
    ArrivalBeforeDeparture,
    #[error("Trip {0} does not exist")]
    TripNotFound(Uuid),
    #[error("Route {0} does not exist")]
    RouteNotFound(Uuid),
    #[error("Train {0} does not exist")]
    TrainNotFound(Uuid),
    #[error("Crew member {0} does not exist")]
    CrewNotFound(Uuid),
    #[error(transparent)]
    Db(#[from] DbErr),
}

pub struct TripService;

impl TripService {
    /// Lists trips matching the filter, ascending by departure time.
    pub async fn list(
        db: &DatabaseConnection,
        filter: TripFilter,
    ) -> Result<Vec<TripSummary>, DbErr> {
        let mut condition = Condition::all();

        if let Some(term) = normalized(filter.source) {
            let station_ids = Self::station_ids_matching(db, &term).await?;
            let route_ids =
                Self::route_ids_where(db, route::Column::SourceId, station_ids).await?;
            condition = condition.add(trip::Column::RouteId.is_in(route_ids));
        }

        if let Some(term) = normalized(filter.destination) {
            let station_ids = Self::station_ids_matching(db, &term).await?;
            let route_ids =
                Self::route_ids_where(db, route::Column::DestinationId, station_ids).await?;
            condition = condition.add(trip::Column::RouteId.is_in(route_ids));
        }

        // An unparseable date is silently ignored rather than rejected.
        if let Some(date) = filter.date.as_deref().and_then(parse_date) {
            condition = condition.add(trip::Column::DepartureTime.gte(day_start(date)));
            if let Some(next) = date.succ_opt() {
                condition = condition.add(trip::Column::DepartureTime.lt(day_start(next)));
            }
        }

        let trips = trip::Entity::find()
            .filter(condition)
            .order_by_asc(trip::Column::DepartureTime)
            .all(db)
            .await?;

        if trips.is_empty() {
            return Ok(Vec::new());
        }

        let trip_ids: Vec<Uuid> = trips.iter().map(|t| t.id).collect();
        let route_ids: Vec<Uuid> = trips.iter().map(|t| t.route_id).collect();
        let train_ids: Vec<Uuid> = trips.iter().map(|t| t.train_id).collect();

        let routes: HashMap<Uuid, route::Model> = route::Entity::find()
            .filter(route::Column::Id.is_in(route_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|r| (r.id, r))
            .collect();

        let station_ids: Vec<Uuid> = routes
            .values()
            .flat_map(|r| [r.source_id, r.destination_id])
            .collect();
        let stations: HashMap<Uuid, station::Model> = station::Entity::find()
            .filter(station::Column::Id.is_in(station_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let trains: HashMap<Uuid, train::Model> = train::Entity::find()
            .filter(train::Column::Id.is_in(train_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();

        let booked: HashMap<Uuid, i64> = ticket::Entity::find()
            .select_only()
            .column(ticket::Column::TripId)
            .column_as(ticket::Column::Id.count(), "count")
            .filter(ticket::Column::TripId.is_in(trip_ids))
            .group_by(ticket::Column::TripId)
            .into_tuple::<(Uuid, i64)>()
            .all(db)
            .await?
            .into_iter()
            .collect();

        let mut summaries = Vec::with_capacity(trips.len());
        for trip in trips {
            let route = routes
                .get(&trip.route_id)
                .ok_or_else(|| DbErr::RecordNotFound(format!("route {}", trip.route_id)))?;
            let train = trains
                .get(&trip.train_id)
                .ok_or_else(|| DbErr::RecordNotFound(format!("train {}", trip.train_id)))?;
            let total_seats = train.capacity();
            let sold = booked.get(&trip.id).copied().unwrap_or(0);

            summaries.push(TripSummary {
                route_name: route_name(route, &stations)?,
                train_name: train.name.clone(),
                total_seats,
                tickets_available: total_seats - sold,
                trip,
            });
        }

        Ok(summaries)
    }

    /// Loads a single trip with its full route, train, crew roster and the
    /// list of already taken seats. Returns `None` for an unknown id.
    pub async fn get_detail(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<Option<TripDetail>, DbErr> {
        let Some(trip) = trip::Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };

        let route = trip
            .find_related(route::Entity)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("route {}", trip.route_id)))?;
        let source = station_by_id(db, route.source_id).await?;
        let destination = station_by_id(db, route.destination_id).await?;

        let train = trip
            .find_related(train::Entity)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("train {}", trip.train_id)))?;
        let train_type = train
            .find_related(train_type::Entity)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("train type {}", train.train_type_id)))?;

        let crew = trip
            .find_related(crew::Entity)
            .order_by_asc(crew::Column::LastName)
            .order_by_asc(crew::Column::FirstName)
            .all(db)
            .await?;

        let taken_seats = ticket::Entity::find()
            .filter(ticket::Column::TripId.eq(trip.id))
            .order_by_asc(ticket::Column::Cargo)
            .order_by_asc(ticket::Column::Seat)
            .select_only()
            .column(ticket::Column::Cargo)
            .column(ticket::Column::Seat)
            .into_tuple::<(i32, i32)>()
            .all(db)
            .await?;

        Ok(Some(TripDetail {
            trip,
            route,
            source,
            destination,
            train,
            train_type,
            crew,
            taken_seats,
        }))
    }

    /// Creates a trip and its crew assignments in one transaction.
    pub async fn create(db: &DatabaseConnection, new: NewTrip) -> Result<trip::Model, TripError> {
        Self::check_references(db, &new).await?;

        let txn = db.begin().await?;
        let created = trip::ActiveModel {
            id: Set(Uuid::new_v4()),
            route_id: Set(new.route_id),
            train_id: Set(new.train_id),
            departure_time: Set(new.departure_time),
            arrival_time: Set(new.arrival_time),
        }
        .insert(&txn)
        .await?;
        Self::assign_crew(&txn, created.id, &new.crew_ids).await?;
        txn.commit().await?;

        Ok(created)
    }

    /// Replaces a trip's fields and crew roster in one transaction.
    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        new: NewTrip,
    ) -> Result<trip::Model, TripError> {
        let existing = trip::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(TripError::TripNotFound(id))?;
        Self::check_references(db, &new).await?;

        let txn = db.begin().await?;
        let mut active: trip::ActiveModel = existing.into();
        active.route_id = Set(new.route_id);
        active.train_id = Set(new.train_id);
        active.departure_time = Set(new.departure_time);
        active.arrival_time = Set(new.arrival_time);
        let updated = active.update(&txn).await?;

        trip_crew::Entity::delete_many()
            .filter(trip_crew::Column::TripId.eq(id))
            .exec(&txn)
            .await?;
        Self::assign_crew(&txn, id, &new.crew_ids).await?;
        txn.commit().await?;

        Ok(updated)
    }

    async fn check_references(db: &DatabaseConnection, new: &NewTrip) -> Result<(), TripError> {
        if new.arrival_time <= new.departure_time {
            return Err(TripError::ArrivalBeforeDeparture);
        }
        route::Entity::find_by_id(new.route_id)
            .one(db)
            .await?
            .ok_or(TripError::RouteNotFound(new.route_id))?;
        train::Entity::find_by_id(new.train_id)
            .one(db)
            .await?
            .ok_or(TripError::TrainNotFound(new.train_id))?;
        for crew_id in &new.crew_ids {
            crew::Entity::find_by_id(*crew_id)
                .one(db)
                .await?
                .ok_or(TripError::CrewNotFound(*crew_id))?;
        }
        Ok(())
    }

    async fn assign_crew<C: ConnectionTrait>(
        conn: &C,
        trip_id: Uuid,
        crew_ids: &[Uuid],
    ) -> Result<(), DbErr> {
        for crew_id in crew_ids {
            trip_crew::ActiveModel {
                id: Set(Uuid::new_v4()),
                trip_id: Set(trip_id),
                crew_id: Set(*crew_id),
            }
            .insert(conn)
            .await?;
        }
        Ok(())
    }

    /// Station ids whose name contains the term, case-insensitively.
    async fn station_ids_matching(db: &DatabaseConnection, term: &str) -> Result<Vec<Uuid>, DbErr> {
        let pattern = format!("%{}%", term.to_lowercase());
        station::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(station::Column::Name))).like(pattern))
            .select_only()
            .column(station::Column::Id)
            .into_tuple::<Uuid>()
            .all(db)
            .await
    }

    async fn route_ids_where(
        db: &DatabaseConnection,
        column: route::Column,
        station_ids: Vec<Uuid>,
    ) -> Result<Vec<Uuid>, DbErr> {
        route::Entity::find()
            .filter(column.is_in(station_ids))
            .select_only()
            .column(route::Column::Id)
            .into_tuple::<Uuid>()
            .all(db)
            .await
    }
}

async fn station_by_id(db: &DatabaseConnection, id: Uuid) -> Result<station::Model, DbErr> {
    station::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("station {id}")))
}

/// Display name of a route, "Source - Destination".
fn route_name(
    route: &route::Model,
    stations: &HashMap<Uuid, station::Model>,
) -> Result<String, DbErr> {
    let source = stations
        .get(&route.source_id)
        .ok_or_else(|| DbErr::RecordNotFound(format!("station {}", route.source_id)))?;
    let destination = stations
        .get(&route.destination_id)
        .ok_or_else(|| DbErr::RecordNotFound(format!("station {}", route.destination_id)))?;
    Ok(format!("{} - {}", source.name, destination.name))
}

fn normalized(raw: Option<String>) -> Option<String> {
    let trimmed = raw?.trim().to_owned();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn day_start(date: NaiveDate) -> chrono::DateTime<chrono::FixedOffset> {
    date.and_time(NaiveTime::MIN).and_utc().fixed_offset()
}
