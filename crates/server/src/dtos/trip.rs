use crate::dtos::crew::CrewResponse;
use crate::dtos::route::RouteResponse;
use crate::dtos::train::TrainResponse;
use chrono::{DateTime, FixedOffset};
use database::services::trip::{TripDetail, TripSummary};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct TripQueryParams {
    /// Case-insensitive substring match on the source station name.
    pub source: Option<String>,
    /// Case-insensitive substring match on the destination station name.
    pub destination: Option<String>,
    /// Calendar date (YYYY-MM-DD) of departure. Unparseable values are
    /// ignored and leave the listing unfiltered by date.
    pub date: Option<String>,
}

/// One row of the trip listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct TripSummaryResponse {
    pub id: Uuid,
    pub route_name: String,
    pub train_name: String,
    pub departure_time: DateTime<FixedOffset>,
    pub arrival_time: DateTime<FixedOffset>,
    pub total_seats: i64,
    pub tickets_available: i64,
}

impl From<TripSummary> for TripSummaryResponse {
    fn from(summary: TripSummary) -> Self {
        Self {
            id: summary.trip.id,
            route_name: summary.route_name,
            train_name: summary.train_name,
            departure_time: summary.trip.departure_time,
            arrival_time: summary.trip.arrival_time,
            total_seats: summary.total_seats,
            tickets_available: summary.tickets_available,
        }
    }
}

/// A sold (cargo, seat) pair on a trip.
#[derive(Debug, Serialize, ToSchema)]
pub struct SeatResponse {
    pub cargo: i32,
    pub seat: i32,
}

/// Full trip view including the taken seats, so a client can compute
/// availability before submitting an order.
#[derive(Debug, Serialize, ToSchema)]
pub struct TripDetailResponse {
    pub id: Uuid,
    pub route: RouteResponse,
    pub train: TrainResponse,
    pub departure_time: DateTime<FixedOffset>,
    pub arrival_time: DateTime<FixedOffset>,
    pub crew: Vec<CrewResponse>,
    pub taken_seats: Vec<SeatResponse>,
}

impl From<TripDetail> for TripDetailResponse {
    fn from(detail: TripDetail) -> Self {
        Self {
            id: detail.trip.id,
            route: (detail.route, detail.source, detail.destination).into(),
            train: (detail.train, detail.train_type).into(),
            departure_time: detail.trip.departure_time,
            arrival_time: detail.trip.arrival_time,
            crew: detail.crew.into_iter().map(Into::into).collect(),
            taken_seats: detail
                .taken_seats
                .into_iter()
                .map(|(cargo, seat)| SeatResponse { cargo, seat })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TripRequest {
    pub route: Uuid,
    pub train: Uuid,
    pub departure_time: DateTime<FixedOffset>,
    pub arrival_time: DateTime<FixedOffset>,
    #[serde(default)]
    pub crew: Vec<Uuid>,
}
