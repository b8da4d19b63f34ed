use crate::dtos::station::StationResponse;
use database::entities::{route, station};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Compact shape used by the route listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct RouteListResponse {
    pub id: Uuid,
    pub source_name: String,
    pub destination_name: String,
    pub distance: i32,
}

/// Full shape with both stations nested, used on retrieve and after writes.
#[derive(Debug, Serialize, ToSchema)]
pub struct RouteResponse {
    pub id: Uuid,
    pub source: StationResponse,
    pub destination: StationResponse,
    pub distance: i32,
}

impl From<(route::Model, station::Model, station::Model)> for RouteResponse {
    fn from((route, source, destination): (route::Model, station::Model, station::Model)) -> Self {
        Self {
            id: route.id,
            source: source.into(),
            destination: destination.into(),
            distance: route.distance,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RouteRequest {
    pub source: Uuid,
    pub destination: Uuid,
    pub distance: i32,
}
