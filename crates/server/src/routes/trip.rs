use crate::auth::RailwayClaims;
use crate::dtos::trip::{TripDetailResponse, TripQueryParams, TripRequest, TripSummaryResponse};
use crate::error::ApiError;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::{Extension, Json};
use database::db::create_connection;
use database::entities::trip;
use database::services::trip::{NewTrip, TripFilter, TripService};
use sea_orm::EntityTrait;
use uuid::Uuid;

/// List trips, optionally filtered by source, destination and departure date
#[utoipa::path(
    get,
    path = "/api/railway/trips",
    params(TripQueryParams),
    responses(
        (status = 200, description = "Trips retrieved successfully, ascending by departure time", body = [TripSummaryResponse]),
        (status = 401, description = "Unauthorized - invalid or missing JWT")
    ),
    security(("jwt" = [])),
    tag = "Trips"
)]
pub async fn list_trips(
    Query(params): Query<TripQueryParams>,
) -> Result<Json<Vec<TripSummaryResponse>>, ApiError> {
    let db = create_connection().await?;
    let summaries = TripService::list(
        &db,
        TripFilter {
            source: params.source,
            destination: params.destination,
            date: params.date,
        },
    )
    .await?;
    Ok(Json(summaries.into_iter().map(Into::into).collect()))
}

/// Get a trip with its route, train, crew and already taken seats
#[utoipa::path(
    get,
    path = "/api/railway/trips/{id}",
    params(("id" = Uuid, Path, description = "Trip ID")),
    responses(
        (status = 200, description = "Trip found", body = TripDetailResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 404, description = "Trip not found")
    ),
    security(("jwt" = [])),
    tag = "Trips"
)]
pub async fn get_trip(Path(id): Path<Uuid>) -> Result<Json<TripDetailResponse>, ApiError> {
    let db = create_connection().await?;
    let detail = TripService::get_detail(&db, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Trip {id} does not exist")))?;
    Ok(Json(detail.into()))
}

/// Create a trip (administrators only)
#[utoipa::path(
    post,
    path = "/api/railway/trips",
    request_body = TripRequest,
    responses(
        (status = 201, description = "Trip created", body = TripDetailResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 403, description = "Forbidden - administrator role required")
    ),
    security(("jwt" = [])),
    tag = "Trips"
)]
pub async fn create_trip(
    Extension(claims): Extension<RailwayClaims>,
    Json(payload): Json<TripRequest>,
) -> Result<(StatusCode, Json<TripDetailResponse>), ApiError> {
    claims.require_admin()?;

    let db = create_connection().await?;
    let created = TripService::create(&db, new_trip(payload)).await?;
    let detail = TripService::get_detail(&db, created.id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Trip {} does not exist", created.id)))?;

    Ok((StatusCode::CREATED, Json(detail.into())))
}

/// Update a trip and its crew roster (administrators only)
#[utoipa::path(
    put,
    path = "/api/railway/trips/{id}",
    params(("id" = Uuid, Path, description = "Trip ID")),
    request_body = TripRequest,
    responses(
        (status = 200, description = "Trip updated", body = TripDetailResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 403, description = "Forbidden - administrator role required"),
        (status = 404, description = "Trip not found")
    ),
    security(("jwt" = [])),
    tag = "Trips"
)]
pub async fn update_trip(
    Extension(claims): Extension<RailwayClaims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TripRequest>,
) -> Result<Json<TripDetailResponse>, ApiError> {
    claims.require_admin()?;

    let db = create_connection().await?;
    let updated = TripService::update(&db, id, new_trip(payload)).await?;
    let detail = TripService::get_detail(&db, updated.id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Trip {id} does not exist")))?;

    Ok(Json(detail.into()))
}

/// Delete a trip; its tickets and crew assignments cascade (administrators only)
#[utoipa::path(
    delete,
    path = "/api/railway/trips/{id}",
    params(("id" = Uuid, Path, description = "Trip ID")),
    responses(
        (status = 204, description = "Trip deleted"),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 403, description = "Forbidden - administrator role required"),
        (status = 404, description = "Trip not found")
    ),
    security(("jwt" = [])),
    tag = "Trips"
)]
pub async fn delete_trip(
    Extension(claims): Extension<RailwayClaims>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    claims.require_admin()?;

    let db = create_connection().await?;
    let result = trip::Entity::delete_by_id(id).exec(&db).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found(format!("Trip {id} does not exist")));
    }

    Ok(StatusCode::NO_CONTENT)
}

fn new_trip(payload: TripRequest) -> NewTrip {
    NewTrip {
        route_id: payload.route,
        train_id: payload.train,
        departure_time: payload.departure_time,
        arrival_time: payload.arrival_time,
        crew_ids: payload.crew,
    }
}
