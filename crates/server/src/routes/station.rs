use crate::auth::RailwayClaims;
use crate::dtos::station::{StationRequest, StationResponse};
use crate::error::ApiError;
use crate::routes::non_blank;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};
use database::db::create_connection;
use database::entities::station;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait};
use uuid::Uuid;

/// List all stations
#[utoipa::path(
    get,
    path = "/api/railway/stations",
    responses(
        (status = 200, description = "Stations retrieved successfully", body = [StationResponse]),
        (status = 401, description = "Unauthorized - invalid or missing JWT")
    ),
    security(("jwt" = [])),
    tag = "Stations"
)]
pub async fn list_stations() -> Result<Json<Vec<StationResponse>>, ApiError> {
    let db = create_connection().await?;
    let stations = station::Entity::find().all(&db).await?;
    Ok(Json(stations.into_iter().map(Into::into).collect()))
}

/// Get a station by id
#[utoipa::path(
    get,
    path = "/api/railway/stations/{id}",
    params(("id" = Uuid, Path, description = "Station ID")),
    responses(
        (status = 200, description = "Station found", body = StationResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 404, description = "Station not found")
    ),
    security(("jwt" = [])),
    tag = "Stations"
)]
pub async fn get_station(Path(id): Path<Uuid>) -> Result<Json<StationResponse>, ApiError> {
    let db = create_connection().await?;
    let found = station::Entity::find_by_id(id)
        .one(&db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Station {id} does not exist")))?;
    Ok(Json(found.into()))
}

/// Create a station (administrators only)
#[utoipa::path(
    post,
    path = "/api/railway/stations",
    request_body = StationRequest,
    responses(
        (status = 201, description = "Station created", body = StationResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 403, description = "Forbidden - administrator role required")
    ),
    security(("jwt" = [])),
    tag = "Stations"
)]
pub async fn create_station(
    Extension(claims): Extension<RailwayClaims>,
    Json(payload): Json<StationRequest>,
) -> Result<(StatusCode, Json<StationResponse>), ApiError> {
    claims.require_admin()?;
    let name = non_blank("name", &payload.name)?;

    let db = create_connection().await?;
    let created = station::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        latitude: Set(payload.latitude),
        longitude: Set(payload.longitude),
    }
    .insert(&db)
    .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Update a station (administrators only)
#[utoipa::path(
    put,
    path = "/api/railway/stations/{id}",
    params(("id" = Uuid, Path, description = "Station ID")),
    request_body = StationRequest,
    responses(
        (status = 200, description = "Station updated", body = StationResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 403, description = "Forbidden - administrator role required"),
        (status = 404, description = "Station not found")
    ),
    security(("jwt" = [])),
    tag = "Stations"
)]
pub async fn update_station(
    Extension(claims): Extension<RailwayClaims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StationRequest>,
) -> Result<Json<StationResponse>, ApiError> {
    claims.require_admin()?;
    let name = non_blank("name", &payload.name)?;

    let db = create_connection().await?;
    let existing = station::Entity::find_by_id(id)
        .one(&db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Station {id} does not exist")))?;

    let mut active: station::ActiveModel = existing.into();
    active.name = Set(name);
    active.latitude = Set(payload.latitude);
    active.longitude = Set(payload.longitude);
    let updated = active.update(&db).await?;

    Ok(Json(updated.into()))
}

/// Delete a station (administrators only)
#[utoipa::path(
    delete,
    path = "/api/railway/stations/{id}",
    params(("id" = Uuid, Path, description = "Station ID")),
    responses(
        (status = 204, description = "Station deleted"),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 403, description = "Forbidden - administrator role required"),
        (status = 404, description = "Station not found")
    ),
    security(("jwt" = [])),
    tag = "Stations"
)]
pub async fn delete_station(
    Extension(claims): Extension<RailwayClaims>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    claims.require_admin()?;

    let db = create_connection().await?;
    let result = station::Entity::delete_by_id(id).exec(&db).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found(format!("Station {id} does not exist")));
    }

    Ok(StatusCode::NO_CONTENT)
}
