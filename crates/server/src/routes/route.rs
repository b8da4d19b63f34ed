use crate::auth::RailwayClaims;
use crate::dtos::route::{RouteListResponse, RouteRequest, RouteResponse};
use crate::error::ApiError;
use crate::routes::positive;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};
use database::db::create_connection;
use database::entities::{route, station};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::collections::HashMap;
use uuid::Uuid;

/// List all routes
#[utoipa::path(
    get,
    path = "/api/railway/routes",
    responses(
        (status = 200, description = "Routes retrieved successfully", body = [RouteListResponse]),
        (status = 401, description = "Unauthorized - invalid or missing JWT")
    ),
    security(("jwt" = [])),
    tag = "Routes"
)]
pub async fn list_routes() -> Result<Json<Vec<RouteListResponse>>, ApiError> {
    let db = create_connection().await?;
    let routes = route::Entity::find().all(&db).await?;

    let station_ids: Vec<Uuid> = routes
        .iter()
        .flat_map(|r| [r.source_id, r.destination_id])
        .collect();
    let stations: HashMap<Uuid, station::Model> = station::Entity::find()
        .filter(station::Column::Id.is_in(station_ids))
        .all(&db)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

    let mut responses = Vec::with_capacity(routes.len());
    for route in routes {
        let source = stations
            .get(&route.source_id)
            .ok_or_else(|| ApiError::not_found(format!("Station {} does not exist", route.source_id)))?;
        let destination = stations
            .get(&route.destination_id)
            .ok_or_else(|| {
                ApiError::not_found(format!("Station {} does not exist", route.destination_id))
            })?;
        responses.push(RouteListResponse {
            id: route.id,
            source_name: source.name.clone(),
            destination_name: destination.name.clone(),
            distance: route.distance,
        });
    }

    Ok(Json(responses))
}

/// Get a route by id, with both stations nested
#[utoipa::path(
    get,
    path = "/api/railway/routes/{id}",
    params(("id" = Uuid, Path, description = "Route ID")),
    responses(
        (status = 200, description = "Route found", body = RouteResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 404, description = "Route not found")
    ),
    security(("jwt" = [])),
    tag = "Routes"
)]
pub async fn get_route(Path(id): Path<Uuid>) -> Result<Json<RouteResponse>, ApiError> {
    let db = create_connection().await?;
    let found = route::Entity::find_by_id(id)
        .one(&db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Route {id} does not exist")))?;

    let source = station_or_404(&db, found.source_id).await?;
    let destination = station_or_404(&db, found.destination_id).await?;

    Ok(Json((found, source, destination).into()))
}

/// Create a route (administrators only)
#[utoipa::path(
    post,
    path = "/api/railway/routes",
    request_body = RouteRequest,
    responses(
        (status = 201, description = "Route created", body = RouteResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 403, description = "Forbidden - administrator role required")
    ),
    security(("jwt" = [])),
    tag = "Routes"
)]
pub async fn create_route(
    Extension(claims): Extension<RailwayClaims>,
    Json(payload): Json<RouteRequest>,
) -> Result<(StatusCode, Json<RouteResponse>), ApiError> {
    claims.require_admin()?;

    let db = create_connection().await?;
    let (source, destination) = validated_endpoints(&db, &payload).await?;

    let created = route::ActiveModel {
        id: Set(Uuid::new_v4()),
        source_id: Set(payload.source),
        destination_id: Set(payload.destination),
        distance: Set(payload.distance),
    }
    .insert(&db)
    .await?;

    Ok((StatusCode::CREATED, Json((created, source, destination).into())))
}

/// Update a route (administrators only)
#[utoipa::path(
    put,
    path = "/api/railway/routes/{id}",
    params(("id" = Uuid, Path, description = "Route ID")),
    request_body = RouteRequest,
    responses(
        (status = 200, description = "Route updated", body = RouteResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 403, description = "Forbidden - administrator role required"),
        (status = 404, description = "Route not found")
    ),
    security(("jwt" = [])),
    tag = "Routes"
)]
pub async fn update_route(
    Extension(claims): Extension<RailwayClaims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, ApiError> {
    claims.require_admin()?;

    let db = create_connection().await?;
    let existing = route::Entity::find_by_id(id)
        .one(&db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Route {id} does not exist")))?;
    let (source, destination) = validated_endpoints(&db, &payload).await?;

    let mut active: route::ActiveModel = existing.into();
    active.source_id = Set(payload.source);
    active.destination_id = Set(payload.destination);
    active.distance = Set(payload.distance);
    let updated = active.update(&db).await?;

    Ok(Json((updated, source, destination).into()))
}

/// Delete a route (administrators only)
#[utoipa::path(
    delete,
    path = "/api/railway/routes/{id}",
    params(("id" = Uuid, Path, description = "Route ID")),
    responses(
        (status = 204, description = "Route deleted"),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 403, description = "Forbidden - administrator role required"),
        (status = 404, description = "Route not found")
    ),
    security(("jwt" = [])),
    tag = "Routes"
)]
pub async fn delete_route(
    Extension(claims): Extension<RailwayClaims>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    claims.require_admin()?;

    let db = create_connection().await?;
    let result = route::Entity::delete_by_id(id).exec(&db).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found(format!("Route {id} does not exist")));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Field validation shared by create and update: positive distance, distinct
/// endpoints, and both stations present.
async fn validated_endpoints(
    db: &DatabaseConnection,
    payload: &RouteRequest,
) -> Result<(station::Model, station::Model), ApiError> {
    positive("distance", payload.distance)?;
    if payload.source == payload.destination {
        return Err(ApiError::validation(
            "destination",
            "Source and destination must be different stations.",
        ));
    }

    let source = station::Entity::find_by_id(payload.source)
        .one(db)
        .await?
        .ok_or_else(|| {
            ApiError::validation("source", format!("Station {} does not exist", payload.source))
        })?;
    let destination = station::Entity::find_by_id(payload.destination)
        .one(db)
        .await?
        .ok_or_else(|| {
            ApiError::validation(
                "destination",
                format!("Station {} does not exist", payload.destination),
            )
        })?;

    Ok((source, destination))
}

async fn station_or_404(db: &DatabaseConnection, id: Uuid) -> Result<station::Model, ApiError> {
    station::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Station {id} does not exist")))
}
