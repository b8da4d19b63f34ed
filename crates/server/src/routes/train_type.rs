use crate::auth::RailwayClaims;
use crate::dtos::train_type::{TrainTypeRequest, TrainTypeResponse};
use crate::error::ApiError;
use crate::routes::non_blank;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};
use database::db::create_connection;
use database::entities::train_type;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait};
use uuid::Uuid;

/// List all train types
#[utoipa::path(
    get,
    path = "/api/railway/train-types",
    responses(
        (status = 200, description = "Train types retrieved successfully", body = [TrainTypeResponse]),
        (status = 401, description = "Unauthorized - invalid or missing JWT")
    ),
    security(("jwt" = [])),
    tag = "Train types"
)]
pub async fn list_train_types() -> Result<Json<Vec<TrainTypeResponse>>, ApiError> {
    let db = create_connection().await?;
    let types = train_type::Entity::find().all(&db).await?;
    Ok(Json(types.into_iter().map(Into::into).collect()))
}

/// Get a train type by id
#[utoipa::path(
    get,
    path = "/api/railway/train-types/{id}",
    params(("id" = Uuid, Path, description = "Train type ID")),
    responses(
        (status = 200, description = "Train type found", body = TrainTypeResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 404, description = "Train type not found")
    ),
    security(("jwt" = [])),
    tag = "Train types"
)]
pub async fn get_train_type(Path(id): Path<Uuid>) -> Result<Json<TrainTypeResponse>, ApiError> {
    let db = create_connection().await?;
    let found = train_type::Entity::find_by_id(id)
        .one(&db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Train type {id} does not exist")))?;
    Ok(Json(found.into()))
}

/// Create a train type (administrators only)
#[utoipa::path(
    post,
    path = "/api/railway/train-types",
    request_body = TrainTypeRequest,
    responses(
        (status = 201, description = "Train type created", body = TrainTypeResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 403, description = "Forbidden - administrator role required")
    ),
    security(("jwt" = [])),
    tag = "Train types"
)]
pub async fn create_train_type(
    Extension(claims): Extension<RailwayClaims>,
    Json(payload): Json<TrainTypeRequest>,
) -> Result<(StatusCode, Json<TrainTypeResponse>), ApiError> {
    claims.require_admin()?;
    let name = non_blank("name", &payload.name)?;

    let db = create_connection().await?;
    let created = train_type::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
    }
    .insert(&db)
    .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Update a train type (administrators only)
#[utoipa::path(
    put,
    path = "/api/railway/train-types/{id}",
    params(("id" = Uuid, Path, description = "Train type ID")),
    request_body = TrainTypeRequest,
    responses(
        (status = 200, description = "Train type updated", body = TrainTypeResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 403, description = "Forbidden - administrator role required"),
        (status = 404, description = "Train type not found")
    ),
    security(("jwt" = [])),
    tag = "Train types"
)]
pub async fn update_train_type(
    Extension(claims): Extension<RailwayClaims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TrainTypeRequest>,
) -> Result<Json<TrainTypeResponse>, ApiError> {
    claims.require_admin()?;
    let name = non_blank("name", &payload.name)?;

    let db = create_connection().await?;
    let existing = train_type::Entity::find_by_id(id)
        .one(&db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Train type {id} does not exist")))?;

    let mut active: train_type::ActiveModel = existing.into();
    active.name = Set(name);
    let updated = active.update(&db).await?;

    Ok(Json(updated.into()))
}

/// Delete a train type (administrators only)
#[utoipa::path(
    delete,
    path = "/api/railway/train-types/{id}",
    params(("id" = Uuid, Path, description = "Train type ID")),
    responses(
        (status = 204, description = "Train type deleted"),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 403, description = "Forbidden - administrator role required"),
        (status = 404, description = "Train type not found")
    ),
    security(("jwt" = [])),
    tag = "Train types"
)]
pub async fn delete_train_type(
    Extension(claims): Extension<RailwayClaims>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    claims.require_admin()?;

    let db = create_connection().await?;
    let result = train_type::Entity::delete_by_id(id).exec(&db).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found(format!("Train type {id} does not exist")));
    }

    Ok(StatusCode::NO_CONTENT)
}
