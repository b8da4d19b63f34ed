use crate::auth::RailwayClaims;
use crate::dtos::crew::{CrewRequest, CrewResponse};
use crate::error::ApiError;
use crate::routes::non_blank;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};
use database::db::create_connection;
use database::entities::crew;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait};
use uuid::Uuid;

/// List all crew members
#[utoipa::path(
    get,
    path = "/api/railway/crews",
    responses(
        (status = 200, description = "Crew members retrieved successfully", body = [CrewResponse]),
        (status = 401, description = "Unauthorized - invalid or missing JWT")
    ),
    security(("jwt" = [])),
    tag = "Crews"
)]
pub async fn list_crews() -> Result<Json<Vec<CrewResponse>>, ApiError> {
    let db = create_connection().await?;
    let crews = crew::Entity::find().all(&db).await?;
    Ok(Json(crews.into_iter().map(Into::into).collect()))
}

/// Get a crew member by id
#[utoipa::path(
    get,
    path = "/api/railway/crews/{id}",
    params(("id" = Uuid, Path, description = "Crew member ID")),
    responses(
        (status = 200, description = "Crew member found", body = CrewResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 404, description = "Crew member not found")
    ),
    security(("jwt" = [])),
    tag = "Crews"
)]
pub async fn get_crew(Path(id): Path<Uuid>) -> Result<Json<CrewResponse>, ApiError> {
    let db = create_connection().await?;
    let found = crew::Entity::find_by_id(id)
        .one(&db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Crew member {id} does not exist")))?;
    Ok(Json(found.into()))
}

/// Create a crew member (administrators only)
#[utoipa::path(
    post,
    path = "/api/railway/crews",
    request_body = CrewRequest,
    responses(
        (status = 201, description = "Crew member created", body = CrewResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 403, description = "Forbidden - administrator role required")
    ),
    security(("jwt" = [])),
    tag = "Crews"
)]
pub async fn create_crew(
    Extension(claims): Extension<RailwayClaims>,
    Json(payload): Json<CrewRequest>,
) -> Result<(StatusCode, Json<CrewResponse>), ApiError> {
    claims.require_admin()?;
    let first_name = non_blank("first_name", &payload.first_name)?;
    let last_name = non_blank("last_name", &payload.last_name)?;

    let db = create_connection().await?;
    let created = crew::ActiveModel {
        id: Set(Uuid::new_v4()),
        first_name: Set(first_name),
        last_name: Set(last_name),
    }
    .insert(&db)
    .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Update a crew member (administrators only)
#[utoipa::path(
    put,
    path = "/api/railway/crews/{id}",
    params(("id" = Uuid, Path, description = "Crew member ID")),
    request_body = CrewRequest,
    responses(
        (status = 200, description = "Crew member updated", body = CrewResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 403, description = "Forbidden - administrator role required"),
        (status = 404, description = "Crew member not found")
    ),
    security(("jwt" = [])),
    tag = "Crews"
)]
pub async fn update_crew(
    Extension(claims): Extension<RailwayClaims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CrewRequest>,
) -> Result<Json<CrewResponse>, ApiError> {
    claims.require_admin()?;
    let first_name = non_blank("first_name", &payload.first_name)?;
    let last_name = non_blank("last_name", &payload.last_name)?;

    let db = create_connection().await?;
    let existing = crew::Entity::find_by_id(id)
        .one(&db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Crew member {id} does not exist")))?;

    let mut active: crew::ActiveModel = existing.into();
    active.first_name = Set(first_name);
    active.last_name = Set(last_name);
    let updated = active.update(&db).await?;

    Ok(Json(updated.into()))
}

/// Delete a crew member (administrators only)
#[utoipa::path(
    delete,
    path = "/api/railway/crews/{id}",
    params(("id" = Uuid, Path, description = "Crew member ID")),
    responses(
        (status = 204, description = "Crew member deleted"),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 403, description = "Forbidden - administrator role required"),
        (status = 404, description = "Crew member not found")
    ),
    security(("jwt" = [])),
    tag = "Crews"
)]
pub async fn delete_crew(
    Extension(claims): Extension<RailwayClaims>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    claims.require_admin()?;

    let db = create_connection().await?;
    let result = crew::Entity::delete_by_id(id).exec(&db).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found(format!("Crew member {id} does not exist")));
    }

    Ok(StatusCode::NO_CONTENT)
}
