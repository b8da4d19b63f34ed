use crate::auth::RailwayClaims;
use crate::dtos::train::{TrainImageForm, TrainListResponse, TrainRequest, TrainResponse};
use crate::error::ApiError;
use crate::routes::{non_blank, positive};
use axum::extract::{Multipart, Path};
use axum::http::StatusCode;
use axum::{Extension, Json};
use database::db::create_connection;
use database::entities::{train, train_type};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait};
use std::collections::HashMap;
use std::path::PathBuf;
use uuid::Uuid;

/// List all trains
#[utoipa::path(
    get,
    path = "/api/railway/trains",
    responses(
        (status = 200, description = "Trains retrieved successfully", body = [TrainListResponse]),
        (status = 401, description = "Unauthorized - invalid or missing JWT")
    ),
    security(("jwt" = [])),
    tag = "Trains"
)]
pub async fn list_trains() -> Result<Json<Vec<TrainListResponse>>, ApiError> {
    let db = create_connection().await?;
    let trains = train::Entity::find().all(&db).await?;
    let types: HashMap<Uuid, train_type::Model> = train_type::Entity::find()
        .all(&db)
        .await?
        .into_iter()
        .map(|t| (t.id, t))
        .collect();

    let mut responses = Vec::with_capacity(trains.len());
    for train in trains {
        let train_type = types.get(&train.train_type_id).ok_or_else(|| {
            ApiError::not_found(format!("Train type {} does not exist", train.train_type_id))
        })?;
        responses.push((train, train_type.clone()).into());
    }

    Ok(Json(responses))
}

/// Get a train by id, with its type nested
#[utoipa::path(
    get,
    path = "/api/railway/trains/{id}",
    params(("id" = Uuid, Path, description = "Train ID")),
    responses(
        (status = 200, description = "Train found", body = TrainResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 404, description = "Train not found")
    ),
    security(("jwt" = [])),
    tag = "Trains"
)]
pub async fn get_train(Path(id): Path<Uuid>) -> Result<Json<TrainResponse>, ApiError> {
    let db = create_connection().await?;
    let found = train::Entity::find_by_id(id)
        .one(&db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Train {id} does not exist")))?;
    let train_type = type_or_validation(&db, found.train_type_id).await?;
    Ok(Json((found, train_type).into()))
}

/// Create a train (administrators only)
#[utoipa::path(
    post,
    path = "/api/railway/trains",
    request_body = TrainRequest,
    responses(
        (status = 201, description = "Train created", body = TrainResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 403, description = "Forbidden - administrator role required")
    ),
    security(("jwt" = [])),
    tag = "Trains"
)]
pub async fn create_train(
    Extension(claims): Extension<RailwayClaims>,
    Json(payload): Json<TrainRequest>,
) -> Result<(StatusCode, Json<TrainResponse>), ApiError> {
    claims.require_admin()?;
    let name = non_blank("name", &payload.name)?;
    positive("cargo_num", payload.cargo_num)?;
    positive("places_in_cargo", payload.places_in_cargo)?;

    let db = create_connection().await?;
    let train_type = type_or_validation(&db, payload.train_type).await?;

    let created = train::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        cargo_num: Set(payload.cargo_num),
        places_in_cargo: Set(payload.places_in_cargo),
        train_type_id: Set(payload.train_type),
        image_path: Set(None),
    }
    .insert(&db)
    .await?;

    Ok((StatusCode::CREATED, Json((created, train_type).into())))
}

/// Update a train (administrators only)
#[utoipa::path(
    put,
    path = "/api/railway/trains/{id}",
    params(("id" = Uuid, Path, description = "Train ID")),
    request_body = TrainRequest,
    responses(
        (status = 200, description = "Train updated", body = TrainResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 403, description = "Forbidden - administrator role required"),
        (status = 404, description = "Train not found")
    ),
    security(("jwt" = [])),
    tag = "Trains"
)]
pub async fn update_train(
    Extension(claims): Extension<RailwayClaims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TrainRequest>,
) -> Result<Json<TrainResponse>, ApiError> {
    claims.require_admin()?;
    let name = non_blank("name", &payload.name)?;
    positive("cargo_num", payload.cargo_num)?;
    positive("places_in_cargo", payload.places_in_cargo)?;

    let db = create_connection().await?;
    let existing = train::Entity::find_by_id(id)
        .one(&db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Train {id} does not exist")))?;
    let train_type = type_or_validation(&db, payload.train_type).await?;

    let mut active: train::ActiveModel = existing.into();
    active.name = Set(name);
    active.cargo_num = Set(payload.cargo_num);
    active.places_in_cargo = Set(payload.places_in_cargo);
    active.train_type_id = Set(payload.train_type);
    let updated = active.update(&db).await?;

    Ok(Json((updated, train_type).into()))
}

/// Delete a train (administrators only)
#[utoipa::path(
    delete,
    path = "/api/railway/trains/{id}",
    params(("id" = Uuid, Path, description = "Train ID")),
    responses(
        (status = 204, description = "Train deleted"),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 403, description = "Forbidden - administrator role required"),
        (status = 404, description = "Train not found")
    ),
    security(("jwt" = [])),
    tag = "Trains"
)]
pub async fn delete_train(
    Extension(claims): Extension<RailwayClaims>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    claims.require_admin()?;

    let db = create_connection().await?;
    let result = train::Entity::delete_by_id(id).exec(&db).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found(format!("Train {id} does not exist")));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Upload an image for a train (administrators only)
#[utoipa::path(
    post,
    path = "/api/railway/trains/{id}/upload-image",
    params(("id" = Uuid, Path, description = "Train ID")),
    request_body(content = TrainImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = TrainResponse),
        (status = 400, description = "Payload is not an image"),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 403, description = "Forbidden - administrator role required"),
        (status = 404, description = "Train not found")
    ),
    security(("jwt" = [])),
    tag = "Trains"
)]
pub async fn upload_train_image(
    Extension(claims): Extension<RailwayClaims>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<TrainResponse>, ApiError> {
    claims.require_admin()?;

    let db = create_connection().await?;
    let existing = train::Entity::find_by_id(id)
        .one(&db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Train {id} does not exist")))?;
    let train_type = type_or_validation(&db, existing.train_type_id).await?;

    let mut stored: Option<String> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::validation("image", "Malformed multipart payload."))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let content_type = field.content_type().map(str::to_owned).unwrap_or_default();
        let Some(extension) = content_type.strip_prefix("image/") else {
            return Err(ApiError::validation(
                "image",
                "Upload a valid image. The submitted file is not an image.",
            ));
        };
        let extension = extension.to_owned();

        let bytes = field
            .bytes()
            .await
            .map_err(|_| ApiError::validation("image", "Malformed multipart payload."))?;

        let media_root = std::env::var("MEDIA_ROOT").unwrap_or_else(|_| "media".to_owned());
        let dir = PathBuf::from(media_root).join("trains");
        tokio::fs::create_dir_all(&dir).await?;

        let filename = format!("{}-{}.{}", id, Uuid::new_v4(), extension);
        tokio::fs::write(dir.join(&filename), &bytes).await?;
        stored = Some(format!("trains/{filename}"));
    }

    let Some(image_path) = stored else {
        return Err(ApiError::validation("image", "No image file was submitted."));
    };

    let mut active: train::ActiveModel = existing.into();
    active.image_path = Set(Some(image_path));
    let updated = active.update(&db).await?;

    Ok(Json((updated, train_type).into()))
}

async fn type_or_validation(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<train_type::Model, ApiError> {
    train_type::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| {
            ApiError::validation("train_type", format!("Train type {id} does not exist"))
        })
}
