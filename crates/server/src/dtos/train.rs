use crate::dtos::train_type::TrainTypeResponse;
use database::entities::{train, train_type};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Compact shape used by the train listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct TrainListResponse {
    pub id: Uuid,
    pub name: String,
    pub cargo_num: i32,
    pub places_in_cargo: i32,
    pub train_type_name: String,
    pub capacity: i64,
}

impl From<(train::Model, train_type::Model)> for TrainListResponse {
    fn from((train, train_type): (train::Model, train_type::Model)) -> Self {
        Self {
            id: train.id,
            capacity: train.capacity(),
            name: train.name,
            cargo_num: train.cargo_num,
            places_in_cargo: train.places_in_cargo,
            train_type_name: train_type.name,
        }
    }
}

/// Full shape with the train type nested, used on retrieve and after writes.
#[derive(Debug, Serialize, ToSchema)]
pub struct TrainResponse {
    pub id: Uuid,
    pub name: String,
    pub cargo_num: i32,
    pub places_in_cargo: i32,
    pub train_type: TrainTypeResponse,
    pub capacity: i64,
    pub image_path: Option<String>,
}

impl From<(train::Model, train_type::Model)> for TrainResponse {
    fn from((train, train_type): (train::Model, train_type::Model)) -> Self {
        Self {
            id: train.id,
            capacity: train.capacity(),
            name: train.name,
            cargo_num: train.cargo_num,
            places_in_cargo: train.places_in_cargo,
            train_type: train_type.into(),
            image_path: train.image_path,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TrainRequest {
    pub name: String,
    pub cargo_num: i32,
    pub places_in_cargo: i32,
    pub train_type: Uuid,
}

/// Multipart form for the train image upload.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct TrainImageForm {
    #[schema(value_type = String, format = Binary)]
    pub image: String,
}
