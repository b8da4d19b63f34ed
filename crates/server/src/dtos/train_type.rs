use database::entities::train_type;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct TrainTypeResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<train_type::Model> for TrainTypeResponse {
    fn from(model: train_type::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TrainTypeRequest {
    pub name: String,
}
