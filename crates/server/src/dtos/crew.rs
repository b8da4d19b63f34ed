use database::entities::crew;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct CrewResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
}

impl From<crew::Model> for CrewResponse {
    fn from(model: crew::Model) -> Self {
        Self {
            id: model.id,
            full_name: model.full_name(),
            first_name: model.first_name,
            last_name: model.last_name,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CrewRequest {
    pub first_name: String,
    pub last_name: String,
}
