use database::entities::station;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct StationResponse {
    pub id: Uuid,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<station::Model> for StationResponse {
    fn from(model: station::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            latitude: model.latitude,
            longitude: model.longitude,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StationRequest {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}
