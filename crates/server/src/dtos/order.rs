use chrono::{DateTime, FixedOffset};
use database::entities::{order, ticket};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct TicketRequest {
    pub cargo: i32,
    pub seat: i32,
    pub trip: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderRequest {
    pub tickets: Vec<TicketRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TicketResponse {
    pub id: Uuid,
    pub cargo: i32,
    pub seat: i32,
    pub trip: Uuid,
}

impl From<ticket::Model> for TicketResponse {
    fn from(model: ticket::Model) -> Self {
        Self {
            id: model.id,
            cargo: model.cargo,
            seat: model.seat,
            trip: model.trip_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub created_at: DateTime<FixedOffset>,
    pub tickets: Vec<TicketResponse>,
}

impl From<(order::Model, Vec<ticket::Model>)> for OrderResponse {
    fn from((order, tickets): (order::Model, Vec<ticket::Model>)) -> Self {
        Self {
            id: order.id,
            created_at: order.created_at,
            tickets: tickets.into_iter().map(Into::into).collect(),
        }
    }
}
