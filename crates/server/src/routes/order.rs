use crate::auth::RailwayClaims;
use crate::dtos::order::{OrderRequest, OrderResponse};
use crate::error::ApiError;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};
use database::db::create_connection;
use database::services::order::{NewTicket, OrderService};
use uuid::Uuid;

/// List the caller's orders, newest first
#[utoipa::path(
    get,
    path = "/api/railway/orders",
    responses(
        (status = 200, description = "Orders retrieved successfully", body = [OrderResponse]),
        (status = 401, description = "Unauthorized - invalid or missing JWT")
    ),
    security(("jwt" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    Extension(claims): Extension<RailwayClaims>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let user_id = claims.subject()?;
    let db = create_connection().await?;
    let orders = OrderService::list_for_user(&db, user_id).await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

/// Get one of the caller's orders
#[utoipa::path(
    get,
    path = "/api/railway/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 404, description = "Order not found or owned by someone else")
    ),
    security(("jwt" = [])),
    tag = "Orders"
)]
pub async fn get_order(
    Extension(claims): Extension<RailwayClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, ApiError> {
    let user_id = claims.subject()?;
    let db = create_connection().await?;
    let found = OrderService::get_for_user(&db, user_id, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Order {id} does not exist")))?;
    Ok(Json(found.into()))
}

/// Book seats: create an order and all of its tickets atomically
#[utoipa::path(
    post,
    path = "/api/railway/orders",
    request_body = OrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Validation error - out-of-range or already booked seat, unknown trip, or empty ticket list"),
        (status = 401, description = "Unauthorized - invalid or missing JWT")
    ),
    security(("jwt" = [])),
    tag = "Orders"
)]
pub async fn create_order(
    Extension(claims): Extension<RailwayClaims>,
    Json(payload): Json<OrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let user_id = claims.subject()?;
    let db = create_connection().await?;

    let requests = payload
        .tickets
        .into_iter()
        .map(|t| NewTicket {
            cargo: t.cargo,
            seat: t.seat,
            trip_id: t.trip,
        })
        .collect();
    let created = OrderService::create_order(&db, user_id, requests).await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Delete one of the caller's orders; its tickets cascade
#[utoipa::path(
    delete,
    path = "/api/railway/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 404, description = "Order not found or owned by someone else")
    ),
    security(("jwt" = [])),
    tag = "Orders"
)]
pub async fn delete_order(
    Extension(claims): Extension<RailwayClaims>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let user_id = claims.subject()?;
    let db = create_connection().await?;
    if !OrderService::delete_for_user(&db, user_id, id).await? {
        return Err(ApiError::not_found(format!("Order {id} does not exist")));
    }
    Ok(StatusCode::NO_CONTENT)
}
