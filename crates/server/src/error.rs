use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use database::services::order::OrderError;
use database::services::trip::TripError;
use log::error;
use models::booking::BookingError;
use sea_orm::DbErr;
use serde_json::{Map, Value, json};
use thiserror::Error;

/// Everything a handler can fail with, mapped onto the HTTP error taxonomy.
/// Validation failures carry the offending field so clients get field-level
/// bodies; seat conflicts are deliberately surfaced as validation errors.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Validation { field: String, message: String },
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Db(#[from] DbErr),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        ApiError::NotFound(detail.into())
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        ApiError::validation(err.field(), err.to_string())
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::EmptyOrder => ApiError::validation("tickets", err.to_string()),
            OrderError::TripNotFound(_) => ApiError::validation("trip", err.to_string()),
            OrderError::Booking(e) => e.into(),
            OrderError::Db(e) => e.into(),
        }
    }
}

impl From<TripError> for ApiError {
    fn from(err: TripError) -> Self {
        match err {
            TripError::ArrivalBeforeDeparture => {
                ApiError::validation("arrival_time", err.to_string())
            }
            TripError::TripNotFound(_) => ApiError::not_found(err.to_string()),
            TripError::RouteNotFound(_) => ApiError::validation("route", err.to_string()),
            TripError::TrainNotFound(_) => ApiError::validation("train", err.to_string()),
            TripError::CrewNotFound(_) => ApiError::validation("crew", err.to_string()),
            TripError::Db(e) => e.into(),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation { field, message } => {
                let mut body = Map::new();
                body.insert(field, Value::String(message));
                (StatusCode::BAD_REQUEST, Json(Value::Object(body))).into_response()
            }
            ApiError::Unauthorized(detail) => {
                (StatusCode::UNAUTHORIZED, Json(json!({ "detail": detail }))).into_response()
            }
            ApiError::Forbidden(detail) => {
                (StatusCode::FORBIDDEN, Json(json!({ "detail": detail }))).into_response()
            }
            ApiError::NotFound(detail) => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": detail }))).into_response()
            }
            ApiError::Db(err) => {
                error!("database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Internal server error" })),
                )
                    .into_response()
            }
            ApiError::Internal(detail) => {
                error!("internal error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
