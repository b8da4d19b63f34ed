pub mod crew;
pub mod health;
pub mod order;
pub mod route;
pub mod station;
pub mod train;
pub mod train_type;
pub mod trip;

use crate::error::ApiError;

/// Trims a required text field, rejecting blank input.
pub(crate) fn non_blank(field: &'static str, value: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(field, "This field may not be blank."));
    }
    Ok(trimmed.to_owned())
}

pub(crate) fn positive(field: &'static str, value: i32) -> Result<i32, ApiError> {
    if value < 1 {
        return Err(ApiError::validation(field, "Must be a positive integer."));
    }
    Ok(value)
}
