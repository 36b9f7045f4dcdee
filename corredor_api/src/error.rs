use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use corredor_routing::error::RoutingError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    InternalServerError(String),
    NotFound(String),
}

impl From<RoutingError> for ApiError {
    fn from(error: RoutingError) -> Self {
        match error {
            RoutingError::Resolution(text) => {
                ApiError::NotFound(format!("Destination not found: {text}"))
            }
            RoutingError::Unreachable => ApiError::NotFound("No path available".to_string()),
            error @ RoutingError::InvalidCoordinates { .. } => {
                ApiError::BadRequest(error.to_string())
            }
            error => ApiError::InternalServerError(error.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InternalServerError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
        }
    }
}
