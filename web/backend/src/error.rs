//! Conversion of search failures into HTTP responses.

use artistfeed_core::SearchError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::models::ErrorResponse;

#[derive(Debug)]
pub struct ApiError(pub SearchError);

impl From<SearchError> for ApiError {
    fn from(e: SearchError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self.0, "Artist search failed");
        } else {
            tracing::debug!(status = %status, error = %self.0, "Rejected artist search");
        }

        let body = ErrorResponse {
            success: false,
            error: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
