//! HTTP-facing error type.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use calendar_core::CalendarError;
use thiserror::Error;

use crate::fonts::FontError;
use crate::raster::RasterError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] CalendarError),

    #[error("font unavailable: {0}")]
    UpstreamUnavailable(#[from] FontError),

    #[error("render failed: {0}")]
    Render(#[from] RasterError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{self}");
        } else {
            tracing::debug!("Rejected request: {self}");
        }
        (status, self.to_string()).into_response()
    }
}
