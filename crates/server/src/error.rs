//! Error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use facetsum_core::FacetError;
use tracing::{debug, warn};

/// A rejected request, answered with a plain text message.
#[derive(Debug)]
pub struct ApiError {
    pub(crate) status_code: StatusCode,
    pub(crate) message: String,
}

impl ApiError {
    pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        self.status_code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code, self.message).into_response()
    }
}

impl From<FacetError> for ApiError {
    fn from(err: FacetError) -> Self {
        match err {
            FacetError::Invalid(err) => {
                debug!(facet = err.facet(), %err, "rejecting invalid facet request");

                Self::new(StatusCode::BAD_REQUEST, err.to_string())
            }
            err => {
                warn!(%err, "failed to produce facet sums");

                Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        }
    }
}
