use core::convert::Infallible;
use core::task::{Context, Poll};

use axum::body::Body;
use axum::extract::Request;
use axum::http::header::CONTENT_LENGTH;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;
use tower::{Layer, Service};
use tracing::debug;

use crate::error::ApiError;

/// Rejects requests by their declared `Content-Length` before the body is
/// read: 411 when the header is missing, 413 when it exceeds `max`.
#[derive(Clone, Copy, Debug)]
pub struct ContentLengthLayer {
    max: usize,
}

impl ContentLengthLayer {
    #[must_use]
    pub const fn new(max: usize) -> Self {
        Self { max }
    }
}

impl<S> Layer<S> for ContentLengthLayer {
    type Service = ContentLengthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ContentLengthMiddleware {
            inner,
            max: self.max,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ContentLengthMiddleware<S> {
    inner: S,
    max: usize,
}

impl<S> Service<Request<Body>> for ContentLengthMiddleware<S>
where
    S: Service<Request<Body>, Response = Response<Body>, Error = Infallible> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        if let Err(err) = check_content_length(request.headers(), self.max) {
            debug!(status = %err.status_code(), message = %err.message, "rejecting request");

            let error_response = err.into_response();
            return Box::pin(async move { Ok(error_response) });
        }

        Box::pin(self.inner.call(request))
    }
}

pub fn check_content_length(headers: &HeaderMap, max: usize) -> Result<usize, ApiError> {
    let length = headers
        .get(CONTENT_LENGTH)
        .ok_or_else(|| ApiError::new(StatusCode::LENGTH_REQUIRED, "content length required"))?;

    let length = length
        .to_str()
        .ok()
        .and_then(|length| length.trim().parse::<u64>().ok())
        .ok_or_else(|| ApiError::new(StatusCode::BAD_REQUEST, "invalid content length"))?;

    match usize::try_from(length) {
        Ok(length) if length <= max => Ok(length),
        _ => Err(ApiError::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            "content too large",
        )),
    }
}
