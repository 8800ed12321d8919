//! HTTP host for facet summation
//!
//! This crate serves [`facetsum_core`] over a single `POST /challenge`
//! endpoint. Everything that is a transport concern lives here: verb
//! checks, `Content-Length` gating and status code mapping.

use axum::body::Bytes;
use axum::extract::DefaultBodyLimit;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use eyre::Result as EyreResult;
use futures_util::future;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

pub mod config;
mod error;
mod middleware;

pub use config::{addr_from_str, ServerConfig, DEFAULT_ADDR, DEFAULT_PORT, MAX_CONTENT_LENGTH};
pub use error::ApiError;
use middleware::content_length::ContentLengthLayer;

pub const CHALLENGE_PATH: &str = "/challenge";

/// Facet summation service that handles incoming requests
#[derive(Debug)]
pub struct FacetService {
    config: ServerConfig,
}

impl FacetService {
    #[must_use]
    pub const fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Serve until interrupted with Ctrl-C
    pub async fn start(self) -> EyreResult<()> {
        let listener = TcpListener::bind(self.config.listen).await?;

        info!(
            "Listening on '\x1b[1;33mhttp://{}{}\x1b[0m'",
            listener.local_addr()?,
            CHALLENGE_PATH
        );

        axum::serve(listener, router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");

        Ok(())
    }
}

/// The challenge endpoint with its boundary checks.
///
/// Other verbs get 405. POST requests must declare a `Content-Length` of at
/// most [`MAX_CONTENT_LENGTH`], and a body longer than that is cut off with
/// 413 while being read.
pub fn router() -> Router {
    let challenge = post(handle_challenge)
        .layer(DefaultBodyLimit::max(MAX_CONTENT_LENGTH))
        .route_layer(ContentLengthLayer::new(MAX_CONTENT_LENGTH))
        .fallback(method_not_allowed);

    Router::new()
        .route(CHALLENGE_PATH, challenge)
        .layer(TraceLayer::new_for_http())
}

async fn handle_challenge(body: Bytes) -> Result<impl IntoResponse, ApiError> {
    let response = facetsum_core::sum_facets(&body)?;

    debug!(request = body.len(), response = response.len(), "summed facets");

    Ok(([(CONTENT_TYPE, "application/json")], response))
}

async fn method_not_allowed(method: Method) -> ApiError {
    debug!(%method, "rejecting request method");

    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "invalid request method")
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!(%err, "failed to listen for shutdown signal");
        // never resolve, the server keeps running
        future::pending::<()>().await;
    }

    info!("Shutting down..");
}
