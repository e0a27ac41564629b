//! The HTTP surface: routes plus the middleware every request passes through.
//!
//! `main.rs` and the integration tests both call [`build_app_router`], so a
//! test exercises the same layers as production.

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::{CorsOrigins, ServerConfig};
use crate::routes;
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Preflight responses may be cached by the browser for this long.
const CORS_MAX_AGE: Duration = Duration::from_secs(60 * 60);

/// Assemble the welcome banner, the `/api` tree and the middleware stack.
///
/// Layers are listed outermost first. CORS answers preflights before
/// anything else runs. The request id is assigned before the trace span opens
/// so every log line of a request carries it, and it is copied onto the
/// response. Timeouts and panics are turned into 408 and 500 responses
/// innermost, so they still pass through tracing and CORS.
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let timeout = Duration::from_secs(config.request_timeout_secs);

    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::new(request_id))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(CatchPanicLayer::new());

    routes::health::root_router()
        .nest("/api", routes::api_routes())
        .layer(middleware)
        .layer(build_cors_layer(config))
        .with_state(state)
}

/// CORS policy for the configured origins.
///
/// `*` is sent without credentials; an explicit origin list allows them.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let policy = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(CORS_MAX_AGE);

    match &config.cors_origins {
        CorsOrigins::Any => policy.allow_origin(Any),
        CorsOrigins::List(origins) => policy
            .allow_origin(origins.clone())
            .allow_credentials(true),
    }
}
