pub mod auth;
pub mod batch;
pub mod health;
pub mod session;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                                  service + database health
///
/// /auth/register                           register (public)
/// /auth/login                              login (public)
/// /auth/logout                             logout (requires auth)
/// /auth/me                                 current user (requires auth)
///
/// /batches                                 list (public), create (token optional)
/// /batches/{id}                            get, update, delete (requires auth)
///
/// /sessions                                list (public), create (token optional)
/// /sessions/{id}                           get, update, delete (requires auth)
/// /sessions/batch/{batch_id}               sessions of a batch (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/auth", auth::router())
        .nest("/batches", batch::router())
        .nest("/sessions", session::router())
}
