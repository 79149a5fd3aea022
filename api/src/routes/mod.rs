//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → health check endpoint (public)
//! - `/courses` → course folders, files and announcements (authenticated;
//!   write operations additionally guarded per course role)
//! - `/me` → profile endpoints for the authenticated user

use crate::auth::guards::allow_authenticated;
use axum::{Router, middleware::from_fn};
use util::state::AppState;

pub mod common;
pub mod courses;
pub mod health;
pub mod me;

/// Builds the complete application router for all HTTP endpoints.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health::health_routes())
        .nest("/courses", courses::course_routes(app_state.clone()))
        .nest(
            "/me",
            me::me_routes().route_layer(from_fn(allow_authenticated)),
        )
        .with_state(app_state)
}
