use axum::routing::{delete, get, put};
use axum::{Router, extract::DefaultBodyLimit};
use util::{config, state::AppState};

pub mod avatar;
pub mod common;
pub mod get;
pub mod put;

use avatar::{remove_avatar, upload_avatar};
use get::get_profile;
use put::update_profile;

/// Profile endpoints for the authenticated user. Authentication is enforced
/// by the parent router.
pub fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_profile))
        .route("/", put(update_profile))
        .route(
            "/avatar",
            put(upload_avatar).layer(DefaultBodyLimit::max(config::max_upload_bytes() + 16 * 1024)),
        )
        .route("/avatar", delete(remove_avatar))
}
