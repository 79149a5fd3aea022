use crate::auth::guards::{allow_course_member, require_course_instructor};
use axum::routing::{delete, get, post, put};
use axum::{Router, middleware::from_fn_with_state};
use util::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use delete::delete_announcement;
use get::get_announcements;
use post::create_announcement;
use put::edit_announcement;

pub fn announcement_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_announcement).route_layer(from_fn_with_state(
                app_state.clone(),
                require_course_instructor,
            )),
        )
        .route(
            "/{announcement_id}",
            put(edit_announcement).route_layer(from_fn_with_state(
                app_state.clone(),
                require_course_instructor,
            )),
        )
        .route(
            "/{announcement_id}",
            delete(delete_announcement).route_layer(from_fn_with_state(
                app_state.clone(),
                require_course_instructor,
            )),
        )
        .route(
            "/",
            get(get_announcements).route_layer(from_fn_with_state(app_state, allow_course_member)),
        )
}
