use crate::auth::guards::require_course_instructor;
use axum::routing::{delete, post};
use axum::{Router, middleware::from_fn_with_state};
use util::state::AppState;

pub mod delete;
pub mod post;

use delete::delete_folder;
use post::create_folder;

pub fn folder_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_folder).route_layer(from_fn_with_state(
                app_state.clone(),
                require_course_instructor,
            )),
        )
        .route(
            "/{folder_id}",
            delete(delete_folder)
                .route_layer(from_fn_with_state(app_state, require_course_instructor)),
        )
}
