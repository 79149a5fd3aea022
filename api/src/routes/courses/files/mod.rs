use crate::auth::guards::{allow_course_member, require_course_instructor};
use axum::routing::{delete, get, post};
use axum::{Router, extract::DefaultBodyLimit, middleware::from_fn_with_state};
use util::{config, state::AppState};

pub mod common;
pub mod delete;
pub mod get;
pub mod post;

use delete::delete_file;
use get::list_files_and_folders;
use post::upload_file;

pub fn file_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_files_and_folders).route_layer(from_fn_with_state(
                app_state.clone(),
                allow_course_member,
            )),
        )
        .route(
            "/",
            post(upload_file)
                .route_layer(from_fn_with_state(
                    app_state.clone(),
                    require_course_instructor,
                ))
                .layer(DefaultBodyLimit::max(config::max_upload_bytes() + 16 * 1024)),
        )
        .route(
            "/{file_id}",
            delete(delete_file)
                .route_layer(from_fn_with_state(app_state, require_course_instructor)),
        )
}
