use axum::Router;
use util::state::AppState;

pub mod announcements;
pub mod files;
pub mod folders;

/// Routes scoped to a single course. Role guards are attached per route in
/// each group, since read and write operations differ in required role.
pub fn course_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .nest(
            "/{course_id}/folders",
            folders::folder_routes(app_state.clone()),
        )
        .nest("/{course_id}/files", files::file_routes(app_state.clone()))
        .nest(
            "/{course_id}/announcements",
            announcements::announcement_routes(app_state),
        )
}
