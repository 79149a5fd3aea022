use crate::routes::common::{Empty, error_response};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use services::FileService;
use util::state::AppState;

/// DELETE /api/courses/{course_id}/folders/{folder_id}
///
/// Cascade-deletes the folder and everything it transitively contains.
/// Safe to retry after a partial failure. Only accessible to instructors of
/// the course.
///
/// ### Responses
/// - `204 No Content` — the folder and its contents are gone
/// - `404 Not Found` — unknown folder, already deleted, or belonging to a
///   different course
pub async fn delete_folder(
    State(app_state): State<AppState>,
    Path((course_id, folder_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    let service = FileService::from_state(&app_state);

    match service.delete_folder(course_id, folder_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response::<Empty>(err),
    }
}
