use crate::routes::common::{Empty, error_response};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use services::FileService;
use util::state::AppState;

/// DELETE /api/courses/{course_id}/files/{file_id}
///
/// Removes a file record and releases its remote object best-effort. Only
/// accessible to instructors of the course.
///
/// ### Responses
/// - `204 No Content` — the file is gone
/// - `404 Not Found` — unknown file, already deleted, or belonging to a
///   different course
pub async fn delete_file(
    State(app_state): State<AppState>,
    Path((course_id, file_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    let service = FileService::from_state(&app_state);

    match service.delete_file(course_id, file_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response::<Empty>(err),
    }
}
