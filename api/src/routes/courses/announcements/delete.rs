use crate::response::ApiResponse;
use crate::routes::common::Empty;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::announcement::Model as AnnouncementModel;
use util::state::AppState;

/// DELETE /api/courses/{course_id}/announcements/{announcement_id}
///
/// Only accessible to instructors of the course.
pub async fn delete_announcement(
    State(app_state): State<AppState>,
    Path((course_id, announcement_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    let db = app_state.db();

    match AnnouncementModel::find_in_course(db, announcement_id, course_id).await {
        Ok(Some(announcement)) => match AnnouncementModel::delete(db, announcement.id).await {
            Ok(()) => (
                StatusCode::OK,
                Json(ApiResponse::success(
                    Empty,
                    "Announcement deleted successfully",
                )),
            )
                .into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Empty>::error(format!(
                    "Failed to delete announcement: {err}"
                ))),
            )
                .into_response(),
        },
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<Empty>::error("Announcement not found")),
        )
            .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Empty>::error(format!("Database error: {err}"))),
        )
            .into_response(),
    }
}
