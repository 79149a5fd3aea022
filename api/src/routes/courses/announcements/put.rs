use crate::response::ApiResponse;
use crate::routes::common::Empty;
use crate::routes::courses::announcements::common::AnnouncementRequest;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::announcement::Model as AnnouncementModel;
use util::state::AppState;

/// PUT /api/courses/{course_id}/announcements/{announcement_id}
///
/// Edits an announcement in place. Empty title/body fields leave the
/// existing value untouched. Only accessible to instructors of the course.
pub async fn edit_announcement(
    State(app_state): State<AppState>,
    Path((course_id, announcement_id)): Path<(i64, i64)>,
    Json(req): Json<AnnouncementRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    match AnnouncementModel::find_in_course(db, announcement_id, course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Empty>::error("Announcement not found")),
            )
                .into_response();
        }
        Err(err) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Empty>::error(format!("Database error: {err}"))),
            )
                .into_response();
        }
    }

    match AnnouncementModel::update(db, announcement_id, &req.title, &req.body, req.pinned).await {
        Ok(announcement) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                announcement,
                "Announcement updated successfully",
            )),
        )
            .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Empty>::error(format!(
                "Failed to update announcement: {err}"
            ))),
        )
            .into_response(),
    }
}
