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

/// GET /api/courses/{course_id}/announcements
///
/// Lists the course's announcements, pinned first, newest first within each
/// group. Accessible to any member of the course.
pub async fn get_announcements(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
) -> impl IntoResponse {
    match AnnouncementModel::for_course(app_state.db(), course_id).await {
        Ok(announcements) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                announcements,
                "Announcements retrieved successfully",
            )),
        )
            .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Empty>::error(format!(
                "Failed to retrieve announcements: {err}"
            ))),
        )
            .into_response(),
    }
}
