use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::Empty;
use crate::routes::courses::announcements::common::AnnouncementRequest;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::announcement::Model as AnnouncementModel;
use util::state::AppState;

/// POST /api/courses/{course_id}/announcements
///
/// Creates an announcement on the course, attributed to the caller. Only
/// accessible to instructors of the course.
pub async fn create_announcement(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<AnnouncementRequest>,
) -> impl IntoResponse {
    match AnnouncementModel::create(
        app_state.db(),
        course_id,
        claims.sub,
        &req.title,
        &req.body,
        req.pinned,
    )
    .await
    {
        Ok(announcement) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                announcement,
                "Announcement created successfully",
            )),
        )
            .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Empty>::error(format!(
                "Failed to create announcement: {err}"
            ))),
        )
            .into_response(),
    }
}
