use crate::response::ApiResponse;
use crate::routes::common::{Empty, error_response};
use crate::routes::courses::files::common::FolderResponse;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use services::FileService;
use util::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateFolderRequest {
    pub name: String,
    pub parent_folder_id: Option<i64>,
}

/// POST /api/courses/{course_id}/folders
///
/// Creates a folder at the course root, or nested under
/// `parent_folder_id`. Only accessible to instructors of the course.
///
/// ### Request Body (JSON)
/// - `name` (string, required): folder name, unique among its siblings
/// - `parent_folder_id` (integer, optional)
///
/// ### Responses
///
/// - `201 Created`
/// ```json
/// {
///   "success": true,
///   "message": "Folder created successfully",
///   "data": { "id": 1, "name": "Lecture Notes", "parent_folder_id": null, "created_at": "..." }
/// }
/// ```
///
/// - `400 Bad Request` — empty name, or a sibling already uses it
/// - `404 Not Found` — unknown course or parent folder
pub async fn create_folder(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
    Json(req): Json<CreateFolderRequest>,
) -> impl IntoResponse {
    let service = FileService::from_state(&app_state);

    match service
        .create_folder(course_id, &req.name, req.parent_folder_id)
        .await
    {
        Ok(folder) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                FolderResponse::from(folder),
                "Folder created successfully",
            )),
        )
            .into_response(),
        Err(err) => error_response::<Empty>(err),
    }
}
