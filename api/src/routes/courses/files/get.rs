use crate::response::ApiResponse;
use crate::routes::common::error_response;
use crate::routes::courses::files::common::FolderContentsResponse;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use services::FileService;
use util::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub folder_id: Option<i64>,
}

/// GET /api/courses/{course_id}/files?folder_id={folder_id}
///
/// Lists the folders and files at one directory level of the course; omit
/// `folder_id` for the course root. Accessible to any member of the course.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "message": "Files and folders retrieved successfully",
///   "data": {
///     "folders": [{ "id": 1, "name": "Lecture Notes", "parent_folder_id": null, "created_at": "..." }],
///     "files": [{ "id": 7, "filename": "week1.pdf", "folder_id": 1, "url": "...", "content_type": "application/pdf", "size_bytes": 1204, "uploaded_by": 3, "created_at": "..." }]
///   }
/// }
/// ```
///
/// - `404 Not Found` — unknown course, or a folder that does not belong to it
pub async fn list_files_and_folders(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let service = FileService::from_state(&app_state);

    match service.list_contents(course_id, query.folder_id).await {
        Ok(listing) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                FolderContentsResponse::from(listing),
                "Files and folders retrieved successfully",
            )),
        )
            .into_response(),
        Err(err) => error_response::<FolderContentsResponse>(err),
    }
}
