use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{Empty, error_response};
use crate::routes::courses::files::common::FileResponse;
use axum::{
    Extension, Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use bytes::Bytes;
use services::{FileService, UploadRequest};
use util::{config, state::AppState};

/// POST /api/courses/{course_id}/files
///
/// Upload a single file into the course, optionally inside a folder. Only
/// accessible to instructors of the course.
///
/// ### Request Body (Multipart Form Data)
/// - `folder_id` (integer, optional): destination folder; omit for the
///   course root
/// - `file` (file, required): the file to upload. Only one file per request.
///
/// The file's extension decides whether it is accepted; only document,
/// spreadsheet, archive, image and video types are allowed.
///
/// ### Responses
///
/// - `201 Created`
/// ```json
/// {
///   "success": true,
///   "message": "File uploaded successfully",
///   "data": { "id": 7, "filename": "week1.pdf", "folder_id": 1, "url": "...", "content_type": "application/pdf", "size_bytes": 1204, "uploaded_by": 3, "created_at": "..." }
/// }
/// ```
///
/// - `400 Bad Request` — missing/empty/duplicate file, unsupported type, or
///   more than one file in the request
/// - `404 Not Found` — unknown course or folder
/// - `502 Bad Gateway` — the media storage collaborator failed the upload
pub async fn upload_file(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut folder_id: Option<i64> = None;
    let mut file_name: Option<String> = None;
    let mut file_content_type: Option<String> = None;
    let mut file_bytes: Option<Bytes> = None;
    let mut file_count = 0;

    while let Some(field) = multipart.next_field().await.unwrap_or(None) {
        let name = field.name().unwrap_or("");

        match name {
            "folder_id" => {
                if let Ok(raw) = field.text().await {
                    match raw.parse::<i64>() {
                        Ok(id) => folder_id = Some(id),
                        Err(_) => {
                            return (
                                StatusCode::BAD_REQUEST,
                                Json(ApiResponse::<Empty>::error("Invalid folder_id")),
                            )
                                .into_response();
                        }
                    }
                }
            }
            "file" => {
                if file_count > 0 {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(ApiResponse::<Empty>::error(
                            "Only one file may be uploaded per request",
                        )),
                    )
                        .into_response();
                }
                file_name = field.file_name().map(|s| s.to_string());
                file_content_type = field.content_type().map(|s| s.to_string());
                file_bytes = field.bytes().await.ok();
                file_count += 1;
            }
            _ => continue,
        }
    }

    let file_name = match file_name {
        Some(name) => name,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<Empty>::error("Missing file upload")),
            )
                .into_response();
        }
    };

    let file_bytes = match file_bytes {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<Empty>::error("Empty file provided")),
            )
                .into_response();
        }
    };

    if file_bytes.len() > config::max_upload_bytes() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Empty>::error(
                "File exceeds the maximum upload size",
            )),
        )
            .into_response();
    }

    // The extension is what the allow-list is checked against; the content
    // type only ends up recorded on the file row.
    let declared_type = file_name
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_string();
    let content_type = file_content_type.unwrap_or_else(|| {
        mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string()
    });

    let service = FileService::from_state(&app_state);
    let request = UploadRequest {
        course_id,
        folder_id,
        bytes: file_bytes,
        declared_name: file_name,
        declared_type,
        content_type,
        uploader_id: claims.sub,
    };

    match service.upload_file(request).await {
        Ok(file) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                FileResponse::from(file),
                "File uploaded successfully",
            )),
        )
            .into_response(),
        Err(err) => error_response::<Empty>(err),
    }
}
