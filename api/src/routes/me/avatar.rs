use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::me::common::ProfileResponse;
use axum::{
    Extension, Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};
use bytes::Bytes;
use db::models::user::Model as UserModel;
use media::{MediaCategory, StorageReference};
use util::{config, state::AppState};

/// PUT /api/me/avatar
///
/// Replaces the authenticated user's avatar. Expects a single `file` field
/// holding an image; any previously set avatar object is released
/// best-effort after the profile points at the new one.
///
/// ### Responses
/// - `200 OK` — updated profile including the new `avatar_url`
/// - `400 Bad Request` — missing file or a non-image type
pub async fn upload_avatar(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut file_name: Option<String> = None;
    let mut file_bytes: Option<Bytes> = None;

    while let Some(field) = multipart.next_field().await.unwrap_or(None) {
        if field.name() == Some("file") {
            file_name = field.file_name().map(|s| s.to_string());
            file_bytes = field.bytes().await.ok();
        }
    }

    let file_name = match file_name {
        Some(name) => name,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<ProfileResponse>::error("Missing file upload")),
            )
                .into_response();
        }
    };

    let file_bytes = match file_bytes {
        Some(bytes) if !bytes.is_empty() && bytes.len() <= config::max_upload_bytes() => bytes,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<ProfileResponse>::error(
                    "Empty or oversized file provided",
                )),
            )
                .into_response();
        }
    };

    // Avatars must be images; the general upload allow-list is too broad.
    let declared_type = file_name.rsplit('.').next().unwrap_or_default().to_string();
    if MediaCategory::from_declared(&declared_type) != Some(MediaCategory::Image) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<ProfileResponse>::error(
                "Avatar must be a jpg or png image",
            )),
        )
            .into_response();
    }

    let stored = match app_state
        .media()
        .store(file_bytes, &file_name, &declared_type)
        .await
    {
        Ok(stored) => stored,
        Err(err) => {
            return (
                StatusCode::BAD_GATEWAY,
                Json(ApiResponse::<ProfileResponse>::error(format!(
                    "Failed to store avatar: {err}"
                ))),
            )
                .into_response();
        }
    };

    match UserModel::set_avatar(
        app_state.db(),
        claims.sub,
        &stored.reference.key,
        &stored.reference.url,
    )
    .await
    {
        Ok((user, previous)) => {
            if let Some((key, url)) = previous {
                let reference = StorageReference { key, url };
                if let Err(err) = app_state.media().remove(&reference).await {
                    tracing::warn!(key = %reference.key, error = %err, "failed to remove replaced avatar object");
                }
            }
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    ProfileResponse::from(user),
                    "Avatar updated successfully",
                )),
            )
                .into_response()
        }
        Err(err) => {
            // The profile update failed after the store succeeded; reverse
            // the upload so the new object does not leak.
            if let Err(remove_err) = app_state.media().remove(&stored.reference).await {
                tracing::warn!(
                    key = %stored.reference.key,
                    error = %remove_err,
                    "failed to remove orphaned avatar object after update failure"
                );
            }
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ProfileResponse>::error(format!(
                    "Failed to update avatar: {err}"
                ))),
            )
                .into_response()
        }
    }
}

/// DELETE /api/me/avatar
///
/// Clears the avatar reference; the remote object is released best-effort.
pub async fn remove_avatar(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    match UserModel::clear_avatar(app_state.db(), claims.sub).await {
        Ok(previous) => {
            if let Some((key, url)) = previous {
                let reference = StorageReference { key, url };
                if let Err(err) = app_state.media().remove(&reference).await {
                    tracing::warn!(key = %reference.key, error = %err, "failed to remove cleared avatar object");
                }
            }
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    crate::routes::common::Empty,
                    "Avatar removed successfully",
                )),
            )
                .into_response()
        }
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<crate::routes::common::Empty>::error(format!(
                "Failed to remove avatar: {err}"
            ))),
        )
            .into_response(),
    }
}
