use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::me::common::ProfileResponse;
use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::user::Model as UserModel;
use util::state::AppState;

/// GET /api/me
///
/// Profile of the authenticated user.
pub async fn get_profile(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    match UserModel::find_by_id(app_state.db(), claims.sub).await {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ProfileResponse::from(user),
                "Profile retrieved successfully",
            )),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<ProfileResponse>::error("User not found")),
        ),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<ProfileResponse>::error(format!(
                "Database error: {err}"
            ))),
        ),
    }
}
