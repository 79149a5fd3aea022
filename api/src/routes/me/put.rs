use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::me::common::ProfileResponse;
use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::user::Model as UserModel;
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

/// PUT /api/me
///
/// Updates display name and/or email of the authenticated user. Omitted
/// fields are left untouched.
///
/// ### Responses
/// - `200 OK` — updated profile
/// - `400 Bad Request` — malformed email address
pub async fn update_profile(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> impl IntoResponse {
    if req.validate().is_err() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<ProfileResponse>::error(
                "Invalid email address",
            )),
        );
    }

    match UserModel::update_profile(
        app_state.db(),
        claims.sub,
        req.display_name.as_deref(),
        req.email.as_deref(),
    )
    .await
    {
        Ok(user) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ProfileResponse::from(user),
                "Profile updated successfully",
            )),
        ),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<ProfileResponse>::error(format!(
                "Failed to update profile: {err}"
            ))),
        ),
    }
}
