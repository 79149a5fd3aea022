//! Role-based access guards applied as route middleware.
//!
//! Writes to a course require the instructor role; reads require any
//! membership. Admin tokens bypass course role checks entirely.

use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, Path, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use db::models::course_role::{self, Role};
use std::collections::HashMap;
use util::state::AppState;

#[derive(serde::Serialize, Default)]
pub struct Empty;

/// Extracts and validates the user from the request, then re-inserts the
/// `AuthUser` into request extensions for downstream handlers.
async fn extract_and_insert_auth_user(
    req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), Response> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::<Empty>::error("Authentication required")),
            )
                .into_response()
        })?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Any valid token passes; no course membership required.
pub async fn allow_authenticated(req: Request<Body>, next: Next) -> Response {
    match extract_and_insert_auth_user(req).await {
        Ok((req, _)) => next.run(req).await,
        Err(response) => response,
    }
}

async fn guard_course_role(
    state: AppState,
    params: HashMap<String, String>,
    req: Request<Body>,
    next: Next,
    roles: &[Role],
) -> Response {
    let (req, AuthUser(claims)) = match extract_and_insert_auth_user(req).await {
        Ok(pair) => pair,
        Err(response) => return response,
    };

    if claims.admin {
        return next.run(req).await;
    }

    let course_id: i64 = match params.get("course_id").and_then(|raw| raw.parse().ok()) {
        Some(id) => id,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<Empty>::error("Invalid course ID")),
            )
                .into_response();
        }
    };

    match course_role::Model::user_has_any_role(state.db(), claims.sub, course_id, roles).await {
        Ok(true) => next.run(req).await,
        Ok(false) => (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<Empty>::error(
                "Forbidden: insufficient course role",
            )),
        )
            .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Empty>::error(format!("Database error: {err}"))),
        )
            .into_response(),
    }
}

/// Course write operations: instructors only.
pub async fn require_course_instructor(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    guard_course_role(state, params, req, next, &[Role::Instructor]).await
}

/// Course read operations: any member of the course.
pub async fn allow_course_member(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    guard_course_role(state, params, req, next, &[Role::Instructor, Role::Student]).await
}
