//! Shared helpers for mapping service errors onto HTTP responses.

use crate::response::ApiResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use services::FileServiceError;

/// Empty payload for error envelopes and bodyless successes.
#[derive(Debug, Default, Serialize)]
pub struct Empty;

/// HTTP status corresponding to a `FileServiceError`.
///
/// Upload failures map to `502 Bad Gateway`: the media collaborator, not
/// this service, failed the request.
pub fn error_status(err: &FileServiceError) -> StatusCode {
    match err {
        FileServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        FileServiceError::Forbidden => StatusCode::FORBIDDEN,
        FileServiceError::InvalidName(_) => StatusCode::BAD_REQUEST,
        FileServiceError::UnsupportedType(_) => StatusCode::BAD_REQUEST,
        FileServiceError::Upload(_) => StatusCode::BAD_GATEWAY,
        FileServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Renders a service error as the standard JSON envelope.
pub fn error_response<T: Serialize + Default>(err: FileServiceError) -> Response {
    (
        error_status(&err),
        Json(ApiResponse::<T>::error(err.to_string())),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::error_status;
    use axum::http::StatusCode;
    use services::FileServiceError;

    #[test]
    fn statuses_follow_the_error_taxonomy() {
        assert_eq!(
            error_status(&FileServiceError::NotFound("file")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_status(&FileServiceError::InvalidName("empty".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&FileServiceError::UnsupportedType("exe".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&FileServiceError::Forbidden),
            StatusCode::FORBIDDEN
        );
    }
}
