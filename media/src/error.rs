use thiserror::Error;

/// Failures surfaced by a [`MediaStore`](crate::MediaStore).
///
/// `Transient` covers failures worth retrying (timeouts, connection errors,
/// 5xx responses); `Permanent` covers everything the service definitively
/// rejected. `UnsupportedType` is raised before any network traffic.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("unsupported media type '{0}'")]
    UnsupportedType(String),

    #[error("media storage unavailable: {0}")]
    Transient(String),

    #[error("media storage rejected the request: {0}")]
    Permanent(String),
}

impl MediaError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, MediaError::Transient(_))
    }
}
