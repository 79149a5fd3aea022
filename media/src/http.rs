//! reqwest-backed [`MediaStore`] talking to the managed media service.

use crate::{MediaCategory, MediaError, MediaStore, StorageReference, StoredObject};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode, multipart};
use serde::Deserialize;
use std::time::Duration;

/// Connection settings for the remote media service.
///
/// Built explicitly (normally from `util::config`) and injected into
/// [`HttpMediaStore::new`]; there is no process-global client.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub base_url: String,
    pub api_key: String,
    /// Remote folder prefix all uploads for this deployment land under.
    pub upload_folder: String,
    pub timeout_secs: u64,
}

pub struct HttpMediaStore {
    client: Client,
    config: MediaConfig,
}

/// Shape of the service's upload response body.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    key: String,
    url: String,
    #[serde(default)]
    bytes: u64,
}

impl HttpMediaStore {
    pub fn new(config: MediaConfig) -> Result<Self, MediaError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MediaError::Permanent(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn classify_status(status: StatusCode, body: String) -> MediaError {
        if status.is_server_error() {
            MediaError::Transient(format!("{status}: {body}"))
        } else {
            MediaError::Permanent(format!("{status}: {body}"))
        }
    }

    fn classify_transport(err: reqwest::Error) -> MediaError {
        if err.is_timeout() || err.is_connect() {
            MediaError::Transient(err.to_string())
        } else {
            MediaError::Permanent(err.to_string())
        }
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    async fn store(
        &self,
        bytes: Bytes,
        declared_name: &str,
        declared_type: &str,
    ) -> Result<StoredObject, MediaError> {
        let category = MediaCategory::from_declared(declared_type)
            .ok_or_else(|| MediaError::UnsupportedType(declared_type.to_string()))?;
        let local_size = bytes.len() as u64;

        let part = multipart::Part::bytes(bytes.to_vec()).file_name(declared_name.to_string());
        let form = multipart::Form::new()
            .text("folder", self.config.upload_folder.clone())
            .text("resource_type", "raw")
            .part("file", part);

        let response = self
            .client
            .post(format!("{}/upload", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(Self::classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::classify_status(status, body));
        }

        let parsed: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaError::Permanent(format!("malformed upload response: {e}")))?;

        tracing::debug!(key = %parsed.key, size = local_size, %category, "stored media object");

        Ok(StoredObject {
            reference: StorageReference {
                key: parsed.key,
                url: parsed.url,
            },
            size_bytes: if parsed.bytes > 0 {
                parsed.bytes
            } else {
                local_size
            },
            category,
        })
    }

    async fn remove(&self, reference: &StorageReference) -> Result<(), MediaError> {
        let response = self
            .client
            .delete(format!(
                "{}/objects/{}",
                self.config.base_url, reference.key
            ))
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(Self::classify_transport)?;

        let status = response.status();
        // An already-deleted object must not fail the call; remove is retried
        // after partial cascades.
        if status.is_success() || status == StatusCode::NOT_FOUND {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(Self::classify_status(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::UploadResponse;

    #[test]
    fn upload_response_tolerates_missing_byte_count() {
        let parsed: UploadResponse =
            serde_json::from_str(r#"{"key":"studymate/42","url":"https://cdn.example/42"}"#)
                .unwrap();
        assert_eq!(parsed.key, "studymate/42");
        assert_eq!(parsed.bytes, 0);
    }
}
