//! Client for the remote media-storage collaborator.
//!
//! Course files are not kept on the API host. Their bytes live at an external
//! media service and the database only records the [`StorageReference`] issued
//! when an object is stored. This crate owns that boundary: the [`MediaStore`]
//! contract, the HTTP implementation used in production, and an in-process
//! double for tests.

pub mod category;
pub mod error;
pub mod http;
pub mod test_utils;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

pub use category::MediaCategory;
pub use error::MediaError;
pub use http::{HttpMediaStore, MediaConfig};

/// Opaque durable pointer to an object held by the remote media service.
///
/// The `key` identifies the object for deletion; the `url` is what clients
/// download from. Neither is interpreted locally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageReference {
    pub key: String,
    pub url: String,
}

/// Result of a successful `store` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredObject {
    pub reference: StorageReference,
    pub size_bytes: u64,
    pub category: MediaCategory,
}

/// Contract for the media-storage collaborator.
///
/// `store` is not idempotent: a retry after a transient failure may create a
/// second remote object, which callers must treat as unrelated to any record
/// they did not commit. `remove` is best-effort and safe to repeat; a missing
/// remote object is not an error.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn store(
        &self,
        bytes: Bytes,
        declared_name: &str,
        declared_type: &str,
    ) -> Result<StoredObject, MediaError>;

    async fn remove(&self, reference: &StorageReference) -> Result<(), MediaError>;
}
