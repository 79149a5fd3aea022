//! In-process [`MediaStore`] used by service and route tests.

use crate::{MediaCategory, MediaError, MediaStore, StorageReference, StoredObject};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Records every store/remove call and supports one-shot failure injection,
/// so tests can drive the compensation paths without a network.
#[derive(Default)]
pub struct MemoryMediaStore {
    objects: Mutex<HashMap<String, u64>>,
    removed: Mutex<Vec<String>>,
    next_id: AtomicU64,
    fail_next_store: Mutex<Option<MediaError>>,
    fail_next_remove: Mutex<Option<MediaError>>,
}

impl MemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next `store` call fails with `err` instead of storing.
    pub fn fail_next_store(&self, err: MediaError) {
        *self.fail_next_store.lock().unwrap() = Some(err);
    }

    /// The next `remove` call fails with `err` without removing anything.
    pub fn fail_next_remove(&self, err: MediaError) {
        *self.fail_next_remove.lock().unwrap() = Some(err);
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    /// Keys passed to `remove`, in call order.
    pub fn removed_keys(&self) -> Vec<String> {
        self.removed.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaStore for MemoryMediaStore {
    async fn store(
        &self,
        bytes: Bytes,
        _declared_name: &str,
        declared_type: &str,
    ) -> Result<StoredObject, MediaError> {
        let category = MediaCategory::from_declared(declared_type)
            .ok_or_else(|| MediaError::UnsupportedType(declared_type.to_string()))?;

        if let Some(err) = self.fail_next_store.lock().unwrap().take() {
            return Err(err);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let key = format!("test/{id}");
        let size = bytes.len() as u64;
        self.objects.lock().unwrap().insert(key.clone(), size);

        Ok(StoredObject {
            reference: StorageReference {
                url: format!("memory://{key}"),
                key,
            },
            size_bytes: size,
            category,
        })
    }

    async fn remove(&self, reference: &StorageReference) -> Result<(), MediaError> {
        if let Some(err) = self.fail_next_remove.lock().unwrap().take() {
            return Err(err);
        }

        // Missing objects are fine, matching the HTTP store's 404 handling.
        self.objects.lock().unwrap().remove(&reference.key);
        self.removed.lock().unwrap().push(reference.key.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_then_remove_round_trips() {
        let store = MemoryMediaStore::new();
        let stored = store
            .store(Bytes::from_static(b"hello"), "notes.pdf", "pdf")
            .await
            .unwrap();

        assert!(store.contains(&stored.reference.key));
        assert_eq!(stored.size_bytes, 5);

        store.remove(&stored.reference).await.unwrap();
        assert!(!store.contains(&stored.reference.key));
        assert_eq!(store.removed_keys(), vec![stored.reference.key]);
    }

    #[tokio::test]
    async fn rejects_unsupported_types_before_failure_injection() {
        let store = MemoryMediaStore::new();
        let err = store
            .store(Bytes::from_static(b"MZ"), "virus.exe", "exe")
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::UnsupportedType(_)));
        assert_eq!(store.object_count(), 0);
    }

    #[tokio::test]
    async fn injected_store_failure_fires_once() {
        let store = MemoryMediaStore::new();
        store.fail_next_store(MediaError::Transient("boom".into()));

        let err = store
            .store(Bytes::from_static(b"x"), "a.pdf", "pdf")
            .await
            .unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(store.object_count(), 0);

        store
            .store(Bytes::from_static(b"x"), "a.pdf", "pdf")
            .await
            .unwrap();
        assert_eq!(store.object_count(), 1);
    }
}
