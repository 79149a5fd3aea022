//! Course file and folder management.
//!
//! `FileService` owns the write path between the HTTP boundary, the folder
//! and file records, and the remote media store. Every operation validates
//! its inputs against the database before any remote call, so a rejected
//! request leaves no partial state behind.
//!
//! Policies:
//! - Folder deletion cascades to all contained folders and files. The
//!   cascade deletes records item by item and is safe to re-run; a retry
//!   skips whatever the previous attempt already removed.
//! - Duplicate names within the same parent are rejected, for folders and
//!   files alike, comparing case-insensitively.
//! - Local records are deleted before their remote objects. Remote removal
//!   is best-effort; a failure leaves an orphaned object for reconciliation
//!   and is logged, never surfaced.
//! - An upload abandoned between the remote store and the record insert
//!   (client disconnect, crash) leaves at most one orphaned remote object.
//!   Cleanup of those is a reconciliation concern, not a request-time
//!   guarantee.

use bytes::Bytes;
use db::models::{course, course_file, folder};
use media::{MediaCategory, MediaError, MediaStore, StorageReference};
use sea_orm::{DatabaseConnection, DbErr};
use std::sync::Arc;
use thiserror::Error;
use util::state::AppState;

#[derive(Debug, Error)]
pub enum FileServiceError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("caller does not have access to this course")]
    Forbidden,

    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("unsupported file type '{0}'")]
    UnsupportedType(String),

    #[error("upload failed: {0}")]
    Upload(#[from] MediaError),

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

/// Everything needed to store one file.
pub struct UploadRequest {
    pub course_id: i64,
    pub folder_id: Option<i64>,
    pub bytes: Bytes,
    pub declared_name: String,
    /// Extension or MIME token checked against the allow-list.
    pub declared_type: String,
    /// Content type recorded on the file row, as reported by the client.
    pub content_type: String,
    pub uploader_id: i64,
}

/// Contents of one directory level: folders first, then files, each sorted
/// by name case-insensitively.
#[derive(Debug)]
pub struct FolderListing {
    pub folders: Vec<folder::Model>,
    pub files: Vec<course_file::Model>,
}

pub struct FileService {
    db: DatabaseConnection,
    media: Arc<dyn MediaStore>,
}

impl FileService {
    pub fn new(db: DatabaseConnection, media: Arc<dyn MediaStore>) -> Self {
        Self { db, media }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(state.db_clone(), state.media_clone())
    }

    /// Creates a folder under `parent_id` (or at the course root).
    pub async fn create_folder(
        &self,
        course_id: i64,
        name: &str,
        parent_id: Option<i64>,
    ) -> Result<folder::Model, FileServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FileServiceError::InvalidName(
                "folder name must not be empty".into(),
            ));
        }

        self.require_course(course_id).await?;
        if let Some(parent) = parent_id {
            self.require_folder(course_id, parent).await?;
        }

        if folder::Model::name_taken(&self.db, course_id, parent_id, name).await? {
            return Err(FileServiceError::InvalidName(format!(
                "a folder named '{name}' already exists here"
            )));
        }

        Ok(folder::Model::create(&self.db, course_id, parent_id, name).await?)
    }

    /// Stores the file remotely, then records it.
    ///
    /// All validation happens before the media store is touched. If the
    /// record insert fails after the remote store succeeded, the freshly
    /// stored object is removed again so it does not leak.
    pub async fn upload_file(
        &self,
        request: UploadRequest,
    ) -> Result<course_file::Model, FileServiceError> {
        let name = request.declared_name.trim().to_owned();
        if name.is_empty() {
            return Err(FileServiceError::InvalidName(
                "file name must not be empty".into(),
            ));
        }
        if MediaCategory::from_declared(&request.declared_type).is_none() {
            return Err(FileServiceError::UnsupportedType(
                request.declared_type.clone(),
            ));
        }

        self.require_course(request.course_id).await?;
        if let Some(folder) = request.folder_id {
            self.require_folder(request.course_id, folder).await?;
        }

        if course_file::Model::name_taken(&self.db, request.course_id, request.folder_id, &name)
            .await?
        {
            return Err(FileServiceError::InvalidName(format!(
                "a file named '{name}' already exists here"
            )));
        }

        let stored = self
            .media
            .store(request.bytes, &name, &request.declared_type)
            .await?;

        let inserted = course_file::Model::create(
            &self.db,
            request.course_id,
            request.folder_id,
            &name,
            &stored.reference.key,
            &stored.reference.url,
            &request.content_type,
            stored.size_bytes as i64,
            request.uploader_id,
        )
        .await;

        match inserted {
            Ok(file) => Ok(file),
            Err(err) => {
                // The insert failed after the remote store succeeded; reverse
                // the upload with the exact reference we were issued.
                if let Err(remove_err) = self.media.remove(&stored.reference).await {
                    tracing::warn!(
                        key = %stored.reference.key,
                        error = %remove_err,
                        "failed to remove orphaned media object after insert failure"
                    );
                }
                Err(err.into())
            }
        }
    }

    /// Read-only listing of one directory level.
    pub async fn list_contents(
        &self,
        course_id: i64,
        folder_id: Option<i64>,
    ) -> Result<FolderListing, FileServiceError> {
        self.require_course(course_id).await?;
        if let Some(folder) = folder_id {
            self.require_folder(course_id, folder).await?;
        }

        let mut folders = folder::Model::children_of(&self.db, course_id, folder_id).await?;
        let mut files = course_file::Model::in_folder(&self.db, course_id, folder_id).await?;

        folders.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        files.sort_by(|a, b| a.filename.to_lowercase().cmp(&b.filename.to_lowercase()));

        Ok(FolderListing { folders, files })
    }

    /// Removes a file record, then releases its remote object best-effort.
    pub async fn delete_file(&self, course_id: i64, file_id: i64) -> Result<(), FileServiceError> {
        let file = course_file::Model::find_in_course(&self.db, file_id, course_id)
            .await?
            .ok_or(FileServiceError::NotFound("file"))?;

        course_file::Model::delete(&self.db, file.id).await?;
        self.release_remote(&file).await;
        Ok(())
    }

    /// Cascade-deletes a folder with everything it transitively contains.
    ///
    /// Discovery is a parent-before-child walk, so deleting in reverse order
    /// removes children before their parents. Each file follows the
    /// `delete_file` contract. If the cascade dies partway, re-running it
    /// picks up where it left off: the root folder is deleted last.
    pub async fn delete_folder(
        &self,
        course_id: i64,
        folder_id: i64,
    ) -> Result<(), FileServiceError> {
        let root = folder::Model::find_in_course(&self.db, folder_id, course_id)
            .await?
            .ok_or(FileServiceError::NotFound("folder"))?;

        let mut pending = vec![root.id];
        let mut ordered = Vec::new();
        while let Some(current) = pending.pop() {
            ordered.push(current);
            for child in folder::Model::children_of(&self.db, course_id, Some(current)).await? {
                pending.push(child.id);
            }
        }

        for &current in &ordered {
            for file in course_file::Model::in_folder(&self.db, course_id, Some(current)).await? {
                course_file::Model::delete(&self.db, file.id).await?;
                self.release_remote(&file).await;
            }
        }

        for &current in ordered.iter().rev() {
            folder::Model::delete(&self.db, current).await?;
        }

        Ok(())
    }

    async fn require_course(&self, course_id: i64) -> Result<(), FileServiceError> {
        if course::Model::exists(&self.db, course_id).await? {
            Ok(())
        } else {
            Err(FileServiceError::NotFound("course"))
        }
    }

    async fn require_folder(
        &self,
        course_id: i64,
        folder_id: i64,
    ) -> Result<folder::Model, FileServiceError> {
        folder::Model::find_in_course(&self.db, folder_id, course_id)
            .await?
            .ok_or(FileServiceError::NotFound("folder"))
    }

    /// Best-effort removal of a file's remote object. The record is already
    /// gone, so a failure here is logged and the object left for
    /// reconciliation.
    async fn release_remote(&self, file: &course_file::Model) {
        let reference = StorageReference {
            key: file.storage_key.clone(),
            url: file.storage_url.clone(),
        };
        if let Err(err) = self.media.remove(&reference).await {
            tracing::warn!(
                key = %reference.key,
                error = %err,
                "remote object removal failed; object orphaned pending reconciliation"
            );
        }
    }
}
