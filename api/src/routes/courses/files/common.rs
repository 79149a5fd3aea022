//! Response DTOs shared by the file route group.

use db::models::{course_file, folder};
use serde::Serialize;
use services::FolderListing;

#[derive(Debug, Serialize)]
pub struct FolderResponse {
    pub id: i64,
    pub name: String,
    pub parent_folder_id: Option<i64>,
    pub created_at: String,
}

impl From<folder::Model> for FolderResponse {
    fn from(model: folder::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            parent_folder_id: model.parent_id,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FileResponse {
    pub id: i64,
    pub filename: String,
    pub folder_id: Option<i64>,
    pub url: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub uploaded_by: i64,
    pub created_at: String,
}

impl From<course_file::Model> for FileResponse {
    fn from(model: course_file::Model) -> Self {
        Self {
            id: model.id,
            filename: model.filename,
            folder_id: model.folder_id,
            url: model.storage_url,
            content_type: model.content_type,
            size_bytes: model.size_bytes,
            uploaded_by: model.uploaded_by,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// One directory level: folders first, then files.
#[derive(Debug, Default, Serialize)]
pub struct FolderContentsResponse {
    pub folders: Vec<FolderResponse>,
    pub files: Vec<FileResponse>,
}

impl From<FolderListing> for FolderContentsResponse {
    fn from(listing: FolderListing) -> Self {
        Self {
            folders: listing.folders.into_iter().map(Into::into).collect(),
            files: listing.files.into_iter().map(Into::into).collect(),
        }
    }
}
