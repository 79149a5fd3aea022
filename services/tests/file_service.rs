use bytes::Bytes;
use db::models::{course, course_file, folder, user};
use db::test_utils::setup_test_db;
use media::test_utils::MemoryMediaStore;
use media::MediaError;
use sea_orm::DatabaseConnection;
use services::{FileService, FileServiceError, UploadRequest};
use std::sync::Arc;

struct Fixture {
    service: FileService,
    media: Arc<MemoryMediaStore>,
    db: DatabaseConnection,
    course_id: i64,
    uploader_id: i64,
}

async fn fixture() -> Fixture {
    let db = setup_test_db().await;
    let media = Arc::new(MemoryMediaStore::new());
    let service = FileService::new(db.clone(), media.clone());

    let course = course::Model::create(&db, "CS101", "Intro to Computer Science", None)
        .await
        .unwrap();
    let uploader = user::Model::create(&db, "lecturer", "lecturer@example.com", false)
        .await
        .unwrap();

    Fixture {
        service,
        media,
        db,
        course_id: course.id,
        uploader_id: uploader.id,
    }
}

fn upload_request(fx: &Fixture, folder_id: Option<i64>, name: &str, declared: &str) -> UploadRequest {
    UploadRequest {
        course_id: fx.course_id,
        folder_id,
        bytes: Bytes::from_static(b"%PDF-1.4 test bytes"),
        declared_name: name.to_owned(),
        declared_type: declared.to_owned(),
        content_type: "application/pdf".to_owned(),
        uploader_id: fx.uploader_id,
    }
}

#[tokio::test]
async fn created_folder_appears_in_listing_exactly_once() {
    let fx = fixture().await;

    let folder = fx
        .service
        .create_folder(fx.course_id, "Lecture Notes", None)
        .await
        .unwrap();
    assert_eq!(folder.name, "Lecture Notes");
    assert_eq!(folder.parent_id, None);

    let listing = fx.service.list_contents(fx.course_id, None).await.unwrap();
    let matches: Vec<_> = listing
        .folders
        .iter()
        .filter(|f| f.id == folder.id)
        .collect();
    assert_eq!(matches.len(), 1);
    assert!(listing.files.is_empty());
}

#[tokio::test]
async fn upload_then_list_returns_the_file() {
    let fx = fixture().await;

    let folder = fx
        .service
        .create_folder(fx.course_id, "Lecture Notes", None)
        .await
        .unwrap();
    let file = fx
        .service
        .upload_file(upload_request(&fx, Some(folder.id), "week1.pdf", "pdf"))
        .await
        .unwrap();

    assert_eq!(file.filename, "week1.pdf");
    assert_eq!(file.folder_id, Some(folder.id));
    assert!(fx.media.contains(&file.storage_key));

    let listing = fx
        .service
        .list_contents(fx.course_id, Some(folder.id))
        .await
        .unwrap();
    assert!(listing.folders.is_empty());
    assert_eq!(listing.files.len(), 1);
    assert_eq!(listing.files[0].id, file.id);
}

#[tokio::test]
async fn listing_orders_folders_before_files_alphabetically() {
    let fx = fixture().await;

    fx.service
        .create_folder(fx.course_id, "zebra", None)
        .await
        .unwrap();
    fx.service
        .create_folder(fx.course_id, "Apple", None)
        .await
        .unwrap();
    fx.service
        .upload_file(upload_request(&fx, None, "beta.pdf", "pdf"))
        .await
        .unwrap();
    fx.service
        .upload_file(upload_request(&fx, None, "Alpha.pdf", "pdf"))
        .await
        .unwrap();

    let listing = fx.service.list_contents(fx.course_id, None).await.unwrap();
    let folder_names: Vec<_> = listing.folders.iter().map(|f| f.name.as_str()).collect();
    let file_names: Vec<_> = listing.files.iter().map(|f| f.filename.as_str()).collect();
    assert_eq!(folder_names, vec!["Apple", "zebra"]);
    assert_eq!(file_names, vec!["Alpha.pdf", "beta.pdf"]);
}

#[tokio::test]
async fn unsupported_type_leaves_no_record_and_no_remote_object() {
    let fx = fixture().await;

    let err = fx
        .service
        .upload_file(upload_request(&fx, None, "malware.exe", "exe"))
        .await
        .unwrap_err();
    assert!(matches!(err, FileServiceError::UnsupportedType(_)));
    assert_eq!(fx.media.object_count(), 0);

    let listing = fx.service.list_contents(fx.course_id, None).await.unwrap();
    assert!(listing.files.is_empty());
}

#[tokio::test]
async fn failed_insert_compensates_with_the_exact_stored_reference() {
    let fx = fixture().await;

    // A nonexistent uploader violates the foreign key on the file row, so
    // the insert fails only after the media store has accepted the bytes.
    let request = UploadRequest {
        uploader_id: 9_999,
        ..upload_request(&fx, None, "week1.pdf", "pdf")
    };
    let err = fx.service.upload_file(request).await.unwrap_err();
    assert!(matches!(err, FileServiceError::Database(_)));

    let removed = fx.media.removed_keys();
    assert_eq!(removed.len(), 1);
    assert_eq!(fx.media.object_count(), 0);

    let listing = fx.service.list_contents(fx.course_id, None).await.unwrap();
    assert!(listing.files.is_empty());
}

#[tokio::test]
async fn duplicate_names_in_same_parent_are_rejected() {
    let fx = fixture().await;

    fx.service
        .create_folder(fx.course_id, "Lecture Notes", None)
        .await
        .unwrap();
    let err = fx
        .service
        .create_folder(fx.course_id, "lecture notes", None)
        .await
        .unwrap_err();
    assert!(matches!(err, FileServiceError::InvalidName(_)));

    fx.service
        .upload_file(upload_request(&fx, None, "week1.pdf", "pdf"))
        .await
        .unwrap();
    let err = fx
        .service
        .upload_file(upload_request(&fx, None, "WEEK1.PDF", "pdf"))
        .await
        .unwrap_err();
    assert!(matches!(err, FileServiceError::InvalidName(_)));

    // Same name in a different parent is fine.
    let other = fx
        .service
        .create_folder(fx.course_id, "Other", None)
        .await
        .unwrap();
    fx.service
        .upload_file(upload_request(&fx, Some(other.id), "week1.pdf", "pdf"))
        .await
        .unwrap();
}

#[tokio::test]
async fn empty_names_are_rejected_before_any_side_effect() {
    let fx = fixture().await;

    let err = fx
        .service
        .create_folder(fx.course_id, "   ", None)
        .await
        .unwrap_err();
    assert!(matches!(err, FileServiceError::InvalidName(_)));

    let err = fx
        .service
        .upload_file(upload_request(&fx, None, "  ", "pdf"))
        .await
        .unwrap_err();
    assert!(matches!(err, FileServiceError::InvalidName(_)));
    assert_eq!(fx.media.object_count(), 0);
}

#[tokio::test]
async fn deleting_a_file_twice_reports_not_found() {
    let fx = fixture().await;

    let file = fx
        .service
        .upload_file(upload_request(&fx, None, "week1.pdf", "pdf"))
        .await
        .unwrap();

    fx.service.delete_file(fx.course_id, file.id).await.unwrap();
    assert!(!fx.media.contains(&file.storage_key));

    let err = fx
        .service
        .delete_file(fx.course_id, file.id)
        .await
        .unwrap_err();
    assert!(matches!(err, FileServiceError::NotFound(_)));
}

#[tokio::test]
async fn file_deletion_survives_remote_removal_failure() {
    let fx = fixture().await;

    let file = fx
        .service
        .upload_file(upload_request(&fx, None, "week1.pdf", "pdf"))
        .await
        .unwrap();

    fx.media
        .fail_next_remove(MediaError::Transient("storage outage".into()));
    fx.service.delete_file(fx.course_id, file.id).await.unwrap();

    // The record is gone even though the remote object is orphaned.
    let listing = fx.service.list_contents(fx.course_id, None).await.unwrap();
    assert!(listing.files.is_empty());
    assert!(fx.media.contains(&file.storage_key));
}

#[tokio::test]
async fn cascade_delete_removes_all_descendants() {
    let fx = fixture().await;

    let root = fx
        .service
        .create_folder(fx.course_id, "Semester 1", None)
        .await
        .unwrap();
    let nested = fx
        .service
        .create_folder(fx.course_id, "Week 1", Some(root.id))
        .await
        .unwrap();
    let deep = fx
        .service
        .create_folder(fx.course_id, "Slides", Some(nested.id))
        .await
        .unwrap();

    let top_file = fx
        .service
        .upload_file(upload_request(&fx, Some(root.id), "outline.pdf", "pdf"))
        .await
        .unwrap();
    let deep_file = fx
        .service
        .upload_file(upload_request(&fx, Some(deep.id), "lecture1.pdf", "pdf"))
        .await
        .unwrap();

    fx.service
        .delete_folder(fx.course_id, root.id)
        .await
        .unwrap();

    assert!(!fx.media.contains(&top_file.storage_key));
    assert!(!fx.media.contains(&deep_file.storage_key));
    assert!(
        folder::Model::find_in_course(&fx.db, nested.id, fx.course_id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        course_file::Model::find_in_course(&fx.db, deep_file.id, fx.course_id)
            .await
            .unwrap()
            .is_none()
    );

    let err = fx
        .service
        .list_contents(fx.course_id, Some(root.id))
        .await
        .unwrap_err();
    assert!(matches!(err, FileServiceError::NotFound(_)));
}

#[tokio::test]
async fn cascade_retry_skips_already_removed_items() {
    let fx = fixture().await;

    let root = fx
        .service
        .create_folder(fx.course_id, "Semester 1", None)
        .await
        .unwrap();
    let nested = fx
        .service
        .create_folder(fx.course_id, "Week 1", Some(root.id))
        .await
        .unwrap();
    let file = fx
        .service
        .upload_file(upload_request(&fx, Some(nested.id), "notes.pdf", "pdf"))
        .await
        .unwrap();

    // A previous partial cascade already removed part of the subtree.
    fx.service.delete_file(fx.course_id, file.id).await.unwrap();
    fx.service
        .delete_folder(fx.course_id, nested.id)
        .await
        .unwrap();

    fx.service
        .delete_folder(fx.course_id, root.id)
        .await
        .unwrap();
    let err = fx
        .service
        .list_contents(fx.course_id, Some(root.id))
        .await
        .unwrap_err();
    assert!(matches!(err, FileServiceError::NotFound(_)));
}

#[tokio::test]
async fn cascade_tolerates_remote_removal_failures() {
    let fx = fixture().await;

    let root = fx
        .service
        .create_folder(fx.course_id, "Semester 1", None)
        .await
        .unwrap();
    let file = fx
        .service
        .upload_file(upload_request(&fx, Some(root.id), "notes.pdf", "pdf"))
        .await
        .unwrap();

    fx.media
        .fail_next_remove(MediaError::Transient("storage outage".into()));
    fx.service
        .delete_folder(fx.course_id, root.id)
        .await
        .unwrap();

    // Records are gone; the remote object stays orphaned.
    assert!(fx.media.contains(&file.storage_key));
    assert!(
        folder::Model::find_in_course(&fx.db, root.id, fx.course_id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn foreign_course_identifiers_resolve_to_not_found() {
    let fx = fixture().await;
    let other = course::Model::create(&fx.db, "CS999", "Other Course", None)
        .await
        .unwrap();
    let foreign_folder = fx
        .service
        .create_folder(other.id, "Private", None)
        .await
        .unwrap();
    let foreign_file = fx
        .service
        .upload_file(UploadRequest {
            course_id: other.id,
            ..upload_request(&fx, None, "secret.pdf", "pdf")
        })
        .await
        .unwrap();

    let err = fx
        .service
        .list_contents(fx.course_id, Some(foreign_folder.id))
        .await
        .unwrap_err();
    assert!(matches!(err, FileServiceError::NotFound(_)));

    let err = fx
        .service
        .create_folder(fx.course_id, "Nested", Some(foreign_folder.id))
        .await
        .unwrap_err();
    assert!(matches!(err, FileServiceError::NotFound(_)));

    let err = fx
        .service
        .upload_file(UploadRequest {
            folder_id: Some(foreign_folder.id),
            ..upload_request(&fx, None, "intruder.pdf", "pdf")
        })
        .await
        .unwrap_err();
    assert!(matches!(err, FileServiceError::NotFound(_)));

    let err = fx
        .service
        .delete_file(fx.course_id, foreign_file.id)
        .await
        .unwrap_err();
    assert!(matches!(err, FileServiceError::NotFound(_)));

    let err = fx
        .service
        .delete_folder(fx.course_id, foreign_folder.id)
        .await
        .unwrap_err();
    assert!(matches!(err, FileServiceError::NotFound(_)));

    // The other course is untouched.
    let listing = fx.service.list_contents(other.id, None).await.unwrap();
    assert_eq!(listing.folders.len(), 1);
    assert_eq!(listing.files.len(), 1);
}

#[tokio::test]
async fn unknown_course_is_rejected_before_any_remote_call() {
    let fx = fixture().await;

    let err = fx
        .service
        .upload_file(UploadRequest {
            course_id: 4_242,
            ..upload_request(&fx, None, "week1.pdf", "pdf")
        })
        .await
        .unwrap_err();
    assert!(matches!(err, FileServiceError::NotFound(_)));
    assert_eq!(fx.media.object_count(), 0);
}
