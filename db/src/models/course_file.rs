use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Metadata record for an uploaded course file.
///
/// The bytes live at the media service; this row owns only the reference
/// (`storage_key`/`storage_url`) issued when the object was stored. Once no
/// row references a remote object, that object is garbage.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course_files")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub course_id: i64,
    pub folder_id: Option<i64>,

    pub filename: String,
    pub storage_key: String,
    pub storage_url: String,
    pub content_type: String,
    pub size_bytes: i64,

    pub uploaded_by: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,

    #[sea_orm(
        belongs_to = "super::folder::Entity",
        from = "Column::FolderId",
        to = "super::folder::Column::Id",
        on_delete = "Cascade"
    )]
    Folder,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UploadedBy",
        to = "super::user::Column::Id"
    )]
    Uploader,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::folder::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Folder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &DbConn,
        course_id: i64,
        folder_id: Option<i64>,
        filename: &str,
        storage_key: &str,
        storage_url: &str,
        content_type: &str,
        size_bytes: i64,
        uploaded_by: i64,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let file = ActiveModel {
            course_id: Set(course_id),
            folder_id: Set(folder_id),
            filename: Set(filename.to_owned()),
            storage_key: Set(storage_key.to_owned()),
            storage_url: Set(storage_url.to_owned()),
            content_type: Set(content_type.to_owned()),
            size_bytes: Set(size_bytes),
            uploaded_by: Set(uploaded_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        file.insert(db).await
    }

    /// Resolves a file id within a course; files of other courses are
    /// treated as absent.
    pub async fn find_in_course(
        db: &DbConn,
        id: i64,
        course_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Id.eq(id))
            .filter(Column::CourseId.eq(course_id))
            .one(db)
            .await
    }

    /// Files directly inside `folder_id` (or at the course root when `None`).
    pub async fn in_folder(
        db: &DbConn,
        course_id: i64,
        folder_id: Option<i64>,
    ) -> Result<Vec<Model>, DbErr> {
        let query = Entity::find().filter(Column::CourseId.eq(course_id));
        let query = match folder_id {
            Some(folder) => query.filter(Column::FolderId.eq(folder)),
            None => query.filter(Column::FolderId.is_null()),
        };

        query.all(db).await
    }

    /// Case-insensitive check for a file with the same name in the same
    /// location.
    pub async fn name_taken(
        db: &DbConn,
        course_id: i64,
        folder_id: Option<i64>,
        filename: &str,
    ) -> Result<bool, DbErr> {
        let neighbours = Self::in_folder(db, course_id, folder_id).await?;
        Ok(neighbours
            .iter()
            .any(|file| file.filename.eq_ignore_ascii_case(filename)))
    }

    /// Deletes by id, returning the number of rows removed.
    pub async fn delete(db: &DbConn, id: i64) -> Result<u64, DbErr> {
        let result = Entity::delete_by_id(id).exec(db).await?;
        Ok(result.rows_affected)
    }
}
