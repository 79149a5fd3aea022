use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A named container for files within a course.
///
/// Folders nest through `parent_id`; a root folder has no parent. The parent
/// chain always stays within one course: a folder is only ever created under
/// a parent that was first resolved in the same course, and folders are never
/// re-parented afterwards.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "folders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub course_id: i64,
    pub parent_id: Option<i64>,
    pub name: String,

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
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_delete = "Cascade"
    )]
    Parent,

    #[sea_orm(has_many = "super::course_file::Entity")]
    CourseFile,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::course_file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseFile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        course_id: i64,
        parent_id: Option<i64>,
        name: &str,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let folder = ActiveModel {
            course_id: Set(course_id),
            parent_id: Set(parent_id),
            name: Set(name.to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        folder.insert(db).await
    }

    /// Resolves a folder id within a course; a folder belonging to another
    /// course is treated as absent.
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

    /// Direct children of `parent_id` (or of the course root when `None`).
    pub async fn children_of(
        db: &DbConn,
        course_id: i64,
        parent_id: Option<i64>,
    ) -> Result<Vec<Model>, DbErr> {
        let query = Entity::find().filter(Column::CourseId.eq(course_id));
        let query = match parent_id {
            Some(parent) => query.filter(Column::ParentId.eq(parent)),
            None => query.filter(Column::ParentId.is_null()),
        };

        query.all(db).await
    }

    /// Case-insensitive check for a sibling folder with the same name.
    pub async fn name_taken(
        db: &DbConn,
        course_id: i64,
        parent_id: Option<i64>,
        name: &str,
    ) -> Result<bool, DbErr> {
        let siblings = Self::children_of(db, course_id, parent_id).await?;
        Ok(siblings
            .iter()
            .any(|folder| folder.name.eq_ignore_ascii_case(name)))
    }

    /// Deletes by id, returning the number of rows removed. Zero rows is not
    /// an error; cascade retries hit already-deleted folders.
    pub async fn delete(db: &DbConn, id: i64) -> Result<u64, DbErr> {
        let result = Entity::delete_by_id(id).exec(db).await?;
        Ok(result.rows_affected)
    }
}
