use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub code: String,
    pub title: String,
    pub description: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::folder::Entity")]
    Folder,

    #[sea_orm(has_many = "super::course_file::Entity")]
    CourseFile,

    #[sea_orm(has_many = "super::course_role::Entity")]
    CourseRole,

    #[sea_orm(has_many = "super::announcement::Entity")]
    Announcement,
}

impl Related<super::folder::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Folder.def()
    }
}

impl Related<super::course_file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseFile.def()
    }
}

impl Related<super::course_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseRole.def()
    }
}

impl Related<super::announcement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Announcement.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        code: &str,
        title: &str,
        description: Option<&str>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let course = ActiveModel {
            code: Set(code.to_owned()),
            title: Set(title.to_owned()),
            description: Set(description.map(str::to_owned)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        course.insert(db).await
    }

    pub async fn find_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn exists(db: &DbConn, id: i64) -> Result<bool, DbErr> {
        Ok(Entity::find_by_id(id).one(db).await?.is_some())
    }
}
