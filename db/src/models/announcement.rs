use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "announcements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub course_id: i64,
    pub user_id: i64,

    pub title: String,
    pub body: String,
    pub pinned: bool,

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
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        course_id: i64,
        user_id: i64,
        title: &str,
        body: &str,
        pinned: bool,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let announcement = ActiveModel {
            course_id: Set(course_id),
            user_id: Set(user_id),
            title: Set(title.to_owned()),
            body: Set(body.to_owned()),
            pinned: Set(pinned),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        announcement.insert(db).await
    }

    /// Resolves an announcement id within a course.
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

    /// All announcements for a course, pinned first, newest first within
    /// each group.
    pub async fn for_course(db: &DbConn, course_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_desc(Column::Pinned)
            .order_by_desc(Column::CreatedAt)
            .all(db)
            .await
    }

    pub async fn update(
        db: &DbConn,
        id: i64,
        title: &str,
        body: &str,
        pinned: bool,
    ) -> Result<Model, DbErr> {
        let mut announcement = ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        if !title.is_empty() {
            announcement.title = Set(title.to_owned());
        }
        if !body.is_empty() {
            announcement.body = Set(body.to_owned());
        }
        announcement.pinned = Set(pinned);

        announcement.update(db).await
    }

    pub async fn delete(db: &DbConn, id: i64) -> Result<(), DbErr> {
        Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }
}
