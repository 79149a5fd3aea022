use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Membership of a user in a course, with the role that membership carries.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course_roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,

    #[sea_orm(primary_key, auto_increment = false)]
    pub course_id: i64,

    pub role: Role,

    pub created_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, EnumString, Display, DeriveActiveEnum, Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "course_role_type")]
pub enum Role {
    #[strum(serialize = "instructor")]
    #[sea_orm(string_value = "instructor")]
    Instructor,
    #[strum(serialize = "student")]
    #[sea_orm(string_value = "student")]
    Student,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,

    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn assign(
        db: &DbConn,
        user_id: i64,
        course_id: i64,
        role: Role,
    ) -> Result<Model, DbErr> {
        let membership = ActiveModel {
            user_id: Set(user_id),
            course_id: Set(course_id),
            role: Set(role),
            created_at: Set(Utc::now()),
        };

        membership.insert(db).await
    }

    /// Whether the user holds any of `roles` in the course.
    pub async fn user_has_any_role(
        db: &DbConn,
        user_id: i64,
        course_id: i64,
        roles: &[Role],
    ) -> Result<bool, DbErr> {
        let count = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Role.is_in(roles.iter().cloned()))
            .count(db)
            .await?;

        Ok(count > 0)
    }
}
