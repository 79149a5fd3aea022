use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub admin: bool,

    /// Remote key of the current avatar, if one is set.
    pub avatar_key: Option<String>,
    pub avatar_url: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course_role::Entity")]
    CourseRole,

    #[sea_orm(has_many = "super::announcement::Entity")]
    Announcement,
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
        username: &str,
        email: &str,
        admin: bool,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let user = ActiveModel {
            username: Set(username.to_owned()),
            email: Set(email.to_owned()),
            admin: Set(admin),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        user.insert(db).await
    }

    pub async fn find_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// Updates the profile fields that were supplied; the rest are untouched.
    pub async fn update_profile(
        db: &DbConn,
        id: i64,
        display_name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Model, DbErr> {
        let user = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("user {id} not found")))?;

        let mut user: ActiveModel = user.into();
        if let Some(name) = display_name {
            user.display_name = Set(Some(name.to_owned()));
        }
        if let Some(email) = email {
            user.email = Set(email.to_owned());
        }
        user.updated_at = Set(Utc::now());

        user.update(db).await
    }

    /// Points the profile at a new remote avatar object.
    ///
    /// Returns the updated user together with the previous `(key, url)`
    /// reference, so the caller can release the old remote object.
    pub async fn set_avatar(
        db: &DbConn,
        id: i64,
        key: &str,
        url: &str,
    ) -> Result<(Model, Option<(String, String)>), DbErr> {
        let user = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("user {id} not found")))?;

        let previous = user.avatar_key.clone().zip(user.avatar_url.clone());

        let mut user: ActiveModel = user.into();
        user.avatar_key = Set(Some(key.to_owned()));
        user.avatar_url = Set(Some(url.to_owned()));
        user.updated_at = Set(Utc::now());

        let updated = user.update(db).await?;
        Ok((updated, previous))
    }

    /// Clears the avatar reference, returning the previous `(key, url)` if
    /// one was set.
    pub async fn clear_avatar(
        db: &DbConn,
        id: i64,
    ) -> Result<Option<(String, String)>, DbErr> {
        let user = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("user {id} not found")))?;

        let previous = user.avatar_key.clone().zip(user.avatar_url.clone());

        let mut user: ActiveModel = user.into();
        user.avatar_key = Set(None);
        user.avatar_url = Set(None);
        user.updated_at = Set(Utc::now());

        user.update(db).await?;
        Ok(previous)
    }
}
