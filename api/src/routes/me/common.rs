//! Profile DTOs.

use db::models::user;
use serde::Serialize;

/// Public view of the authenticated user's profile.
#[derive(Debug, Default, Serialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub admin: bool,
}

impl From<user::Model> for ProfileResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            display_name: model.display_name,
            avatar_url: model.avatar_url,
            admin: model.admin,
        }
    }
}
