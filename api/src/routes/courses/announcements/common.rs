//! Announcement request DTO, used by POST and PUT under `/announcements`.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnnouncementRequest {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub pinned: bool,
}
