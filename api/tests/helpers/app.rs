//! Shared setup for route tests: an in-memory database with the schema
//! applied, a recording media store, and request building helpers.

#![allow(dead_code)]

use api::auth::claims::Claims;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use chrono::{Duration, Utc};
use db::models::{
    course,
    course_role::{self, Role},
    user,
};
use jsonwebtoken::{EncodingKey, Header, encode};
use media::test_utils::MemoryMediaStore;
use migration::Migrator;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use std::sync::Arc;
use util::{
    config::{self, AppConfig},
    state::AppState,
};

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub media: Arc<MemoryMediaStore>,
}

pub async fn make_test_app() -> TestApp {
    AppConfig::override_config(AppConfig::test_defaults());

    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory db");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let media = Arc::new(MemoryMediaStore::new());
    let state = AppState::new(db, media.clone());
    let app = Router::new().nest("/api", api::routes::routes(state.clone()));

    TestApp { app, state, media }
}

impl TestApp {
    pub fn db(&self) -> &DatabaseConnection {
        self.state.db()
    }

    pub async fn seed_course(&self, code: &str) -> course::Model {
        course::Model::create(self.db(), code, "Test Course", None)
            .await
            .expect("Failed to seed course")
    }

    /// Creates a user, enrolls them with `role`, and returns a valid token.
    pub async fn seed_member(
        &self,
        username: &str,
        course_id: i64,
        role: Role,
    ) -> (user::Model, String) {
        let member = user::Model::create(
            self.db(),
            username,
            &format!("{username}@example.com"),
            false,
        )
        .await
        .expect("Failed to seed user");
        course_role::Model::assign(self.db(), member.id, course_id, role)
            .await
            .expect("Failed to assign course role");

        let token = token_for(member.id, false);
        (member, token)
    }

    /// Creates a user with no course membership.
    pub async fn seed_outsider(&self, username: &str) -> (user::Model, String) {
        let outsider = user::Model::create(
            self.db(),
            username,
            &format!("{username}@example.com"),
            false,
        )
        .await
        .expect("Failed to seed user");
        let token = token_for(outsider.id, false);
        (outsider, token)
    }
}

pub fn token_for(user_id: i64, admin: bool) -> String {
    let claims = Claims {
        sub: user_id,
        exp: (Utc::now() + Duration::minutes(60)).timestamp() as usize,
        admin,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config::jwt_secret().as_bytes()),
    )
    .expect("Failed to encode test token")
}

pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

const BOUNDARY: &str = "test-boundary-7f9a2c";

/// Multipart request with one `file` part and optional extra text fields.
pub fn multipart_request(
    method: &str,
    uri: &str,
    token: &str,
    file_name: &str,
    content_type: &str,
    bytes: &[u8],
    fields: &[(&str, &str)],
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).expect("Response body was not valid JSON")
}
