use axum::http::StatusCode;
use db::models::course_role::Role;
use serde_json::json;
use tower::util::ServiceExt;

mod helpers;
use helpers::app::{body_json, json_request, make_test_app};

#[tokio::test]
async fn instructor_can_create_and_nest_folders() {
    let test_app = make_test_app().await;
    let course = test_app.seed_course("CS101").await;
    let (_, token) = test_app
        .seed_member("lecturer", course.id, Role::Instructor)
        .await;

    let response = test_app
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/courses/{}/folders", course.id),
            Some(&token),
            Some(json!({ "name": "Lecture Notes" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["name"], "Lecture Notes");
    assert_eq!(json["data"]["parent_folder_id"], serde_json::Value::Null);
    let parent_id = json["data"]["id"].as_i64().unwrap();

    let response = test_app
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/courses/{}/folders", course.id),
            Some(&token),
            Some(json!({ "name": "Week 1", "parent_folder_id": parent_id })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["parent_folder_id"], parent_id);
}

#[tokio::test]
async fn empty_and_duplicate_names_are_rejected() {
    let test_app = make_test_app().await;
    let course = test_app.seed_course("CS101").await;
    let (_, token) = test_app
        .seed_member("lecturer", course.id, Role::Instructor)
        .await;
    let uri = format!("/api/courses/{}/folders", course.id);

    let response = test_app
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            &uri,
            Some(&token),
            Some(json!({ "name": "   " })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = test_app
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            &uri,
            Some(&token),
            Some(json!({ "name": "Lecture Notes" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = test_app
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            &uri,
            Some(&token),
            Some(json!({ "name": "lecture notes" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn unknown_parent_folder_is_not_found() {
    let test_app = make_test_app().await;
    let course = test_app.seed_course("CS101").await;
    let (_, token) = test_app
        .seed_member("lecturer", course.id, Role::Instructor)
        .await;

    let response = test_app
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/courses/{}/folders", course.id),
            Some(&token),
            Some(json!({ "name": "Orphan", "parent_folder_id": 999 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn folder_writes_require_the_instructor_role() {
    let test_app = make_test_app().await;
    let course = test_app.seed_course("CS101").await;
    let (_, student_token) = test_app
        .seed_member("student", course.id, Role::Student)
        .await;
    let uri = format!("/api/courses/{}/folders", course.id);
    let body = json!({ "name": "Lecture Notes" });

    let response = test_app
        .app
        .clone()
        .oneshot(json_request("POST", &uri, Some(&student_token), Some(body.clone())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = test_app
        .app
        .clone()
        .oneshot(json_request("POST", &uri, None, Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn deleting_a_folder_twice_is_not_found() {
    let test_app = make_test_app().await;
    let course = test_app.seed_course("CS101").await;
    let (_, token) = test_app
        .seed_member("lecturer", course.id, Role::Instructor)
        .await;

    let response = test_app
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/courses/{}/folders", course.id),
            Some(&token),
            Some(json!({ "name": "Temporary" })),
        ))
        .await
        .unwrap();
    let folder_id = body_json(response).await["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/courses/{}/folders/{}", course.id, folder_id);

    let response = test_app
        .app
        .clone()
        .oneshot(json_request("DELETE", &uri, Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = test_app
        .app
        .clone()
        .oneshot(json_request("DELETE", &uri, Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
