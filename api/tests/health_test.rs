use axum::http::StatusCode;
use tower::util::ServiceExt;

mod helpers;
use helpers::app::{body_json, json_request, make_test_app};

#[tokio::test]
async fn health_check_needs_no_authentication() {
    let test_app = make_test_app().await;

    let response = test_app
        .app
        .clone()
        .oneshot(json_request("GET", "/api/health", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"], "OK");
}
