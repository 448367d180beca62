// tests/integration/feedback_tests.rs

use crate::common::app_helper::setup_app;
use crate::common::request::{json_request, response_json};
use axum::http::StatusCode;
use gallery_backend::domain::feedback_model::Entity as FeedbackEntity;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_submit_feedback_success() {
    let app = setup_app().await;

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/feedback",
            &json!({ "userId": "u1", "email": "a@b.com", "content": "hello" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;

    assert_eq!(json["error"], 0);
    let feedback = &json["feedback"];
    assert!(feedback["id"].as_i64().unwrap() > 0);
    assert_eq!(feedback["userId"], "u1");
    assert_eq!(feedback["email"], "a@b.com");
    assert_eq!(feedback["content"], "hello");
    assert!(feedback["createdAt"].is_string());
    assert!(feedback.get("deletedAt").is_none());
}

#[tokio::test]
async fn test_missing_email_writes_nothing() {
    let app = setup_app().await;

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/feedback",
            &json!({ "userId": "u1", "content": "hello" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"], 100);
    // テスト環境では詳細も返る
    assert_eq!(json["name"], "CHECK_REQUEST");

    let count = FeedbackEntity::find().count(app.connection()).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_missing_user_id() {
    let app = setup_app().await;

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/feedback",
            &json!({ "email": "a@b.com", "content": "hello" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["error"], 101);
}

#[tokio::test]
async fn test_invalid_email_and_long_content() {
    let app = setup_app().await;

    for body in [
        json!({ "userId": "u1", "email": "not-an-email", "content": "hello" }),
        json!({ "userId": "u1", "email": "a@b.com", "content": "a".repeat(501) }),
    ] {
        let response = app
            .router
            .clone()
            .oneshot(json_request("POST", "/v1/feedback", &body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response_json(response).await["error"], 100);
    }

    let count = FeedbackEntity::find().count(app.connection()).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_malformed_json_is_check_request() {
    let app = setup_app().await;

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/v1/feedback")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["error"], 100);
}
