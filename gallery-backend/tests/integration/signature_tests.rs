// tests/integration/signature_tests.rs

use crate::common::app_helper::setup_app;
use crate::common::request::{empty_request, response_json, MultipartBuilder};
use crate::common::test_data::small_png;
use axum::http::StatusCode;
use gallery_backend::config::AppConfig;
use tower::ServiceExt;

#[tokio::test]
async fn test_create_and_list_signatures() {
    let app = setup_app().await;

    let request = MultipartBuilder::new()
        .text("userId", "u1")
        .text("name", "Visitor")
        .text("content", "Wonderful exhibition")
        .file("signature", "sign.png", &small_png())
        .build("POST", "/v1/signature");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    let signature = &json["signature"];
    assert_eq!(signature["userId"], "u1");
    assert_eq!(signature["name"], "Visitor");
    assert_eq!(signature["content"], "Wonderful exhibition");

    // 署名画像は変換せずに保存する
    let file_name = signature["fileName"].as_str().unwrap();
    assert!(file_name.ends_with(".png"));
    assert_eq!(
        app.storage.get(&format!("signatures/{}", file_name)).unwrap(),
        small_png()
    );

    // 名前だけの署名も受け付ける
    let request = MultipartBuilder::new()
        .text("userId", "u2")
        .text("name", "Only name")
        .build("POST", "/v1/signature");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/v1/signature/count"))
        .await
        .unwrap();
    assert_eq!(
        response_json(response).await,
        serde_json::json!({ "counts": 2, "error": 0 })
    );

    let password = AppConfig::for_testing().security.admin_secret;
    let response = app
        .router
        .clone()
        .oneshot(empty_request(
            "GET",
            &format!("/v1/signature?password={}", password),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["signatures"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_requires_password() {
    let app = setup_app().await;

    for uri in ["/v1/signature", "/v1/signature?password=wrong"] {
        let response = app
            .router
            .clone()
            .oneshot(empty_request("GET", uri))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(response_json(response).await["error"], 107);
    }
}

#[tokio::test]
async fn test_create_signature_validation() {
    let app = setup_app().await;

    let request = MultipartBuilder::new()
        .text("name", "Visitor")
        .build("POST", "/v1/signature");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response_json(response).await["error"], 101);

    let request = MultipartBuilder::new()
        .text("userId", "u1")
        .text("content", "no name and no file")
        .build("POST", "/v1/signature");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response_json(response).await["error"], 100);

    let request = MultipartBuilder::new()
        .text("userId", "u1")
        .text("name", "x")
        .build("POST", "/v1/signature");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response_json(response).await["error"], 100);

    let request = MultipartBuilder::new()
        .text("userId", "u1")
        .file_with_type("signature", "notes.txt", "text/plain", b"hello")
        .build("POST", "/v1/signature");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response_json(response).await["error"], 105);

    assert!(app.storage.is_empty());
}

#[tokio::test]
async fn test_signature_file_name_follows_image_type() {
    let app = setup_app().await;

    let request = MultipartBuilder::new()
        .text("userId", "u1")
        .file("signature", "sign.longextension", &small_png())
        .build("POST", "/v1/signature");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    let file_name = json["signature"]["fileName"].as_str().unwrap();
    assert!(file_name.ends_with(".png"));
    assert!(file_name.len() <= 70);
    assert!(app
        .storage
        .get(&format!("signatures/{}", file_name))
        .is_some());
}

#[tokio::test]
async fn test_signature_rejects_svg_and_long_user_id() {
    let app = setup_app().await;

    let request = MultipartBuilder::new()
        .text("userId", "u1")
        .file_with_type(
            "signature",
            "sign.svg",
            "image/svg+xml",
            br#"<svg xmlns="http://www.w3.org/2000/svg"><script>alert(1)</script></svg>"#,
        )
        .build("POST", "/v1/signature");
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["error"], 105);
    assert!(app.storage.is_empty());

    let request = MultipartBuilder::new()
        .text("userId", &"u".repeat(256))
        .text("name", "Visitor")
        .build("POST", "/v1/signature");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response_json(response).await["error"], 100);
}
