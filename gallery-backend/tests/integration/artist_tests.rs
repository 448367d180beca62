// tests/integration/artist_tests.rs

use crate::common::app_helper::{setup_app, setup_app_with_reference, TestApp};
use crate::common::request::{empty_request, response_json, MultipartBuilder};
use crate::common::test_data::{jpeg_dimensions, rendered_png, small_png};
use axum::http::StatusCode;
use gallery_backend::domain::artist_model::Entity as ArtistEntity;
use gallery_backend::domain::reference_data::{ArtistRosterEntry, ReferenceData};
use gallery_backend::repository::artist_repository::ArtistRepository;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::Value;
use tower::ServiceExt;

async fn create_artist(app: &TestApp, id: i32) -> (StatusCode, Value) {
    let image = small_png();
    let request = MultipartBuilder::new()
        .text("artistId", &id.to_string())
        .text("artistName", "Kim Hong-do")
        .text("detail", "Joseon painter")
        .file("repImage", "rep.png", &image)
        .file("landscape", "land.png", &image)
        .file("portrait", "port.png", &image)
        .build("POST", "/v1/artist");

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, response_json(response).await)
}

#[tokio::test]
async fn test_create_artist_echoes_fields() {
    let app = setup_app().await;

    let (status, json) = create_artist(&app, 7).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["error"], 0);
    let artist = &json["artist"];
    assert_eq!(artist["id"], 7);
    assert_eq!(artist["artistName"], "Kim Hong-do");
    assert_eq!(artist["detail"], "Joseon painter");
    assert_eq!(artist["hitCount"], 0);
    assert_eq!(artist["seeMoreCount"], 0);
    assert!(artist["profileFileName"].is_null());

    let thumb = artist["thumbFileName"].as_str().unwrap();
    assert_eq!(thumb.len(), 64 + ".jpg".len());
    let stored = app.storage.get(&format!("thumb/{}", thumb)).unwrap();
    // 代表画像は300x300に切り抜かれる
    assert_eq!(jpeg_dimensions(&stored), (300, 300));

    let landscape = artist["landscapeFileName"].as_str().unwrap();
    assert!(app.storage.get(&format!("rendered/{}", landscape)).is_some());
    assert_eq!(app.storage.keys().len(), 3);
}

#[tokio::test]
async fn test_duplicate_artist_including_soft_deleted() {
    let app = setup_app().await;
    let (status, _) = create_artist(&app, 3).await;
    assert_eq!(status, StatusCode::OK);
    let stored_before = app.storage.keys();

    let (status, json) = create_artist(&app, 3).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], 200);
    assert_eq!(app.storage.keys(), stored_before);

    // 論理削除しても同じIDは使えない
    let repo = ArtistRepository::new(app.connection().clone());
    assert!(repo.soft_delete(3).await.unwrap());

    let (status, json) = create_artist(&app, 3).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], 200);
    assert_eq!(app.storage.keys(), stored_before);

    let rows = ArtistEntity::find().count(app.connection()).await.unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn test_soft_deleted_artist_is_hidden() {
    let app = setup_app().await;
    create_artist(&app, 1).await;
    create_artist(&app, 2).await;

    ArtistRepository::new(app.connection().clone())
        .soft_delete(2)
        .await
        .unwrap();

    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/v1/artist"))
        .await
        .unwrap();
    let json = response_json(response).await;
    let artists = json["artists"].as_array().unwrap();
    assert_eq!(artists.len(), 1);
    assert_eq!(artists[0]["id"], 1);
    assert_eq!(artists[0]["artworks"], serde_json::json!([]));

    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/v1/artist/2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["error"], 201);

    let response = app
        .router
        .clone()
        .oneshot(empty_request("POST", "/v1/artist/hit/2"))
        .await
        .unwrap();
    assert_eq!(response_json(response).await["error"], 201);
}

#[tokio::test]
async fn test_missing_files() {
    let app = setup_app().await;
    let image = small_png();

    let request = MultipartBuilder::new()
        .text("artistId", "5")
        .file("landscape", "land.png", &image)
        .file("portrait", "port.png", &image)
        .build("POST", "/v1/artist");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response_json(response).await["error"], 103);

    let request = MultipartBuilder::new()
        .text("artistId", "5")
        .file("repImage", "rep.png", &image)
        .file("landscape", "land.png", &image)
        .build("POST", "/v1/artist");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response_json(response).await["error"], 104);

    assert!(app.storage.is_empty());
}

#[tokio::test]
async fn test_long_artist_name_is_rejected_before_upload() {
    let app = setup_app().await;
    let image = small_png();
    let long_name = "a".repeat(256);

    let request = MultipartBuilder::new()
        .text("artistId", "5")
        .text("artistName", &long_name)
        .file("repImage", "rep.png", &image)
        .file("landscape", "land.png", &image)
        .file("portrait", "port.png", &image)
        .build("POST", "/v1/artist");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["error"], 100);
    assert!(app.storage.is_empty());
    assert_eq!(ArtistEntity::find().count(app.connection()).await.unwrap(), 0);

    let (status, _) = create_artist(&app, 5).await;
    assert_eq!(status, StatusCode::OK);
    let stored = app.storage.keys().len();

    let request = MultipartBuilder::new()
        .text("artistId", "5")
        .text("artistName", &long_name)
        .file("repImage", "rep.png", &image)
        .build("PUT", "/v1/artist");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response_json(response).await["error"], 100);
    assert_eq!(app.storage.keys().len(), stored);
}

#[tokio::test]
async fn test_concurrent_hit_and_see_more_counts() {
    let app = setup_app().await;
    create_artist(&app, 11).await;

    const N: usize = 20;
    let mut handles = Vec::with_capacity(N * 2);
    for i in 0..N * 2 {
        let router = app.router.clone();
        let uri = if i % 2 == 0 {
            "/v1/artist/hit/11"
        } else {
            "/v1/artist/seemore/11"
        };
        handles.push(tokio::spawn(async move {
            router.oneshot(empty_request("POST", uri)).await.unwrap()
        }));
    }
    for handle in handles {
        let response = handle.await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/v1/artist/11"))
        .await
        .unwrap();
    let json = response_json(response).await;
    assert_eq!(json["artist"]["hitCount"], N);
    assert_eq!(json["artist"]["seeMoreCount"], N);
}

#[tokio::test]
async fn test_update_artist() {
    let app = setup_app().await;
    let (_, created) = create_artist(&app, 4).await;
    let thumb = created["artist"]["thumbFileName"].as_str().unwrap().to_string();

    // 何も指定しない更新は拒否
    let request = MultipartBuilder::new()
        .text("artistId", "4")
        .build("PUT", "/v1/artist");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response_json(response).await["error"], 102);

    let request = MultipartBuilder::new()
        .text("artistId", "4")
        .text("artistName", "Shin Yun-bok")
        .file("repImage", "new.png", &small_png())
        .file("profile", "me.png", &small_png())
        .build("PUT", "/v1/artist");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;

    let artist = &json["artist"];
    assert_eq!(artist["artistName"], "Shin Yun-bok");
    assert_eq!(artist["detail"], "Joseon painter");
    // 既存のファイル名を再利用する
    assert_eq!(artist["thumbFileName"], thumb.as_str());
    let profile = artist["profileFileName"].as_str().unwrap();
    assert!(app.storage.get(&format!("profile/{}", profile)).is_some());

    let request = MultipartBuilder::new()
        .text("artistId", "99")
        .text("artistName", "Nobody")
        .build("PUT", "/v1/artist");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response_json(response).await["error"], 201);
}

#[tokio::test]
async fn test_bulk_create_uses_roster() {
    let reference = ReferenceData::new(
        Vec::new(),
        vec![ArtistRosterEntry {
            id: 21,
            artist_name: "Jeong Seon".to_string(),
            detail: Some("Landscape painter".to_string()),
        }],
        Vec::new(),
    );
    let app = setup_app_with_reference(reference).await;
    let image = small_png();

    let request = MultipartBuilder::new()
        .file("repImages[]", "21_rep.png", &image)
        .file("repImages[]", "22_rep.png", &image)
        .build("POST", "/v1/artist/bulk");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    let artists = json["artists"].as_array().unwrap();
    assert_eq!(artists.len(), 2);
    assert_eq!(artists[0]["id"], 21);
    assert_eq!(artists[0]["artistName"], "Jeong Seon");
    assert_eq!(artists[0]["detail"], "Landscape painter");
    assert!(artists[1]["artistName"].is_null());

    let thumb = artists[0]["thumbFileName"].as_str().unwrap();
    let stored = app.storage.get(&format!("thumb/{}", thumb)).unwrap();
    // 拡大せずに300x300以内へ収める
    assert_eq!(jpeg_dimensions(&stored), (64, 48));
}

#[tokio::test]
async fn test_bulk_create_rejects_whole_batch() {
    let app = setup_app().await;
    let image = small_png();

    let request = MultipartBuilder::new()
        .file("repImages", "31_ok.png", &image)
        .file("repImages", "no-prefix.png", &image)
        .build("POST", "/v1/artist/bulk");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["error"], 106);

    let request = MultipartBuilder::new()
        .file("repImages", "32_a.png", &image)
        .file("repImages", "32_b.png", &image)
        .build("POST", "/v1/artist/bulk");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response_json(response).await["error"], 200);

    assert!(app.storage.is_empty());
    let rows = ArtistEntity::find().count(app.connection()).await.unwrap();
    assert_eq!(rows, 0);
}

#[tokio::test]
async fn test_crop_preview_and_bulk_crop() {
    let app = setup_app().await;
    create_artist(&app, 8).await;
    let rendered = rendered_png();

    let request = MultipartBuilder::new()
        .file("original", "8.png", &rendered)
        .build("POST", "/v1/artist/crop");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["landscape"], "tmp/land/8.png");
    assert_eq!(json["portrait"], "tmp/port/8.png");
    assert_eq!(
        jpeg_dimensions(&app.storage.get("tmp/land/8.png").unwrap()),
        (2560, 1022)
    );
    assert_eq!(
        jpeg_dimensions(&app.storage.get("tmp/port/8.png").unwrap()),
        (730, 1460)
    );

    // 存在しない作家が含まれていれば何も保存しない
    let stored_before = app.storage.keys();
    let request = MultipartBuilder::new()
        .file("renderedImages", "8.png", &rendered)
        .file("renderedImages", "9.png", &rendered)
        .build("PUT", "/v1/artist/crop/bulk");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response_json(response).await["error"], 201);
    assert_eq!(app.storage.keys(), stored_before);

    let request = MultipartBuilder::new()
        .file("renderedImages", "8.png", &rendered)
        .build("PUT", "/v1/artist/crop/bulk");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    let artist = &json["artists"][0];
    let landscape = artist["landscapeFileName"].as_str().unwrap();
    assert_eq!(
        jpeg_dimensions(&app.storage.get(&format!("rendered/{}", landscape)).unwrap()),
        (2560, 1022)
    );
}
