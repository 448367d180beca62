// tests/integration/artwork_tests.rs

use crate::common::app_helper::{setup_app, setup_app_with_reference, TestApp};
use crate::common::request::{empty_request, json_request, response_json, MultipartBuilder};
use crate::common::test_data::{jpeg_dimensions, small_png};
use axum::http::StatusCode;
use gallery_backend::domain::artwork_model::Entity as ArtworkEntity;
use gallery_backend::domain::reference_data::{
    ArtistRosterEntry, ArtworkRosterEntry, FileNameEntry, ReferenceData,
};
use gallery_backend::repository::artist_repository::{ArtistRepository, CreateArtist};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn insert_artist(app: &TestApp, id: i32, name: Option<&str>) {
    ArtistRepository::new(app.connection().clone())
        .create(CreateArtist {
            id,
            artist_name: name.map(str::to_string),
            ..Default::default()
        })
        .await
        .unwrap();
}

async fn create_artwork(app: &TestApp, artist_id: i32, artwork_id: Option<i32>) -> (StatusCode, Value) {
    let mut builder = MultipartBuilder::new()
        .text("artistId", &artist_id.to_string())
        .text("title", "Sunrise")
        .text("size", "60x40")
        .text("material", "ink on paper")
        .file("image", "sunrise.png", &small_png());
    if let Some(id) = artwork_id {
        builder = builder.text("artworkId", &id.to_string());
    }

    let response = app
        .router
        .clone()
        .oneshot(builder.build("POST", "/v1/artwork"))
        .await
        .unwrap();
    let status = response.status();
    (status, response_json(response).await)
}

fn bulk_reference() -> ReferenceData {
    ReferenceData::new(
        vec![
            FileNameEntry {
                before: "5_sunrise".to_string(),
                artwork_id: 51,
                artist_id: 5,
            },
            FileNameEntry {
                before: "5_moon".to_string(),
                artwork_id: 52,
                artist_id: 5,
            },
        ],
        vec![ArtistRosterEntry {
            id: 5,
            artist_name: "Roster Name".to_string(),
            detail: None,
        }],
        vec![
            ArtworkRosterEntry {
                id: 51,
                artist_id: 5,
                title: "Sunrise".to_string(),
                size: "90x60".to_string(),
                material: "oil".to_string(),
            },
            ArtworkRosterEntry {
                id: 52,
                artist_id: 5,
                title: "Moon".to_string(),
                size: "30x30".to_string(),
                material: "acrylic".to_string(),
            },
        ],
    )
}

#[tokio::test]
async fn test_create_artwork_copies_artist_name() {
    let app = setup_app().await;
    insert_artist(&app, 1, Some("Lee Jung-seob")).await;

    let (status, json) = create_artwork(&app, 1, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["error"], 0);
    let artwork = &json["artwork"];
    assert_eq!(artwork["artistId"], 1);
    assert_eq!(artwork["artistName"], "Lee Jung-seob");
    assert_eq!(artwork["title"], "Sunrise");
    assert_eq!(artwork["size"], "60x40");
    assert_eq!(artwork["material"], "ink on paper");

    let file_name = artwork["fileName"].as_str().unwrap();
    let stored = app.storage.get(&format!("artworks/{}", file_name)).unwrap();
    assert_eq!(jpeg_dimensions(&stored), (64, 48));

    let id = artwork["id"].as_i64().unwrap();
    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", &format!("/v1/artwork/{}", id)))
        .await
        .unwrap();
    assert_eq!(response_json(response).await["artwork"]["title"], "Sunrise");
}

#[tokio::test]
async fn test_create_artwork_validation() {
    let app = setup_app().await;

    // 画像なし
    let request = MultipartBuilder::new()
        .text("artistId", "1")
        .text("title", "t")
        .build("POST", "/v1/artwork");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response_json(response).await["error"], 102);

    // 作家が存在しない
    let (status, json) = create_artwork(&app, 404, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], 201);

    // 画像として読めないファイル
    insert_artist(&app, 2, None).await;
    let request = MultipartBuilder::new()
        .text("artistId", "2")
        .text("title", "t")
        .text("size", "s")
        .text("material", "m")
        .file("image", "broken.png", b"not an image")
        .build("POST", "/v1/artwork");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response_json(response).await["error"], 105);

    // 題名が長すぎる
    let request = MultipartBuilder::new()
        .text("artistId", "2")
        .text("title", &"t".repeat(256))
        .text("size", "s")
        .text("material", "m")
        .file("image", "art.png", &small_png())
        .build("POST", "/v1/artwork");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response_json(response).await["error"], 100);

    assert!(app.storage.is_empty());
}

#[tokio::test]
async fn test_update_artwork_selectively() {
    let app = setup_app().await;
    insert_artist(&app, 1, None).await;
    let (_, created) = create_artwork(&app, 1, None).await;
    let id = created["artwork"]["id"].as_i64().unwrap();

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/v1/artwork/{}", id),
            &json!({ "title": "Sunset" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["artwork"]["title"], "Sunset");
    assert_eq!(json["artwork"]["size"], "60x40");

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "PATCH",
            "/v1/artwork/9999",
            &json!({ "title": "Sunset" }),
        ))
        .await
        .unwrap();
    assert_eq!(response_json(response).await["error"], 202);

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/v1/artwork/{}", id),
            &json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response_json(response).await["error"], 100);
}

#[tokio::test]
async fn test_bulk_import_and_sequence_sync() {
    let app = setup_app_with_reference(bulk_reference()).await;
    insert_artist(&app, 5, None).await;

    let request = MultipartBuilder::new()
        .file("images[]", "5_sunrise.png", &small_png())
        .file("images[]", "5_moon.jpg", &small_png())
        .build("POST", "/v1/artwork/bulk");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    let artworks = json["artworks"].as_array().unwrap();
    assert_eq!(artworks.len(), 2);
    assert_eq!(artworks[0]["id"], 51);
    assert_eq!(artworks[0]["title"], "Sunrise");
    assert_eq!(artworks[0]["material"], "oil");
    // 作家名が未設定なら名簿から補う
    assert_eq!(artworks[0]["artistName"], "Roster Name");
    assert_eq!(artworks[1]["id"], 52);

    let file_name = artworks[0]["fileName"].as_str().unwrap();
    let stored = app.storage.get(&format!("artworks/{}", file_name)).unwrap();
    // 1500x1500 に収まるよう拡大
    assert_eq!(jpeg_dimensions(&stored), (1500, 1125));

    // 採番は一括登録したIDの後から続く
    let (status, json) = create_artwork(&app, 5, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["artwork"]["id"].as_i64().unwrap() > 52);

    // 同じファイルの再登録は拒否
    let request = MultipartBuilder::new()
        .file("images", "5_sunrise.png", &small_png())
        .build("POST", "/v1/artwork/bulk");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response_json(response).await["error"], 100);
}

#[tokio::test]
async fn test_bulk_import_with_unknown_name_writes_nothing() {
    let app = setup_app_with_reference(bulk_reference()).await;
    insert_artist(&app, 5, None).await;

    let request = MultipartBuilder::new()
        .file("images", "5_sunrise.png", &small_png())
        .file("images", "5_unlisted.png", &small_png())
        .build("POST", "/v1/artwork/bulk");
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["error"], 106);
    assert!(app.storage.is_empty());
    let rows = ArtworkEntity::find().count(app.connection()).await.unwrap();
    assert_eq!(rows, 0);
}

#[tokio::test]
async fn test_bulk_import_requires_existing_artist() {
    let app = setup_app_with_reference(bulk_reference()).await;

    let request = MultipartBuilder::new()
        .file("images", "5_sunrise.png", &small_png())
        .build("POST", "/v1/artwork/bulk");
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response_json(response).await["error"], 201);
    assert!(app.storage.is_empty());

    let request = MultipartBuilder::new().build("POST", "/v1/artwork/bulk");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response_json(response).await["error"], 102);
}

#[tokio::test]
async fn test_soft_deleted_artwork_keeps_its_id() {
    let app = setup_app_with_reference(bulk_reference()).await;
    insert_artist(&app, 5, None).await;

    let request = MultipartBuilder::new()
        .file("images", "5_sunrise.png", &small_png())
        .build("POST", "/v1/artwork/bulk");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let repo = gallery_backend::repository::artwork_repository::ArtworkRepository::new(
        app.connection().clone(),
    );
    assert!(repo.soft_delete(51).await.unwrap());

    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/v1/artwork"))
        .await
        .unwrap();
    assert_eq!(response_json(response).await["artworks"], json!([]));

    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/v1/artwork/51"))
        .await
        .unwrap();
    assert_eq!(response_json(response).await["error"], 202);

    // 論理削除済みでもIDは占有されたまま
    let request = MultipartBuilder::new()
        .file("images", "5_sunrise.png", &small_png())
        .build("POST", "/v1/artwork/bulk");
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response_json(response).await["error"], 100);
}
