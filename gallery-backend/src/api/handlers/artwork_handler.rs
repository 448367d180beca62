// gallery-backend/src/api/handlers/artwork_handler.rs

use crate::api::dto::artwork_dto::{
    ArtworkBody, ArtworkFields, ArtworksBody, UpdateArtworkRequest,
};
use crate::api::AppState;
use crate::error::{AppError, AppResult};
use crate::service::artwork_service::NewArtwork;
use crate::types::ApiResponse;
use crate::utils::error_helper::{
    check_request_error, json_rejection_error, multipart_rejection_error, path_rejection_error,
};
use crate::utils::multipart::{
    body_limit, FileFieldRule, MultipartForm, UploadLimits, MAX_BULK_FILES,
};
use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{JsonRejection, PathRejection},
        DefaultBodyLimit, Multipart, Path, State,
    },
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

const IMAGE_FILES: &[FileFieldRule] = &[FileFieldRule::single("image")];
const IMAGES_FILES: &[FileFieldRule] = &[FileFieldRule::many("images")];

fn limits(app_state: &AppState, files: &'static [FileFieldRule]) -> UploadLimits {
    UploadLimits {
        files,
        max_file_size: app_state.config.server.max_upload_size,
    }
}

fn required_text(form: &MultipartForm, name: &str) -> AppResult<String> {
    form.text(name)
        .ok_or_else(|| check_request_error(name, "is required"))
}

/// 作品一覧
pub async fn list_artworks_handler(
    State(app_state): State<AppState>,
) -> AppResult<ApiResponse<ArtworksBody>> {
    let artworks = app_state.artwork_service.list().await?;
    Ok(ApiResponse::success(ArtworksBody::from_models(artworks)))
}

/// 作品詳細
pub async fn get_artwork_handler(
    State(app_state): State<AppState>,
    artwork_id: Result<Path<i32>, PathRejection>,
) -> AppResult<ApiResponse<ArtworkBody>> {
    let Path(artwork_id) = artwork_id.map_err(path_rejection_error)?;
    let artwork = app_state.artwork_service.get(artwork_id).await?;
    Ok(ApiResponse::success(ArtworkBody {
        artwork: artwork.into(),
    }))
}

/// 作品登録
pub async fn create_artwork_handler(
    State(app_state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<ApiResponse<ArtworkBody>> {
    let multipart = multipart.map_err(multipart_rejection_error)?;
    let mut form = MultipartForm::read(multipart, &limits(&app_state, IMAGE_FILES)).await?;

    let image = form.take_file("image").ok_or(AppError::FileEmpty)?;
    let artist_id = form
        .integer("artistId")?
        .ok_or_else(|| check_request_error("artistId", "is required"))?;
    let fields = ArtworkFields {
        title: required_text(&form, "title")?,
        size: required_text(&form, "size")?,
        material: required_text(&form, "material")?,
    };
    fields.validate()?;

    let input = NewArtwork {
        id: form.integer("artworkId")?,
        artist_id,
        title: fields.title,
        size: fields.size,
        material: fields.material,
        image,
    };

    let artwork = app_state.artwork_service.create_artwork(input).await?;

    Ok(ApiResponse::success(ArtworkBody {
        artwork: artwork.into(),
    }))
}

/// 作品の題名・サイズ・素材の更新
pub async fn update_artwork_handler(
    State(app_state): State<AppState>,
    artwork_id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateArtworkRequest>, JsonRejection>,
) -> AppResult<ApiResponse<ArtworkBody>> {
    let Path(artwork_id) = artwork_id.map_err(path_rejection_error)?;
    let Json(payload) = payload.map_err(json_rejection_error)?;

    payload.validate()?;
    if payload.is_empty() {
        return Err(check_request_error("body", "nothing to update"));
    }

    let artwork = app_state
        .artwork_service
        .update_artwork(artwork_id, payload.into())
        .await?;

    Ok(ApiResponse::success(ArtworkBody {
        artwork: artwork.into(),
    }))
}

/// 作品画像の一括登録
pub async fn bulk_import_artworks_handler(
    State(app_state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<ApiResponse<ArtworksBody>> {
    let multipart = multipart.map_err(multipart_rejection_error)?;
    let mut form = MultipartForm::read(multipart, &limits(&app_state, IMAGES_FILES)).await?;

    let artworks = app_state
        .artwork_service
        .bulk_import(form.take_files("images"))
        .await?;

    Ok(ApiResponse::success(ArtworksBody::from_models(artworks)))
}

pub fn artwork_router(app_state: AppState) -> Router {
    let max_file_size = app_state.config.server.max_upload_size;

    Router::new()
        .route(
            "/v1/artwork",
            get(list_artworks_handler)
                .post(create_artwork_handler)
                .layer(DefaultBodyLimit::max(body_limit(max_file_size, 1))),
        )
        .route(
            "/v1/artwork/{artwork_id}",
            get(get_artwork_handler).patch(update_artwork_handler),
        )
        .route(
            "/v1/artwork/bulk",
            post(bulk_import_artworks_handler)
                .layer(DefaultBodyLimit::max(body_limit(max_file_size, MAX_BULK_FILES))),
        )
        .with_state(app_state)
}
