// gallery-backend/src/api/handlers/artist_handler.rs

use crate::api::dto::artist_dto::{ArtistBody, ArtistFields, ArtistsBody, CropBody};
use crate::api::AppState;
use crate::error::{AppError, AppResult};
use crate::service::artist_service::{ArtistChanges, NewArtist};
use crate::types::{ApiResponse, EmptyBody};
use crate::utils::error_helper::{
    check_request_error, multipart_rejection_error, path_rejection_error,
};
use crate::utils::multipart::{
    body_limit, FileFieldRule, MultipartForm, UploadLimits, MAX_BULK_FILES,
};
use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::PathRejection,
        DefaultBodyLimit, Multipart, Path, State,
    },
    routing::{get, post, put},
    Router,
};
use validator::Validate;

const ARTIST_ID: &str = "artistId";
const ARTIST_NAME: &str = "artistName";
const DETAIL: &str = "detail";
const REP_IMAGE: &str = "repImage";
const LANDSCAPE: &str = "landscape";
const PORTRAIT: &str = "portrait";
const PROFILE: &str = "profile";

const ARTIST_FILES: &[FileFieldRule] = &[
    FileFieldRule::single(REP_IMAGE),
    FileFieldRule::single(LANDSCAPE),
    FileFieldRule::single(PORTRAIT),
    FileFieldRule::single(PROFILE),
];
const REP_IMAGES_FILES: &[FileFieldRule] = &[FileFieldRule::many("repImages")];
const ORIGINAL_FILES: &[FileFieldRule] = &[FileFieldRule::single("original")];
const RENDERED_FILES: &[FileFieldRule] = &[FileFieldRule::many("renderedImages")];

fn limits(app_state: &AppState, files: &'static [FileFieldRule]) -> UploadLimits {
    UploadLimits {
        files,
        max_file_size: app_state.config.server.max_upload_size,
    }
}

fn artist_id_field(form: &MultipartForm) -> AppResult<i32> {
    form.integer(ARTIST_ID)?
        .ok_or_else(|| check_request_error(ARTIST_ID, "is required"))
}

fn artist_fields(form: &MultipartForm) -> AppResult<ArtistFields> {
    let fields = ArtistFields {
        artist_name: form.text(ARTIST_NAME),
        detail: form.text(DETAIL),
    };
    fields.validate()?;
    Ok(fields)
}

/// 作家一覧（作品付き）
pub async fn list_artists_handler(
    State(app_state): State<AppState>,
) -> AppResult<ApiResponse<ArtistsBody>> {
    let artists = app_state.artist_service.list_with_artworks().await?;
    Ok(ApiResponse::success(ArtistsBody::from_models(artists)))
}

/// 作家詳細（作品付き）
pub async fn get_artist_handler(
    State(app_state): State<AppState>,
    artist_id: Result<Path<i32>, PathRejection>,
) -> AppResult<ApiResponse<ArtistBody>> {
    let Path(artist_id) = artist_id.map_err(path_rejection_error)?;
    let artist = app_state.artist_service.get_with_artworks(artist_id).await?;
    Ok(ApiResponse::success(ArtistBody {
        artist: artist.into(),
    }))
}

/// 作家登録
pub async fn create_artist_handler(
    State(app_state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<ApiResponse<ArtistBody>> {
    let multipart = multipart.map_err(multipart_rejection_error)?;
    let mut form = MultipartForm::read(multipart, &limits(&app_state, ARTIST_FILES)).await?;

    let id = artist_id_field(&form)?;
    let fields = artist_fields(&form)?;
    let rep_image = form.take_file(REP_IMAGE).ok_or(AppError::RepFileEmpty)?;
    let (Some(landscape), Some(portrait)) = (form.take_file(LANDSCAPE), form.take_file(PORTRAIT))
    else {
        return Err(AppError::RenderedFileEmpty);
    };

    let artist = app_state
        .artist_service
        .create_artist(NewArtist {
            id,
            artist_name: fields.artist_name,
            detail: fields.detail,
            rep_image,
            landscape,
            portrait,
            profile: form.take_file(PROFILE),
        })
        .await?;

    Ok(ApiResponse::success(ArtistBody {
        artist: artist.into(),
    }))
}

/// 作家更新（指定された項目・画像のみ）
pub async fn update_artist_handler(
    State(app_state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<ApiResponse<ArtistBody>> {
    let multipart = multipart.map_err(multipart_rejection_error)?;
    let mut form = MultipartForm::read(multipart, &limits(&app_state, ARTIST_FILES)).await?;

    let id = artist_id_field(&form)?;
    let fields = artist_fields(&form)?;
    let changes = ArtistChanges {
        artist_name: fields.artist_name,
        detail: fields.detail,
        rep_image: form.take_file(REP_IMAGE),
        landscape: form.take_file(LANDSCAPE),
        portrait: form.take_file(PORTRAIT),
        profile: form.take_file(PROFILE),
    };

    let artist = app_state.artist_service.update_artist(id, changes).await?;

    Ok(ApiResponse::success(ArtistBody {
        artist: artist.into(),
    }))
}

/// 閲覧数の加算
pub async fn record_hit_handler(
    State(app_state): State<AppState>,
    artist_id: Result<Path<i32>, PathRejection>,
) -> AppResult<ApiResponse<EmptyBody>> {
    let Path(artist_id) = artist_id.map_err(path_rejection_error)?;
    app_state.artist_service.record_hit(artist_id).await?;
    Ok(ApiResponse::ok())
}

/// 「もっと見る」の加算
pub async fn record_see_more_handler(
    State(app_state): State<AppState>,
    artist_id: Result<Path<i32>, PathRejection>,
) -> AppResult<ApiResponse<EmptyBody>> {
    let Path(artist_id) = artist_id.map_err(path_rejection_error)?;
    app_state.artist_service.record_see_more(artist_id).await?;
    Ok(ApiResponse::ok())
}

/// 代表画像からの一括登録
pub async fn bulk_create_artists_handler(
    State(app_state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<ApiResponse<ArtistsBody>> {
    let multipart = multipart.map_err(multipart_rejection_error)?;
    let mut form = MultipartForm::read(multipart, &limits(&app_state, REP_IMAGES_FILES)).await?;

    let artists = app_state
        .artist_service
        .bulk_create(form.take_files("repImages"))
        .await?;

    Ok(ApiResponse::success(ArtistsBody::from_models(artists)))
}

/// レンダリング画像の切り出しプレビュー
pub async fn crop_preview_handler(
    State(app_state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<ApiResponse<CropBody>> {
    let multipart = multipart.map_err(multipart_rejection_error)?;
    let mut form = MultipartForm::read(multipart, &limits(&app_state, ORIGINAL_FILES)).await?;

    let original = form.take_file("original").ok_or(AppError::FileEmpty)?;
    let preview = app_state.artist_service.crop_preview(original).await?;

    Ok(ApiResponse::success(preview.into()))
}

/// レンダリング画像の一括切り出し
pub async fn bulk_crop_handler(
    State(app_state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<ApiResponse<ArtistsBody>> {
    let multipart = multipart.map_err(multipart_rejection_error)?;
    let mut form = MultipartForm::read(multipart, &limits(&app_state, RENDERED_FILES)).await?;

    let artists = app_state
        .artist_service
        .bulk_crop_rendered(form.take_files("renderedImages"))
        .await?;

    Ok(ApiResponse::success(ArtistsBody::from_models(artists)))
}

pub fn artist_router(app_state: AppState) -> Router {
    let max_file_size = app_state.config.server.max_upload_size;
    let single_limit = DefaultBodyLimit::max(body_limit(max_file_size, ARTIST_FILES.len()));
    let bulk_limit = DefaultBodyLimit::max(body_limit(max_file_size, MAX_BULK_FILES));

    Router::new()
        .route(
            "/v1/artist",
            get(list_artists_handler)
                .post(create_artist_handler)
                .put(update_artist_handler)
                .layer(single_limit),
        )
        .route("/v1/artist/{artist_id}", get(get_artist_handler))
        .route("/v1/artist/hit/{artist_id}", post(record_hit_handler))
        .route("/v1/artist/seemore/{artist_id}", post(record_see_more_handler))
        .route(
            "/v1/artist/bulk",
            post(bulk_create_artists_handler).layer(bulk_limit),
        )
        .route(
            "/v1/artist/crop",
            post(crop_preview_handler).layer(DefaultBodyLimit::max(body_limit(max_file_size, 1))),
        )
        .route(
            "/v1/artist/crop/bulk",
            put(bulk_crop_handler).layer(bulk_limit),
        )
        .with_state(app_state)
}
