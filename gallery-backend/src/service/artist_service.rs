// gallery-backend/src/service/artist_service.rs

use crate::db::DbPool;
use crate::domain::artist_model;
use crate::domain::reference_data::ReferenceData;
use crate::error::{AppError, AppResult};
use crate::repository::artist_repository::{
    ArtistRepository, ArtistWithArtworks, CreateArtist, UpdateArtist,
};
use crate::service::image_service::{ImageService, ProcessedImage};
use crate::service::storage_service::{prefix, storage_key, StorageService};
use crate::utils::batch::run_batch;
use crate::utils::error_helper::check_request_error;
use crate::utils::file_name::{
    generate_file_name, parse_artist_prefix, parse_rendered_artist_id, sanitize_file_name,
};
use crate::utils::image_processor::ImageTransform;
use crate::utils::multipart::UploadedFile;
use futures::future::try_join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

/// 作家の新規登録に必要な入力
#[derive(Debug)]
pub struct NewArtist {
    pub id: i32,
    pub artist_name: Option<String>,
    pub detail: Option<String>,
    pub rep_image: UploadedFile,
    pub landscape: UploadedFile,
    pub portrait: UploadedFile,
    pub profile: Option<UploadedFile>,
}

/// 作家の更新内容（指定された項目のみ）
#[derive(Debug, Default)]
pub struct ArtistChanges {
    pub artist_name: Option<String>,
    pub detail: Option<String>,
    pub rep_image: Option<UploadedFile>,
    pub landscape: Option<UploadedFile>,
    pub portrait: Option<UploadedFile>,
    pub profile: Option<UploadedFile>,
}

impl ArtistChanges {
    pub fn is_empty(&self) -> bool {
        self.artist_name.is_none()
            && self.detail.is_none()
            && self.rep_image.is_none()
            && self.landscape.is_none()
            && self.portrait.is_none()
            && self.profile.is_none()
    }
}

/// 切り出しプレビューの保存先
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropPreview {
    pub landscape: String,
    pub portrait: String,
}

pub struct ArtistService {
    artist_repo: Arc<ArtistRepository>,
    images: ImageService,
    reference: Arc<ReferenceData>,
    bulk_concurrency: usize,
}

impl ArtistService {
    pub fn new(
        db_pool: DbPool,
        storage: Arc<dyn StorageService>,
        reference: Arc<ReferenceData>,
        bulk_concurrency: usize,
    ) -> Self {
        Self {
            artist_repo: Arc::new(ArtistRepository::new(db_pool)),
            images: ImageService::new(storage),
            reference,
            bulk_concurrency,
        }
    }

    pub async fn list_with_artworks(&self) -> AppResult<Vec<ArtistWithArtworks>> {
        Ok(self.artist_repo.find_all_with_artworks().await?)
    }

    pub async fn get_with_artworks(&self, id: i32) -> AppResult<ArtistWithArtworks> {
        self.artist_repo
            .find_by_id_with_artworks(id)
            .await?
            .ok_or(AppError::NoSuchArtist(id))
    }

    pub async fn list(&self) -> AppResult<Vec<artist_model::Model>> {
        Ok(self.artist_repo.find_all().await?)
    }

    /// 画像を変換・保存してから作家を登録する
    pub async fn create_artist(&self, input: NewArtist) -> AppResult<artist_model::Model> {
        // 論理削除済みのIDも再利用しない
        if self.artist_repo.exists_including_deleted(input.id).await? {
            return Err(AppError::ArtistAlreadyExists(input.id));
        }

        let thumb_name = generate_file_name();
        let landscape_name = generate_file_name();
        let portrait_name = generate_file_name();
        let profile_name = input.profile.as_ref().map(|_| generate_file_name());

        let (thumb, landscape, portrait) = tokio::try_join!(
            self.images.prepare(
                prefix::THUMB,
                &thumb_name,
                input.rep_image.data,
                ImageTransform::thumbnail(),
            ),
            self.images.prepare(
                prefix::RENDERED,
                &landscape_name,
                input.landscape.data,
                ImageTransform::reencode(),
            ),
            self.images.prepare(
                prefix::RENDERED,
                &portrait_name,
                input.portrait.data,
                ImageTransform::reencode(),
            ),
        )?;
        let profile = match (input.profile, profile_name.as_deref()) {
            (Some(file), Some(name)) => Some(
                self.images
                    .prepare(prefix::PROFILE, name, file.data, ImageTransform::reencode())
                    .await?,
            ),
            _ => None,
        };

        let pending: Vec<&ProcessedImage> = [&thumb, &landscape, &portrait]
            .into_iter()
            .chain(profile.as_ref())
            .collect();
        try_join_all(pending.into_iter().map(|image| self.images.save(image))).await?;

        let artist = self
            .artist_repo
            .create(CreateArtist {
                id: input.id,
                artist_name: input.artist_name,
                detail: input.detail,
                thumb_file_name: Some(thumb_name),
                landscape_file_name: Some(landscape_name),
                portrait_file_name: Some(portrait_name),
                profile_file_name: profile_name,
            })
            .await?;

        info!(artist_id = artist.id, "Artist created");
        Ok(artist)
    }

    /// 指定された項目だけを更新する。既存のファイル名があれば上書き保存する
    pub async fn update_artist(
        &self,
        id: i32,
        changes: ArtistChanges,
    ) -> AppResult<artist_model::Model> {
        if changes.is_empty() {
            return Err(AppError::FileEmpty);
        }

        let artist = self
            .artist_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NoSuchArtist(id))?;

        let thumb = self
            .prepare_replacement(
                changes.rep_image,
                artist.thumb_file_name.as_deref(),
                prefix::THUMB,
                ImageTransform::thumbnail(),
            )
            .await?;
        let landscape = self
            .prepare_replacement(
                changes.landscape,
                artist.landscape_file_name.as_deref(),
                prefix::RENDERED,
                ImageTransform::reencode(),
            )
            .await?;
        let portrait = self
            .prepare_replacement(
                changes.portrait,
                artist.portrait_file_name.as_deref(),
                prefix::RENDERED,
                ImageTransform::reencode(),
            )
            .await?;
        let profile = self
            .prepare_replacement(
                changes.profile,
                artist.profile_file_name.as_deref(),
                prefix::PROFILE,
                ImageTransform::reencode(),
            )
            .await?;

        let pending = [&thumb, &landscape, &portrait, &profile]
            .into_iter()
            .flatten()
            .map(|(_, image)| self.images.save(image));
        try_join_all(pending).await?;

        let updated = self
            .artist_repo
            .update(
                id,
                UpdateArtist {
                    artist_name: changes.artist_name,
                    detail: changes.detail,
                    thumb_file_name: thumb.map(|(name, _)| name),
                    landscape_file_name: landscape.map(|(name, _)| name),
                    portrait_file_name: portrait.map(|(name, _)| name),
                    profile_file_name: profile.map(|(name, _)| name),
                },
            )
            .await?
            .ok_or(AppError::NoSuchArtist(id))?;

        info!(artist_id = id, "Artist updated");
        Ok(updated)
    }

    async fn prepare_replacement(
        &self,
        file: Option<UploadedFile>,
        existing_name: Option<&str>,
        key_prefix: &str,
        transform: ImageTransform,
    ) -> AppResult<Option<(String, ProcessedImage)>> {
        let Some(file) = file else {
            return Ok(None);
        };

        let file_name = existing_name
            .map(str::to_string)
            .unwrap_or_else(generate_file_name);
        let image = self
            .images
            .prepare(key_prefix, &file_name, file.data, transform)
            .await?;

        Ok(Some((file_name, image)))
    }

    pub async fn record_hit(&self, id: i32) -> AppResult<()> {
        if !self.artist_repo.increment_hit_count(id).await? {
            return Err(AppError::NoSuchArtist(id));
        }
        Ok(())
    }

    pub async fn record_see_more(&self, id: i32) -> AppResult<()> {
        if !self.artist_repo.increment_see_more_count(id).await? {
            return Err(AppError::NoSuchArtist(id));
        }
        Ok(())
    }

    /// `{artistId}_*.jpg` 形式の代表画像から作家を一括登録する
    ///
    /// 全ファイル名の解決と重複チェックを先に行い、問題があれば何も書き込まない。
    pub async fn bulk_create(&self, files: Vec<UploadedFile>) -> AppResult<Vec<artist_model::Model>> {
        if files.is_empty() {
            return Err(AppError::RepFileEmpty);
        }

        let mut seen = HashSet::new();
        let mut plans = Vec::with_capacity(files.len());
        for file in files {
            let id = parse_artist_prefix(&file.file_name)
                .ok_or_else(|| AppError::UnknownFileName(file.file_name.clone()))?;
            if !seen.insert(id) {
                return Err(AppError::ArtistAlreadyExists(id));
            }
            plans.push((id, file));
        }

        let ids: Vec<i32> = plans.iter().map(|(id, _)| *id).collect();
        let existing = self
            .artist_repo
            .find_existing_ids_including_deleted(&ids)
            .await?;
        if let Some(id) = existing.first() {
            return Err(AppError::ArtistAlreadyExists(*id));
        }

        let images = &self.images;
        let prepared = run_batch(plans, self.bulk_concurrency, |(id, file)| async move {
            let file_name = generate_file_name();
            let image = images
                .prepare(
                    prefix::THUMB,
                    &file_name,
                    file.data,
                    ImageTransform::bulk_thumbnail(),
                )
                .await?;
            Ok::<_, AppError>((id, file_name, image))
        })
        .await?;

        run_batch(0..prepared.len(), self.bulk_concurrency, |i| {
            images.save(&prepared[i].2)
        })
        .await?;

        for (id, file_name, _) in prepared {
            let roster = self.reference.artist(id);
            self.artist_repo
                .create(CreateArtist {
                    id,
                    artist_name: roster.map(|r| r.artist_name.clone()),
                    detail: roster.and_then(|r| r.detail.clone()),
                    thumb_file_name: Some(file_name),
                    ..Default::default()
                })
                .await?;
        }

        info!(count = ids.len(), "Artists created in bulk");
        self.list().await
    }

    /// レンダリング画像から切り出しプレビューを `tmp/` 以下に保存する
    pub async fn crop_preview(&self, file: UploadedFile) -> AppResult<CropPreview> {
        let file_name = sanitize_file_name(&file.file_name);
        if file_name.is_empty() {
            return Err(check_request_error("original", "invalid file name"));
        }

        let crops = self.images.prepare_crops(file.data).await?;
        let landscape = ProcessedImage {
            key: storage_key(prefix::TMP_LAND, &file_name),
            data: crops.landscape,
        };
        let portrait = ProcessedImage {
            key: storage_key(prefix::TMP_PORT, &file_name),
            data: crops.portrait,
        };

        let (landscape, portrait) =
            tokio::try_join!(self.images.save(&landscape), self.images.save(&portrait))?;

        Ok(CropPreview {
            landscape,
            portrait,
        })
    }

    /// `{artistId}.png` 形式のレンダリング画像を切り出して作家に設定する
    pub async fn bulk_crop_rendered(
        &self,
        files: Vec<UploadedFile>,
    ) -> AppResult<Vec<artist_model::Model>> {
        if files.is_empty() {
            return Err(AppError::RenderedFileEmpty);
        }

        let mut plans = Vec::with_capacity(files.len());
        for file in files {
            let id = parse_rendered_artist_id(&file.file_name)
                .ok_or_else(|| AppError::UnknownFileName(file.file_name.clone()))?;
            plans.push((id, file));
        }

        let ids: Vec<i32> = plans.iter().map(|(id, _)| *id).collect();
        let found: HashSet<i32> = self
            .artist_repo
            .find_active_by_ids(&ids)
            .await?
            .into_iter()
            .map(|artist| artist.id)
            .collect();
        if let Some(missing) = ids.iter().find(|id| !found.contains(id)) {
            return Err(AppError::NoSuchArtist(*missing));
        }

        let images = &self.images;
        let prepared = run_batch(plans, self.bulk_concurrency, |(id, file)| async move {
            let crops = images.prepare_crops(file.data).await?;
            let landscape_name = generate_file_name();
            let portrait_name = generate_file_name();
            let landscape = ProcessedImage {
                key: storage_key(prefix::RENDERED, &landscape_name),
                data: crops.landscape,
            };
            let portrait = ProcessedImage {
                key: storage_key(prefix::RENDERED, &portrait_name),
                data: crops.portrait,
            };
            Ok::<_, AppError>((id, landscape_name, portrait_name, [landscape, portrait]))
        })
        .await?;

        let pending: Vec<&ProcessedImage> = prepared
            .iter()
            .flat_map(|(_, _, _, crops)| crops.iter())
            .collect();
        run_batch(0..pending.len(), self.bulk_concurrency, |i| images.save(pending[i])).await?;

        for (id, landscape_name, portrait_name, _) in prepared {
            self.artist_repo
                .update(
                    id,
                    UpdateArtist {
                        landscape_file_name: Some(landscape_name),
                        portrait_file_name: Some(portrait_name),
                        ..Default::default()
                    },
                )
                .await?
                .ok_or(AppError::NoSuchArtist(id))?;
        }

        info!(count = ids.len(), "Rendered images cropped in bulk");
        self.list().await
    }
}
