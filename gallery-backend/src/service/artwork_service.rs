// gallery-backend/src/service/artwork_service.rs

use crate::db::DbPool;
use crate::domain::artist_model;
use crate::domain::artwork_model;
use crate::domain::reference_data::ReferenceData;
use crate::error::{AppError, AppResult};
use crate::repository::artist_repository::ArtistRepository;
use crate::repository::artwork_repository::{ArtworkRepository, CreateArtwork, UpdateArtwork};
use crate::service::image_service::ImageService;
use crate::service::storage_service::{prefix, StorageService};
use crate::utils::batch::run_batch;
use crate::utils::error_helper::check_request_error;
use crate::utils::file_name::{file_stem, generate_file_name, parse_artist_prefix};
use crate::utils::image_processor::ImageTransform;
use crate::utils::multipart::UploadedFile;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::info;

/// 作品の新規登録に必要な入力
#[derive(Debug)]
pub struct NewArtwork {
    pub id: Option<i32>,
    pub artist_id: i32,
    pub title: String,
    pub size: String,
    pub material: String,
    pub image: UploadedFile,
}

/// 一括登録で1ファイルから解決した内容
#[derive(Debug)]
struct BulkArtworkPlan {
    artwork_id: i32,
    artist_id: i32,
    title: String,
    size: String,
    material: String,
    file: UploadedFile,
}

pub struct ArtworkService {
    artwork_repo: Arc<ArtworkRepository>,
    artist_repo: Arc<ArtistRepository>,
    images: ImageService,
    reference: Arc<ReferenceData>,
    bulk_concurrency: usize,
}

impl ArtworkService {
    pub fn new(
        db_pool: DbPool,
        storage: Arc<dyn StorageService>,
        reference: Arc<ReferenceData>,
        bulk_concurrency: usize,
    ) -> Self {
        Self {
            artwork_repo: Arc::new(ArtworkRepository::new(db_pool.clone())),
            artist_repo: Arc::new(ArtistRepository::new(db_pool)),
            images: ImageService::new(storage),
            reference,
            bulk_concurrency,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<artwork_model::Model>> {
        Ok(self.artwork_repo.find_all().await?)
    }

    pub async fn get(&self, id: i32) -> AppResult<artwork_model::Model> {
        self.artwork_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NoSuchArtwork(id))
    }

    /// 作家の存在を確認し、画像を保存してから作品を登録する
    pub async fn create_artwork(&self, input: NewArtwork) -> AppResult<artwork_model::Model> {
        let artist = self
            .artist_repo
            .find_by_id(input.artist_id)
            .await?
            .ok_or(AppError::NoSuchArtist(input.artist_id))?;

        let file_name = generate_file_name();
        self.images
            .store(
                prefix::ARTWORKS,
                &file_name,
                input.image.data,
                ImageTransform::reencode(),
            )
            .await?;

        let artwork = self
            .artwork_repo
            .create(CreateArtwork {
                id: input.id,
                file_name: Some(file_name),
                artist_id: artist.id,
                artist_name: self.artist_name_of(&artist),
                title: input.title,
                size: input.size,
                material: input.material,
            })
            .await?;

        if input.id.is_some() {
            self.artwork_repo.sync_id_sequence().await?;
        }

        info!(artwork_id = artwork.id, artist_id = artwork.artist_id, "Artwork created");
        Ok(artwork)
    }

    pub async fn update_artwork(
        &self,
        id: i32,
        changes: UpdateArtwork,
    ) -> AppResult<artwork_model::Model> {
        self.artwork_repo
            .update(id, changes)
            .await?
            .ok_or(AppError::NoSuchArtwork(id))
    }

    /// `{artistId}_{name}.jpg` 形式の作品画像を一括登録する
    ///
    /// 作品IDは参照データのファイル名対応表から、題名・サイズ・素材は作品名簿から決まる。
    /// 1件でも解決できなければ何も書き込まずに失敗する。
    pub async fn bulk_import(&self, files: Vec<UploadedFile>) -> AppResult<Vec<artwork_model::Model>> {
        if files.is_empty() {
            return Err(AppError::FileEmpty);
        }

        let mut plans = Vec::with_capacity(files.len());
        for file in files {
            plans.push(resolve_bulk_file(&self.reference, file)?);
        }

        let mut seen = HashSet::new();
        if let Some(plan) = plans.iter().find(|plan| !seen.insert(plan.artwork_id)) {
            return Err(check_request_error(
                "images",
                &format!("artwork {} appears more than once", plan.artwork_id),
            ));
        }

        let artwork_ids: Vec<i32> = plans.iter().map(|plan| plan.artwork_id).collect();
        let taken = self
            .artwork_repo
            .find_existing_ids_including_deleted(&artwork_ids)
            .await?;
        if let Some(id) = taken.first() {
            return Err(check_request_error(
                "images",
                &format!("artwork {} already exists", id),
            ));
        }

        let artist_ids: Vec<i32> = plans
            .iter()
            .map(|plan| plan.artist_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let artists: HashMap<i32, artist_model::Model> = self
            .artist_repo
            .find_active_by_ids(&artist_ids)
            .await?
            .into_iter()
            .map(|artist| (artist.id, artist))
            .collect();
        if let Some(plan) = plans.iter().find(|plan| !artists.contains_key(&plan.artist_id)) {
            return Err(AppError::NoSuchArtist(plan.artist_id));
        }

        let images = &self.images;
        let prepared = run_batch(plans, self.bulk_concurrency, |mut plan| async move {
            let file_name = generate_file_name();
            let data = std::mem::take(&mut plan.file.data);
            let image = images
                .prepare(
                    prefix::ARTWORKS,
                    &file_name,
                    data,
                    ImageTransform::bulk_artwork(),
                )
                .await?;
            Ok::<_, AppError>((plan, file_name, image))
        })
        .await?;

        run_batch(0..prepared.len(), self.bulk_concurrency, |i| {
            images.save(&prepared[i].2)
        })
        .await?;

        let count = prepared.len();
        for (plan, file_name, _) in prepared {
            let artist_name = artists
                .get(&plan.artist_id)
                .map(|artist| self.artist_name_of(artist))
                .unwrap_or_default();
            self.artwork_repo
                .create(CreateArtwork {
                    id: Some(plan.artwork_id),
                    file_name: Some(file_name),
                    artist_id: plan.artist_id,
                    artist_name,
                    title: plan.title,
                    size: plan.size,
                    material: plan.material,
                })
                .await?;
        }
        self.artwork_repo.sync_id_sequence().await?;

        info!(count, "Artworks imported in bulk");
        self.list().await
    }

    /// 作家名（未設定なら作家名簿から補う）
    fn artist_name_of(&self, artist: &artist_model::Model) -> String {
        artist
            .artist_name
            .clone()
            .or_else(|| {
                self.reference
                    .artist(artist.id)
                    .map(|roster| roster.artist_name.clone())
            })
            .unwrap_or_default()
    }
}

/// ファイル名から作家・作品と名簿の内容を解決する
///
/// ファイル名の作家IDと対応表の作家IDが食い違う場合はリクエスト不備とする。
fn resolve_bulk_file(reference: &ReferenceData, file: UploadedFile) -> AppResult<BulkArtworkPlan> {
    let unknown = || AppError::UnknownFileName(file.file_name.clone());

    let artist_id = parse_artist_prefix(&file.file_name).ok_or_else(unknown)?;
    let entry = reference
        .file_name_entry(file_stem(&file.file_name))
        .ok_or_else(unknown)?;
    if entry.artist_id != artist_id {
        return Err(check_request_error(
            "images",
            &format!(
                "{} belongs to artist {} in the file name table",
                file.file_name, entry.artist_id
            ),
        ));
    }
    let roster = reference.artwork(entry.artwork_id).ok_or_else(unknown)?;

    Ok(BulkArtworkPlan {
        artwork_id: entry.artwork_id,
        artist_id,
        title: roster.title.clone(),
        size: roster.size.clone(),
        material: roster.material.clone(),
        file,
    })
}
