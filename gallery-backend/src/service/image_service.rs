// gallery-backend/src/service/image_service.rs

use crate::error::AppResult;
use crate::service::storage_service::{storage_key, StorageService};
use crate::utils::image_processor::{
    crop_rendered_blocking, transform_blocking, ImageTransform, RenderedCrops,
};
use std::sync::Arc;
use tracing::debug;

/// 変換済みのJPEG
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub key: String,
    pub data: Vec<u8>,
}

/// 画像変換とストレージ保存をまとめたサービス
#[derive(Clone)]
pub struct ImageService {
    storage: Arc<dyn StorageService>,
}

impl ImageService {
    pub fn new(storage: Arc<dyn StorageService>) -> Self {
        Self { storage }
    }

    /// 変換のみ行い、保存先キーと一緒に返す（まだ保存しない）
    pub async fn prepare(
        &self,
        prefix: &str,
        file_name: &str,
        data: Vec<u8>,
        transform: ImageTransform,
    ) -> AppResult<ProcessedImage> {
        let data = transform_blocking(data, transform).await?;
        Ok(ProcessedImage {
            key: storage_key(prefix, file_name),
            data,
        })
    }

    /// 横長・縦長の切り出しを行う（まだ保存しない）
    pub async fn prepare_crops(&self, data: Vec<u8>) -> AppResult<RenderedCrops> {
        crop_rendered_blocking(data).await
    }

    /// 変換済みJPEGを保存
    pub async fn save(&self, image: &ProcessedImage) -> AppResult<String> {
        let key = self
            .storage
            .store(&image.key, &image.data, mime::IMAGE_JPEG.as_ref())
            .await?;
        debug!(key = %key, size = image.data.len(), "Image stored");
        Ok(key)
    }

    /// 変換して保存
    pub async fn store(
        &self,
        prefix: &str,
        file_name: &str,
        data: Vec<u8>,
        transform: ImageTransform,
    ) -> AppResult<String> {
        let image = self.prepare(prefix, file_name, data, transform).await?;
        self.save(&image).await
    }

    /// 変換せずにそのまま保存
    pub async fn store_raw(
        &self,
        prefix: &str,
        file_name: &str,
        data: &[u8],
        content_type: &str,
    ) -> AppResult<String> {
        self.storage
            .store(&storage_key(prefix, file_name), data, content_type)
            .await
    }
}
