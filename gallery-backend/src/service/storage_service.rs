// gallery-backend/src/service/storage_service.rs

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::utils::error_helper::ErrorHelperExt;

/// 保存先キーのプレフィックス
pub mod prefix {
    pub const THUMB: &str = "thumb";
    pub const RENDERED: &str = "rendered";
    pub const ARTWORKS: &str = "artworks";
    pub const PROFILE: &str = "profile";
    pub const SIGNATURES: &str = "signatures";
    pub const TMP_LAND: &str = "tmp/land";
    pub const TMP_PORT: &str = "tmp/port";
}

/// `thumb` + `abc.jpg` → `thumb/abc.jpg`
pub fn storage_key(prefix: &str, file_name: &str) -> String {
    format!("{}/{}", prefix, file_name)
}

/// ストレージの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Local,
    S3,
}

impl StorageBackend {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "local" | "filesystem" => Some(Self::Local),
            "s3" => Some(Self::S3),
            _ => None,
        }
    }
}

/// ストレージ設定
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// ローカル保存時のルート（静的配信のルートも兼ねる）
    pub public_dir: PathBuf,
    pub bucket: Option<String>,
    pub region: String,
}

/// ストレージサービスのトレイト定義
#[async_trait]
pub trait StorageService: Send + Sync {
    /// ファイルを保存して保存先キーを返す
    async fn store(&self, key: &str, data: &[u8], content_type: &str) -> AppResult<String>;

    /// ファイルを取得
    async fn retrieve(&self, key: &str) -> AppResult<Vec<u8>>;
}

/// ローカルファイルシステムへの保存
pub struct LocalStorageService {
    root: PathBuf,
}

impl LocalStorageService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn key_to_path(&self, key: &str) -> AppResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl StorageService for LocalStorageService {
    async fn store(&self, key: &str, data: &[u8], _content_type: &str) -> AppResult<String> {
        let path = self.key_to_path(key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_storage_error("local_storage::store", key)?;
        }
        fs::write(&path, data)
            .await
            .map_storage_error("local_storage::store", key)?;

        debug!(key = %key, size = data.len(), "Stored file on local filesystem");
        Ok(key.to_string())
    }

    async fn retrieve(&self, key: &str) -> AppResult<Vec<u8>> {
        let path = self.key_to_path(key)?;
        fs::read(&path)
            .await
            .map_storage_error("local_storage::retrieve", key)
    }
}

/// S3への保存（公開読み取り）
pub struct S3StorageService {
    client: Client,
    bucket: String,
}

impl S3StorageService {
    /// 認証情報はAWSのデフォルトチェーンから取得する
    pub async fn new(bucket: String, region: String) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region))
            .load()
            .await;

        Self {
            client: Client::new(&sdk_config),
            bucket,
        }
    }
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn store(&self, key: &str, data: &[u8], content_type: &str) -> AppResult<String> {
        validate_key(key)?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .acl(ObjectCannedAcl::PublicRead)
            .body(ByteStream::from(data.to_vec()))
            .content_type(content_type)
            .send()
            .await
            .map_storage_error("s3_storage::store", key)?;

        debug!(bucket = %self.bucket, key = %key, size = data.len(), "Stored object in S3");
        Ok(key.to_string())
    }

    async fn retrieve(&self, key: &str) -> AppResult<Vec<u8>> {
        validate_key(key)?;

        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_storage_error("s3_storage::retrieve", key)?;

        let data = response
            .body
            .collect()
            .await
            .map_storage_error("s3_storage::retrieve", key)?;

        Ok(data.into_bytes().to_vec())
    }
}

/// 相対パスのみ許可（`..` や絶対パスは拒否）
fn validate_key(key: &str) -> AppResult<()> {
    let valid = !key.is_empty()
        && Path::new(key)
            .components()
            .all(|c| matches!(c, Component::Normal(_)));

    if valid {
        Ok(())
    } else {
        Err(AppError::Storage(format!("Invalid storage key: {}", key)))
    }
}

/// ストレージサービスのファクトリ関数
pub async fn create_storage_service(config: &StorageConfig) -> AppResult<Arc<dyn StorageService>> {
    match config.backend {
        StorageBackend::Local => {
            info!(root = %config.public_dir.display(), "Using local storage");
            Ok(Arc::new(LocalStorageService::new(config.public_dir.clone())))
        }
        StorageBackend::S3 => {
            let bucket = config.bucket.clone().ok_or_else(|| {
                AppError::InternalServerError("AWS_BUCKET is not configured".to_string())
            })?;
            info!(bucket = %bucket, region = %config.region, "Using S3 storage");
            Ok(Arc::new(
                S3StorageService::new(bucket, config.region.clone()).await,
            ))
        }
    }
}
