// gallery-backend/src/service/signature_service.rs

use crate::db::DbPool;
use crate::domain::signature_model;
use crate::error::{AppError, AppResult};
use crate::repository::signature_repository::{CreateSignature, SignatureRepository};
use crate::service::image_service::ImageService;
use crate::service::storage_service::{prefix, StorageService};
use crate::utils::file_name::generate_file_name_with_extension;
use crate::utils::multipart::UploadedFile;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{info, warn};

/// 署名の登録内容
#[derive(Debug)]
pub struct NewSignature {
    pub user_id: String,
    pub name: Option<String>,
    pub content: Option<String>,
    pub file: Option<UploadedFile>,
}

pub struct SignatureService {
    signature_repo: Arc<SignatureRepository>,
    images: ImageService,
    admin_secret: String,
}

impl SignatureService {
    pub fn new(db_pool: DbPool, storage: Arc<dyn StorageService>, admin_secret: String) -> Self {
        Self {
            signature_repo: Arc::new(SignatureRepository::new(db_pool)),
            images: ImageService::new(storage),
            admin_secret,
        }
    }

    /// 管理者パスワードを確認して全署名を返す
    pub async fn list(&self, password: Option<&str>) -> AppResult<Vec<signature_model::Model>> {
        if !self.verify_password(password.unwrap_or_default()) {
            warn!("Signature listing rejected: wrong password");
            return Err(AppError::PasswordWrong);
        }
        Ok(self.signature_repo.find_all().await?)
    }

    /// 署名画像はそのまま保存する（拡張子は画像形式から決める）
    pub async fn create(&self, input: NewSignature) -> AppResult<signature_model::Model> {
        let file_name = match input.file {
            Some(file) => {
                let extension = raster_extension(&file.content_type).ok_or_else(|| {
                    AppError::UploadRejected(format!(
                        "Signature must be a PNG, JPEG, GIF or WebP image: {}",
                        file.content_type
                    ))
                })?;
                let file_name = generate_file_name_with_extension(extension);
                self.images
                    .store_raw(prefix::SIGNATURES, &file_name, &file.data, &file.content_type)
                    .await?;
                Some(file_name)
            }
            None => None,
        };

        let signature = self
            .signature_repo
            .create(CreateSignature {
                user_id: input.user_id,
                file_name,
                name: input.name,
                content: input.content,
            })
            .await?;

        info!(signature_id = signature.id, "Signature created");
        Ok(signature)
    }

    pub async fn count(&self) -> AppResult<u64> {
        Ok(self.signature_repo.count().await?)
    }

    // 長さの異なる入力もダイジェストで比較する
    fn verify_password(&self, password: &str) -> bool {
        !self.admin_secret.is_empty()
            && Sha256::digest(password.as_bytes()) == Sha256::digest(self.admin_secret.as_bytes())
    }
}

/// 保存を許可するラスター画像形式と拡張子
fn raster_extension(content_type: &str) -> Option<&'static str> {
    let mime = content_type.parse::<mime::Mime>().ok()?;
    if mime.type_() != mime::IMAGE {
        return None;
    }
    match mime.subtype().as_str() {
        "png" => Some("png"),
        "jpeg" | "jpg" | "pjpeg" => Some("jpg"),
        "gif" => Some("gif"),
        "webp" => Some("webp"),
        _ => None,
    }
}
