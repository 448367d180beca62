// gallery-backend/src/api/dto/signature_dto.rs

use crate::domain::signature_model::Model as Signature;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 署名一覧の取得クエリ
#[derive(Debug, Deserialize)]
pub struct SignatureListQuery {
    pub password: Option<String>,
}

/// 署名フォームのテキスト項目
#[derive(Debug, Clone, Validate)]
pub struct SignatureFields {
    #[validate(length(max = 255, message = "User ID cannot exceed 255 characters"))]
    pub user_id: String,

    #[validate(length(min = 2, max = 30, message = "Name must be 2-30 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 500, message = "Content cannot exceed 500 characters"))]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureDto {
    pub id: i32,
    pub user_id: String,
    pub file_name: Option<String>,
    pub name: Option<String>,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Signature> for SignatureDto {
    fn from(signature: Signature) -> Self {
        Self {
            id: signature.id,
            user_id: signature.user_id,
            file_name: signature.file_name,
            name: signature.name,
            content: signature.content,
            created_at: signature.created_at,
            updated_at: signature.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SignatureBody {
    pub signature: SignatureDto,
}

#[derive(Debug, Serialize)]
pub struct SignaturesBody {
    pub signatures: Vec<SignatureDto>,
}
