// gallery-backend/src/api/dto/artwork_dto.rs

use crate::domain::artwork_model::Model as Artwork;
use crate::repository::artwork_repository::UpdateArtwork;
use crate::utils::validation::validate_not_blank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 作品（論理削除日時は含めない）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkDto {
    pub id: i32,
    pub file_name: Option<String>,
    pub artist_id: i32,
    pub artist_name: String,
    pub title: String,
    pub size: String,
    pub material: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Artwork> for ArtworkDto {
    fn from(artwork: Artwork) -> Self {
        Self {
            id: artwork.id,
            file_name: artwork.file_name,
            artist_id: artwork.artist_id,
            artist_name: artwork.artist_name,
            title: artwork.title,
            size: artwork.size,
            material: artwork.material,
            created_at: artwork.created_at,
            updated_at: artwork.updated_at,
        }
    }
}

/// 作品登録フォームのテキスト項目
#[derive(Debug, Clone, Validate)]
pub struct ArtworkFields {
    #[validate(length(max = 255, message = "Title cannot exceed 255 characters"))]
    pub title: String,

    #[validate(length(max = 255, message = "Size cannot exceed 255 characters"))]
    pub size: String,

    #[validate(length(max = 255, message = "Material cannot exceed 255 characters"))]
    pub material: String,
}

/// 作品更新リクエスト
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateArtworkRequest {
    #[validate(
        custom(function = validate_not_blank),
        length(max = 255, message = "Title cannot exceed 255 characters")
    )]
    pub title: Option<String>,

    #[validate(
        custom(function = validate_not_blank),
        length(max = 255, message = "Size cannot exceed 255 characters")
    )]
    pub size: Option<String>,

    #[validate(
        custom(function = validate_not_blank),
        length(max = 255, message = "Material cannot exceed 255 characters")
    )]
    pub material: Option<String>,
}

impl UpdateArtworkRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.size.is_none() && self.material.is_none()
    }
}

impl From<UpdateArtworkRequest> for UpdateArtwork {
    fn from(request: UpdateArtworkRequest) -> Self {
        Self {
            title: request.title,
            size: request.size,
            material: request.material,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArtworkBody {
    pub artwork: ArtworkDto,
}

#[derive(Debug, Serialize)]
pub struct ArtworksBody {
    pub artworks: Vec<ArtworkDto>,
}

impl ArtworksBody {
    pub fn from_models(artworks: Vec<Artwork>) -> Self {
        Self {
            artworks: artworks.into_iter().map(ArtworkDto::from).collect(),
        }
    }
}
