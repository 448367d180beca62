// gallery-backend/src/api/dto/artist_dto.rs

use crate::api::dto::artwork_dto::ArtworkDto;
use crate::domain::artist_model::Model as Artist;
use crate::repository::artist_repository::ArtistWithArtworks;
use crate::service::artist_service::CropPreview;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 作家フォームのテキスト項目
#[derive(Debug, Clone, Default, Validate)]
pub struct ArtistFields {
    #[validate(length(max = 255, message = "Artist name cannot exceed 255 characters"))]
    pub artist_name: Option<String>,

    pub detail: Option<String>,
}

/// 作家（論理削除日時は含めない）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistDto {
    pub id: i32,
    pub artist_name: Option<String>,
    pub detail: Option<String>,
    pub thumb_file_name: Option<String>,
    pub landscape_file_name: Option<String>,
    pub portrait_file_name: Option<String>,
    pub profile_file_name: Option<String>,
    pub hit_count: i32,
    pub see_more_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// 一覧・詳細取得時のみ
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artworks: Option<Vec<ArtworkDto>>,
}

impl From<Artist> for ArtistDto {
    fn from(artist: Artist) -> Self {
        Self {
            id: artist.id,
            artist_name: artist.artist_name,
            detail: artist.detail,
            thumb_file_name: artist.thumb_file_name,
            landscape_file_name: artist.landscape_file_name,
            portrait_file_name: artist.portrait_file_name,
            profile_file_name: artist.profile_file_name,
            hit_count: artist.hit_count,
            see_more_count: artist.see_more_count,
            created_at: artist.created_at,
            updated_at: artist.updated_at,
            artworks: None,
        }
    }
}

impl From<ArtistWithArtworks> for ArtistDto {
    fn from((artist, artworks): ArtistWithArtworks) -> Self {
        Self {
            artworks: Some(artworks.into_iter().map(ArtworkDto::from).collect()),
            ..Self::from(artist)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArtistBody {
    pub artist: ArtistDto,
}

#[derive(Debug, Serialize)]
pub struct ArtistsBody {
    pub artists: Vec<ArtistDto>,
}

impl ArtistsBody {
    pub fn from_models<T: Into<ArtistDto>>(artists: Vec<T>) -> Self {
        Self {
            artists: artists.into_iter().map(Into::into).collect(),
        }
    }
}

/// 切り出しプレビューの保存先
#[derive(Debug, Serialize)]
pub struct CropBody {
    pub landscape: String,
    pub portrait: String,
}

impl From<CropPreview> for CropBody {
    fn from(preview: CropPreview) -> Self {
        Self {
            landscape: preview.landscape,
            portrait: preview.portrait,
        }
    }
}
