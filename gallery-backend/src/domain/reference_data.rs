// gallery-backend/src/domain/reference_data.rs

//! 一括登録で使う静的な参照データ
//!
//! 起動時に `REFERENCE_DATA_DIR` から以下のJSONを読み込む。
//! ファイルが存在しない場合は空のテーブルとして扱う。
//!
//! * `filenames.json` - 元ファイル名と作品ID・作家IDの対応
//! * `artists.json` - 作家名簿
//! * `artworks.json` - 作品名簿

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

pub const FILE_NAMES_FILE: &str = "filenames.json";
pub const ARTISTS_FILE: &str = "artists.json";
pub const ARTWORKS_FILE: &str = "artworks.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNameEntry {
    /// 拡張子を除いた元ファイル名
    pub before: String,
    pub artwork_id: i32,
    pub artist_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistRosterEntry {
    pub id: i32,
    pub artist_name: String,
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkRosterEntry {
    pub id: i32,
    pub artist_id: i32,
    pub title: String,
    pub size: String,
    pub material: String,
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    file_names: HashMap<String, FileNameEntry>,
    artists: HashMap<i32, ArtistRosterEntry>,
    artworks: HashMap<i32, ArtworkRosterEntry>,
}

impl ReferenceData {
    pub fn new(
        file_names: Vec<FileNameEntry>,
        artists: Vec<ArtistRosterEntry>,
        artworks: Vec<ArtworkRosterEntry>,
    ) -> Self {
        Self {
            file_names: file_names
                .into_iter()
                .map(|entry| (entry.before.clone(), entry))
                .collect(),
            artists: artists.into_iter().map(|a| (a.id, a)).collect(),
            artworks: artworks.into_iter().map(|a| (a.id, a)).collect(),
        }
    }

    /// ディレクトリから3つのJSONを読み込む
    pub async fn load(dir: &Path) -> Result<Self, String> {
        let file_names: Vec<FileNameEntry> = read_table(dir, FILE_NAMES_FILE).await?;
        let artists: Vec<ArtistRosterEntry> = read_table(dir, ARTISTS_FILE).await?;
        let artworks: Vec<ArtworkRosterEntry> = read_table(dir, ARTWORKS_FILE).await?;

        info!(
            dir = %dir.display(),
            file_names = file_names.len(),
            artists = artists.len(),
            artworks = artworks.len(),
            "Reference data loaded"
        );

        Ok(Self::new(file_names, artists, artworks))
    }

    pub fn file_name_entry(&self, stem: &str) -> Option<&FileNameEntry> {
        self.file_names.get(stem)
    }

    pub fn artist(&self, id: i32) -> Option<&ArtistRosterEntry> {
        self.artists.get(&id)
    }

    pub fn artwork(&self, id: i32) -> Option<&ArtworkRosterEntry> {
        self.artworks.get(&id)
    }
}

async fn read_table<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<Vec<T>, String> {
    let path = dir.join(file);
    match tokio::fs::read(&path).await {
        Ok(bytes) => serde_json::from_slice(&bytes)
            .map_err(|e| format!("Failed to parse {}: {}", path.display(), e)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "Reference data file not found, using empty table");
            Ok(Vec::new())
        }
        Err(e) => Err(format!("Failed to read {}: {}", path.display(), e)),
    }
}
