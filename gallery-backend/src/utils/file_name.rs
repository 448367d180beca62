// src/utils/file_name.rs

use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// 一括アップロードのファイル名 `{artistId}_...`
static ARTIST_PREFIX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)_").expect("valid artist prefix regex"));

/// レンダリング画像のファイル名 `{artistId}.{ext}`
static RENDERED_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\.[A-Za-z0-9]+$").expect("valid rendered name regex"));

pub const JPEG_EXTENSION: &str = "jpg";

/// ランダムな保存用ファイル名（UUID v4 の SHA-256 を16進表記 + `.jpg`）
pub fn generate_file_name() -> String {
    format!("{}.{}", random_hex(), JPEG_EXTENSION)
}

/// 拡張子を指定したランダムなファイル名
pub fn generate_file_name_with_extension(extension: &str) -> String {
    format!("{}.{}", random_hex(), extension)
}

fn random_hex() -> String {
    let digest = Sha256::digest(Uuid::new_v4().to_string().as_bytes());
    hex::encode(digest)
}

/// パス区切りなどを除去したファイル名
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    base.chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_' || *c == '.')
        .collect::<String>()
        .trim_start_matches('.')
        .to_string()
}

/// 最初の `.` より前の部分
pub fn file_stem(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// `12_portrait.png` → 12
pub fn parse_artist_prefix(file_name: &str) -> Option<i32> {
    ARTIST_PREFIX_REGEX
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// `12.png` → 12
pub fn parse_rendered_artist_id(file_name: &str) -> Option<i32> {
    RENDERED_NAME_REGEX
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
