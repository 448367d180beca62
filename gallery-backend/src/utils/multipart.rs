// src/utils/multipart.rs

use crate::error::{AppError, AppResult};
use crate::utils::error_helper::{check_request_error, upload_rejected_error};
use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use std::collections::HashMap;

/// 一括アップロードで受け付ける最大ファイル数
pub const MAX_BULK_FILES: usize = 200;

/// multipart の区切りやテキスト項目のための余裕分
const FORM_OVERHEAD: usize = 1024 * 1024;

/// ファイル数と1ファイルの上限からリクエスト本文の上限を求める
pub fn body_limit(max_file_size: usize, file_count: usize) -> usize {
    max_file_size
        .saturating_mul(file_count)
        .saturating_add(FORM_OVERHEAD)
}

/// アップロードされた1ファイル
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// ファイル項目ごとの受け入れルール
#[derive(Debug, Clone, Copy)]
pub struct FileFieldRule {
    pub name: &'static str,
    pub max_count: usize,
}

impl FileFieldRule {
    pub const fn single(name: &'static str) -> Self {
        Self { name, max_count: 1 }
    }

    pub const fn many(name: &'static str) -> Self {
        Self {
            name,
            max_count: MAX_BULK_FILES,
        }
    }
}

/// multipart 読み込み時の制限
#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    pub files: &'static [FileFieldRule],
    /// 1ファイルあたりの最大バイト数
    pub max_file_size: usize,
}

/// 読み込み済みの multipart フォーム
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, Vec<UploadedFile>>,
}

impl MultipartForm {
    /// フォーム全体を読み込み、ファイル項目の名前・数・サイズを検証する
    pub async fn read(mut multipart: Multipart, limits: &UploadLimits) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = normalize_field_name(field.name().unwrap_or(""));

            let Some(file_name) = field.file_name().map(|n| n.to_string()) else {
                let value = field.text().await.map_err(multipart_error)?;
                form.fields.insert(name, value);
                continue;
            };

            let rule = limits
                .files
                .iter()
                .find(|rule| rule.name == name)
                .ok_or_else(|| {
                    upload_rejected_error(&format!("Unexpected file field: {}", name), "multipart")
                })?;

            let content_type = field
                .content_type()
                .map(|ct| ct.to_string())
                .unwrap_or_else(|| {
                    mime_guess::from_path(&file_name)
                        .first_or_octet_stream()
                        .to_string()
                });
            let data = read_limited(field, limits.max_file_size).await?;

            // ファイル未選択のフォーム送信は空のパートになる
            if file_name.is_empty() && data.is_empty() {
                continue;
            }

            let slot = form.files.entry(name.clone()).or_default();
            if slot.len() >= rule.max_count {
                return Err(upload_rejected_error(
                    &format!("Too many files for field: {}", name),
                    "multipart",
                ));
            }
            slot.push(UploadedFile {
                file_name,
                content_type,
                data,
            });
        }

        Ok(form)
    }

    /// テキスト項目（空白のみは未指定扱い）
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .filter(|v| !v.trim().is_empty())
            .cloned()
    }

    /// 整数のテキスト項目
    pub fn integer(&self, name: &str) -> AppResult<Option<i32>> {
        self.text(name)
            .map(|v| {
                v.trim()
                    .parse::<i32>()
                    .map_err(|_| check_request_error(name, "must be an integer"))
            })
            .transpose()
    }

    pub fn has_file(&self, name: &str) -> bool {
        self.files.get(name).is_some_and(|files| !files.is_empty())
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.get_mut(name).and_then(|files| files.pop())
    }

    pub fn take_files(&mut self, name: &str) -> Vec<UploadedFile> {
        self.files.remove(name).unwrap_or_default()
    }
}

/// `images[]` のような配列表記を `images` に揃える
fn normalize_field_name(name: &str) -> String {
    name.strip_suffix("[]").unwrap_or(name).to_string()
}

async fn read_limited(mut field: Field<'_>, max_size: usize) -> AppResult<Vec<u8>> {
    let mut data = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if data.len() + chunk.len() > max_size {
            return Err(upload_rejected_error(
                &format!("File exceeds the limit of {} bytes", max_size),
                "multipart",
            ));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        upload_rejected_error(&err.body_text(), "multipart")
    } else {
        check_request_error("multipart", &err.body_text())
    }
}
