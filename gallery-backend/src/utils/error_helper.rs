// src/utils/error_helper.rs

//! エラーハンドリングの統一化ヘルパー
//!
//! サービス層とハンドラー層で共通して使うログ付きのエラー生成処理。

use crate::error::AppError;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use tracing::{error, warn};

/// 内部サーバーエラーをログ付きで生成
///
/// # Arguments
/// * `error` - 元のエラー
/// * `context` - エラーが発生したコンテキスト
/// * `user_message` - エラー詳細として残すメッセージ
pub fn internal_server_error<E: std::fmt::Display>(
    error: E,
    context: &str,
    user_message: &str,
) -> AppError {
    error!(
        error = %error,
        context = %context,
        "Internal server error occurred"
    );
    AppError::InternalServerError(user_message.to_string())
}

/// ストレージ書き込み失敗をログ付きで生成
pub fn storage_error<E: std::fmt::Display>(error: E, context: &str, key: &str) -> AppError {
    error!(
        error = %error,
        context = %context,
        key = %key,
        "Storage operation failed"
    );
    AppError::Storage(format!("{}: {}", key, error))
}

/// リクエスト項目の不備をログ付きで生成
pub fn check_request_error(field: &str, message: &str) -> AppError {
    warn!(field = %field, message = %message, "Request check failed");
    AppError::CheckRequest(format!("{}: {}", field, message))
}

/// アップロード拒否をログ付きで生成
pub fn upload_rejected_error(message: &str, context: &str) -> AppError {
    warn!(context = %context, message = %message, "Upload rejected");
    AppError::UploadRejected(message.to_string())
}

/// JSON本文の解析失敗をリクエスト不備として扱う
pub fn json_rejection_error(rejection: JsonRejection) -> AppError {
    check_request_error("body", &rejection.body_text())
}

/// パスパラメータの解析失敗をリクエスト不備として扱う
pub fn path_rejection_error(rejection: PathRejection) -> AppError {
    check_request_error("path", &rejection.body_text())
}

/// multipart以外の本文をリクエスト不備として扱う
pub fn multipart_rejection_error(rejection: MultipartRejection) -> AppError {
    check_request_error("body", &rejection.body_text())
}

/// クエリ文字列の解析失敗をリクエスト不備として扱う
pub fn query_rejection_error(rejection: QueryRejection) -> AppError {
    check_request_error("query", &rejection.body_text())
}

/// Result型にエラー変換ヘルパーメソッドを追加するトレイト
pub trait ErrorHelperExt<T> {
    /// ストレージエラーに変換
    fn map_storage_error(self, context: &str, key: &str) -> Result<T, AppError>;
}

impl<T, E> ErrorHelperExt<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn map_storage_error(self, context: &str, key: &str) -> Result<T, AppError> {
        self.map_err(|e| storage_error(e, context, key))
    }
}
