// src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, RuntimeErr, SqlErr};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

/// レスポンスボディの `error` に載せる数値コード
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    Success,
    CheckRequest,
    EmptyUserId,
    FileEmpty,
    RepFileEmpty,
    RenderedFileEmpty,
    FileMaximumCount,
    UnknownFileName,
    PasswordWrong,
    ArtistAlreadyExists,
    NoSuchArtist,
    NoSuchArtwork,
    UniqueConstraint,
    LostConnection,
    StorageFailure,
    UncaughtError,
}

impl ErrorCode {
    pub fn code(&self) -> u16 {
        match self {
            Self::Success => 0,
            Self::CheckRequest => 100,
            Self::EmptyUserId => 101,
            Self::FileEmpty => 102,
            Self::RepFileEmpty => 103,
            Self::RenderedFileEmpty => 104,
            Self::FileMaximumCount => 105,
            Self::UnknownFileName => 106,
            Self::PasswordWrong => 107,
            Self::ArtistAlreadyExists => 200,
            Self::NoSuchArtist => 201,
            Self::NoSuchArtwork => 202,
            Self::UniqueConstraint => 300,
            Self::LostConnection => 301,
            Self::StorageFailure => 302,
            Self::UncaughtError => 500,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::CheckRequest => "CHECK_REQUEST",
            Self::EmptyUserId => "EMPTY_USER_ID",
            Self::FileEmpty => "FILE_EMPTY",
            Self::RepFileEmpty => "REP_FILE_EMPTY",
            Self::RenderedFileEmpty => "RENDERED_FILE_EMPTY",
            Self::FileMaximumCount => "FILE_MAXIMUM_COUNT",
            Self::UnknownFileName => "UNKNOWN_FILE_NAME",
            Self::PasswordWrong => "PASSWORD_WRONG",
            Self::ArtistAlreadyExists => "ARTIST_ALREADY_EXISTS",
            Self::NoSuchArtist => "NO_SUCH_ARTIST",
            Self::NoSuchArtwork => "NO_SUCH_ARTWORK",
            Self::UniqueConstraint => "UNIQUE_CONSTRAINT",
            Self::LostConnection => "LOST_CONNECTION",
            Self::StorageFailure => "STORAGE_FAILURE",
            Self::UncaughtError => "UNCAUGHT_ERROR",
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Check request: {0}")]
    CheckRequest(String),

    #[error("User id is empty")]
    EmptyUserId,

    #[error("No file was uploaded")]
    FileEmpty,

    #[error("Representative image is missing")]
    RepFileEmpty,

    #[error("Rendered image is missing")]
    RenderedFileEmpty,

    #[error("Upload rejected: {0}")]
    UploadRejected(String),

    #[error("Unknown file name: {0}")]
    UnknownFileName(String),

    #[error("Wrong password")]
    PasswordWrong,

    #[error("Artist {0} already exists")]
    ArtistAlreadyExists(i32),

    #[error("No such artist: {0}")]
    NoSuchArtist(i32),

    #[error("No such artwork: {0}")]
    NoSuchArtwork(i32),

    #[error("Validation failed: {0}")]
    ValidationFailure(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    DbErr(#[from] DbErr),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Route not found: {0}")]
    RouteNotFound(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::CheckRequest(_) | AppError::ValidationFailure(_) => ErrorCode::CheckRequest,
            AppError::EmptyUserId => ErrorCode::EmptyUserId,
            AppError::FileEmpty => ErrorCode::FileEmpty,
            AppError::RepFileEmpty => ErrorCode::RepFileEmpty,
            AppError::RenderedFileEmpty => ErrorCode::RenderedFileEmpty,
            AppError::UploadRejected(_) => ErrorCode::FileMaximumCount,
            AppError::UnknownFileName(_) => ErrorCode::UnknownFileName,
            AppError::PasswordWrong => ErrorCode::PasswordWrong,
            AppError::ArtistAlreadyExists(_) => ErrorCode::ArtistAlreadyExists,
            AppError::NoSuchArtist(_) => ErrorCode::NoSuchArtist,
            AppError::NoSuchArtwork(_) => ErrorCode::NoSuchArtwork,
            AppError::DbErr(db_err) => classify_db_error(db_err),
            AppError::Storage(_) => ErrorCode::StorageFailure,
            AppError::RouteNotFound(_) | AppError::InternalServerError(_) => {
                ErrorCode::UncaughtError
            }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::PasswordWrong => StatusCode::FORBIDDEN,
            AppError::Storage(_) => StatusCode::BAD_GATEWAY,
            AppError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DbErr(_) => match self.error_code() {
                ErrorCode::UniqueConstraint => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// クライアントに返すメッセージ（5xxは詳細を隠す）
    fn public_message(&self) -> String {
        match self.error_code() {
            ErrorCode::LostConnection => "Database connection was lost".to_string(),
            ErrorCode::UniqueConstraint => "A record with the same key already exists".to_string(),
            ErrorCode::StorageFailure => "Failed to store the uploaded file".to_string(),
            ErrorCode::UncaughtError if self.status_code() == StatusCode::NOT_FOUND => {
                "Not found".to_string()
            }
            ErrorCode::UncaughtError => "An internal server error occurred".to_string(),
            _ => self.to_string(),
        }
    }
}

fn classify_db_error(db_err: &DbErr) -> ErrorCode {
    if let Some(SqlErr::UniqueConstraintViolation(_)) = db_err.sql_err() {
        return ErrorCode::UniqueConstraint;
    }
    match db_err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => ErrorCode::LostConnection,
        DbErr::Query(RuntimeErr::SqlxError(sqlx_err))
        | DbErr::Exec(RuntimeErr::SqlxError(sqlx_err))
            if is_connection_error(&sqlx_err.to_string()) =>
        {
            ErrorCode::LostConnection
        }
        _ => ErrorCode::UncaughtError,
    }
}

fn is_connection_error(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("connection refused")
        || message.contains("connection reset")
        || message.contains("pool timed out")
        || message.contains("broken pipe")
}

/// 本番以外でレスポンスに差し込むためのエラー詳細
#[derive(Clone, Debug)]
pub struct ErrorDetail {
    pub status: StatusCode,
    pub code: ErrorCode,
    pub message: String,
    pub detail: String,
}

/// 統一的なエラーレスポンス構造
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorDetail {
    pub fn public_body(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.code.code(),
            message: self.message.clone(),
            name: None,
            detail: None,
        }
    }

    pub fn debug_body(&self) -> ErrorResponse {
        ErrorResponse {
            name: Some(self.code.name().to_string()),
            detail: Some(self.detail.clone()),
            ..self.public_body()
        }
    }
}

// axum でエラーをHTTPレスポンスに変換するための実装
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let detail = ErrorDetail {
            status: self.status_code(),
            code: self.error_code(),
            message: self.public_message(),
            detail: self.to_string(),
        };

        let mut response = (detail.status, Json(detail.public_body())).into_response();
        // ログ出力と開発時の詳細表示は error_detail ミドルウェアが担当する
        response.extensions_mut().insert(detail);
        response
    }
}

// Result 型のエイリアス
pub type AppResult<T> = Result<T, AppError>;
