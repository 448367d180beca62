// gallery-backend/src/types/response.rs

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::ErrorCode;

/// 成功レスポンス
///
/// `error: 0` とリソースを同じ階層に並べる（例: `{ "error": 0, "artist": {...} }`）。
#[derive(Serialize, Debug)]
pub struct ApiResponse<T> {
    pub error: u16,
    #[serde(flatten)]
    pub body: T,
}

/// リソースを持たない成功レスポンスの本文
#[derive(Serialize, Debug, Default)]
pub struct EmptyBody {}

impl<T> ApiResponse<T> {
    pub fn success(body: T) -> Self {
        Self {
            error: ErrorCode::Success.code(),
            body,
        }
    }
}

impl ApiResponse<EmptyBody> {
    pub fn ok() -> Self {
        Self::success(EmptyBody::default())
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
