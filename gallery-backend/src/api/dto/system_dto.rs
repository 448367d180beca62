// gallery-backend/src/api/dto/system_dto.rs

use serde::Serialize;

/// `GET /v1/` のレスポンス
#[derive(Debug, Serialize)]
pub struct VersionBody {
    pub version: &'static str,
}

/// 件数のみを返すレスポンス
#[derive(Debug, Serialize)]
pub struct CountsBody {
    pub counts: i64,
}
