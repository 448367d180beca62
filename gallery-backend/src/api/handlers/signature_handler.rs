// gallery-backend/src/api/handlers/signature_handler.rs

use crate::api::dto::signature_dto::{
    SignatureBody, SignatureFields, SignatureListQuery, SignaturesBody,
};
use crate::api::dto::system_dto::CountsBody;
use crate::api::AppState;
use crate::error::{AppError, AppResult};
use crate::service::signature_service::NewSignature;
use crate::types::ApiResponse;
use crate::utils::error_helper::{
    check_request_error, multipart_rejection_error, query_rejection_error,
};
use crate::utils::multipart::{body_limit, FileFieldRule, MultipartForm, UploadLimits};
use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::QueryRejection,
        DefaultBodyLimit, Multipart, Query, State,
    },
    routing::get,
    Router,
};
use validator::Validate;

const SIGNATURE_FILES: &[FileFieldRule] = &[FileFieldRule::single("signature")];

/// 署名一覧（管理者パスワードが必要）
pub async fn list_signatures_handler(
    State(app_state): State<AppState>,
    query: Result<Query<SignatureListQuery>, QueryRejection>,
) -> AppResult<ApiResponse<SignaturesBody>> {
    let Query(query) = query.map_err(query_rejection_error)?;
    let signatures = app_state
        .signature_service
        .list(query.password.as_deref())
        .await?;

    Ok(ApiResponse::success(SignaturesBody {
        signatures: signatures.into_iter().map(Into::into).collect(),
    }))
}

/// 署名登録（画像と名前の少なくとも一方が必要）
pub async fn create_signature_handler(
    State(app_state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<ApiResponse<SignatureBody>> {
    let limits = UploadLimits {
        files: SIGNATURE_FILES,
        max_file_size: app_state.config.server.signature_upload_size,
    };
    let multipart = multipart.map_err(multipart_rejection_error)?;
    let mut form = MultipartForm::read(multipart, &limits).await?;

    let user_id = form.text("userId").ok_or(AppError::EmptyUserId)?;
    let file = form.take_file("signature");
    let fields = SignatureFields {
        user_id,
        name: form.text("name"),
        content: form.text("content"),
    };
    if file.is_none() && fields.name.is_none() {
        return Err(check_request_error("signature", "signature or name is required"));
    }
    fields.validate()?;

    let signature = app_state
        .signature_service
        .create(NewSignature {
            user_id: fields.user_id,
            name: fields.name,
            content: fields.content,
            file,
        })
        .await?;

    Ok(ApiResponse::success(SignatureBody {
        signature: signature.into(),
    }))
}

/// 署名数
pub async fn count_signatures_handler(
    State(app_state): State<AppState>,
) -> AppResult<ApiResponse<CountsBody>> {
    let counts = app_state.signature_service.count().await?;
    Ok(ApiResponse::success(CountsBody {
        counts: i64::try_from(counts).unwrap_or(i64::MAX),
    }))
}

pub fn signature_router(app_state: AppState) -> Router {
    let signature_limit = body_limit(app_state.config.server.signature_upload_size, 1);

    Router::new()
        .route(
            "/v1/signature",
            get(list_signatures_handler)
                .post(create_signature_handler)
                .layer(DefaultBodyLimit::max(signature_limit)),
        )
        .route("/v1/signature/count", get(count_signatures_handler))
        .with_state(app_state)
}
