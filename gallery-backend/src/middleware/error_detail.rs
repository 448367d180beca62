// gallery-backend/src/middleware/error_detail.rs

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::ErrorDetail;
use crate::logging::RequestContext;

/// エラーレスポンスをログに残し、本番以外では詳細付きの本文に差し替える
pub async fn error_detail_middleware(
    State(config): State<Arc<AppConfig>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let request_id = req
        .extensions()
        .get::<RequestContext>()
        .map(|context| context.request_id.clone())
        .unwrap_or_default();

    let mut response = next.run(req).await;

    let Some(detail) = response.extensions_mut().remove::<ErrorDetail>() else {
        return response;
    };

    if detail.status.is_server_error() {
        tracing::error!(
            request_id = %request_id,
            code = detail.code.name(),
            status = detail.status.as_u16(),
            detail = %detail.detail,
            "Request failed"
        );
    } else {
        tracing::warn!(
            request_id = %request_id,
            code = detail.code.name(),
            status = detail.status.as_u16(),
            detail = %detail.detail,
            "Request rejected"
        );
    }

    if config.is_production() {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    let (_, body) = Json(detail.debug_body()).into_response().into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, body)
}
