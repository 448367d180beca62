// gallery-backend/src/middleware/session.rs

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use sha2::{Digest, Sha512};
use uuid::Uuid;

pub const SESSION_COOKIE_NAME: &str = "gallery.sid";

/// セッションCookieの有効期限（日）
const SESSION_MAX_AGE_DAYS: i64 = 365;

/// ハンドラーに渡すセッション情報
#[derive(Clone, Debug)]
pub struct SessionContext {
    pub session_id: String,
    /// このリクエストで発行されたセッションか
    pub is_new: bool,
}

/// 署名付きセッションCookieの設定
#[derive(Clone)]
pub struct SessionConfig {
    key: Key,
    secure: bool,
}

impl SessionConfig {
    /// 任意長の秘密値から64バイトの署名鍵を導出する
    pub fn new(secret: &str, secure: bool) -> Self {
        let digest = Sha512::digest(secret.as_bytes());
        Self {
            key: Key::from(digest.as_slice()),
            secure,
        }
    }

    fn build_cookie(&self, session_id: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE_NAME, session_id))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::days(SESSION_MAX_AGE_DAYS))
            .build()
    }
}

/// セッションCookieを検証し、なければ新規発行する
pub async fn session_middleware(
    State(config): State<SessionConfig>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let jar = SignedCookieJar::from_headers(req.headers(), config.key.clone());

    let existing = jar
        .get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string());
    let context = match existing {
        Some(session_id) => SessionContext {
            session_id,
            is_new: false,
        },
        None => SessionContext {
            session_id: Uuid::new_v4().to_string(),
            is_new: true,
        },
    };

    req.extensions_mut().insert(context.clone());
    let response = next.run(req).await;

    if context.is_new {
        let jar = jar.add(config.build_cookie(context.session_id));
        (jar, response).into_response()
    } else {
        response
    }
}
