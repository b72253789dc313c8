//! Edge 미들웨어
//!
//! 요청 ID 부여와 프록시 뒤에서의 HTTPS 강제를 담당합니다.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::config::Config;
use crate::handlers::redirect;

const REQUEST_ID_HEADER: &str = "x-request-id";

tokio::task_local! {
    static REQUEST_ID: String;
}

/// 현재 요청의 ID (요청 처리 중에만 존재)
pub fn current_request_id() -> Option<String> {
    REQUEST_ID.try_with(|id| id.clone()).ok()
}

/// 요청 ID 부여
///
/// 프록시가 넘긴 `X-Request-Id`가 있으면 이어서 쓰고, 없으면 새로 만듭니다.
pub async fn request_id(req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.len() <= 128)
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut resp = REQUEST_ID.scope(id.clone(), next.run(req)).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        resp.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    resp
}

/// `X-Forwarded-Proto`가 `https`가 아닌 요청을 HTTPS로 리다이렉트
///
/// 헤더가 없으면 TLS로 직접 들어온 요청으로 보고 통과시킵니다.
pub async fn enforce_https(
    State(config): State<Arc<Config>>,
    req: Request,
    next: Next,
) -> Response {
    let forwarded = req
        .headers()
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_ascii_lowercase());

    match forwarded {
        Some(proto) if proto != "https" => {
            tracing::debug!(
                request_id = current_request_id().as_deref().unwrap_or("-"),
                "Forwarded {} request redirected to HTTPS",
                proto
            );
            match redirect::https_redirect(req.headers(), req.uri(), config.https_port) {
                Ok(resp) => resp,
                Err(e) => e.into_response(),
            }
        }
        _ => next.run(req).await,
    }
}
