//! HTTP → HTTPS 리다이렉트

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::{HOST, LOCATION};
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use crate::config::Config;
use crate::error::{EdgeError, Result};

/// 평문 리스너의 모든 요청 처리
pub async fn redirect_to_https(
    State(config): State<Arc<Config>>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Response> {
    https_redirect(&headers, &uri, config.https_port)
}

/// `301 Moved Permanently` 응답 생성
pub fn https_redirect(headers: &HeaderMap, uri: &Uri, https_port: u16) -> Result<Response> {
    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| uri.host())
        .filter(|h| !h.trim().is_empty())
        .ok_or_else(|| EdgeError::BadRequest {
            message: "missing Host header".to_string(),
        })?;

    let location = https_location(host, uri, https_port);
    let value = HeaderValue::from_str(&location).map_err(|_| EdgeError::BadRequest {
        message: "invalid Host header".to_string(),
    })?;

    tracing::debug!("Redirecting {} -> {}", uri, location);
    Ok((StatusCode::MOVED_PERMANENTLY, [(LOCATION, value)]).into_response())
}

/// `https://{host}{path?query}`
///
/// 요청 Host의 포트는 버리고, HTTPS 포트가 443이 아니면 붙입니다.
pub fn https_location(host: &str, uri: &Uri, https_port: u16) -> String {
    let host = strip_port(host.trim());
    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    if https_port == 443 {
        format!("https://{}{}", host, path)
    } else {
        format!("https://{}:{}{}", host, https_port, path)
    }
}

fn strip_port(host: &str) -> &str {
    // [::1]:80
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }

    match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}
