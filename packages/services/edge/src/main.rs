//! Raul Awards Edge
//!
//! 정적 웹 클라이언트를 HTTPS로 서빙하고, 평문 HTTP 요청은 모두 HTTPS로
//! 리다이렉트합니다.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context as _;
use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod handlers;
mod middleware;

use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 환경변수 로드
    dotenvy::dotenv().ok();

    // 로깅 초기화
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "raul_edge=debug,tower_http=debug".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 설정 로드
    let config = Config::from_env()?;
    tracing::info!("Starting Edge with config: {:?}", config);
    let config = Arc::new(config);

    // TLS 인증서 로드
    let tls = RustlsConfig::from_pem_file(&config.tls_cert, &config.tls_key)
        .await
        .with_context(|| {
            format!(
                "failed to load TLS certificate {} / key {}",
                config.tls_cert.display(),
                config.tls_key.display()
            )
        })?;

    let https_addr = SocketAddr::new(config.bind, config.https_port);
    let http_addr = SocketAddr::new(config.bind, config.http_port);

    let https_app = create_app_router(config.clone());
    let http_app = create_redirect_router(config.clone());

    tracing::info!("HTTPS server listening on {}", https_addr);
    let https_server = axum_server::bind_rustls(https_addr, tls).serve(https_app.into_make_service());

    let listener = TcpListener::bind(http_addr).await?;
    tracing::info!("HTTP server listening on {} (redirecting to HTTPS)", http_addr);
    let http_server = axum::serve(listener, http_app);

    tokio::try_join!(
        async { https_server.await.context("https server failed") },
        async { http_server.await.context("http server failed") },
    )?;

    Ok(())
}

/// HTTPS 라우터 생성
///
/// 정적 파일을 서빙하며, 없는 경로는 `index.html`로 대체합니다
/// (클라이언트 라우팅).
fn create_app_router(config: Arc<Config>) -> Router {
    let index = config.static_dir.join("index.html");
    let assets = ServeDir::new(&config.static_dir).fallback(ServeFile::new(index));

    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))
        // Static assets
        .fallback_service(assets)
        // Middleware
        .layer(from_fn_with_state(config, middleware::enforce_https))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(middleware::request_id))
}

/// 평문 HTTP 라우터 생성 (모든 요청 리다이렉트)
fn create_redirect_router(config: Arc<Config>) -> Router {
    Router::new()
        .fallback(handlers::redirect::redirect_to_https)
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(middleware::request_id))
        .with_state(config)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use super::*;

    fn test_config(static_dir: &Path, https_port: u16) -> Arc<Config> {
        Arc::new(Config {
            bind: "127.0.0.1".parse().unwrap(),
            http_port: 8080,
            https_port,
            static_dir: static_dir.to_path_buf(),
            tls_cert: "cert.pem".into(),
            tls_key: "key.pem".into(),
        })
    }

    fn static_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>app</html>").unwrap();
        std::fs::write(dir.path().join("app.js"), "console.log('raul')").unwrap();
        dir
    }

    async fn body_string(resp: axum::response::Response) -> String {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_plain_http_redirects_permanently() {
        let dir = static_dir();
        let app = create_redirect_router(test_config(dir.path(), 443));

        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/winners?page=2")
                    .header(header::HOST, "raul-awards.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "https://raul-awards.com/winners?page=2"
        );
        assert!(resp.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_plain_http_without_host_is_rejected() {
        let dir = static_dir();
        let app = create_redirect_router(test_config(dir.path(), 443));

        let resp = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
        assert!(body["error"]["requestId"].is_string());
    }

    #[tokio::test]
    async fn test_upstream_request_id_is_kept() {
        let dir = static_dir();
        let app = create_redirect_router(test_config(dir.path(), 443));

        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("x-request-id", "lb-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.headers().get("x-request-id").unwrap(), "lb-42");
        let body: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(body["error"]["requestId"], "lb-42");
    }

    #[tokio::test]
    async fn test_serves_static_assets_and_spa_fallback() {
        let dir = static_dir();
        let app = create_app_router(test_config(dir.path(), 443));

        let resp = app
            .clone()
            .oneshot(Request::builder().uri("/app.js").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "console.log('raul')");

        let resp = app
            .oneshot(Request::builder().uri("/winners").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "<html>app</html>");
    }

    #[tokio::test]
    async fn test_forwarded_http_is_redirected() {
        let dir = static_dir();
        let app = create_app_router(test_config(dir.path(), 8443));

        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/admin")
                    .header(header::HOST, "raul-awards.com")
                    .header("x-forwarded-proto", "http")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "https://raul-awards.com:8443/admin"
        );

        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("x-forwarded-proto", "https")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
