//! 실행 컨텍스트
//!
//! 하나의 `HttpClient`를 공유하는 서비스 묶음입니다. 모든 API 호출과 인증 호출이
//! 같은 토큰 저장소를 통해 헤더를 주입받습니다.

use std::sync::Arc;

use raul_core::api::{ImagesApi, WinnersApi};
use raul_core::router::{Resolved, View};
use raul_core::{AuthService, ClientConfig, FileTokenStore, HttpClient, Router, TokenStore};

use crate::OutputFormat;

pub struct App {
    pub config: ClientConfig,
    pub auth: AuthService,
    pub winners: WinnersApi,
    pub images: ImagesApi,
    pub router: Router<AuthService>,
    pub format: OutputFormat,
}

impl App {
    pub fn new(config: ClientConfig, format: OutputFormat) -> anyhow::Result<Self> {
        let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::open(config.session_file.clone()));
        Self::with_store(config, store, format)
    }

    pub fn with_store(
        config: ClientConfig,
        store: Arc<dyn TokenStore>,
        format: OutputFormat,
    ) -> anyhow::Result<Self> {
        let http = HttpClient::from_config(&config, store)?;
        let auth = AuthService::new(http.clone());

        Ok(Self {
            winners: WinnersApi::new(http.clone()),
            images: ImagesApi::new(http),
            router: Router::new(auth.clone()),
            auth,
            config,
            format,
        })
    }

    /// 화면 진입 (가드 적용)
    ///
    /// 기대한 화면이 렌더링되지 않으면 이유를 담은 에러를 반환합니다.
    pub async fn enter(&self, path: &str, expected: View) -> anyhow::Result<()> {
        match self.router.navigate(path).await {
            Resolved::Render { route, .. } if route.view == expected => Ok(()),
            Resolved::Render { route, .. } if route.view == View::Login => Err(anyhow::anyhow!(
                "Session expired or missing. Use 'raul login' first."
            )),
            Resolved::Render { route, redirects } => Err(anyhow::anyhow!(
                "Redirected to {} ({})",
                redirects.last().map(String::as_str).unwrap_or(route.path),
                route.view
            )),
            Resolved::NotFound { path } => Err(anyhow::anyhow!("No page at {}", path)),
            Resolved::TooManyRedirects { path } => Err(anyhow::anyhow!(
                "Navigation did not settle (last target: {})",
                path
            )),
        }
    }
}
