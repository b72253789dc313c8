//! 인증 헤더를 주입하는 HTTP 클라이언트
//!
//! 모든 요청은 `HttpClient::request`를 통해 생성됩니다. 이 시점에 저장소를 조회하여
//! 토큰이 있으면 `Authorization: Bearer <token>` 헤더를 붙입니다.
//! 토큰이 없어도 요청은 그대로 전송되며, 거부는 서버의 몫입니다.
//!
//! 재시도나 타임아웃 정책은 없습니다. 실패는 호출자에게 그대로 전달됩니다.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::session::TokenStore;

/// 인증 헤더 주입 HTTP 클라이언트
#[derive(Clone)]
pub struct HttpClient {
    inner: Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
}

impl HttpClient {
    /// 새 클라이언트 생성
    ///
    /// base URL과 기본 `Content-Type: application/json` 헤더가 고정됩니다.
    pub fn new(base_url: impl Into<String>, store: Arc<dyn TokenStore>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let inner = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            inner,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
        })
    }

    /// 설정에서 생성
    pub fn from_config(config: &ClientConfig, store: Arc<dyn TokenStore>) -> Result<Self> {
        Self::new(config.api_url.clone(), store)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// 절대 URL 생성
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// 요청 생성 (토큰 주입)
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.inner.request(method, self.url(path));
        self.authorize(req)
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    pub fn put(&self, path: &str) -> RequestBuilder {
        self.request(Method::PUT, path)
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.request(Method::DELETE, path)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.store.get_token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

/// 요청 전송 후 2xx 응답만 반환
pub async fn send(req: RequestBuilder) -> Result<Response> {
    let resp = req.send().await?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(resp)
}

/// 요청 전송 후 JSON 디코딩
pub async fn send_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T> {
    let resp = send(req).await?;
    let body = resp.json::<T>().await?;
    Ok(body)
}
